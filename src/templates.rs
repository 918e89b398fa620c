use std::borrow::Cow;

use anyhow::{Context, Result, anyhow};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "templates"]
struct Assets;

/// File name as materialized on disk, paired with its embedded asset path.
/// Names missing from this table are written out empty.
pub const REGISTRY: &[(&str, &str)] = &[
    ("run.bat", "run.bat"),
    (".gitignore", "gitignore"),
    ("requirements.txt", "requirements.txt"),
    (".env", "env"),
    ("README.md", "README.md"),
    ("settings.json", "vscode/settings.json"),
    ("launch.json", "vscode/launch.json"),
];

pub fn asset_for(name: &str) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, asset)| *asset)
}

/// Text to seed `name` with; empty when no template is registered.
pub fn content(name: &str) -> Result<Cow<'static, str>> {
    let Some(asset) = asset_for(name) else {
        tracing::debug!(file = name, "no template registered, writing empty file");
        return Ok(Cow::Borrowed(""));
    };

    let file =
        Assets::get(asset).ok_or_else(|| anyhow!("embedded template `{}` missing", asset))?;
    let text = std::str::from_utf8(file.data.as_ref())
        .with_context(|| format!("decoding embedded template `{}`", asset))?;
    Ok(Cow::Owned(text.to_owned()))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_template_is_embedded() {
        for (name, asset) in REGISTRY {
            assert!(Assets::get(asset).is_some(), "{name} -> {asset} not embedded");
            assert!(!content(name).unwrap().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn unregistered_names_fall_back_to_empty() {
        assert_eq!(content("__init__.py").unwrap(), "");
        assert_eq!(content("main.py").unwrap(), "");
        assert_eq!(content("does-not-exist.txt").unwrap(), "");
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<_> = REGISTRY.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REGISTRY.len());
    }

    #[test]
    fn every_template_matches_its_literal_exactly() {
        for (name, text) in expected::ALL {
            assert_eq!(content(name).unwrap(), *text, "{name} drifted");
        }
        assert_eq!(expected::ALL.len(), REGISTRY.len());
    }

    #[test]
    fn launch_config_targets_main_entry() {
        let raw = content("launch.json").unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let config = &doc["configurations"][0];
        assert_eq!(config["type"], "debugpy");
        assert_eq!(config["program"], "${workspaceFolder}/app/main.py");
        assert_eq!(config["env"]["PYTHONPATH"], "${workspaceFolder}");
    }

    #[test]
    fn settings_keep_whitespace_only_line() {
        let raw = content("settings.json").unwrap();
        assert!(raw.contains("\"python.envFile\": \"${workspaceFolder}/.env\",\n    \n"));
        assert!(raw.contains("\"python.analysis.typeCheckingMode\": \"standard\""));
    }
}
