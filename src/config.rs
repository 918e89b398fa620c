use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Optional settings file, `~/.dev/scaffold.toml` by default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub python: Option<String>,
    pub install: Option<bool>,
    pub remove_self: Option<bool>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SettingsSource {
    Explicit,
    HomeDefault,
    BuiltIn,
}

impl SettingsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsSource::Explicit => "explicit",
            SettingsSource::HomeDefault => "home-default",
            SettingsSource::BuiltIn => "built-in",
        }
    }
}

#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: Option<Utf8PathBuf>,
    pub source: SettingsSource,
}

pub fn load_from_path(path: &Utf8Path) -> Result<Settings> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading settings {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing settings {}", path))
}

pub fn home_default_path() -> Option<Utf8PathBuf> {
    let home = dirs::home_dir()?;
    let path = home.join(".dev").join("scaffold.toml");
    Utf8PathBuf::from_path_buf(path).ok()
}

/// An explicit path must exist; the home default is used only when present.
pub fn resolve(explicit: Option<&Utf8Path>) -> Result<LoadedSettings> {
    resolve_with(explicit, home_default_path())
}

fn resolve_with(
    explicit: Option<&Utf8Path>,
    home_default: Option<Utf8PathBuf>,
) -> Result<LoadedSettings> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("settings file {} does not exist", path);
        }
        return Ok(LoadedSettings {
            settings: load_from_path(path)?,
            path: Some(path.to_owned()),
            source: SettingsSource::Explicit,
        });
    }

    match home_default {
        Some(path) if path.is_file() => Ok(LoadedSettings {
            settings: load_from_path(&path)?,
            path: Some(path),
            source: SettingsSource::HomeDefault,
        }),
        _ => Ok(LoadedSettings {
            settings: Settings::default(),
            path: None,
            source: SettingsSource::BuiltIn,
        }),
    }
}

pub fn format_summary(loaded: &LoadedSettings) -> String {
    let mut out = String::new();
    let location = loaded
        .path
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "<none>".to_owned());
    let settings = &loaded.settings;
    let _ = writeln!(out, "Settings: {} ({})", location, loaded.source.as_str());
    let _ = writeln!(
        out,
        "  python={}, install={}, remove_self={}",
        settings.python.as_deref().unwrap_or("<unset>"),
        display_flag(settings.install),
        display_flag(settings.remove_self)
    );
    out
}

fn display_flag(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "true",
        Some(false) => "false",
        None => "<unset>",
    }
}
