use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};

use crate::{process, venv};

pub const REQUIREMENTS: &str = "requirements.txt";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Install {
    Installed,
    Skipped,
    Planned,
}

impl Install {
    pub fn as_str(&self) -> &'static str {
        match self {
            Install::Installed => "installed",
            Install::Skipped => "skipped",
            Install::Planned => "planned",
        }
    }
}

pub fn requirements_path(base: &Utf8Path) -> Utf8PathBuf {
    base.join(REQUIREMENTS)
}

/// Install the manifest into the project's environment with its own pip.
/// A missing manifest is a warning, not an error.
pub fn install_requirements(base: &Utf8Path, dry_run: bool) -> Result<Install> {
    let manifest = requirements_path(base);
    let pip = venv::pip_path(&venv::venv_path(base));
    let step = process::Step {
        label: "pip",
        argv: vec![
            pip.to_string(),
            "install".to_owned(),
            "-r".to_owned(),
            manifest.to_string(),
        ],
        cwd: base,
    };

    // the manifest may not be written yet when only planning
    if dry_run {
        println!("[dry-run] would install requirements: {}", step.render());
        return Ok(Install::Planned);
    }

    if !manifest.exists() {
        println!("[warn] {} not found; skipping dependency install", manifest);
        tracing::warn!(%manifest, "requirements manifest missing");
        return Ok(Install::Skipped);
    }

    println!("Installing requirements from {}", manifest);
    println!("  -> {}", step.render());
    step.run()?;
    println!("     [ok] requirements installed into {}", venv::VENV_DIR);
    Ok(Install::Installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_manifest_is_a_soft_skip() {
        let (_guard, base) = scratch();
        // no environment either: pip must not be looked up
        assert_eq!(install_requirements(&base, false).unwrap(), Install::Skipped);
    }

    #[test]
    fn missing_pip_is_fatal() {
        let (_guard, base) = scratch();
        fs::write(requirements_path(&base), "PyQt6\n").unwrap();

        let err = install_requirements(&base, false).unwrap_err();
        assert!(err.to_string().contains("install -r"));
    }

    #[test]
    fn outcome_labels_feed_the_run_summary() {
        assert_eq!(Install::Installed.as_str(), "installed");
        assert_eq!(Install::Skipped.as_str(), "skipped");
        assert_eq!(Install::Planned.as_str(), "planned");
        assert_eq!(venv::Provision::AlreadyPresent.as_str(), "already-present");
    }

    #[test]
    fn dry_run_plans_without_running() {
        let (_guard, base) = scratch();
        assert_eq!(install_requirements(&base, true).unwrap(), Install::Planned);
    }

    #[cfg(unix)]
    #[test]
    fn runs_environment_pip_against_manifest() {
        use std::os::unix::fs::PermissionsExt;

        let (_guard, base) = scratch();
        fs::write(requirements_path(&base), "PyQt6\n").unwrap();
        let pip = venv::pip_path(&venv::venv_path(&base));
        fs::create_dir_all(pip.parent().unwrap()).unwrap();
        fs::write(&pip, "#!/bin/sh\necho \"$@\" > pip-args.txt\n").unwrap();
        fs::set_permissions(&pip, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(install_requirements(&base, false).unwrap(), Install::Installed);
        let recorded = fs::read_to_string(base.join("pip-args.txt")).unwrap();
        assert_eq!(recorded.trim(), format!("install -r {}", requirements_path(&base)));
    }

    #[cfg(unix)]
    #[test]
    fn failing_pip_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let (_guard, base) = scratch();
        fs::write(requirements_path(&base), "PyQt6\n").unwrap();
        let pip = venv::pip_path(&venv::venv_path(&base));
        fs::create_dir_all(pip.parent().unwrap()).unwrap();
        fs::write(&pip, "#!/bin/sh\nexit 3\n").unwrap();
        fs::set_permissions(&pip, fs::Permissions::from_mode(0o755)).unwrap();

        let err = install_requirements(&base, false).unwrap_err();
        assert!(err.to_string().starts_with("pip failed:"));
        assert!(err.to_string().ends_with("exited with code 3"));
    }
}
