use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};

use crate::process;

/// Directory, relative to the project root, holding the virtual environment.
pub const VENV_DIR: &str = ".venv";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Provision {
    Created,
    AlreadyPresent,
    Planned,
}

impl Provision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provision::Created => "created",
            Provision::AlreadyPresent => "already-present",
            Provision::Planned => "planned",
        }
    }
}

pub fn default_python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

pub fn venv_path(base: &Utf8Path) -> Utf8PathBuf {
    base.join(VENV_DIR)
}

/// Directory inside the environment holding its executables.
pub fn bin_dir(venv: &Utf8Path) -> Utf8PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

pub fn pip_path(venv: &Utf8Path) -> Utf8PathBuf {
    let pip = if cfg!(windows) { "pip.exe" } else { "pip" };
    bin_dir(venv).join(pip)
}

/// Create the environment with `<python> -m venv .venv` unless it already exists.
pub fn ensure(base: &Utf8Path, python: &str, dry_run: bool) -> Result<Provision> {
    let venv = venv_path(base);
    if venv.exists() {
        println!("[skip] virtual environment already exists at {}", venv);
        return Ok(Provision::AlreadyPresent);
    }

    let step = process::Step {
        label: "venv",
        argv: vec![
            python.to_owned(),
            "-m".to_owned(),
            "venv".to_owned(),
            VENV_DIR.to_owned(),
        ],
        cwd: base,
    };

    if dry_run {
        println!("[dry-run] would create virtual environment: {}", step.render());
        return Ok(Provision::Planned);
    }

    println!("Creating virtual environment at {}", venv);
    println!("  -> {}", step.render());
    step.run()?;
    println!("     [ok] {} ready", VENV_DIR);
    Ok(Provision::Created)
}
