use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

/// What gets deleted once the project is ready.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelfTarget {
    /// The running executable. Windows locks it while running, so deletion
    /// is deferred to after exit.
    RunningExe(Utf8PathBuf),
    /// An explicit file, removed directly.
    File(Utf8PathBuf),
}

impl SelfTarget {
    pub fn running_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("locating the running executable")?;
        let exe = Utf8PathBuf::from_path_buf(exe)
            .map_err(|_| anyhow!("executable path is not valid UTF-8"))?;
        Ok(SelfTarget::RunningExe(exe))
    }

    pub fn path(&self) -> &Utf8Path {
        match self {
            SelfTarget::RunningExe(path) | SelfTarget::File(path) => path,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Removal {
    Removed,
    Absent,
    Planned,
}

impl Removal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Removal::Removed => "removed",
            Removal::Absent => "absent",
            Removal::Planned => "planned",
        }
    }
}

/// Delete the setup file. Only call once every other step has succeeded.
pub fn remove_self(target: &SelfTarget, dry_run: bool) -> Result<Removal> {
    let path = target.path();
    if !path.exists() {
        tracing::debug!(%path, "setup file already gone");
        return Ok(Removal::Absent);
    }

    let name = path.file_name().unwrap_or(path.as_str());
    if dry_run {
        println!("[dry-run] would delete setup file '{}'", name);
        return Ok(Removal::Planned);
    }

    match target {
        SelfTarget::RunningExe(_) => self_replace::self_delete()
            .with_context(|| format!("scheduling deletion of running executable {}", path))?,
        SelfTarget::File(_) => {
            fs::remove_file(path).with_context(|| format!("deleting setup file {}", path))?
        }
    }
    println!("Deleted setup file '{}'", name);
    Ok(Removal::Removed)
}
