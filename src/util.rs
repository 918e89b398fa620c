/// Shared filesystem helpers.
pub mod fs {
    use std::fs;
    use std::io;

    use anyhow::{Context, Result, anyhow};
    use camino::{Utf8Path, Utf8PathBuf};

    /// Ensure a directory exists, creating it recursively if needed.
    pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    pub fn current_working_dir() -> Result<Utf8PathBuf> {
        let cwd = std::env::current_dir().context("determining current directory")?;
        Utf8PathBuf::from_path_buf(cwd).map_err(|_| anyhow!("current directory is not valid UTF-8"))
    }

    /// Resolve `path` against the current directory when it is relative.
    pub fn absolutize(path: &Utf8Path) -> Result<Utf8PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_owned());
        }
        Ok(current_working_dir()?.join(path))
    }
}
