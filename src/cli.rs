use std::path::PathBuf;

use clap::Parser;

/// Scaffold a PyQt desktop application skeleton into a directory.
#[derive(Parser, Debug)]
#[command(name = "pyqt-scaffold", version, about = "Create a PyQt desktop project skeleton")]
pub struct Cli {
    /// Project directory (defaults to the current directory; created if missing).
    pub dir: Option<PathBuf>,
    /// Settings file (TOML); defaults to `~/.dev/scaffold.toml` when present.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
    /// Base interpreter used to create the virtual environment.
    #[arg(long = "python")]
    pub python: Option<String>,
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
    /// Skip installing requirements into the environment.
    #[arg(long = "no-install")]
    pub no_install: bool,
    /// Delete the setup executable once the project is ready.
    #[arg(long = "remove-self")]
    pub remove_self: bool,
    /// File to delete instead of the running executable.
    #[arg(long = "self-path")]
    pub self_path: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_dir_and_removal_flags() {
        let cli =
            Cli::try_parse_from(["pyqt-scaffold", "--remove-self", "--self-path", "x", "proj"])
                .unwrap();
        assert!(cli.remove_self);
        assert_eq!(cli.self_path, Some(PathBuf::from("x")));
        assert_eq!(cli.dir, Some(PathBuf::from("proj")));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["pyqt-scaffold", "-vv", "-n"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.dry_run);
    }
}
