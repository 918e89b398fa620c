use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

use crate::cleanup::SelfTarget;
use crate::cli::Cli;
use crate::config::{self, Settings};
use crate::structure::{self, LAYOUT};
use crate::util::fs::{absolutize, current_working_dir, ensure_dir};
use crate::{cleanup, install, venv};

/// Everything a run needs, resolved from flags, settings and defaults.
#[derive(Clone, Debug)]
struct Plan {
    base: Utf8PathBuf,
    python: String,
    install: bool,
    remove_target: Option<SelfTarget>,
    dry_run: bool,
}

impl Plan {
    fn resolve(cli: Cli, settings: Settings) -> Result<Self> {
        let base = match cli.dir {
            Some(dir) => absolutize(&to_utf8(dir)?)?,
            None => current_working_dir()?,
        };

        let python = cli
            .python
            .or(settings.python)
            .unwrap_or_else(|| venv::default_python().to_owned());
        let install = !cli.no_install && settings.install.unwrap_or(true);

        let remove_target = if cli.remove_self || settings.remove_self.unwrap_or(false) {
            let target = match cli.self_path {
                Some(path) => SelfTarget::File(absolutize(&to_utf8(path)?)?),
                None => SelfTarget::running_exe()?,
            };
            Some(target)
        } else {
            None
        };

        Ok(Self {
            base,
            python,
            install,
            remove_target,
            dry_run: cli.dry_run,
        })
    }

}

/// Name of the project directory, resolving `..` and `.` when it exists.
fn project_name(base: &Utf8Path) -> String {
    let resolved = base.canonicalize_utf8().unwrap_or_else(|_| base.to_owned());
    resolved
        .file_name()
        .or_else(|| base.file_name())
        .unwrap_or(resolved.as_str())
        .to_owned()
}

pub fn run(cli: Cli) -> Result<()> {
    let explicit = cli.file.clone().map(to_utf8).transpose()?;
    let loaded = config::resolve(explicit.as_deref())?;
    tracing::info!("{}", config::format_summary(&loaded).trim_end());

    let plan = Plan::resolve(cli, loaded.settings)?;
    tracing::debug!(?plan, "resolved plan");
    execute(&plan)
}

fn execute(plan: &Plan) -> Result<()> {
    let base = plan.base.as_path();
    if plan.dry_run {
        println!(
            "[dry-run] nothing will be written under {} ({} layout entries)",
            base,
            structure::paths(LAYOUT).len()
        );
    } else {
        ensure_dir(base).with_context(|| format!("creating project directory {}", base))?;
    }

    println!("Creating project structure in {}", base);
    let report = structure::build(base, LAYOUT, plan.dry_run)?;
    tracing::info!(
        dirs = report.created_dirs.len(),
        files = report.created_files.len(),
        skipped = report.skipped.len(),
        "structure ready"
    );

    let provision = venv::ensure(base, &plan.python, plan.dry_run)?;

    let installed = if plan.install {
        install::install_requirements(base, plan.dry_run)?.as_str()
    } else {
        println!("[skip] dependency install disabled");
        "disabled"
    };

    println!("Project '{}' created successfully!", project_name(base));
    tracing::info!(venv = provision.as_str(), install = installed, "project ready");

    if let Some(target) = &plan.remove_target {
        let removal = cleanup::remove_self(target, plan.dry_run)?;
        tracing::info!(path = %target.path(), removal = removal.as_str(), "setup file");
    }
    Ok(())
}

fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| anyhow!("path {} is not valid UTF-8", p.display()))
}
