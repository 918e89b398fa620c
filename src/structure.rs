use std::fs;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};

use crate::templates;
use crate::util::fs::ensure_dir;

/// One entry in the project layout.
#[derive(Debug)]
pub enum Node {
    /// A directory, created even when it has no children.
    Dir {
        name: &'static str,
        children: &'static [Node],
    },
    /// Files materialized in the enclosing directory, in order.
    Files(&'static [&'static str]),
}

const INIT: &[Node] = &[Node::Files(&["__init__.py"])];

/// Layout of the generated desktop application skeleton.
pub const LAYOUT: &[Node] = &[
    Node::Dir {
        name: "app",
        children: &[
            Node::Dir { name: "controllers", children: INIT },
            Node::Dir { name: "models", children: INIT },
            Node::Dir { name: "ui", children: INIT },
            Node::Dir { name: "utils", children: INIT },
            Node::Files(&["main.py"]),
        ],
    },
    Node::Dir { name: "assets", children: &[] },
    Node::Dir {
        name: "scripts",
        children: &[Node::Files(&["run.bat"])],
    },
    Node::Dir { name: "tests", children: &[] },
    Node::Files(&[".gitignore", "requirements.txt", ".env", "README.md"]),
    Node::Dir {
        name: ".vscode",
        children: &[Node::Files(&["settings.json", "launch.json"])],
    },
];

#[derive(Debug, Default)]
pub struct BuildReport {
    pub created_dirs: Vec<Utf8PathBuf>,
    pub created_files: Vec<Utf8PathBuf>,
    pub skipped: Vec<Utf8PathBuf>,
}

/// Materialize `nodes` under `base`. Existing paths are left untouched.
pub fn build(base: &Utf8Path, nodes: &[Node], dry_run: bool) -> Result<BuildReport> {
    let mut report = BuildReport::default();
    build_into(base, nodes, dry_run, &mut report)?;
    Ok(report)
}

fn build_into(
    base: &Utf8Path,
    nodes: &[Node],
    dry_run: bool,
    report: &mut BuildReport,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Files(names) => {
                for name in names.iter() {
                    write_file(&base.join(name), name, dry_run, report)?;
                }
            }
            Node::Dir { name, children } => {
                let dir = base.join(name);
                if dir.exists() {
                    if !dir.is_dir() {
                        bail!("{} exists but is not a directory", dir);
                    }
                } else {
                    if !dry_run {
                        ensure_dir(&dir).with_context(|| format!("creating directory {}", dir))?;
                    }
                    println!("  created {}/", dir);
                    report.created_dirs.push(dir.clone());
                }
                build_into(&dir, children, dry_run, report)?;
            }
        }
    }
    Ok(())
}

fn write_file(
    path: &Utf8Path,
    name: &str,
    dry_run: bool,
    report: &mut BuildReport,
) -> Result<()> {
    // symlink_metadata so a dangling link still counts as an existing entry
    if path.symlink_metadata().is_ok() {
        tracing::debug!(%path, "already exists, skipping");
        println!("  [skip] {}", path);
        report.skipped.push(path.to_owned());
        return Ok(());
    }

    let text = templates::content(name)?;
    if !dry_run {
        fs::write(path, text.as_bytes()).with_context(|| format!("writing {}", path))?;
    }
    println!("  created {}", path);
    report.created_files.push(path.to_owned());
    Ok(())
}

/// Every relative path the layout produces, directories suffixed with `/`.
pub fn paths(nodes: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    collect_paths("", nodes, &mut out);
    out
}

fn collect_paths(prefix: &str, nodes: &[Node], out: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Files(names) => {
                out.extend(names.iter().map(|name| format!("{prefix}{name}")));
            }
            Node::Dir { name, children } => {
                let dir = format!("{prefix}{name}/");
                out.push(dir.clone());
                collect_paths(&dir, children, out);
            }
        }
    }
}
