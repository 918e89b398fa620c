use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result, bail};
use camino::Utf8Path;

/// One provisioning step run as a child process, e.g. `venv` or `pip`.
#[derive(Debug)]
pub struct Step<'a> {
    pub label: &'a str,
    pub argv: Vec<String>,
    pub cwd: &'a Utf8Path,
}

impl Step<'_> {
    pub fn render(&self) -> String {
        format_command(&self.argv)
    }

    /// Block until the child exits, relaying its output tagged with the step
    /// label. Any non-zero exit aborts the run.
    pub fn run(&self) -> Result<()> {
        if self.argv.is_empty() {
            bail!("{}: invalid command, empty argv", self.label);
        }
        let status = self.spawn_and_wait()?;
        if status.success() {
            tracing::info!(step = self.label, "child exited cleanly");
            return Ok(());
        }
        bail!(
            "{} failed: `{}` exited with {}",
            self.label,
            self.render(),
            describe(status)
        )
    }

    fn spawn_and_wait(&self) -> Result<ExitStatus> {
        let mut child = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .current_dir(self.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("{}: executing `{}`", self.label, self.render()))?;

        let relays: Vec<_> = [
            child.stdout.take().map(|p| Box::new(p) as Box<dyn Read + Send>),
            child.stderr.take().map(|p| Box::new(p) as Box<dyn Read + Send>),
        ]
        .into_iter()
        .flatten()
        .map(|pipe| relay(self.label.to_owned(), pipe))
        .collect();

        for handle in relays {
            let _ = handle.join();
        }

        child
            .wait()
            .with_context(|| format!("{}: waiting on `{}`", self.label, self.render()))
    }
}

fn relay(label: String, pipe: Box<dyn Read + Send>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(pipe).lines().map_while(Result::ok) {
            println!("     {} | {}", label, line);
        }
    })
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_owned(),
    }
}

pub fn format_command(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("\"{}\"", arg.replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
