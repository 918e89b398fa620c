mod cleanup;
mod cli;
mod config;
mod install;
mod logging;
mod process;
mod runner;
mod structure;
mod templates;
mod util;
mod venv;

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
