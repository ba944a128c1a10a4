use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod domain;
mod logging;
mod services;

use cli::Cli;
use logging::Verbosity;
use services::api::BwlClient;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are printed to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));
    let today = chrono::Local::now().date_naive();

    match run(cli, today) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, today: chrono::NaiveDate) -> anyhow::Result<()> {
    let cfg = cli.into_config()?;
    let client = BwlClient::new(&cfg)?;
    commands::handle_sync(&cfg, &client, today)?;
    Ok(())
}
