//! unfurl - download an archive and unpack it into place.

mod cli;
mod commands;
mod error;
mod fetch;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(&cli);

    match commands::extract::execute(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            error::exit_code(&err)
        }
    }
}
