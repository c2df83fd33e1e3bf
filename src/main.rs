use std::io;
use std::process::ExitCode;

use clap::Parser;
use comtele::cli::{self, Cli, Outcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = comtele::telemetry::init(cli.global.verbose) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut stdout = io::stdout().lock();
    match cli::run(cli, &mut stdout).await {
        Ok(Outcome::Succeeded) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::FAILURE,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
