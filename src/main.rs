use std::process::ExitCode;

use clap::Parser;
use hah_ranker::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    hah_ranker::init_tracing();
    let cli = Cli::parse();

    match hah_ranker::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Ranking run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
