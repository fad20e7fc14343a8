pub mod analyzer;
pub mod cli;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod ranking;
pub mod render;
pub mod sources;

#[cfg(test)]
mod test_support;

use tracing_subscriber::EnvFilter;

use crate::analyzer::{AnalyzerClient, PassthroughAnalyzer};
use crate::cli::Cli;
use crate::config::RankerConfig;
use crate::error::RankerError;
use crate::ranking::{parse_patient_ids, RankingOptions, RankingPipeline};
use crate::sources::{FhirRecordSource, FixtureNotesSource, FixtureRecordSource, HttpNotesSource};

/// Initialize tracing. Logs go to stderr; stdout carries only the ranking.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Run one ranking pass as described by the command line.
pub async fn run(cli: Cli) -> Result<(), RankerError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let mut config = RankerConfig::from_env()?;
    cli.apply(&mut config);
    config.validate()?;
    tracing::debug!(?config, "Configuration resolved");

    let patient_ids = parse_patient_ids(&cli.patients);
    if patient_ids.is_empty() {
        return Err(RankerError::NoPatients);
    }

    let options = RankingOptions::from(&config);
    let report = if cli.offline {
        RankingPipeline::new(
            FixtureRecordSource::new(),
            FixtureNotesSource::new(),
            PassthroughAnalyzer,
            options,
        )
        .rank(&patient_ids)
        .await
    } else {
        RankingPipeline::new(
            FhirRecordSource::new(&config.record_source)?,
            HttpNotesSource::new(&config.notes_source)?,
            AnalyzerClient::from_config(&config.analyzer)?,
            options,
        )
        .rank(&patient_ids)
        .await
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli.format.sink().render(&report, &mut out)?;
    Ok(())
}
