use std::io::Write;

use super::{PresentationSink, RenderError};
use crate::ranking::RankingReport;

/// Pretty-printed JSON of the whole report.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl PresentationSink for JsonSink {
    fn render(&self, report: &RankingReport, out: &mut dyn Write) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}
