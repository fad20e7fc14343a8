use std::io::Write;

use super::{PresentationSink, RenderError};
use crate::ranking::{RankingReport, RankingRow};

const TITLE: &str = "Ranked Patients for Hospital at Home";

const HEADERS: [&str; 10] = [
    "Patient ID",
    "Age",
    "Diagnosis",
    "ED Visits (6M)",
    "O2 Sat (%)",
    "Caregiver",
    "Telehealth",
    "Internet",
    "Priority",
    "Score",
];

/// Fixed-width text table for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSink;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn cells(row: &RankingRow) -> [String; 10] {
    let id = if row.fallbacks.any() {
        format!("{}*", row.patient_id)
    } else {
        row.patient_id.clone()
    };
    [
        id,
        row.age.to_string(),
        row.diagnosis.clone(),
        row.ed_visits.to_string(),
        row.o2_sat.to_string(),
        yes_no(row.caregiver_available).to_string(),
        yes_no(row.telehealth_history).to_string(),
        yes_no(row.internet_access).to_string(),
        row.priority.display_name().to_string(),
        row.priority_score.to_string(),
    ]
}

fn write_line(out: &mut dyn Write, values: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

impl PresentationSink for TableSink {
    fn render(&self, report: &RankingReport, out: &mut dyn Write) -> Result<(), RenderError> {
        writeln!(out, "{TITLE}")?;
        writeln!(out)?;

        if report.rows.is_empty() {
            writeln!(out, "No patients ranked.")?;
            return Ok(());
        }

        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let body: Vec<[String; 10]> = report.rows.iter().map(cells).collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(out, &rule, &widths)?;
        for row in &body {
            write_line(out, row, &widths)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} eligible, {} needs review, {} ineligible",
            report.tally.eligible, report.tally.needs_review, report.tally.ineligible
        )?;
        if report.rows.iter().any(|row| row.fallbacks.any()) {
            writeln!(out, "* built from fallback data; verify before acting")?;
        }
        Ok(())
    }
}
