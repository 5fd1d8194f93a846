//! Renders the full transaction sequence as a CSV report.
//!
//! Fields are written as-is with no quoting, so a description or category containing a comma
//! shifts the columns of its line.

use crate::model::Transaction;
use crate::{utils, Result};
use anyhow::{anyhow, Context};
use std::path::Path;

pub const DEFAULT_REPORT: &str = "budget-report.csv";

const HEADER: [&str; 5] = ["Description", "Amount", "Type", "Category", "Month"];

/// Produces the CSV text: a header line and one line per record, in record order.
pub fn to_csv(records: &[Transaction]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(HEADER)
        .context("Unable to write CSV header")?;
    for t in records {
        let amount = t.amount().to_string();
        wtr.write_record([
            t.text(),
            amount.as_str(),
            t.r#type().as_str(),
            t.category(),
            t.month(),
        ])
        .with_context(|| format!("Unable to write CSV line for transaction {}", t.id()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("Unable to finish CSV report: {e}"))?;
    String::from_utf8(bytes).context("CSV report is not valid UTF-8")
}

/// Writes the CSV report for `records` to `path`.
pub async fn write_report(path: &Path, records: &[Transaction]) -> Result<()> {
    let csv = to_csv(records)?;
    utils::write(path, csv).await
}
