//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::{plural, Out};
use crate::export::write_report;
use crate::{Config, Result};
use std::path::PathBuf;

/// Writes every stored transaction, regardless of month, to a CSV report.
///
/// Returns the path the report was written to.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let store = config.transactions().await?;
    let records = store.transactions();
    write_report(args.output(), records).await?;
    let count = records.len();
    let message = format!(
        "Exported {count} transaction{} to {}",
        plural(count),
        args.output().display()
    );
    Ok(Out::new(message, args.output().to_path_buf()))
}
