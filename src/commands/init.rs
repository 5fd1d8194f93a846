use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its `store` subdirectory and an initial `config.json`.
///
/// # Arguments
/// - `budget_home` - The directory that will be the root of data directory, e.g. `$HOME/budget`
/// - `currency_symbol` - Shown in front of amounts when listing transactions
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(budget_home: &Path, currency_symbol: &str) -> Result<Out<()>> {
    let config = Config::create(budget_home, currency_symbol)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the budget directory at {}",
        config.root().display()
    )
    .into())
}
