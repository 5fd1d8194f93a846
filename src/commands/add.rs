//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::{Config, Result};
use anyhow::Context;
use chrono::Local;

/// Validates and records a new transaction, then writes the full transaction list back to the
/// store.
///
/// When no month is given the current local month is used.
///
/// # Returns
///
/// On success, returns an `Out` containing a message and the stored `Transaction`, including its
/// assigned id.
///
/// # Errors
///
/// - A `ValidationError` if the text is blank, the amount is zero or not a number, or the month
///   is empty. Nothing is written in that case.
/// - Returns an error if the store cannot be read or written.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let mut store = config.transactions().await?;
    let new = args.to_new_transaction(&current_month());
    let added = store
        .add(new)
        .await?
        .last()
        .cloned()
        .context("The added transaction is missing from the store")?;
    let message = format!(
        "Added {} '{}' of {} for {} with id {}",
        added.r#type(),
        added.text(),
        added.amount().display_with(config.currency_symbol()),
        added.month(),
        added.id()
    );
    Ok(Out::new(message, added))
}

/// The current local month as `YYYY-MM`.
fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Kind;
    use crate::error::{Field, ValidationError};
    use crate::model::TransactionType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_add_success() {
        let env = TestEnv::new().await;
        let args = AddArgs::new("Salary", 1000.0, Kind::Income, "Job", Some("2024-05".into()));
        let out = add(env.config(), args).await.unwrap();

        assert!(out.message().contains("Added income 'Salary' of ₱1,000.00 for 2024-05"));
        let added = out.structure().unwrap();
        assert_eq!(added.r#type(), &TransactionType::Income);

        let stored = env.transactions().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(&stored[0], added);
    }

    #[tokio::test]
    async fn test_add_defaults_to_current_month() {
        let env = TestEnv::new().await;
        let args = AddArgs::new("Coffee", 3.5, Kind::Expense, "", None);
        let out = add(env.config(), args).await.unwrap();
        let month = out.structure().unwrap().month().to_string();
        assert_eq!(month, current_month());
        assert_eq!(month.len(), 7);
        assert_eq!(&month[4..5], "-");
    }

    #[tokio::test]
    async fn test_add_validation_error() {
        let env = TestEnv::new().await;
        let args = AddArgs::new("  ", 0.0, Kind::Expense, "", Some("2024-05".into()));
        let err = add(env.config(), args).await.unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.fields(), &[Field::Text, Field::Amount]);
        assert!(env.transactions().await.is_empty());
        assert!(!env.config().store_dir().join("transactions.json").exists());
    }
}
