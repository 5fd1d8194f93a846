//! Remove command handler.

use crate::args::RemoveArgs;
use crate::commands::{plural, Out};
use crate::model::Transaction;
use crate::{Config, Result};

/// Removes the transaction with the given id and writes the remaining transactions back to the
/// store. An id that is not present is not an error; the store is written back unchanged.
///
/// Returns the remaining transactions.
pub async fn remove(config: Config, args: RemoveArgs) -> Result<Out<Vec<Transaction>>> {
    let id = args.id();
    let mut store = config.transactions().await?;
    let before = store.transactions().len();
    let remaining = store.remove(id).await?.to_vec();
    let count = remaining.len();
    let message = if count < before {
        format!("Removed transaction {id}, {count} transaction{} left", plural(count))
    } else {
        format!("No transaction with id {id}, nothing removed")
    };
    Ok(Out::new(message, remaining))
}
