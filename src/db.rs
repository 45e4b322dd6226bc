//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create the application tables and indexes if they do not exist yet.
///
/// This is safe to call every time the application starts and any number of
/// times against the same database.
///
/// # Errors
/// Returns an [Error::SqlError] if the database cannot be written to.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    tracing::debug!("database schema is up to date");

    Ok(())
}
