//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use time::{Date, OffsetDateTime};

use crate::{Error, category::Category, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// Both types, in the order they are offered on the entry form.
    pub const ALL: [TransactionType; 2] = [TransactionType::Expense, TransactionType::Income];

    /// The value stored in the database and submitted by the entry form.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "収入",
            TransactionType::Expense => "支出",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string is neither "income" nor "expense".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction type")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(UnknownTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An income or expense recorded in the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// Whether this is income or an expense.
    pub txn_type: TransactionType,
    /// The category label, e.g. "食費".
    pub category: String,
    /// The day the transaction happened.
    pub txn_date: Date,
    /// The amount in the smallest currency unit.
    ///
    /// Read as the full width of the storage column so rows written by other
    /// tools still list.
    pub amount: i64,
    /// An optional note.
    pub memo: Option<String>,
    /// When the row was written, in UTC.
    pub created_at: OffsetDateTime,
}

/// The validated fields for a transaction that has not been saved yet.
///
/// Use [crate::transaction::TransactionForm::validate] to build one from
/// user input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Whether this is income or an expense.
    pub txn_type: TransactionType,
    /// The budget category.
    pub category: Category,
    /// The day the transaction happened.
    pub txn_date: Date,
    /// The amount in the smallest currency unit.
    pub amount: u32,
    /// An optional note.
    pub memo: Option<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const CREATE_TRANSACTION_TABLE: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    txn_type TEXT NOT NULL CHECK (txn_type IN ('income', 'expense')),
    category TEXT NOT NULL,
    txn_date TEXT NOT NULL CHECK (date(txn_date) IS txn_date),
    amount INTEGER NOT NULL CHECK (amount >= 0),
    memo TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_transactions_txn_date ON transactions(txn_date);
CREATE INDEX IF NOT EXISTS idx_transactions_type_date ON transactions(txn_type, txn_date);
";

/// Create the transaction table and its indexes if they do not exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(CREATE_TRANSACTION_TABLE)
}

/// Save a new transaction and return its ID.
///
/// The row is written in autocommit mode, so it is durable once this returns.
/// `created_at` is left to the column default so every row stores it the same way.
///
/// # Errors
/// Returns an [Error::SqlError] if the row could not be written.
pub fn insert_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    let id = connection
        .prepare(
            "INSERT INTO transactions (txn_type, category, txn_date, amount, memo)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
        )?
        .query_row(
            (
                transaction.txn_type,
                transaction.category.as_str(),
                transaction.txn_date,
                transaction.amount,
                transaction.memo,
            ),
            |row| row.get(0),
        )?;

    tracing::debug!(
        "created {} transaction {id} dated {}",
        transaction.txn_type,
        transaction.txn_date
    );

    Ok(id)
}

/// Map a database row to a [Transaction].
///
/// Expects the columns `id, txn_type, category, txn_date, amount, memo,
/// created_at` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        txn_type: row.get(1)?,
        category: row.get(2)?,
        txn_date: row.get(3)?,
        amount: row.get(4)?,
        memo: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Get the total number of transactions in the database.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions", [], |row| row.get(0))
        .map_err(|error| error.into())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        Error,
        category::Category,
        db::initialize,
        transaction::{
            NewTransaction, TransactionType, count_transactions, insert_transaction,
            map_transaction_row,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn lunch() -> NewTransaction {
        NewTransaction {
            txn_type: TransactionType::Expense,
            category: Category::Food,
            txn_date: date!(2024 - 06 - 15),
            amount: 1200,
            memo: Some("lunch".to_owned()),
        }
    }

    #[test]
    fn insert_returns_increasing_ids() {
        let conn = get_test_connection();

        let first = insert_transaction(lunch(), &conn).unwrap();
        let second = insert_transaction(lunch(), &conn).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(count_transactions(&conn).unwrap(), 2);
    }

    #[test]
    fn insert_stores_every_field() {
        let conn = get_test_connection();

        let id = insert_transaction(lunch(), &conn).unwrap();

        let got = conn
            .query_row(
                "SELECT id, txn_type, category, txn_date, amount, memo, created_at
                 FROM transactions WHERE id = ?1",
                [id],
                map_transaction_row,
            )
            .unwrap();
        assert_eq!(got.id, id);
        assert_eq!(got.txn_type, TransactionType::Expense);
        assert_eq!(got.category, "食費");
        assert_eq!(got.txn_date, date!(2024 - 06 - 15));
        assert_eq!(got.amount, 1200);
        assert_eq!(got.memo.as_deref(), Some("lunch"));
    }

    #[test]
    fn created_at_is_stored_as_sqlite_timestamp() {
        let conn = get_test_connection();
        let before = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();

        let id = insert_transaction(lunch(), &conn).unwrap();

        let after = OffsetDateTime::now_utc();
        let (stored, created_at): (String, OffsetDateTime) = conn
            .query_row(
                "SELECT created_at, created_at FROM transactions WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(stored.len(), "2024-06-15 12:34:56".len(), "got {stored:?}");
        assert!(
            before <= created_at && created_at <= after,
            "want {created_at} between {before} and {after}"
        );
    }

    #[test]
    fn inserted_and_defaulted_rows_store_created_at_alike() {
        let conn = get_test_connection();
        insert_transaction(lunch(), &conn).unwrap();
        conn.execute(
            "INSERT INTO transactions (txn_type, category, txn_date, amount)
             VALUES ('income', '給与', '2024-06-25', 250000)",
            (),
        )
        .unwrap();

        let formats: Vec<(i64, bool)> = conn
            .prepare(
                "SELECT length(created_at), created_at = datetime(created_at)
                 FROM transactions ORDER BY id",
            )
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .map(|row| row.unwrap())
            .collect();

        assert_eq!(formats, vec![(19, true), (19, true)]);
    }

    #[test]
    fn reads_amounts_wider_than_the_form_accepts() {
        let conn = get_test_connection();
        let large_amount = i64::from(u32::MAX) + 1;
        conn.execute(
            "INSERT INTO transactions (txn_type, category, txn_date, amount)
             VALUES ('income', '臨時収入', '2024-06-01', ?1)",
            [large_amount],
        )
        .unwrap();

        let got = conn
            .query_row(
                "SELECT id, txn_type, category, txn_date, amount, memo, created_at FROM transactions",
                [],
                map_transaction_row,
            )
            .unwrap();

        assert_eq!(got.amount, large_amount);
    }

    #[test]
    fn insert_without_schema_is_an_sql_error() {
        let conn = Connection::open_in_memory().unwrap();

        let result = insert_transaction(lunch(), &conn);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SqlError, got {result:?}"
        );
    }

    #[test]
    fn insert_without_memo_stores_null() {
        let conn = get_test_connection();
        let transaction = NewTransaction {
            memo: None,
            ..lunch()
        };

        let id = insert_transaction(transaction, &conn).unwrap();

        let is_null: bool = conn
            .query_row(
                "SELECT memo IS NULL FROM transactions WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .unwrap();
        assert!(is_null);
    }

    #[test]
    fn storage_rejects_negative_amount() {
        let conn = get_test_connection();

        let result = conn.execute(
            "INSERT INTO transactions (txn_type, category, txn_date, amount)
             VALUES ('expense', '食費', '2024-06-15', -1)",
            (),
        );

        assert!(result.is_err(), "want negative amount to be rejected");
    }

    #[test]
    fn storage_rejects_unknown_type() {
        let conn = get_test_connection();

        let result = conn.execute(
            "INSERT INTO transactions (txn_type, category, txn_date, amount)
             VALUES ('transfer', '食費', '2024-06-15', 1)",
            (),
        );

        assert!(result.is_err(), "want unknown transaction type to be rejected");
    }

    #[test]
    fn storage_rejects_impossible_date() {
        let conn = get_test_connection();

        for bad_date in ["2024-02-30", "2024-6-15", "yesterday"] {
            let result = conn.execute(
                "INSERT INTO transactions (txn_type, category, txn_date, amount)
                 VALUES ('expense', '食費', ?1, 1)",
                [bad_date],
            );

            assert!(result.is_err(), "want date {bad_date:?} to be rejected");
        }
    }

    #[test]
    fn reading_an_unknown_type_fails() {
        let conn = get_test_connection();
        // Bypass the CHECK constraint to simulate a corrupted row.
        conn.execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO transactions (txn_type, category, txn_date, amount)
             VALUES ('transfer', '食費', '2024-06-15', 1);
             PRAGMA ignore_check_constraints = OFF;",
        )
        .unwrap();

        let result = conn.query_row(
            "SELECT id, txn_type, category, txn_date, amount, memo, created_at FROM transactions",
            [],
            map_transaction_row,
        );

        assert!(result.is_err());
    }
}

#[cfg(test)]
mod transaction_type_tests {
    use super::{TransactionType, UnknownTransactionType};

    #[test]
    fn parses_stored_values() {
        for transaction_type in TransactionType::ALL {
            assert_eq!(
                transaction_type.as_str().parse::<TransactionType>(),
                Ok(transaction_type)
            );
        }
    }

    #[test]
    fn rejects_labels_and_other_casing() {
        for text in ["Income", "EXPENSE", "収入", ""] {
            assert_eq!(
                text.parse::<TransactionType>(),
                Err(UnknownTransactionType(text.to_owned()))
            );
        }
    }
}
