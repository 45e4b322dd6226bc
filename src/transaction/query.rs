//! Month-bounded queries over the transactions table.

use rusqlite::Connection;

use crate::{
    Error,
    month::YearMonth,
    transaction::core::{Transaction, map_transaction_row},
};

/// The income, expenses and balance for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthSummary {
    /// The sum of all income in the month.
    pub income_total: i64,
    /// The sum of all expenses in the month.
    pub expense_total: i64,
    /// `income_total - expense_total`.
    pub balance: i64,
}

impl MonthSummary {
    /// Build a summary from the two totals.
    pub fn new(income_total: i64, expense_total: i64) -> Self {
        Self {
            income_total,
            expense_total,
            balance: income_total - expense_total,
        }
    }
}

/// Get the transactions dated within `month`.
///
/// The most recent transactions come first. Transactions on the same day are
/// ordered by newest insert first.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn list_transactions_for_month(
    month: YearMonth,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let range = month.range();

    connection
        .prepare(
            "SELECT id, txn_type, category, txn_date, amount, memo, created_at
             FROM transactions
             WHERE txn_date >= :start AND txn_date < :end
             ORDER BY txn_date DESC, id DESC",
        )?
        .query_map(
            &[(":start", &range.start), (":end", &range.end)],
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Total the income and expenses dated within `month`.
///
/// A month without any transactions has zero totals.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn summarize_month(month: YearMonth, connection: &Connection) -> Result<MonthSummary, Error> {
    let range = month.range();

    let (income_total, expense_total): (i64, i64) = connection
        .prepare(
            "SELECT
                COALESCE(SUM(CASE WHEN txn_type = 'income' THEN amount END), 0),
                COALESCE(SUM(CASE WHEN txn_type = 'expense' THEN amount END), 0)
             FROM transactions
             WHERE txn_date >= :start AND txn_date < :end",
        )?
        .query_row(&[(":start", &range.start), (":end", &range.end)], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;

    Ok(MonthSummary::new(income_total, expense_total))
}
