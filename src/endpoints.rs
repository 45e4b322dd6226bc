//! The URIs served by the application.

use crate::month::YearMonth;

/// The home page with the current month's summary.
pub const ROOT: &str = "/";
/// The page listing the transactions and totals for one month.
pub const LEDGER_VIEW: &str = "/ledger";
/// The page (GET) and form target (POST) for recording a transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transaction/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The ledger page for `month`, e.g. `/ledger?month=2024-06`.
pub fn ledger_for_month(month: YearMonth) -> String {
    format!("{LEDGER_VIEW}?month={month}")
}
