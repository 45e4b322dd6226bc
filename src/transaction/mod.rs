//! Transactions: recording income and expenses and reading them back a month at a time.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `NewTransaction` insert payload
//! - Database functions for storing transactions and summarising a month
//! - The entry form with its validation
//! - View handlers for the ledger and new transaction pages

mod core;
mod create_endpoint;
mod create_page;
mod form;
mod ledger_page;
mod query;
mod view;

pub use core::{
    NewTransaction, Transaction, TransactionType, create_transaction_table, insert_transaction,
    map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use form::TransactionForm;
pub use ledger_page::get_ledger_page;
pub use query::{MonthSummary, list_transactions_for_month, summarize_month};
pub(crate) use view::{month_summary_view, transactions_table};

#[cfg(test)]
pub use core::count_transactions;
