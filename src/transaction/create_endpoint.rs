//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since axum::Form rejects a body with missing fields
// before the handler can re-render the form.
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    month::YearMonth,
    transaction::{TransactionForm, create_page::new_transaction_view, insert_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// Redirects to the ledger for the month of the transaction on success. An
/// invalid form is shown again with its values and a message for each invalid field.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Result<Response, Error> {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(errors) => {
            tracing::debug!("rejected transaction form: {errors:?}");
            return Ok((
                StatusCode::BAD_REQUEST,
                new_transaction_view(&form, &errors),
            )
                .into_response());
        }
    };

    let month = YearMonth::from_date(transaction.txn_date)?;

    {
        let connection = state.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        insert_transaction(transaction, &connection)?;
    }

    Ok(Redirect::to(&endpoints::ledger_for_month(month)).into_response())
}
