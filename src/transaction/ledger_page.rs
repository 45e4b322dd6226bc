//! Defines the route handler for the page that shows one month of the ledger.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    month::YearMonth,
    navigation::NavBar,
    timezone::today,
    transaction::{
        MonthSummary, Transaction, list_transactions_for_month, summarize_month,
        view::{month_summary_view, transactions_table},
    },
};

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the ledger page.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    /// The month to show as `YYYY-MM`. Missing or empty means the current month.
    pub month: Option<String>,
}

impl LedgerQuery {
    fn resolve(&self, local_timezone: &str) -> Result<YearMonth, Error> {
        match self.month.as_deref().map(str::trim) {
            None | Some("") => YearMonth::from_date(today(local_timezone)?),
            Some(month) => month.parse(),
        }
    }
}

/// Render the summary and transactions for one month.
pub async fn get_ledger_page(
    State(state): State<LedgerPageState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Response, Error> {
    let month = query.resolve(&state.local_timezone)?;

    let (summary, transactions) = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        (
            summarize_month(month, &connection)?,
            list_transactions_for_month(month, &connection)?,
        )
    };

    Ok(ledger_view(month, &summary, &transactions).into_response())
}

fn month_nav_link(month: Option<YearMonth>, text: &str) -> Markup {
    html! {
        @match month {
            Some(month) => {
                a href=(endpoints::ledger_for_month(month)) class=(LINK_STYLE) { (text) }
            }
            None => {
                span class="text-gray-400" { (text) }
            }
        }
    }
}

fn month_navigation(month: YearMonth) -> Markup {
    html! {
        div class="flex flex-wrap items-center justify-between gap-4 w-full max-w-4xl"
        {
            span id="previous-month" { (month_nav_link(month.previous(), "← 前月")) }

            form
                method="get"
                action=(endpoints::LEDGER_VIEW)
                class="flex items-center gap-2"
            {
                label for="month" class="sr-only" { "年月" }
                input
                    name="month"
                    id="month"
                    type="month"
                    value=(month)
                    class=(FORM_TEXT_INPUT_STYLE);
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "表示" }
            }

            span id="next-month" { (month_nav_link(month.next(), "翌月 →")) }
        }
    }
}

fn ledger_view(month: YearMonth, summary: &MonthSummary, transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW).into_html();
    let heading = format!("{}年{}月", month.year(), u8::from(month.month()));

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { (heading) }

            (month_navigation(month))
            (month_summary_view(summary))
            (transactions_table(transactions))
        }
    };

    base("家計簿", &[], &content)
}
