//! The home page: this month's totals and transactions at a glance.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, link},
    month::YearMonth,
    navigation::NavBar,
    timezone::today,
    transaction::{
        MonthSummary, Transaction, list_transactions_for_month, month_summary_view,
        summarize_month, transactions_table,
    },
};

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the summary and transactions for the current month.
pub async fn get_home_page(State(state): State<HomePageState>) -> Result<Response, Error> {
    let month = YearMonth::from_date(today(&state.local_timezone)?)?;

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

    Ok(home_view(month, &summary, &transactions).into_response())
}

fn home_view(month: YearMonth, summary: &MonthSummary, transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex items-center justify-between w-full max-w-4xl"
            {
                h1 class="text-2xl font-bold" { "今月の収支（" (month) "）" }

                a href=(endpoints::NEW_TRANSACTION_VIEW)
                {
                    button class=(BUTTON_PRIMARY_STYLE) { "記帳する" }
                }
            }

            (month_summary_view(summary))
            (transactions_table(transactions))

            @if let Some(previous) = month.previous() {
                p class="mt-4"
                {
                    (link(&endpoints::ledger_for_month(previous), "過去の月を見る"))
                }
            }
        }
    };

    base("ホーム", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::{Duration, Month};

    use crate::{
        category::Category,
        db::initialize,
        month::YearMonth,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
        timezone::today,
        transaction::{MonthSummary, NewTransaction, TransactionType, insert_transaction},
    };

    use super::{HomePageState, get_home_page, home_view};

    fn past_months_link(month: YearMonth) -> Option<String> {
        let html = scraper::Html::parse_document(
            &home_view(month, &MonthSummary::default(), &[]).into_string(),
        );

        html.select(&Selector::parse("a").unwrap())
            .find(|a| a.text().collect::<String>() == "過去の月を見る")
            .and_then(|a| a.value().attr("href").map(str::to_owned))
    }

    #[test]
    fn past_months_link_opens_the_previous_month() {
        assert_eq!(
            past_months_link("2024-06".parse().unwrap()).as_deref(),
            Some("/ledger?month=2024-05")
        );
        assert_eq!(
            past_months_link("2024-01".parse().unwrap()).as_deref(),
            Some("/ledger?month=2023-12")
        );
    }

    #[test]
    fn first_supported_month_has_no_past_months_link() {
        let first_month = YearMonth::new(-9999, Month::January).unwrap();

        assert_eq!(past_months_link(first_month), None);
    }

    #[tokio::test]
    async fn shows_only_this_months_transactions() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let before = today("Etc/UTC").unwrap();
        let last_month = before.replace_day(1).unwrap() - Duration::days(1);
        for txn_date in [before, last_month] {
            insert_transaction(
                NewTransaction {
                    txn_type: TransactionType::Expense,
                    category: Category::Water,
                    txn_date,
                    amount: 3000,
                    memo: None,
                },
                &conn,
            )
            .unwrap();
        }
        let state = HomePageState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_home_page(State(state)).await.unwrap();
        let after = today("Etc/UTC").unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let heading: String = html
            .select(&Selector::parse("h1").unwrap())
            .flat_map(|h1| h1.text())
            .collect();
        let ids: Vec<_> = html
            .select(&Selector::parse("tbody tr").unwrap())
            .filter_map(|row| row.value().attr("data-transaction-id"))
            .collect();
        let month_before = YearMonth::from_date(before).unwrap().to_string();
        let month_after = YearMonth::from_date(after).unwrap().to_string();
        if heading.contains(&month_before) {
            assert_eq!(ids, vec!["1"]);
        } else {
            // The month changed while the page was rendered.
            assert!(heading.contains(&month_after), "got heading {heading:?}");
            assert!(ids.is_empty());
        }
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let state = HomePageState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Not/AZone".to_owned(),
        };

        let result = get_home_page(State(state)).await;

        assert!(result.is_err());
    }
}
