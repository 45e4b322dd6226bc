//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, yen_input_styles},
    navigation::NavBar,
    timezone::today,
    transaction::form::{FormErrors, TransactionForm, transaction_form_fields},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The entry form page, filled with `form` and showing `errors` next to their fields.
pub(crate) fn new_transaction_view(form: &TransactionForm, errors: &FormErrors) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                method="post"
                action=(endpoints::NEW_TRANSACTION_VIEW)
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "記帳" }

                (transaction_form_fields(form, errors))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "登録する" }
            }
        }
    };

    base("記帳", &[yen_input_styles()], &content)
}

/// Render the entry form with today's date and "expense" selected.
pub async fn get_new_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let form = TransactionForm::with_date(today(&state.local_timezone)?);

    Ok(new_transaction_view(&form, &FormErrors::default()).into_response())
}
