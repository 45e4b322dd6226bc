//! The entry form for recording a transaction: its raw fields, validation and markup.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    category::Category,
    html::{
        FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    month::YearMonth,
    transaction::core::{NewTransaction, TransactionType},
};

pub const TXN_TYPE_REQUIRED: &str = "収支区分を選択してください。";
pub const CATEGORY_REQUIRED: &str = "収支項目を選択してください。";
pub const TXN_DATE_REQUIRED: &str = "年月日を入力してください。";
pub const TXN_DATE_INVALID: &str = "年月日はYYYY-MM-DD形式で入力してください。";
pub const AMOUNT_INVALID: &str = "金額は0以上の整数で入力してください。";

/// The fields of the entry form exactly as they were submitted.
///
/// Every field is kept as text so that a rejected submission can be shown
/// back to the user unchanged.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionForm {
    /// "income" or "expense".
    pub txn_type: String,
    /// One of the fixed category labels.
    pub category: String,
    /// The date as YYYY-MM-DD.
    pub txn_date: String,
    /// A non-negative whole number.
    pub amount: String,
    /// Free text, may be empty.
    pub memo: String,
}

/// The message to show next to each invalid field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub txn_type: Option<&'static str>,
    pub category: Option<&'static str>,
    pub txn_date: Option<&'static str>,
    pub amount: Option<&'static str>,
}

impl TransactionForm {
    /// The form shown when a user starts a new entry.
    pub fn with_date(txn_date: Date) -> Self {
        Self {
            txn_type: TransactionType::Expense.as_str().to_owned(),
            txn_date: txn_date.to_string(),
            ..Default::default()
        }
    }

    /// Check every field and build the transaction to save.
    ///
    /// Text is trimmed before it is checked and an empty memo becomes `None`.
    ///
    /// # Errors
    /// Returns the message for each field that failed, not just the first.
    pub fn validate(&self) -> Result<NewTransaction, FormErrors> {
        let mut errors = FormErrors::default();

        let txn_type = self.txn_type.trim().parse::<TransactionType>().ok();
        if txn_type.is_none() {
            errors.txn_type = Some(TXN_TYPE_REQUIRED);
        }

        let category = self.category.trim().parse::<Category>().ok();
        if category.is_none() {
            errors.category = Some(CATEGORY_REQUIRED);
        }

        let txn_date = match parse_date(self.txn_date.trim()) {
            Ok(date) => Some(date),
            Err(message) => {
                errors.txn_date = Some(message);
                None
            }
        };

        let amount = self.amount.trim().parse::<u32>().ok();
        if amount.is_none() {
            errors.amount = Some(AMOUNT_INVALID);
        }

        let memo = match self.memo.trim() {
            "" => None,
            memo => Some(memo.to_owned()),
        };

        match (txn_type, category, txn_date, amount) {
            (Some(txn_type), Some(category), Some(txn_date), Some(amount)) => Ok(NewTransaction {
                txn_type,
                category,
                txn_date,
                amount,
                memo,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_date(text: &str) -> Result<Date, &'static str> {
    if text.is_empty() {
        return Err(TXN_DATE_REQUIRED);
    }

    let date = Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| TXN_DATE_INVALID)?;

    // The ledger must be able to show the month the date falls in.
    YearMonth::from_date(date)
        .map(|_| date)
        .map_err(|_| TXN_DATE_INVALID)
}

fn field_error(field: &str, message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p id={ (field) "-error" } class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}

/// Render the inputs of the entry form, filled with `form` and annotated with `errors`.
pub fn transaction_form_fields(form: &TransactionForm, errors: &FormErrors) -> Markup {
    let selected_type = form.txn_type.trim();
    let selected_category = form.category.trim();

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "収支区分" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for txn_type in TransactionType::ALL {
                    @let id = format!("txn-type-{}", txn_type.as_str());

                    div class="flex items-center gap-3"
                    {
                        input
                            name="txn_type"
                            id=(id)
                            type="radio"
                            value=(txn_type.as_str())
                            checked[selected_type == txn_type.as_str()]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (txn_type.label())
                        }
                    }
                }
            }

            (field_error("txn_type", errors.txn_type))
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "収支項目" }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "選択してください" }

                @for category in Category::ALL {
                    option
                        value=(category.as_str())
                        selected[selected_category == category.as_str()]
                    {
                        (category.as_str())
                    }
                }
            }

            (field_error("category", errors.category))
        }

        div
        {
            label for="txn_date" class=(FORM_LABEL_STYLE) { "年月日" }

            input
                name="txn_date"
                id="txn_date"
                type="date"
                value=(form.txn_date)
                required
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error("txn_date", errors.txn_date))
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "金額" }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    min="0"
                    step="1"
                    placeholder="0"
                    value=(form.amount)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (field_error("amount", errors.amount))
        }

        div
        {
            label for="memo" class=(FORM_LABEL_STYLE) { "メモ" }

            input
                name="memo"
                id="memo"
                type="text"
                placeholder="メモ（任意）"
                value=(form.memo)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
