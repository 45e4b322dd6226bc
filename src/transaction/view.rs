//! HTML rendering shared by the home and ledger pages.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    endpoints,
    html::{
        EXPENSE_BADGE_STYLE, INCOME_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_yen, link,
    },
    transaction::{MonthSummary, Transaction, TransactionType},
};

const SUMMARY_CARD_STYLE: &str = "flex-1 p-4 bg-white border border-gray-200 rounded-lg \
    shadow-sm dark:bg-gray-800 dark:border-gray-700";

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[month]/[day]");

fn balance_class(balance: i64) -> &'static str {
    if balance < 0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

fn format_day(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// The income total, expense total and balance as three cards.
pub(crate) fn month_summary_view(summary: &MonthSummary) -> Markup {
    html! {
        section class="flex flex-col sm:flex-row gap-4 w-full max-w-4xl my-4"
        {
            div class=(SUMMARY_CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "収入" }
                p id="income-total" class="text-2xl font-bold" { (format_yen(summary.income_total)) }
            }

            div class=(SUMMARY_CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "支出" }
                p id="expense-total" class="text-2xl font-bold" { (format_yen(summary.expense_total)) }
            }

            div class=(SUMMARY_CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "収支" }
                p id="balance" class={ "text-2xl font-bold " (balance_class(summary.balance)) }
                {
                    (format_yen(summary.balance))
                }
            }
        }
    }
}

/// The transactions of one month as a table, or a prompt to add one if there are none.
pub(crate) fn transactions_table(transactions: &[Transaction]) -> Markup {
    if transactions.is_empty() {
        return html! {
            p id="empty-state" class="my-8 text-gray-600 dark:text-gray-400"
            {
                "この月の記録はありません。"
                (link(endpoints::NEW_TRANSACTION_VIEW, "記帳する"))
            }
        };
    }

    html! {
        div class="relative w-full max-w-4xl overflow-x-auto shadow-md sm:rounded-lg"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "日付" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "区分" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "収支項目" }
                        th scope="col" class="px-6 py-3 text-right" { "金額" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "メモ" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let badge_style = match transaction.txn_type {
        TransactionType::Income => INCOME_BADGE_STYLE,
        TransactionType::Expense => EXPENSE_BADGE_STYLE,
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.txn_date) { (format_day(transaction.txn_date)) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(badge_style) { (transaction.txn_type.label()) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class="px-6 py-4 text-right" { (format_yen(transaction.amount)) }
            td class=(TABLE_CELL_STYLE) { (transaction.memo.as_deref().unwrap_or_default()) }
        }
    }
}
