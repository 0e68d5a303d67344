//! Table and summary views for the dashboard.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    month::SaleMonth,
    statistics::Statistics,
    transaction::TransactionRecord,
};

const CARD_STYLE: &str = "flex flex-col p-4 rounded-lg shadow bg-white dark:bg-gray-800";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "text-2xl font-semibold";

/// Renders the sale totals for `month` as a row of cards.
pub(super) fn statistics_view(month: SaleMonth, statistics: &Statistics) -> Markup {
    html! {
        section id="statistics" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Statistics - " (month.name()) }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Total sale" }
                    span id="total-sale-amount" class=(CARD_VALUE_STYLE)
                    {
                        (format_currency(statistics.total_sale_amount))
                    }
                }

                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Total sold items" }
                    span id="total-sold-items" class=(CARD_VALUE_STYLE)
                    {
                        (statistics.total_sold_items)
                    }
                }

                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Total not sold items" }
                    span id="total-not-sold-items" class=(CARD_VALUE_STYLE)
                    {
                        (statistics.total_not_sold_items)
                    }
                }
            }
        }
    }
}

/// Renders the transactions for the selected month as a table.
pub(super) fn transactions_table(transactions: &[TransactionRecord]) -> Markup {
    html! {
        section id="transactions" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Transactions" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    @if let Some(id) = transaction.id { (id) }
                                }
                                td class=(TABLE_CELL_STYLE) { (transaction.title) }
                                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(transaction.price)) }
                                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    @if transaction.sold { "Yes" } @else { "No" }
                                }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    img
                                        src=(transaction.image)
                                        alt=(transaction.title)
                                        class="w-12 h-12 object-contain";
                                }
                            }
                        }

                        @if transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="7" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No transactions for this month."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
