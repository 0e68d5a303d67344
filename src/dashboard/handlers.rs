//! Dashboard HTTP handler and view rendering.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::DatabaseState,
    dashboard::{
        charts::{DashboardChart, chart_script, chart_view, price_range_chart},
        tables::{statistics_view, transactions_table},
    },
    endpoints,
    html::{
        ECHARTS_SCRIPT_URL, FORM_LABEL_STYLE, FORM_SELECT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base,
    },
    month::{MonthQuery, SaleMonth, month_filter},
    price_range::{PriceRangeCount, get_price_range_counts},
    statistics::{Statistics, get_statistics},
    transaction::{TransactionRecord, get_transactions},
};

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    month: SaleMonth,
    transactions: Vec<TransactionRecord>,
    statistics: Statistics,
    price_ranges: Vec<PriceRangeCount>,
}

/// Display the transactions, statistics and price ranges for a month.
///
/// Shows March when no valid month is requested.
pub async fn get_dashboard_page(
    State(state): State<DatabaseState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let month = month_filter(query).unwrap_or(SaleMonth::MARCH);

    let data = {
        let connection = state.connection()?;

        DashboardData {
            month,
            transactions: get_transactions(Some(month), &connection)?,
            statistics: get_statistics(Some(month), &connection)?,
            price_ranges: get_price_range_counts(Some(month), &connection)?,
        }
    };

    Ok(dashboard_view(&data).into_response())
}

fn dashboard_view(data: &DashboardData) -> Markup {
    let chart = DashboardChart {
        id: "price-range-chart",
        options: price_range_chart(data.month, &data.price_ranges).to_string(),
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h1 class="text-2xl font-bold mb-6" { "Transaction Dashboard" }

                (month_select(data.month))
                (statistics_view(data.month, &data.statistics))
                (transactions_table(&data.transactions))
                (chart_view(&chart))
            }
        }
    );

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        chart_script(&chart),
    ];

    base("Dashboard", &head_elements, &content)
}

/// A form with a month drop-down that reloads the page when the month changes.
fn month_select(selected: SaleMonth) -> Markup {
    html! {
        form method="get" action=(endpoints::DASHBOARD_VIEW) class="mb-8 max-w-xs"
        {
            label for="month" class=(FORM_LABEL_STYLE) { "Month" }

            select
                id="month"
                name="month"
                class=(FORM_SELECT_STYLE)
                onchange="this.form.submit()"
            {
                @for month in SaleMonth::all() {
                    option value=(month.as_two_digits()) selected[month == selected]
                    {
                        (month.name())
                    }
                }
            }

            noscript
            {
                button type="submit" class="mt-2 underline" { "Show" }
            }
        }
    }
}
