//! Dashboard module
//!
//! Provides an overview page for a single month showing the sale statistics,
//! the transaction table and a price-range bar chart.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
