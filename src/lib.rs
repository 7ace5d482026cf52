// src/lib.rs
//! Personal stock-trade ledger: transaction records, per-trade metrics,
//! portfolio analytics, and the HTTP service that persists them.

pub mod analytics;
pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;
pub mod store;
pub mod utilization;
pub mod validation;
pub mod view;

pub use analytics::{EvaluatedTransaction, PortfolioAnalytics};
pub use client::LedgerClient;
pub use dashboard::{Dashboard, DashboardSummary};
pub use error::LedgerError;
pub use metrics::{calculate_metrics, DerivedMetrics};
pub use models::{NewTransaction, Transaction};
pub use store::{MemoryStore, TransactionStore};
pub use utilization::average_daily_investment;
pub use view::{filtered_and_sorted, SortKey, ViewState};
