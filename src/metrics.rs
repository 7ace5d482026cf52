// src/metrics.rs
//! Per-transaction metrics.
//!
//! Every place that needs a trade's invested or returned amount goes through
//! [`investment`] and [`returns`], so override handling stays in one spot.

use crate::models::NewTransaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Values derived from a single transaction. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub investment: f64,
    pub returns: f64,
    pub profit_loss: f64,
    /// `None` when the investment is zero.
    pub profit_loss_percentage: Option<f64>,
    pub holding_days: i64,
}

/// Capital put into the trade: the invested override, else `buy_price * quantity`.
pub fn investment(trade: &NewTransaction) -> f64 {
    trade
        .invested_amount
        .unwrap_or_else(|| trade.buy_price.unwrap_or(0.0) * trade.quantity)
}

/// Capital taken out of the trade: the return override, else `sell_price * quantity`.
pub fn returns(trade: &NewTransaction) -> f64 {
    trade
        .return_amount
        .unwrap_or_else(|| trade.sell_price.unwrap_or(0.0) * trade.quantity)
}

/// Percentage of `profit_loss` relative to `base`, or `None` if `base` is zero.
pub fn percentage_of(profit_loss: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        None
    } else {
        Some(profit_loss / base * 100.0)
    }
}

fn elapsed_days(buy_date: DateTime<Utc>, sell_date: DateTime<Utc>) -> f64 {
    (sell_date - buy_date).num_milliseconds() as f64 / MS_PER_DAY
}

/// Holding period rounded up to whole days, used for display and averages.
pub fn holding_days(trade: &NewTransaction) -> i64 {
    elapsed_days(trade.buy_date, trade.sell_date).ceil() as i64
}

/// Holding period rounded down to whole days, used for rupee-day weighting.
pub fn holding_days_floor(trade: &NewTransaction) -> i64 {
    elapsed_days(trade.buy_date, trade.sell_date).floor() as i64
}

pub fn calculate_metrics(trade: &NewTransaction) -> DerivedMetrics {
    let investment = investment(trade);
    let returns = returns(trade);
    let profit_loss = returns - investment;

    DerivedMetrics {
        investment,
        returns,
        profit_loss,
        profit_loss_percentage: percentage_of(profit_loss, investment),
        holding_days: holding_days(trade),
    }
}
