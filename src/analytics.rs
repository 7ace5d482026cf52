// src/analytics.rs
//! Portfolio-level aggregation over the full transaction collection.

use crate::metrics::{calculate_metrics, percentage_of, DerivedMetrics};
use crate::models::Transaction;
use serde::{Deserialize, Serialize};

/// A transaction paired with the metrics computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub metrics: DerivedMetrics,
}

impl EvaluatedTransaction {
    pub fn new(transaction: &Transaction) -> Self {
        Self {
            metrics: calculate_metrics(&transaction.trade),
            transaction: transaction.clone(),
        }
    }
}

/// Portfolio performance summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalytics {
    pub total_investment: f64,
    pub total_returns: f64,
    pub net_profit_loss: f64,
    /// `None` when nothing was invested.
    pub net_profit_loss_percentage: Option<f64>,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub avg_holding_period: f64,
    pub best_trade: Option<EvaluatedTransaction>,
    pub worst_trade: Option<EvaluatedTransaction>,
    pub total_trades: usize,
}

impl PortfolioAnalytics {
    /// Folds all transactions into one summary.
    ///
    /// Best and worst trades use strict comparisons, so among equal profit/loss
    /// values the earliest transaction in `transactions` is kept.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        if transactions.is_empty() {
            return Self::default();
        }

        let mut total_investment = 0.0;
        let mut total_returns = 0.0;
        let mut total_holding_days = 0i64;
        let mut winning_trades = 0;
        let mut losing_trades = 0;
        let mut best_profit_loss = f64::NEG_INFINITY;
        let mut worst_profit_loss = f64::INFINITY;
        let mut best_trade = None;
        let mut worst_trade = None;

        for transaction in transactions {
            let metrics = calculate_metrics(&transaction.trade);
            total_investment += metrics.investment;
            total_returns += metrics.returns;
            total_holding_days += metrics.holding_days;

            if metrics.profit_loss > 0.0 {
                winning_trades += 1;
            } else if metrics.profit_loss < 0.0 {
                losing_trades += 1;
            }

            if metrics.profit_loss > best_profit_loss {
                best_profit_loss = metrics.profit_loss;
                best_trade = Some(transaction);
            }
            if metrics.profit_loss < worst_profit_loss {
                worst_profit_loss = metrics.profit_loss;
                worst_trade = Some(transaction);
            }
        }

        let total_trades = transactions.len();
        let net_profit_loss = total_returns - total_investment;

        Self {
            total_investment,
            total_returns,
            net_profit_loss,
            net_profit_loss_percentage: percentage_of(net_profit_loss, total_investment),
            winning_trades,
            losing_trades,
            win_rate: winning_trades as f64 / total_trades as f64 * 100.0,
            avg_holding_period: total_holding_days as f64 / total_trades as f64,
            best_trade: best_trade.map(EvaluatedTransaction::new),
            worst_trade: worst_trade.map(EvaluatedTransaction::new),
            total_trades,
        }
    }
}
