// src/view.rs
use crate::analytics::EvaluatedTransaction;
use crate::metrics::calculate_metrics;
use crate::models::Transaction;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Newest purchase first.
    #[default]
    #[serde(rename = "buyDate")]
    BuyDate,
    /// Alphabetical by stock name.
    #[serde(rename = "stockName")]
    StockName,
    /// Largest profit first.
    #[serde(rename = "profitLoss")]
    ProfitLoss,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyDate" => Ok(SortKey::BuyDate),
            "stockName" => Ok(SortKey::StockName),
            "profitLoss" => Ok(SortKey::ProfitLoss),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Filter and ordering chosen by the user for the transaction table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default, deserialize_with = "lenient_sort_key")]
    pub sort: SortKey,
}

impl ViewState {
    pub fn new(filter: Option<&str>, sort: SortKey) -> Self {
        Self {
            filter: filter.map(str::to_string),
            sort,
        }
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        match self.filter.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => transaction
                .trade
                .stock_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

// Unknown keys from a query string fall back to the default ordering.
fn lenient_sort_key<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_default())
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filters and orders transactions for display. Sorting is stable, so equal
/// keys keep their collection order.
pub fn filtered_and_sorted(transactions: &[Transaction], state: &ViewState) -> Vec<EvaluatedTransaction> {
    let mut rows: Vec<&Transaction> = transactions.iter().filter(|t| state.matches(t)).collect();

    match state.sort {
        SortKey::BuyDate => rows.sort_by(|a, b| b.trade.buy_date.cmp(&a.trade.buy_date)),
        SortKey::StockName => {
            rows.sort_by(|a, b| compare_names(&a.trade.stock_name, &b.trade.stock_name))
        }
        SortKey::ProfitLoss => rows.sort_by(|a, b| {
            let a = calculate_metrics(&a.trade).profit_loss;
            let b = calculate_metrics(&b.trade).profit_loss;
            b.total_cmp(&a)
        }),
    }

    rows.into_iter().map(EvaluatedTransaction::new).collect()
}
