// src/utilization.rs
use crate::metrics::{holding_days_floor, investment};
use crate::models::Transaction;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Average capital deployed per active calendar day.
///
/// Each trade contributes `investment * floor(holding days)` rupee-days. The
/// total is divided by the number of distinct UTC calendar days covered by at
/// least one half-open `[buy_date, sell_date)` interval, so overlapping trades
/// do not inflate the denominator. Returns `0.0` when no day is covered.
pub fn average_daily_investment(transactions: &[Transaction]) -> f64 {
    let mut total_rupee_days = 0.0;
    let mut active_days: HashSet<NaiveDate> = HashSet::new();

    for transaction in transactions {
        let trade = &transaction.trade;
        total_rupee_days += investment(trade) * holding_days_floor(trade) as f64;

        let mut cursor = trade.buy_date;
        while cursor < trade.sell_date {
            active_days.insert(cursor.date_naive());
            cursor += Duration::days(1);
        }
    }

    if active_days.is_empty() {
        0.0
    } else {
        total_rupee_days / active_days.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn invested(id: &str, amount: f64, buy: DateTime<Utc>, sell: DateTime<Utc>) -> Transaction {
        let mut trade = NewTransaction::new(id, 1.0, buy, sell);
        trade.invested_amount = Some(amount);
        Transaction::new(id, trade)
    }

    #[test]
    fn test_no_transactions() {
        assert_eq!(average_daily_investment(&[]), 0.0);
    }

    #[test]
    fn test_single_ten_day_trade() {
        let a = invested("A", 10_000.0, date(2024, 1, 1), date(2024, 1, 11));
        assert_relative_eq!(average_daily_investment(&[a]), 10_000.0);
    }

    #[test]
    fn test_overlapping_days_counted_once() {
        let a = invested("A", 10_000.0, date(2024, 1, 1), date(2024, 1, 11));
        let b = invested("B", 5_000.0, date(2024, 1, 1), date(2024, 1, 11));

        // (100_000 + 50_000) rupee-days over 10 shared days
        assert_relative_eq!(average_daily_investment(&[a, b]), 15_000.0);
    }

    #[test]
    fn test_partial_overlap() {
        let a = invested("A", 1_000.0, date(2024, 3, 1), date(2024, 3, 5));
        let b = invested("B", 2_000.0, date(2024, 3, 3), date(2024, 3, 7));

        // 4_000 + 8_000 rupee-days over Mar 1..=6
        assert_relative_eq!(average_daily_investment(&[a, b]), 2_000.0);
    }

    #[test]
    fn test_same_day_trades_cover_nothing() {
        let a = invested("A", 1_000.0, date(2024, 3, 1), date(2024, 3, 1));
        assert_eq!(average_daily_investment(&[a]), 0.0);
    }

    #[test]
    fn test_intraday_trade_touches_a_day_without_rupee_days() {
        let buy = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        let sell = Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();
        let a = invested("A", 1_000.0, buy, sell);

        assert_eq!(average_daily_investment(&[a]), 0.0);
    }

    #[test]
    fn test_unit_prices_used_without_override() {
        let trade = NewTransaction::new("A", 10.0, date(2024, 1, 1), date(2024, 1, 3))
            .with_prices(50.0, 60.0);
        let a = Transaction::new("A", trade);

        assert_relative_eq!(average_daily_investment(&[a]), 500.0);
    }
}
