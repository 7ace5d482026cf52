// src/validation.rs
use crate::models::NewTransaction;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("stock name must not be empty")]
    EmptyStockName,

    #[error("quantity must be a positive number, got {0}")]
    NonPositiveQuantity(f64),

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("sell date {sell_date} is before buy date {buy_date}")]
    SellBeforeBuy { buy_date: String, sell_date: String },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

fn check_amount(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::NegativeAmount { field, value: v }),
        _ => Ok(()),
    }
}

/// Checks a trade before it is written and returns it with the stock name trimmed.
///
/// Records whose sell date precedes the buy date are rejected here; the
/// analytics functions themselves accept them and report negative periods.
pub fn validate(mut trade: NewTransaction) -> Result<NewTransaction, ValidationError> {
    trade.stock_name = trade.stock_name.trim().to_string();
    if trade.stock_name.is_empty() {
        return Err(ValidationError::EmptyStockName);
    }
    if !trade.quantity.is_finite() || trade.quantity <= 0.0 {
        return Err(ValidationError::NonPositiveQuantity(trade.quantity));
    }

    check_amount("buyPrice", trade.buy_price)?;
    check_amount("sellPrice", trade.sell_price)?;
    check_amount("investedAmount", trade.invested_amount)?;
    check_amount("returnAmount", trade.return_amount)?;

    if trade.sell_date < trade.buy_date {
        return Err(ValidationError::SellBeforeBuy {
            buy_date: trade.buy_date.to_rfc3339(),
            sell_date: trade.sell_date.to_rfc3339(),
        });
    }

    Ok(trade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn base() -> NewTransaction {
        NewTransaction::new(
            "  RELIANCE ",
            10.0,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
        )
        .with_prices(2400.5, 2600.75)
    }

    #[test]
    fn test_valid_trade_is_trimmed() {
        let trade = validate(base()).unwrap();
        assert_eq!(trade.stock_name, "RELIANCE");
    }

    #[test]
    fn test_same_day_trade_is_valid() {
        let mut trade = base();
        trade.sell_date = trade.buy_date;
        assert!(validate(trade).is_ok());
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut trade = base();
        trade.stock_name = "   ".into();
        assert_eq!(validate(trade), Err(ValidationError::EmptyStockName));
    }

    #[test]
    fn test_rejects_bad_quantity() {
        let mut trade = base();
        trade.quantity = 0.0;
        assert_eq!(validate(trade), Err(ValidationError::NonPositiveQuantity(0.0)));

        let mut trade = base();
        trade.quantity = f64::NAN;
        assert!(matches!(validate(trade), Err(ValidationError::NonPositiveQuantity(_))));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let mut trade = base();
        trade.invested_amount = Some(-1.0);
        assert_eq!(
            validate(trade),
            Err(ValidationError::NegativeAmount { field: "investedAmount", value: -1.0 })
        );
    }

    #[test]
    fn test_rejects_sell_before_buy() {
        let mut trade = base();
        std::mem::swap(&mut trade.buy_date, &mut trade.sell_date);
        assert!(matches!(validate(trade), Err(ValidationError::SellBeforeBuy { .. })));
    }
}
