// src/form.rs
//! Raw form state as typed by the user, keyed by wire field name.

use crate::models::{parse_trade_date, NewTransaction, Transaction};
use crate::validation::{validate, ValidationError};
use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    fields: HashMap<String, String>,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Prefills a form for editing an existing record.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        let trade = &transaction.trade;
        let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        // Calendar dates stay short; anything with a time of day keeps it.
        let date = |value: DateTime<Utc>| {
            if value.time() == NaiveTime::MIN {
                value.format("%Y-%m-%d").to_string()
            } else {
                value.to_rfc3339_opts(SecondsFormat::Millis, true)
            }
        };

        let mut form = Self::new();
        form.set("stockName", &trade.stock_name);
        form.set("quantity", &trade.quantity.to_string());
        form.set("buyPrice", &number(trade.buy_price));
        form.set("sellPrice", &number(trade.sell_price));
        form.set("buyDate", &date(trade.buy_date));
        form.set("sellDate", &date(trade.sell_date));
        form.set("investedAmount", &number(trade.invested_amount));
        form.set("returnAmount", &number(trade.return_amount));
        form
    }

    fn raw(&self, field: &'static str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    fn required(&self, field: &'static str) -> Result<&str, ValidationError> {
        self.raw(field).ok_or(ValidationError::MissingField(field))
    }

    fn number(&self, field: &'static str) -> Result<Option<f64>, ValidationError> {
        self.raw(field)
            .map(|raw| {
                raw.parse::<f64>().map_err(|_| ValidationError::InvalidNumber {
                    field,
                    value: raw.to_string(),
                })
            })
            .transpose()
    }

    fn date(&self, field: &'static str) -> Result<DateTime<Utc>, ValidationError> {
        let raw = self.required(field)?;
        parse_trade_date(raw).map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
    }

    /// Converts the form into a validated trade.
    ///
    /// Blank unit prices become absent. Blank or zero overrides also become
    /// absent so the amount falls back to the unit price.
    pub fn parse(&self) -> Result<NewTransaction, ValidationError> {
        let stock_name = self.required("stockName")?;
        let quantity = self
            .number("quantity")?
            .ok_or(ValidationError::MissingField("quantity"))?;
        let override_amount =
            |field: &'static str| Ok::<_, ValidationError>(self.number(field)?.filter(|v: &f64| *v != 0.0));

        let trade = NewTransaction {
            stock_name: stock_name.to_string(),
            quantity,
            buy_price: self.number("buyPrice")?,
            sell_price: self.number("sellPrice")?,
            buy_date: self.date("buyDate")?,
            sell_date: self.date("sellDate")?,
            invested_amount: override_amount("investedAmount")?,
            return_amount: override_amount("returnAmount")?,
        };
        validate(trade)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransactionForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
