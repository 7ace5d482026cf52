// src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The fields of a trade as submitted by the user, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub stock_name: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<f64>,
    #[serde(with = "trade_date")]
    pub buy_date: DateTime<Utc>,
    #[serde(with = "trade_date")]
    pub sell_date: DateTime<Utc>,
    /// Overrides `buy_price * quantity` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invested_amount: Option<f64>,
    /// Overrides `sell_price * quantity` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_amount: Option<f64>,
}

impl NewTransaction {
    pub fn new(
        stock_name: &str,
        quantity: f64,
        buy_date: DateTime<Utc>,
        sell_date: DateTime<Utc>,
    ) -> Self {
        Self {
            stock_name: stock_name.to_string(),
            quantity,
            buy_price: None,
            sell_price: None,
            buy_date,
            sell_date,
            invested_amount: None,
            return_amount: None,
        }
    }

    pub fn with_prices(self, buy_price: f64, sell_price: f64) -> Self {
        Self {
            buy_price: Some(buy_price),
            sell_price: Some(sell_price),
            ..self
        }
    }

    pub fn with_amounts(self, invested_amount: f64, return_amount: f64) -> Self {
        Self {
            invested_amount: Some(invested_amount),
            return_amount: Some(return_amount),
            ..self
        }
    }
}

/// A persisted trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(flatten)]
    pub trade: NewTransaction,
}

impl Transaction {
    pub fn new(id: impl Into<String>, trade: NewTransaction) -> Self {
        Self {
            id: id.into(),
            trade,
        }
    }
}

/// Parses a trade date given either as a calendar date (`2024-01-31`, midnight UTC)
/// or as a full RFC 3339 timestamp.
pub fn parse_trade_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))),
        Err(_) => DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)),
    }
}

pub(crate) mod trade_date {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_trade_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_calendar_date_is_midnight_utc() {
        let date = parse_trade_date("2024-01-11").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let date = parse_trade_date("2024-01-11T05:30:00+05:30").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap());
        assert!(parse_trade_date("11/01/2024").is_err());
    }

    #[test]
    fn test_wire_shape() {
        let body = json!({
            "id": "abc",
            "stockName": "RELIANCE",
            "quantity": 10,
            "buyPrice": 2400.5,
            "sellPrice": null,
            "buyDate": "2024-01-01",
            "sellDate": "2024-02-01T00:00:00.000Z"
        });
        let tx: Transaction = serde_json::from_value(body).unwrap();
        assert_eq!(tx.id, "abc");
        assert_eq!(tx.trade.stock_name, "RELIANCE");
        assert_eq!(tx.trade.buy_price, Some(2400.5));
        assert_eq!(tx.trade.sell_price, None);
        assert_eq!(tx.trade.invested_amount, None);

        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["buyDate"], "2024-01-01T00:00:00.000Z");
        assert!(out.get("sellPrice").is_none());
        assert!(out.get("returnAmount").is_none());
    }
}
