// src/db.rs
use crate::error::LedgerError;
use crate::models::{NewTransaction, Transaction};
use crate::store::{new_id, TransactionStore};
use crate::validation::validate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info};
use scylla::{
    frame::response::result::{CqlValue, Row},
    query::Query,
    Session, SessionBuilder,
};
use std::fmt::Display;

const SELECT_COLUMNS: &str = "SELECT id, stock_name, quantity, buy_price, sell_price, buy_date, sell_date, invested_amount, return_amount, created_at FROM stock_ledger.transactions";

const INSERT: &str = "INSERT INTO stock_ledger.transactions (id, stock_name, quantity, buy_price, sell_price, buy_date, sell_date, invested_amount, return_amount, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

fn storage<E: Display>(e: E) -> LedgerError {
    LedgerError::Storage(e.to_string())
}

/// Transaction store backed by ScyllaDB.
pub struct ScyllaStore {
    session: Session,
}

impl ScyllaStore {
    /// Connects to `node` and creates the keyspace and table if needed.
    pub async fn connect(node: &str) -> Result<Self, LedgerError> {
        let session = SessionBuilder::new()
            .known_node(node)
            .build()
            .await
            .map_err(storage)?;

        session.query("CREATE KEYSPACE IF NOT EXISTS stock_ledger WITH REPLICATION = {'class': 'SimpleStrategy', 'replication_factor': 1}", &[]).await.map_err(storage)?;
        session.query("CREATE TABLE IF NOT EXISTS stock_ledger.transactions (id TEXT PRIMARY KEY, stock_name TEXT, quantity DOUBLE, buy_price DOUBLE, sell_price DOUBLE, buy_date TIMESTAMP, sell_date TIMESTAMP, invested_amount DOUBLE, return_amount DOUBLE, created_at TIMESTAMP)", &[]).await.map_err(storage)?;

        info!("Successfully connected to ScyllaDB at {}.", node);
        Ok(Self { session })
    }

    async fn insert(&self, id: &str, trade: &NewTransaction, created_at: i64) -> Result<(), LedgerError> {
        let query = Query::new(INSERT);
        self.session
            .query(
                query,
                (
                    id,
                    trade.stock_name.as_str(),
                    trade.quantity,
                    trade.buy_price,
                    trade.sell_price,
                    trade.buy_date.timestamp_millis(),
                    trade.sell_date.timestamp_millis(),
                    trade.invested_amount,
                    trade.return_amount,
                    created_at,
                ),
            )
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<(Transaction, i64)>, LedgerError> {
        let query = Query::new(format!("{} WHERE id = ?", SELECT_COLUMNS));
        let result = self.session.query(query, (id,)).await.map_err(storage)?;
        match result.rows.unwrap_or_default().into_iter().next() {
            Some(row) => Ok(Some(row_to_transaction(&row)?)),
            None => Ok(None),
        }
    }
}

fn text_column(row: &Row, idx: usize) -> Result<String, LedgerError> {
    match row.columns.get(idx) {
        Some(Some(CqlValue::Text(s))) => Ok(s.clone()),
        other => Err(LedgerError::Storage(format!(
            "expected text in column {}, found {:?}",
            idx, other
        ))),
    }
}

fn optional_double_column(row: &Row, idx: usize) -> Result<Option<f64>, LedgerError> {
    match row.columns.get(idx) {
        Some(Some(CqlValue::Double(v))) => Ok(Some(*v)),
        Some(None) => Ok(None),
        other => Err(LedgerError::Storage(format!(
            "expected double in column {}, found {:?}",
            idx, other
        ))),
    }
}

fn double_column(row: &Row, idx: usize) -> Result<f64, LedgerError> {
    optional_double_column(row, idx)?
        .ok_or_else(|| LedgerError::Storage(format!("column {} is null", idx)))
}

fn timestamp_column(row: &Row, idx: usize) -> Result<DateTime<Utc>, LedgerError> {
    match row.columns.get(idx) {
        Some(Some(CqlValue::Timestamp(ts))) => {
            DateTime::<Utc>::from_timestamp_millis(ts.num_milliseconds()).ok_or_else(|| {
                LedgerError::Storage(format!("timestamp out of range in column {}", idx))
            })
        }
        other => Err(LedgerError::Storage(format!(
            "expected timestamp in column {}, found {:?}",
            idx, other
        ))),
    }
}

fn row_to_transaction(row: &Row) -> Result<(Transaction, i64), LedgerError> {
    let trade = NewTransaction {
        stock_name: text_column(row, 1)?,
        quantity: double_column(row, 2)?,
        buy_price: optional_double_column(row, 3)?,
        sell_price: optional_double_column(row, 4)?,
        buy_date: timestamp_column(row, 5)?,
        sell_date: timestamp_column(row, 6)?,
        invested_amount: optional_double_column(row, 7)?,
        return_amount: optional_double_column(row, 8)?,
    };
    let created_at = timestamp_column(row, 9)?.timestamp_millis();
    Ok((Transaction::new(text_column(row, 0)?, trade), created_at))
}

/// Decodes a full table scan. Any undecodable row fails the whole read so
/// analytics never run over a partial collection.
fn transactions_from_rows(rows: &[Row]) -> Result<Vec<Transaction>, LedgerError> {
    let mut entries = rows
        .iter()
        .map(|row| {
            row_to_transaction(row).map_err(|e| {
                error!("Malformed transaction row: {}", e);
                e
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    // Partition scans come back in token order; restore insertion order.
    entries.sort_by_key(|(_, created_at)| *created_at);
    Ok(entries.into_iter().map(|(transaction, _)| transaction).collect())
}

#[async_trait]
impl TransactionStore for ScyllaStore {
    async fn list(&self) -> Result<Vec<Transaction>, LedgerError> {
        let result = self
            .session
            .query(Query::new(SELECT_COLUMNS), &[])
            .await
            .map_err(storage)?;

        let transactions = transactions_from_rows(&result.rows.unwrap_or_default())?;
        info!("Fetched {} transactions", transactions.len());
        Ok(transactions)
    }

    async fn get(&self, id: &str) -> Result<Transaction, LedgerError> {
        self.select_by_id(id)
            .await?
            .map(|(transaction, _)| transaction)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    async fn create(&self, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let trade = validate(trade)?;
        let id = new_id();
        self.insert(&id, &trade, Utc::now().timestamp_millis()).await?;
        Ok(Transaction::new(id, trade))
    }

    async fn update(&self, id: &str, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let trade = validate(trade)?;
        let (_, created_at) = self
            .select_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        self.insert(id, &trade, created_at).await?;
        Ok(Transaction::new(id, trade))
    }

    async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        if self.select_by_id(id).await?.is_none() {
            return Err(LedgerError::NotFound(id.to_string()));
        }
        let query = Query::new("DELETE FROM stock_ledger.transactions WHERE id = ?");
        self.session.query(query, (id,)).await.map_err(storage)?;
        Ok(())
    }
}
