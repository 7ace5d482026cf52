// src/dashboard.rs
use crate::analytics::{EvaluatedTransaction, PortfolioAnalytics};
use crate::error::LedgerError;
use crate::form::TransactionForm;
use crate::models::{NewTransaction, Transaction};
use crate::store::TransactionStore;
use crate::utilization::average_daily_investment;
use crate::view::{filtered_and_sorted, ViewState};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows above the transaction table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub analytics: PortfolioAnalytics,
    pub avg_daily_investment: f64,
}

impl DashboardSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Self {
            analytics: PortfolioAnalytics::from_transactions(transactions),
            avg_daily_investment: average_daily_investment(transactions),
        }
    }
}

/// Latest snapshot of the ledger plus the store it came from.
///
/// Writes never patch the snapshot in place: each one is followed by a full
/// re-fetch and recomputation. A write that succeeded is reported as such even
/// if that re-fetch fails; the snapshot is then flagged stale until the next
/// successful `refresh`.
pub struct Dashboard<S> {
    store: S,
    transactions: Vec<Transaction>,
    summary: DashboardSummary,
    stale: bool,
}

impl<S: TransactionStore> Dashboard<S> {
    pub async fn load(store: S) -> Result<Self, LedgerError> {
        let mut dashboard = Self {
            store,
            transactions: Vec::new(),
            summary: DashboardSummary::default(),
            stale: true,
        };
        dashboard.refresh().await?;
        Ok(dashboard)
    }

    pub async fn refresh(&mut self) -> Result<(), LedgerError> {
        self.transactions = self.store.list().await?;
        self.summary = DashboardSummary::from_transactions(&self.transactions);
        self.stale = false;
        info!("Dashboard refreshed with {} transactions", self.transactions.len());
        Ok(())
    }

    async fn refresh_after_write(&mut self) {
        if let Err(e) = self.refresh().await {
            self.stale = true;
            warn!("Write stored but dashboard refresh failed: {}", e);
        }
    }

    pub async fn create(&mut self, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let created = self.store.create(trade).await?;
        self.refresh_after_write().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, trade: NewTransaction) -> Result<Transaction, LedgerError> {
        let updated = self.store.update(id, trade).await?;
        self.refresh_after_write().await;
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), LedgerError> {
        self.store.delete(id).await?;
        self.refresh_after_write().await;
        Ok(())
    }

    /// True when the last re-fetch failed and the snapshot lags the store.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Submits a form: updates `editing` when set, otherwise creates a record.
    pub async fn submit(
        &mut self,
        form: &TransactionForm,
        editing: Option<&str>,
    ) -> Result<Transaction, LedgerError> {
        let trade = form.parse()?;
        match editing {
            Some(id) => self.update(id, trade).await,
            None => self.create(trade).await,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn rows(&self, state: &ViewState) -> Vec<EvaluatedTransaction> {
        filtered_and_sorted(&self.transactions, state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
