// src/main.rs
use env_logger::Builder;
use log::{error, info, LevelFilter};
use std::sync::Arc;
use stock_ledger::api::{self, SharedStore};
use stock_ledger::config::{Settings, StorageBackend};
use stock_ledger::db::ScyllaStore;
use stock_ledger::store::MemoryStore;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env();
    let level = settings
        .as_ref()
        .map(|s| s.log_level)
        .unwrap_or(LevelFilter::Info);
    Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .init();

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let store: SharedStore = match settings.storage {
        StorageBackend::Memory => {
            info!("Using in-memory transaction store.");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Scylla => match ScyllaStore::connect(&settings.scylla_node).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!("Failed to initialize database: {}", e);
                return;
            }
        },
    };

    info!("Starting the stock ledger application...");
    let api = api::api(store);

    info!("Server running on http://{}", settings.bind_addr);
    warp::serve(api).run(settings.bind_addr).await;
}
