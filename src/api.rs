// src/api.rs
use crate::dashboard::DashboardSummary;
use crate::error::{CustomError, LedgerError};
use crate::models::NewTransaction;
use crate::store::TransactionStore;
use crate::view::{filtered_and_sorted, ViewState};
use log::{error, info};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

pub type SharedStore = Arc<dyn TransactionStore>;

/// All routes with rejections rendered as JSON error bodies.
pub fn api(store: SharedStore) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    routes(store).recover(handle_rejection)
}

pub fn routes(store: SharedStore) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let list = warp::path!("api" / "transactions")
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(list_handler);

    let get = warp::path!("api" / "transactions" / String)
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(get_handler);

    let create = warp::path!("api" / "transactions")
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(warp::body::json())
        .and_then(create_handler);

    let update = warp::path!("api" / "transactions" / String)
        .and(warp::put())
        .and(with_store(store.clone()))
        .and(warp::body::json())
        .and_then(update_handler);

    let delete = warp::path!("api" / "transactions" / String)
        .and(warp::delete())
        .and(with_store(store.clone()))
        .and_then(delete_handler);

    let analytics = warp::path!("api" / "analytics")
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(analytics_handler);

    let view = warp::path!("api" / "view")
        .and(warp::get())
        .and(warp::query::<ViewState>())
        .and(with_store(store))
        .and_then(view_handler);

    list.or(get)
        .or(create)
        .or(update)
        .or(delete)
        .or(analytics)
        .or(view)
}

fn with_store(store: SharedStore) -> impl Filter<Extract = (SharedStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn reject(context: &str, e: LedgerError) -> Rejection {
    error!("{}: {}", context, e);
    warp::reject::custom(CustomError::from(e))
}

async fn list_handler(store: SharedStore) -> Result<impl Reply, Rejection> {
    match store.list().await {
        Ok(transactions) => {
            info!("Listed {} transactions.", transactions.len());
            Ok(warp::reply::json(&transactions))
        }
        Err(e) => Err(reject("Failed to list transactions", e)),
    }
}

async fn get_handler(id: String, store: SharedStore) -> Result<impl Reply, Rejection> {
    match store.get(&id).await {
        Ok(transaction) => Ok(warp::reply::json(&transaction)),
        Err(e) => Err(reject("Failed to retrieve transaction", e)),
    }
}

async fn create_handler(store: SharedStore, trade: NewTransaction) -> Result<impl Reply, Rejection> {
    match store.create(trade).await {
        Ok(transaction) => {
            info!("Transaction {} added successfully.", transaction.id);
            Ok(warp::reply::with_status(
                warp::reply::json(&transaction),
                StatusCode::CREATED,
            ))
        }
        Err(e) => Err(reject("Failed to add transaction", e)),
    }
}

async fn update_handler(
    id: String,
    store: SharedStore,
    trade: NewTransaction,
) -> Result<impl Reply, Rejection> {
    match store.update(&id, trade).await {
        Ok(transaction) => {
            info!("Transaction {} updated successfully.", id);
            Ok(warp::reply::json(&transaction))
        }
        Err(e) => Err(reject("Failed to update transaction", e)),
    }
}

async fn delete_handler(id: String, store: SharedStore) -> Result<impl Reply, Rejection> {
    match store.delete(&id).await {
        Ok(()) => {
            info!("Transaction {} deleted successfully.", id);
            Ok(warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT))
        }
        Err(e) => Err(reject("Failed to delete transaction", e)),
    }
}

async fn analytics_handler(store: SharedStore) -> Result<impl Reply, Rejection> {
    match store.list().await {
        Ok(transactions) => Ok(warp::reply::json(&DashboardSummary::from_transactions(
            &transactions,
        ))),
        Err(e) => Err(reject("Failed to compute analytics", e)),
    }
}

async fn view_handler(state: ViewState, store: SharedStore) -> Result<impl Reply, Rejection> {
    match store.list().await {
        Ok(transactions) => Ok(warp::reply::json(&filtered_and_sorted(&transactions, &state))),
        Err(e) => Err(reject("Failed to build transaction view", e)),
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(e) = err.find::<CustomError>() {
        (e.status, e.message.clone())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "message": message })),
        status,
    ))
}
