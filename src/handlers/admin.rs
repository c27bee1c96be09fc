//! Schema setup and teardown for test runs.

use crate::error::AppError;
use crate::response::{success, Success};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn setup(State(state): State<AppState>) -> Result<Json<Success>, AppError> {
    state.store.create_schema().await?;
    state.ids.reset().await;
    tracing::info!("catalog schema created");
    Ok(success())
}

/// Drops releases then artists. Counters are reset even when the drop fails part-way.
pub async fn cleanup(State(state): State<AppState>) -> Result<Json<Success>, AppError> {
    let dropped = state.store.drop_schema().await;
    state.ids.reset().await;
    dropped?;
    tracing::info!("catalog schema dropped");
    Ok(success())
}
