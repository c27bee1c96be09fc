//! Artist and release handlers: list with filters, create.

use crate::error::AppError;
use crate::response::{created, listed};
use crate::service::{ArtistFilter, CatalogService, ReleaseFilter, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(Value::Object(m))) => Ok(m),
        Ok(_) => Err(AppError::BadRequest("body must be a JSON object".into())),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

fn query_filter<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(filter)| filter)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub async fn list_artists(
    State(state): State<AppState>,
    query: Result<Query<ArtistFilter>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query_filter(query)?;
    let rows = CatalogService::list_artists(state.store.as_ref(), &filter).await?;
    Ok(listed(rows))
}

pub async fn create_artist(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let new = RequestValidator::new_artist(&body)?;
    let artist = CatalogService::create_artist(state.store.as_ref(), &state.ids, new).await?;
    Ok(created(artist))
}

pub async fn list_releases(
    State(state): State<AppState>,
    query: Result<Query<ReleaseFilter>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query_filter(query)?;
    let rows = CatalogService::list_releases(state.store.as_ref(), &filter).await?;
    Ok(listed(rows))
}

pub async fn create_release(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let new = RequestValidator::new_release(&body)?;
    let release = CatalogService::create_release(state.store.as_ref(), &state.ids, new).await?;
    Ok(created(release))
}
