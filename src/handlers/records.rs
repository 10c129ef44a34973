//! # Records Controller
//!
//! In-memory CRUD endpoints. Every route here is wrapped by the request
//! logging interceptor and reports failures through [`ServiceError`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult, ValidatedJson};
use crate::models::{AppState, NewRecord, Record};

/// Record id extracted from the path. Malformed ids are rejected with `400`.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state).await?;
        Ok(RecordId(id))
    }
}

fn record_not_found(id: Uuid) -> ServiceError {
    ServiceError::RecordNotFound(format!("Record not found with id {id}"))
}

/// Creates a record.
///
/// POST /api/records NewRecord
///
/// # Returns
///
/// - `201 Created` - The stored record
/// - `206 Partial Content` - Field validation failed
/// - `400 Bad Request` - Malformed JSON
#[instrument(skip_all)]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewRecord>,
) -> ServiceResult<(StatusCode, Json<Record>)> {
    let record = payload.into_record(Uuid::new_v4());
    state.records.insert(record.id, record.clone());

    info!(record_id = %record.id, "Record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists all records ordered by name.
///
/// GET /api/records
#[instrument(skip_all)]
pub async fn list_records(State(state): State<Arc<AppState>>) -> Json<Vec<Record>> {
    let mut records: Vec<Record> = state.records.iter().map(|r| r.value().clone()).collect();
    records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    debug!(count = records.len(), "Listing records");
    Json(records)
}

/// Fetches one record.
///
/// GET /api/records/{id}
///
/// # Returns
///
/// - `200 OK` - The record
/// - `400 Bad Request` - The id is not a UUID
/// - `500 Internal Server Error` - No record has this id
#[instrument(skip_all, fields(record_id = %id))]
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> ServiceResult<Json<Record>> {
    state
        .records
        .get(&id)
        .map(|r| Json(r.value().clone()))
        .ok_or_else(|| record_not_found(id))
}

/// Deletes one record.
///
/// DELETE /api/records/{id}
#[instrument(skip_all, fields(record_id = %id))]
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> ServiceResult<StatusCode> {
    match state.records.remove(&id) {
        Some(_) => {
            info!("Record deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(record_not_found(id)),
    }
}
