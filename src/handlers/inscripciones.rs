//! /api/inscripciones handlers, including the joined detail view.

use super::resource::{enrollment_write_error, DETALLES_FAILED, INSCRIPCIONES as R};
use crate::error::AppError;
use crate::extractors::RequestBody;
use crate::models::InscripcionInput;
use crate::response::{created, ok, rows};
use crate::service::{parse_id, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = state
        .store
        .list_inscripciones()
        .await
        .map_err(AppError::storage(R.list_failed))?;
    Ok(rows(data))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .store
        .get_inscripcion(id)
        .await
        .map_err(AppError::storage(R.read_failed))?
        .ok_or(AppError::NotFound(R.not_found))?;
    Ok(Json(row))
}

/// The existence check and the insert are separate statements; two concurrent
/// requests for the same pair can both pass the check unless the table has a
/// unique index on (estudiante_id, curso_id).
pub async fn create(
    State(state): State<AppState>,
    RequestBody(body): RequestBody,
) -> Result<impl IntoResponse, AppError> {
    let input: InscripcionInput = RequestValidator::payload(body, R.required, R.missing_fields)?;
    let exists = state
        .store
        .enrollment_exists(input.estudiante_id, input.curso_id)
        .await
        .map_err(AppError::storage(R.create_failed))?;
    if exists {
        return Err(AppError::DuplicateEnrollment);
    }
    state
        .store
        .insert_inscripcion(&input)
        .await
        .map_err(enrollment_write_error(R.create_failed))?;
    Ok(created(R.created))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    RequestBody(body): RequestBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: InscripcionInput = RequestValidator::payload(body, R.required, R.missing_fields)?;
    let affected = state
        .store
        .update_inscripcion(id, &input)
        .await
        .map_err(enrollment_write_error(R.update_failed))?;
    R.check_found(affected)?;
    Ok(ok(R.updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let affected = state
        .store
        .delete_inscripcion(id)
        .await
        .map_err(AppError::storage(R.delete_failed))?;
    R.check_found(affected)?;
    Ok(ok(R.deleted(id)))
}

pub async fn detalles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = state
        .store
        .list_inscripcion_detalles()
        .await
        .map_err(AppError::storage(DETALLES_FAILED))?;
    Ok(rows(data))
}
