//! /api/cursos handlers.

use super::resource::CURSOS as R;
use crate::error::AppError;
use crate::extractors::RequestBody;
use crate::models::CursoInput;
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
        .list_cursos()
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
        .get_curso(id)
        .await
        .map_err(AppError::storage(R.read_failed))?
        .ok_or(AppError::NotFound(R.not_found))?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    RequestBody(body): RequestBody,
) -> Result<impl IntoResponse, AppError> {
    let input: CursoInput = RequestValidator::payload(body, R.required, R.missing_fields)?;
    state
        .store
        .insert_curso(&input)
        .await
        .map_err(AppError::storage(R.create_failed))?;
    Ok(created(R.created))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    RequestBody(body): RequestBody,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: CursoInput = RequestValidator::payload(body, R.required, R.missing_fields)?;
    let affected = state
        .store
        .update_curso(id, &input)
        .await
        .map_err(AppError::storage(R.update_failed))?;
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
        .delete_curso(id)
        .await
        .map_err(AppError::storage(R.delete_failed))?;
    R.check_found(affected)?;
    Ok(ok(R.deleted(id)))
}
