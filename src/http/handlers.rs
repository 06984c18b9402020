use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::employees::{CreateEmployeeRequest, EmployeeError};
use crate::http::response::not_found;
use crate::http::server::AppState;
use crate::upstream::Employee;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, EmployeeError> {
    Ok(Json(state.service.list_all().await?))
}

pub async fn search(
    State(state): State<AppState>,
    Path(search_string): Path<String>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    Ok(Json(state.service.search(&search_string).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, EmployeeError> {
    Ok(match state.service.get_by_id(&id).await? {
        Some(employee) => Json(employee).into_response(),
        None => not_found(),
    })
}

pub async fn highest_salary(State(state): State<AppState>) -> Result<Response, EmployeeError> {
    Ok(match state.service.highest_salary().await? {
        Some(salary) => Json(salary).into_response(),
        None => not_found(),
    })
}

pub async fn top_ten_names(State(state): State<AppState>) -> Result<Json<Vec<String>>, EmployeeError> {
    Ok(Json(state.service.top_ten_names().await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), EmployeeError> {
    let Json(request) = payload.map_err(|rejection| EmployeeError::BadRequest(rejection.body_text()))?;
    let employee = state.service.create(&request).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, EmployeeError> {
    Ok(match state.service.delete_by_id(&id).await? {
        Some(name) => Json(name).into_response(),
        None => not_found(),
    })
}
