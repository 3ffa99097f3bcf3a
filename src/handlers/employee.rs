use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{AppError, Envelope};
use crate::middleware::GatedEmployeeId;
use crate::models::employee::{Employee, EmployeeResponse};
use crate::state::AppState;
use crate::utils::validation::{validate_payload, validate_update_fields};

fn parse_employee_id(raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("Employee ID is required".to_string()));
    }
    Uuid::parse_str(raw)
        .map_err(|_| AppError::BadRequest(format!("Employee ID '{}' is not a valid UUID", raw)))
}

pub async fn create_employee(
    state: web::Data<AppState>,
    new_employee: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*new_employee)?;

    state.within_deadline(state.store.create(&new_employee)).await?;
    log::info!("Created employee {}", new_employee.id);

    Ok(HttpResponse::Ok().json(Envelope::success("Employee created successfully")))
}

pub async fn get_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_employee_id(&employee_id)?;

    let employee = state.within_deadline(state.store.get(id)).await?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

pub async fn update_employee(
    state: web::Data<AppState>,
    employee_id: web::ReqData<GatedEmployeeId>,
    fields: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let GatedEmployeeId(id) = employee_id.into_inner();
    let updates = validate_update_fields(&fields)?;

    state
        .within_deadline(state.store.apply_partial_update(id, &updates))
        .await?;
    log::info!("Updated employee {} ({} field(s))", id, updates.len());

    Ok(HttpResponse::Ok().json(Envelope::success("Employee successfully updated")))
}

pub async fn remove_employee(
    state: web::Data<AppState>,
    employee_id: web::ReqData<GatedEmployeeId>,
) -> Result<HttpResponse, AppError> {
    let GatedEmployeeId(id) = employee_id.into_inner();

    state.within_deadline(state.store.delete(id)).await?;
    log::info!("Deleted employee {}", id);

    Ok(HttpResponse::Ok().json(Envelope::success("Employee successfully deleted")))
}

/// `/employee/` with nothing after the slash.
pub async fn missing_employee_id() -> Result<HttpResponse, AppError> {
    Err(AppError::BadRequest("Employee ID is required".to_string()))
}
