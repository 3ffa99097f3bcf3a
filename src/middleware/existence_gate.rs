use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, HttpMessage};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Id of an employee the gate has confirmed exists, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatedEmployeeId(pub Uuid);

/// Lets the request through only if `{id}` names an existing employee.
/// Rejections are answered here with a fail envelope; the wrapped handler never runs.
pub async fn existence_gate<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error>
where
    B: MessageBody + 'static,
{
    match check_exists(&req).await {
        Ok(id) => {
            req.extensions_mut().insert(GatedEmployeeId(id));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(err) => {
            log::debug!("Rejected {} {}: {}", req.method(), req.path(), err);
            Ok(req.error_response(err).map_into_right_body())
        }
    }
}

/// Unknown or non-UUID ids are not found; storage failures pass through as 500.
async fn check_exists(req: &ServiceRequest) -> Result<Uuid, AppError> {
    let raw_id = req.match_info().get("id").unwrap_or("").trim();
    if raw_id.is_empty() {
        return Err(AppError::BadRequest("Employee ID is required".to_string()));
    }

    let not_found = || AppError::NotFound("employee not found.".to_string());
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::DatabaseError("employee store is not configured".to_string()))?;

    if state.within_deadline(state.store.exists(id)).await? {
        Ok(id)
    } else {
        Err(not_found())
    }
}
