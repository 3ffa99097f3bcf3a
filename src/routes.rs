use actix_web::middleware::from_fn;
use actix_web::{guard, web};

use crate::errors::AppError;
use crate::handlers::{employee, health};
use crate::middleware::existence_gate;

/// Malformed JSON bodies become a 400 envelope instead of actix's plain-text error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Registers every route. Each resource is method-guarded so anything unmatched,
/// wrong method included, falls through to the app's default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/health")
                .guard(guard::Get())
                .route(web::get().to(health::health_check)),
        )
        .service(
            web::resource("/readiness")
                .guard(guard::Get())
                .route(web::get().to(health::readiness_check)),
        )
        .service(
            web::resource("/employee")
                .guard(guard::Post())
                .route(web::post().to(employee::create_employee)),
        )
        .service(
            web::resource("/employee/")
                .guard(guard::Any(guard::Get()).or(guard::Put()).or(guard::Delete()))
                .to(employee::missing_employee_id),
        )
        .service(
            web::resource("/employee/{id}")
                .guard(guard::Any(guard::Put()).or(guard::Delete()))
                .wrap(from_fn(existence_gate))
                .route(web::put().to(employee::update_employee))
                .route(web::delete().to(employee::remove_employee)),
        )
        .service(
            web::resource("/employee/{id}")
                .guard(guard::Get())
                .route(web::get().to(employee::get_employee)),
        );
}
