use actix_web::HttpResponse;

use crate::errors::Envelope;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(Envelope::success("OK"))
}

/// Does not probe the database.
pub async fn readiness_check() -> HttpResponse {
    HttpResponse::Ok().json(Envelope::success("READY"))
}
