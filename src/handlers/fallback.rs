use actix_web::{HttpRequest, HttpResponse};

use crate::errors::Envelope;

pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    let message = format!("Route '{}' does not exist", req.uri());
    log::debug!("{} {}", req.method(), message);
    HttpResponse::NotFound().json(Envelope::fail(&message))
}
