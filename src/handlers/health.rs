use actix_web::{HttpResponse, web};

use crate::models::HealthResponse;
use crate::services::SubscriptionService;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(subscription_service: web::Data<SubscriptionService>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        mode: subscription_service.storage_backend().to_string(),
    })
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
