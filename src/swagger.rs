use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::subscription::create_subscription,
        handlers::subscription::get_subscription,
        handlers::subscription::list_subscriptions,
        handlers::subscription::update_subscription,
        handlers::subscription::delete_subscription,
        handlers::subscription::calculate_total_cost,
    ),
    components(
        schemas(
            SubscriptionResponse,
            CreateSubscriptionRequest,
            UpdateSubscriptionRequest,
            CalculateCostResponse,
            HealthResponse,
            ErrorResponse,
            ApiError,
        )
    ),
    tags(
        (name = "subscriptions", description = "Subscription records and cost reports"),
        (name = "health", description = "Liveness probe"),
    ),
    info(
        title = "Subscription Service API",
        version = "1.0.0",
        description = "API for managing subscription services"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
