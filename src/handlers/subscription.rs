use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::SubscriptionService;

#[utoipa::path(
    post,
    path = "/subscriptions",
    tag = "subscriptions",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_subscription(
    subscription_service: web::Data<SubscriptionService>,
    request: web::Json<CreateSubscriptionRequest>,
) -> Result<HttpResponse> {
    match subscription_service.create(request.into_inner()).await {
        Ok(subscription) => Ok(HttpResponse::Created().json(subscription)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    params(
        ("id" = i64, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription found", body = SubscriptionResponse),
        (status = 400, description = "Invalid subscription ID", body = ErrorResponse),
        (status = 404, description = "Subscription not found", body = ErrorResponse)
    )
)]
pub async fn get_subscription(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match subscription_service.get(path.into_inner()).await {
        Ok(subscription) => Ok(HttpResponse::Ok().json(subscription)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions",
    tag = "subscriptions",
    params(
        ("user_id" = Option<String>, Query, description = "Filter by user ID"),
        ("service_name" = Option<String>, Query, description = "Filter by service name")
    ),
    responses(
        (status = 200, description = "Matching subscriptions", body = [SubscriptionResponse]),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_subscriptions(
    subscription_service: web::Data<SubscriptionService>,
    query: web::Query<ListSubscriptionsQuery>,
) -> Result<HttpResponse> {
    match subscription_service.list(&query).await {
        Ok(subscriptions) => Ok(HttpResponse::Ok().json(subscriptions)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    request_body = UpdateSubscriptionRequest,
    params(
        ("id" = i64, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Subscription not found", body = ErrorResponse)
    )
)]
pub async fn update_subscription(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<i64>,
    request: web::Json<UpdateSubscriptionRequest>,
) -> Result<HttpResponse> {
    match subscription_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(subscription) => Ok(HttpResponse::Ok().json(subscription)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    params(
        ("id" = i64, Path, description = "Subscription ID")
    ),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 400, description = "Invalid subscription ID", body = ErrorResponse),
        (status = 404, description = "Subscription not found", body = ErrorResponse)
    )
)]
pub async fn delete_subscription(
    subscription_service: web::Data<SubscriptionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match subscription_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/calculate",
    tag = "subscriptions",
    params(
        ("start_period" = String, Query, description = "Start period (MM-YYYY)"),
        ("end_period" = String, Query, description = "End period (MM-YYYY)"),
        ("user_id" = Option<String>, Query, description = "Filter by user ID"),
        ("service_name" = Option<String>, Query, description = "Filter by service name")
    ),
    responses(
        (status = 200, description = "Total cost over the period", body = CalculateCostResponse),
        (status = 400, description = "Invalid period or filter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn calculate_total_cost(
    subscription_service: web::Data<SubscriptionService>,
    query: web::Query<CalculateCostQuery>,
) -> Result<HttpResponse> {
    match subscription_service.calculate_total_cost(&query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(resp)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    // `/calculate` must be registered ahead of `/{id}`.
    cfg.service(
        web::scope("/subscriptions")
            .route("", web::post().to(create_subscription))
            .route("", web::get().to(list_subscriptions))
            .route("/calculate", web::get().to(calculate_total_cost))
            .route("/{id}", web::get().to(get_subscription))
            .route("/{id}", web::put().to(update_subscription))
            .route("/{id}", web::delete().to(delete_subscription)),
    );
}
