pub mod health;
pub mod subscription;

pub use health::health_config;
pub use subscription::subscription_config;

use actix_web::web;

use crate::error::AppError;

/// Malformed JSON bodies become validation errors in the common envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| {
        AppError::ValidationError("Invalid subscription ID".to_string()).into()
    })
}

/// Extractor settings plus every route under `/api/v1`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(
            web::scope("/api/v1")
                .configure(health_config)
                .configure(subscription_config),
        );
}
