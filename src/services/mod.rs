pub mod cost_calculator;
pub mod subscription_service;

pub use cost_calculator::*;
pub use subscription_service::*;
