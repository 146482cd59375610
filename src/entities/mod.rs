pub mod subscriptions;

pub use subscriptions as subscription_entity;
