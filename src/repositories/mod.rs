//! Storage abstraction for subscription records.

pub mod memory;
pub mod postgres;

pub use memory::InMemorySubscriptionRepository;
pub use postgres::SeaOrmSubscriptionRepository;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewSubscription, Subscription, SubscriptionChanges, SubscriptionFilter};

/// CRUD over subscription records. `get_by_id`, `update` and `delete` return
/// `AppError::NotFound` for an unknown id.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Short backend label reported by the health endpoint.
    fn backend(&self) -> &'static str;

    async fn create(&self, new: NewSubscription) -> AppResult<Subscription>;

    async fn get_by_id(&self, id: i64) -> AppResult<Subscription>;

    /// Records matching every filter that is set, in unspecified order.
    async fn list(&self, filter: &SubscriptionFilter) -> AppResult<Vec<Subscription>>;

    async fn update(&self, id: i64, changes: SubscriptionChanges) -> AppResult<Subscription>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub(crate) fn not_found(id: i64) -> crate::error::AppError {
    crate::error::AppError::NotFound(format!("Subscription {id} not found"))
}
