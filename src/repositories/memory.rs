use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{SubscriptionRepository, not_found};
use crate::error::AppResult;
use crate::models::{NewSubscription, Subscription, SubscriptionChanges, SubscriptionFilter};

/// Process-local store behind a single reader/writer lock. Ids start at 1 and
/// are never reused.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<i64, Subscription>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, new: NewSubscription) -> AppResult<Subscription> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let subscription = Subscription {
            id: state.last_id,
            service_name: new.service_name,
            price: new.price,
            user_id: new.user_id,
            start_period: new.start_period,
            end_period: new.end_period,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Subscription> {
        let state = self.state.read().await;
        state.rows.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn list(&self, filter: &SubscriptionFilter) -> AppResult<Vec<Subscription>> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, changes: SubscriptionChanges) -> AppResult<Subscription> {
        let mut state = self.state.write().await;
        let subscription = state.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        changes.apply_to(subscription);
        subscription.updated_at = Utc::now();
        Ok(subscription.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.rows.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}
