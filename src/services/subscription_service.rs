use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::repositories::SubscriptionRepository;
use crate::services::cost_calculator::calculate_total_cost;

#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repo }
    }

    pub fn storage_backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn create(&self, request: CreateSubscriptionRequest) -> AppResult<SubscriptionResponse> {
        let new = request.validate()?;
        let created = self.repo.create(new).await?;
        warn_if_reversed(&created);
        log::info!("Created subscription with ID: {}", created.id);
        Ok(created.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<SubscriptionResponse> {
        let subscription = self.repo.get_by_id(id).await?;
        log::info!("Retrieved subscription with ID: {id}");
        Ok(subscription.into())
    }

    pub async fn list(&self, query: &ListSubscriptionsQuery) -> AppResult<Vec<SubscriptionResponse>> {
        let filter =
            SubscriptionFilter::from_query(query.user_id.as_deref(), query.service_name.as_deref())?;
        let rows = self.repo.list(&filter).await?;
        log::info!("Listed {} subscriptions", rows.len());
        Ok(rows.into_iter().map(SubscriptionResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateSubscriptionRequest,
    ) -> AppResult<SubscriptionResponse> {
        let changes = request.validate()?;
        let updated = self.repo.update(id, changes).await?;
        warn_if_reversed(&updated);
        log::info!("Updated subscription with ID: {id}");
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        log::info!("Deleted subscription with ID: {id}");
        Ok(())
    }

    /// Validates the window, loads the matching records and sums their cost.
    pub async fn calculate_total_cost(
        &self,
        query: &CalculateCostQuery,
    ) -> AppResult<CalculateCostResponse> {
        let start = Period::parse_field(&query.start_period, "start_period")?;
        let end = Period::parse_field(&query.end_period, "end_period")?;
        if start > end {
            return Err(AppError::ValidationError(
                "start_period cannot be after end_period".to_string(),
            ));
        }
        let filter =
            SubscriptionFilter::from_query(query.user_id.as_deref(), query.service_name.as_deref())?;

        let records = self.repo.list(&filter).await?;
        let total_cost = calculate_total_cost(&records, start, end, &filter);
        log::info!("Calculated total cost: {total_cost}");
        Ok(CalculateCostResponse { total_cost })
    }
}

fn warn_if_reversed(subscription: &Subscription) {
    if subscription.ends_before_start()
        && let Some(end) = subscription.end_period
    {
        log::warn!(
            "Subscription {} has end_date {end} before start_date {}; it will not contribute to cost",
            subscription.id,
            subscription.start_period
        );
    }
}
