use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use super::{SubscriptionRepository, not_found};
use crate::entities::subscription_entity as subs;
use crate::error::{AppError, AppResult};
use crate::models::{NewSubscription, Subscription, SubscriptionChanges, SubscriptionFilter};

#[derive(Clone)]
pub struct SeaOrmSubscriptionRepository {
    pool: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    fn backend(&self) -> &'static str {
        "database"
    }

    async fn create(&self, new: NewSubscription) -> AppResult<Subscription> {
        let now = Utc::now();
        let model = subs::ActiveModel {
            service_name: Set(new.service_name),
            price: Set(new.price),
            user_id: Set(new.user_id),
            start_date: Set(new.start_period.to_string()),
            end_date: Set(new.end_period.map(|p| p.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Subscription::try_from(model)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Subscription> {
        let model = subs::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        Subscription::try_from(model)
    }

    async fn list(&self, filter: &SubscriptionFilter) -> AppResult<Vec<Subscription>> {
        let mut query = subs::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(subs::Column::UserId.eq(user_id));
        }
        if let Some(name) = &filter.service_name {
            query = query.filter(subs::Column::ServiceName.eq(name.as_str()));
        }

        query
            .order_by_asc(subs::Column::Id)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(Subscription::try_from)
            .collect()
    }

    async fn update(&self, id: i64, changes: SubscriptionChanges) -> AppResult<Subscription> {
        let existing = subs::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut am = existing.into_active_model();
        if let Some(name) = changes.service_name {
            am.service_name = Set(name);
        }
        if let Some(price) = changes.price {
            am.price = Set(price);
        }
        if let Some(user_id) = changes.user_id {
            am.user_id = Set(user_id);
        }
        if let Some(start) = changes.start_period {
            am.start_date = Set(start.to_string());
        }
        if let Some(end) = changes.end_period {
            am.end_date = Set(end.map(|p| p.to_string()));
        }
        am.updated_at = Set(Utc::now());

        let model = am
            .update(&self.pool)
            .await
            .map_err(|e| update_error(id, e))?;
        Subscription::try_from(model)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = subs::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// A row deleted between the lookup and the write surfaces as
/// `RecordNotUpdated`; report it like any other missing id.
fn update_error(id: i64, err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotUpdated => not_found(id),
        other => AppError::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanished_row_on_update_is_not_found() {
        assert!(matches!(
            update_error(7, DbErr::RecordNotUpdated),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            update_error(7, DbErr::Custom("connection reset".to_string())),
            AppError::DatabaseError(_)
        ));
    }
}
