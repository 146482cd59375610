use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::error::AppError;
use crate::models::{Period, Subscription};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start_date: String, // MM-YYYY
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Subscription {
    type Error = AppError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let parse = |raw: &str| {
            raw.parse::<Period>().map_err(|e| {
                AppError::InternalError(format!("subscription {} has a corrupt period: {e}", m.id))
            })
        };
        let start_period = parse(&m.start_date)?;
        let end_period = m.end_date.as_deref().map(parse).transpose()?;

        Ok(Subscription {
            id: m.id,
            service_name: m.service_name,
            price: m.price,
            user_id: m.user_id,
            start_period,
            end_period,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}
