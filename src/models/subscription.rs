use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Period;

/// A stored subscription record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: i64,
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start_period: Period,
    /// `None` means open-ended.
    pub end_period: Option<Period>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// True when the end period precedes the start period. Such a record is
    /// stored as-is but never overlaps a cost window.
    pub fn ends_before_start(&self) -> bool {
        self.end_period.is_some_and(|end| end < self.start_period)
    }
}

/// Validated input for creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i64,
    pub user_id: Uuid,
    pub start_period: Period,
    pub end_period: Option<Period>,
}

/// Validated partial update. Every `None` leaves the stored value untouched;
/// `end_period: Some(None)` clears the end date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionChanges {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<Uuid>,
    pub start_period: Option<Period>,
    pub end_period: Option<Option<Period>>,
}

impl SubscriptionChanges {
    pub fn apply_to(&self, subscription: &mut Subscription) {
        if let Some(name) = &self.service_name {
            subscription.service_name = name.clone();
        }
        if let Some(price) = self.price {
            subscription.price = price;
        }
        if let Some(user_id) = self.user_id {
            subscription.user_id = user_id;
        }
        if let Some(start) = self.start_period {
            subscription.start_period = start;
        }
        if let Some(end) = self.end_period {
            subscription.end_period = end;
        }
    }
}

/// Filters shared by listing and cost calculation. Both are exact matches
/// combined with AND; an absent filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

impl SubscriptionFilter {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        self.user_id.is_none_or(|id| subscription.user_id == id)
            && self
                .service_name
                .as_deref()
                .is_none_or(|name| subscription.service_name == name)
    }

    /// Builds a filter from raw query values; empty strings count as absent.
    pub fn from_query(user_id: Option<&str>, service_name: Option<&str>) -> AppResult<Self> {
        let user_id = match user_id.filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::ValidationError("Invalid user ID format".to_string()))?,
            ),
            None => None,
        };
        let service_name = service_name
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Self {
            user_id,
            service_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: i64,
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    #[schema(example = 400)]
    pub price: i64,
    pub user_id: Uuid,
    #[schema(value_type = String, example = "07-2025")]
    pub start_date: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "12-2025")]
    pub end_date: Option<Period>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            service_name: s.service_name,
            price: s.price,
            user_id: s.user_id,
            start_date: s.start_period,
            end_date: s.end_period,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    #[schema(example = 400)]
    pub price: i64,
    pub user_id: Uuid,
    #[schema(example = "07-2025")]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

impl CreateSubscriptionRequest {
    pub fn validate(self) -> AppResult<NewSubscription> {
        let service_name = validate_service_name(&self.service_name)?;
        validate_price(self.price)?;
        let start_period = Period::parse_field(&self.start_date, "start_date")?;
        let end_period = self
            .end_date
            .as_deref()
            .map(|v| Period::parse_field(v, "end_date"))
            .transpose()?;

        Ok(NewSubscription {
            service_name,
            price: self.price,
            user_id: self.user_id,
            start_period,
            end_period,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSubscriptionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "07-2025")]
    pub start_date: Option<String>,
    /// Omit to keep the current end date, send `null` to make the subscription open-ended.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "12-2025")]
    pub end_date: Option<Option<String>>,
}

impl UpdateSubscriptionRequest {
    pub fn validate(self) -> AppResult<SubscriptionChanges> {
        let service_name = self
            .service_name
            .as_deref()
            .map(validate_service_name)
            .transpose()?;
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        let start_period = self
            .start_date
            .as_deref()
            .map(|v| Period::parse_field(v, "start_date"))
            .transpose()?;
        let end_period = match self.end_date {
            Some(Some(v)) => Some(Some(Period::parse_field(&v, "end_date")?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(SubscriptionChanges {
            service_name,
            price: self.price,
            user_id: self.user_id,
            start_period,
            end_period,
        })
    }
}

/// Maps a present field (including `null`) to `Some`, so that together with
/// `#[serde(default)]` an absent field stays `None`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn validate_service_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            "service_name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 255 {
        return Err(AppError::ValidationError(
            "service_name must be at most 255 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Upper bound on a monthly price; keeps `price * months` well inside `i64`.
pub const MAX_PRICE: i64 = i32::MAX as i64;

fn validate_price(price: i64) -> AppResult<()> {
    if price < 1 {
        return Err(AppError::ValidationError(
            "price must be a positive integer".to_string(),
        ));
    }
    if price > MAX_PRICE {
        return Err(AppError::ValidationError(format!(
            "price must not exceed {MAX_PRICE}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSubscriptionsQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateCostQuery {
    pub start_period: String,
    pub end_period: String,
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalculateCostResponse {
    #[schema(example = 10589)]
    pub total_cost: i64,
}
