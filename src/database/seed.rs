use chrono::Utc;
use sea_orm::{EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use super::DbPool;
use crate::entities::subscription_entity as subs;
use crate::error::{AppError, AppResult};

const SAMPLE_ROWS: [(&str, i64, &str, &str, Option<&str>); 3] = [
    ("Netflix", 599, "60601fee-2bf1-4721-ae6f-7636e79a0cba", "01-2023", Some("01-2024")),
    ("Spotify", 199, "60601fee-2bf1-4721-ae6f-7636e79a0cba", "02-2023", None),
    ("Yandex Plus", 299, "70701fee-3bf1-5721-be6f-8636e79a0cba", "03-2023", Some("03-2024")),
];

/// Inserts demo subscriptions if the table is empty. Returns the number of rows inserted.
pub async fn seed_sample_data(pool: &DbPool) -> AppResult<u64> {
    let existing = subs::Entity::find().count(pool).await?;
    if existing > 0 {
        log::info!("Skipping sample data, {existing} subscriptions already present");
        return Ok(0);
    }

    let now = Utc::now();
    let mut rows = Vec::with_capacity(SAMPLE_ROWS.len());
    for (service_name, price, user_id, start, end) in SAMPLE_ROWS {
        let user_id = Uuid::parse_str(user_id)
            .map_err(|e| AppError::InternalError(format!("bad sample user id: {e}")))?;
        rows.push(subs::ActiveModel {
            service_name: Set(service_name.to_string()),
            price: Set(price),
            user_id: Set(user_id),
            start_date: Set(start.to_string()),
            end_date: Set(end.map(str::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }

    let inserted = rows.len() as u64;
    subs::Entity::insert_many(rows).exec(pool).await?;
    log::info!("Inserted {inserted} sample subscriptions");
    Ok(inserted)
}
