use eyre::Result;
use fitclub_core::models::{booking::ClassListing, class::BookingStatus};
use sqlx::{Pool, Postgres};

use crate::models::{convert_rows, DbClassListing};

/// Upcoming and past classes that are still scheduled, with how many members
/// hold a live registration for each.
pub async fn list_scheduled_classes(pool: &Pool<Postgres>) -> Result<Vec<ClassListing>> {
    tracing::debug!("Listing scheduled classes");

    let rows = sqlx::query_as::<_, DbClassListing>(
        r#"
        SELECT c.id, c.name, c.activity, c.room_id, c.trainer_id, c.start_time, c.end_time,
               COUNT(ms.id) AS registered
        FROM fitness_classes c
        LEFT JOIN member_schedule ms ON ms.class_id = c.id AND ms.status <> $1
        WHERE c.status = $2
        GROUP BY c.id
        ORDER BY c.start_time
        "#,
    )
    .bind(BookingStatus::Cancelled.as_str())
    .bind(BookingStatus::Scheduled.as_str())
    .fetch_all(pool)
    .await?;

    Ok(convert_rows(rows)?)
}
