use eyre::Result;
use fitclub_core::models::maintenance::{MaintenanceStatus, MaintenanceWindow};
use sqlx::{Pool, Postgres};

use crate::models::{convert_rows, DbMaintenance};

pub async fn list_scheduled_maintenance(pool: &Pool<Postgres>) -> Result<Vec<MaintenanceWindow>> {
    let rows = sqlx::query_as::<_, DbMaintenance>(
        r#"
        SELECT id, start_time, end_time, status
        FROM equipment_maintenance
        WHERE status = $1
        ORDER BY start_time
        "#,
    )
    .bind(MaintenanceStatus::Scheduled.as_str())
    .fetch_all(pool)
    .await?;

    Ok(convert_rows(rows)?)
}
