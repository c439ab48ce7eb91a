use chrono::NaiveDateTime;
use eyre::Result;
use fitclub_core::models::{
    booking::ScheduleItem,
    class::BookingStatus,
    schedule::SessionType,
    trainer::{Specialization, Trainer},
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{convert_rows, DbScheduleItem, DbTrainer};

pub async fn create_trainer(
    pool: &Pool<Postgres>,
    first_name: &str,
    last_name: &str,
    specialization: Specialization,
    credentials: Option<&str>,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO trainers (first_name, last_name, specialization, credentials)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(specialization.as_str())
    .bind(credentials)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Trainer created: id={}, specialization={}", id, specialization);
    Ok(id)
}

pub async fn trainers_by_specialization(
    pool: &Pool<Postgres>,
    specialization: Option<Specialization>,
) -> Result<Vec<Trainer>> {
    let rows = sqlx::query_as::<_, DbTrainer>(
        r#"
        SELECT id, first_name, last_name, specialization, credentials
        FROM trainers
        WHERE $1::varchar IS NULL OR specialization = $1
        ORDER BY last_name, first_name
        "#,
    )
    .bind(specialization.map(Specialization::as_str))
    .fetch_all(pool)
    .await?;

    Ok(convert_rows(rows)?)
}

/// Live classes and private sessions the trainer leads from `now` onwards.
pub async fn upcoming_sessions(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
    now: NaiveDateTime,
) -> Result<Vec<ScheduleItem>> {
    let rows = sqlx::query_as::<_, DbScheduleItem>(
        r#"
        SELECT id, name AS title, $4::varchar AS session_type, start_time, end_time
        FROM fitness_classes
        WHERE trainer_id = $1 AND status <> $2 AND end_time > $3
        UNION ALL
        SELECT id, $5::varchar AS title, session_type, start_time, end_time
        FROM member_schedule
        WHERE trainer_id = $1 AND status <> $2 AND end_time > $3
        ORDER BY start_time
        "#,
    )
    .bind(trainer_id)
    .bind(BookingStatus::Cancelled.as_str())
    .bind(now)
    .bind(SessionType::GroupClass.as_str())
    .bind(SessionType::PersonalTraining.as_str())
    .fetch_all(pool)
    .await?;

    Ok(convert_rows(rows)?)
}
