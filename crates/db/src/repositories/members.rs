use eyre::Result;
use fitclub_core::models::{
    booking::ScheduleItem,
    class::BookingStatus,
    member::{FitnessGoal, HealthMetric, Member},
    schedule::SessionType,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{convert_rows, DbFitnessGoal, DbHealthMetric, DbMember, DbScheduleItem};

pub async fn create_member(
    pool: &Pool<Postgres>,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO members (first_name, last_name, email)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Member created: id={}", id);
    Ok(id)
}

/// Everything on a member's calendar: registered classes take their times
/// from the class, private sessions carry their own.
pub async fn member_schedule(pool: &Pool<Postgres>, member_id: Uuid) -> Result<Vec<ScheduleItem>> {
    let rows = sqlx::query_as::<_, DbScheduleItem>(
        r#"
        SELECT ms.id, c.name AS title, ms.session_type, c.start_time, c.end_time
        FROM member_schedule ms
        JOIN fitness_classes c ON c.id = ms.class_id
        WHERE ms.member_id = $1 AND ms.status <> $2 AND c.status <> $2
        UNION ALL
        SELECT ms.id, $3::varchar AS title, ms.session_type, ms.start_time, ms.end_time
        FROM member_schedule ms
        WHERE ms.member_id = $1 AND ms.status <> $2 AND ms.session_type = $3
        ORDER BY start_time
        "#,
    )
    .bind(member_id)
    .bind(BookingStatus::Cancelled.as_str())
    .bind(SessionType::PersonalTraining.as_str())
    .fetch_all(pool)
    .await?;

    Ok(convert_rows(rows)?)
}

pub async fn find_member(pool: &Pool<Postgres>, member_id: Uuid) -> Result<Option<Member>> {
    let row = sqlx::query_as::<_, DbMember>(
        "SELECT id, first_name, last_name, email FROM members WHERE id = $1",
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Member::from))
}

/// Escapes `LIKE` wildcards so the fragment matches literally.
pub fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring search over first and last names.
pub async fn search_members(pool: &Pool<Postgres>, fragment: &str) -> Result<Vec<Member>> {
    tracing::debug!("Searching members by name: {}", fragment);

    let rows = sqlx::query_as::<_, DbMember>(
        r#"
        SELECT id, first_name, last_name, email
        FROM members
        WHERE first_name ILIKE $1 OR last_name ILIKE $1
        ORDER BY last_name, first_name
        "#,
    )
    .bind(like_pattern(fragment))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Member::from).collect())
}

/// `None` when the member does not exist.
pub async fn add_fitness_goal(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    goal_type: &str,
    target_value: &str,
) -> Result<Option<FitnessGoal>> {
    let row = sqlx::query_as::<_, DbFitnessGoal>(
        r#"
        INSERT INTO fitness_goals (member_id, goal_type, target_value)
        SELECT $1, $2, $3
        WHERE EXISTS (SELECT 1 FROM members WHERE id = $1)
        RETURNING id, member_id, goal_type, target_value
        "#,
    )
    .bind(member_id)
    .bind(goal_type)
    .bind(target_value)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(FitnessGoal::from))
}

/// `None` when the goal does not exist or belongs to another member.
pub async fn update_fitness_goal(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    goal_id: Uuid,
    target_value: &str,
) -> Result<Option<FitnessGoal>> {
    let row = sqlx::query_as::<_, DbFitnessGoal>(
        r#"
        UPDATE fitness_goals SET target_value = $3
        WHERE id = $2 AND member_id = $1
        RETURNING id, member_id, goal_type, target_value
        "#,
    )
    .bind(member_id)
    .bind(goal_id)
    .bind(target_value)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(FitnessGoal::from))
}

pub async fn fitness_goals(pool: &Pool<Postgres>, member_id: Uuid) -> Result<Vec<FitnessGoal>> {
    let rows = sqlx::query_as::<_, DbFitnessGoal>(
        r#"
        SELECT id, member_id, goal_type, target_value
        FROM fitness_goals
        WHERE member_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(FitnessGoal::from).collect())
}

/// `None` when the member does not exist. Recorded on the current date.
pub async fn add_health_metric(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    metric_type: &str,
    metric_value: &str,
) -> Result<Option<HealthMetric>> {
    let row = sqlx::query_as::<_, DbHealthMetric>(
        r#"
        INSERT INTO health_metrics (member_id, metric_type, metric_value)
        SELECT $1, $2, $3
        WHERE EXISTS (SELECT 1 FROM members WHERE id = $1)
        RETURNING id, member_id, metric_type, metric_value, recorded_on
        "#,
    )
    .bind(member_id)
    .bind(metric_type)
    .bind(metric_value)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(HealthMetric::from))
}

pub async fn update_health_metric(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    metric_id: Uuid,
    metric_value: &str,
) -> Result<Option<HealthMetric>> {
    let row = sqlx::query_as::<_, DbHealthMetric>(
        r#"
        UPDATE health_metrics SET metric_value = $3
        WHERE id = $2 AND member_id = $1
        RETURNING id, member_id, metric_type, metric_value, recorded_on
        "#,
    )
    .bind(member_id)
    .bind(metric_id)
    .bind(metric_value)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(HealthMetric::from))
}

pub async fn health_metrics(pool: &Pool<Postgres>, member_id: Uuid) -> Result<Vec<HealthMetric>> {
    let rows = sqlx::query_as::<_, DbHealthMetric>(
        r#"
        SELECT id, member_id, metric_type, metric_value, recorded_on
        FROM health_metrics
        WHERE member_id = $1
        ORDER BY recorded_on, id
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(HealthMetric::from).collect())
}
