use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_room(pool: &Pool<Postgres>, name: &str) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>("INSERT INTO rooms (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;

    tracing::debug!("Room created: id={}, name={}", id, name);
    Ok(id)
}
