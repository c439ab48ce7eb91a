use eyre::Result;
use fitclub_core::models::payment::{Payment, PaymentStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{convert_rows, DbPayment};

pub async fn create_payment(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    amount: f64,
    service: &str,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO payments (member_id, amount, service, status)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(member_id)
    .bind(amount)
    .bind(service)
    .bind(PaymentStatus::Unprocessed.as_str())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn list_unprocessed_payments(pool: &Pool<Postgres>) -> Result<Vec<Payment>> {
    let rows = sqlx::query_as::<_, DbPayment>(
        r#"
        SELECT id, member_id, amount, service, status
        FROM payments
        WHERE status = $1
        ORDER BY created_at
        "#,
    )
    .bind(PaymentStatus::Unprocessed.as_str())
    .fetch_all(pool)
    .await?;

    Ok(convert_rows(rows)?)
}

/// Returns false when no payment has the given id.
pub async fn update_payment_status(
    pool: &Pool<Postgres>,
    payment_id: Uuid,
    status: PaymentStatus,
) -> Result<bool> {
    tracing::debug!("Updating payment {} to {}", payment_id, status);

    let result = sqlx::query("UPDATE payments SET status = $2 WHERE id = $1")
        .bind(payment_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
