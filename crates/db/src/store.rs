//! Postgres implementation of the booking capability.
//!
//! Each [`PgBookingTx`] wraps one database transaction that first takes a
//! club-wide transaction-scoped advisory lock, so booking transactions run one
//! at a time and their checks see every committed write. The room exclusion
//! constraint in the schema backs this up for room double booking.

use async_trait::async_trait;
use eyre::Result;
use fitclub_core::models::{
    class::{BookingStatus, FitnessClass},
    interval::TimeInterval,
    maintenance::{MaintenanceStatus, MaintenanceWindow},
    schedule::{MemberScheduleEntry, SessionType},
    trainer::{Specialization, UnavailabilityPeriod},
};
use fitclub_core::store::{BookingStore, BookingTx};
use sqlx::{Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::models::{DbFitnessClass, DbMaintenance, DbScheduleEntry, DbUnavailability};
use crate::DbPool;

/// Key for `pg_advisory_xact_lock`. Shared by every booking transaction.
pub const BOOKING_LOCK_KEY: i64 = 0x0F17_C1B0;

#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTx>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOKING_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        debug!("Booking transaction started");
        Ok(Box::new(PgBookingTx { tx }))
    }
}

pub struct PgBookingTx {
    tx: Transaction<'static, Postgres>,
}

fn equipment_activities() -> Vec<String> {
    Specialization::EQUIPMENT_DEPENDENT
        .iter()
        .map(|spec| spec.as_str().to_string())
        .collect()
}

#[async_trait]
impl BookingTx for PgBookingTx {
    async fn room_exists(&mut self, room_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM rooms WHERE id = $1)",
        )
        .bind(room_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(exists)
    }

    async fn member_exists(&mut self, member_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM members WHERE id = $1)",
        )
        .bind(member_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(exists)
    }

    async fn trainer_specialization(&mut self, trainer_id: Uuid) -> Result<Option<Specialization>> {
        let label = sqlx::query_scalar::<_, String>(
            "SELECT specialization FROM trainers WHERE id = $1",
        )
        .bind(trainer_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match label {
            Some(label) => Ok(Some(label.parse()?)),
            None => Ok(None),
        }
    }

    async fn find_class(&mut self, class_id: Uuid) -> Result<Option<FitnessClass>> {
        let row = sqlx::query_as::<_, DbFitnessClass>(
            r#"
            SELECT id, name, activity, room_id, trainer_id, start_time, end_time, status
            FROM fitness_classes
            WHERE id = $1
            "#,
        )
        .bind(class_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => Ok(Some(FitnessClass::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn find_schedule_entry(&mut self, entry_id: Uuid) -> Result<Option<MemberScheduleEntry>> {
        let row = sqlx::query_as::<_, DbScheduleEntry>(
            r#"
            SELECT id, member_id, class_id, trainer_id, start_time, end_time, session_type, status
            FROM member_schedule
            WHERE id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => Ok(Some(MemberScheduleEntry::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn find_maintenance(&mut self, maintenance_id: Uuid) -> Result<Option<MaintenanceWindow>> {
        let row = sqlx::query_as::<_, DbMaintenance>(
            "SELECT id, start_time, end_time, status FROM equipment_maintenance WHERE id = $1",
        )
        .bind(maintenance_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => Ok(Some(MaintenanceWindow::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn count_scheduled_maintenance_overlapping(
        &mut self,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM equipment_maintenance
            WHERE status = $1
              AND start_time < $3 AND $2 < end_time
              AND ($4::uuid IS NULL OR id <> $4)
            "#,
        )
        .bind(MaintenanceStatus::Scheduled.as_str())
        .bind(interval.start)
        .bind(interval.end)
        .bind(exclude)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_room_classes_overlapping(
        &mut self,
        room_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM fitness_classes
            WHERE room_id = $1
              AND status <> $2
              AND start_time < $4 AND $3 < end_time
              AND ($5::uuid IS NULL OR id <> $5)
            "#,
        )
        .bind(room_id)
        .bind(BookingStatus::Cancelled.as_str())
        .bind(interval.start)
        .bind(interval.end)
        .bind(exclude)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_trainer_classes_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM fitness_classes
            WHERE trainer_id = $1
              AND status <> $2
              AND start_time < $4 AND $3 < end_time
              AND ($5::uuid IS NULL OR id <> $5)
            "#,
        )
        .bind(trainer_id)
        .bind(BookingStatus::Cancelled.as_str())
        .bind(interval.start)
        .bind(interval.end)
        .bind(exclude)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_trainer_sessions_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM member_schedule
            WHERE trainer_id = $1
              AND status <> $2
              AND start_time IS NOT NULL
              AND start_time < $4 AND $3 < end_time
              AND ($5::uuid IS NULL OR id <> $5)
            "#,
        )
        .bind(trainer_id)
        .bind(BookingStatus::Cancelled.as_str())
        .bind(interval.start)
        .bind(interval.end)
        .bind(exclude)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_trainer_unavailability_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM trainer_unavailability
            WHERE trainer_id = $1
              AND start_time < $3 AND $2 < end_time
            "#,
        )
        .bind(trainer_id)
        .bind(interval.start)
        .bind(interval.end)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_equipment_classes_overlapping(&mut self, interval: &TimeInterval) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM fitness_classes
            WHERE activity = ANY($1)
              AND status <> $2
              AND start_time < $4 AND $3 < end_time
            "#,
        )
        .bind(equipment_activities())
        .bind(BookingStatus::Cancelled.as_str())
        .bind(interval.start)
        .bind(interval.end)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_private_sessions_overlapping(&mut self, interval: &TimeInterval) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM member_schedule
            WHERE session_type = $1
              AND status <> $2
              AND start_time < $4 AND $3 < end_time
            "#,
        )
        .bind(SessionType::PersonalTraining.as_str())
        .bind(BookingStatus::Cancelled.as_str())
        .bind(interval.start)
        .bind(interval.end)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn count_class_registrations(&mut self, class_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM member_schedule WHERE class_id = $1 AND status <> $2",
        )
        .bind(class_id)
        .bind(BookingStatus::Cancelled.as_str())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }

    async fn find_unavailability(&mut self, period_id: Uuid) -> Result<Option<UnavailabilityPeriod>> {
        let row = sqlx::query_as::<_, DbUnavailability>(
            "SELECT id, trainer_id, start_time, end_time FROM trainer_unavailability WHERE id = $1",
        )
        .bind(period_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => Ok(Some(UnavailabilityPeriod::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn insert_class(&mut self, class: &FitnessClass) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fitness_classes (id, name, activity, room_id, trainer_id, start_time, end_time, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(class.id)
        .bind(&class.name)
        .bind(class.activity.as_str())
        .bind(class.room_id)
        .bind(class.trainer_id)
        .bind(class.interval.start)
        .bind(class.interval.end)
        .bind(class.status.as_str())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn update_class_interval(&mut self, class_id: Uuid, interval: &TimeInterval) -> Result<()> {
        sqlx::query("UPDATE fitness_classes SET start_time = $2, end_time = $3 WHERE id = $1")
            .bind(class_id)
            .bind(interval.start)
            .bind(interval.end)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn set_class_status(&mut self, class_id: Uuid, status: BookingStatus) -> Result<()> {
        sqlx::query("UPDATE fitness_classes SET status = $2 WHERE id = $1")
            .bind(class_id)
            .bind(status.as_str())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn delete_class_registrations(&mut self, class_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM member_schedule WHERE class_id = $1")
            .bind(class_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_registration(&mut self, member_id: Uuid, class_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM member_schedule WHERE member_id = $1 AND class_id = $2")
            .bind(member_id)
            .bind(class_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_schedule_entry(&mut self, entry: &MemberScheduleEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO member_schedule (id, member_id, class_id, trainer_id, start_time, end_time, session_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.member_id)
        .bind(entry.class_id)
        .bind(entry.trainer_id)
        .bind(entry.interval.map(|i| i.start))
        .bind(entry.interval.map(|i| i.end))
        .bind(entry.session_type.as_str())
        .bind(entry.status.as_str())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn update_session_interval(&mut self, entry_id: Uuid, interval: &TimeInterval) -> Result<()> {
        sqlx::query("UPDATE member_schedule SET start_time = $2, end_time = $3 WHERE id = $1")
            .bind(entry_id)
            .bind(interval.start)
            .bind(interval.end)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn set_schedule_entry_status(&mut self, entry_id: Uuid, status: BookingStatus) -> Result<()> {
        sqlx::query("UPDATE member_schedule SET status = $2 WHERE id = $1")
            .bind(entry_id)
            .bind(status.as_str())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn insert_maintenance(&mut self, window: &MaintenanceWindow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO equipment_maintenance (id, start_time, end_time, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(window.id)
        .bind(window.interval.start)
        .bind(window.interval.end)
        .bind(window.status.as_str())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn update_maintenance_interval(
        &mut self,
        maintenance_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<()> {
        sqlx::query("UPDATE equipment_maintenance SET start_time = $2, end_time = $3 WHERE id = $1")
            .bind(maintenance_id)
            .bind(interval.start)
            .bind(interval.end)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn set_maintenance_status(
        &mut self,
        maintenance_id: Uuid,
        status: MaintenanceStatus,
    ) -> Result<()> {
        sqlx::query("UPDATE equipment_maintenance SET status = $2 WHERE id = $1")
            .bind(maintenance_id)
            .bind(status.as_str())
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn insert_unavailability(&mut self, period: &UnavailabilityPeriod) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trainer_unavailability (id, trainer_id, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(period.id)
        .bind(period.trainer_id)
        .bind(period.interval.start)
        .bind(period.interval.end)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn update_unavailability(&mut self, period_id: Uuid, interval: &TimeInterval) -> Result<()> {
        sqlx::query("UPDATE trainer_unavailability SET start_time = $2, end_time = $3 WHERE id = $1")
            .bind(period_id)
            .bind(interval.start)
            .bind(interval.end)
            .execute(&mut *self.tx)
            .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let PgBookingTx { tx } = *self;
        tx.commit().await?;
        debug!("Booking transaction committed");
        Ok(())
    }
}
