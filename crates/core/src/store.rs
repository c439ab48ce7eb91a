//! Repository capability consumed by the booking orchestrator.
//!
//! A [`BookingStore`] hands out [`BookingTx`] handles. All reads a checker
//! performs and all writes the orchestrator commits for one request go
//! through the same handle. Implementations must serialize booking
//! transactions (or otherwise guarantee that no two of them interleave their
//! check and write phases), and dropping a handle without calling
//! [`BookingTx::commit`] must discard its writes.

pub mod memory;

use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    class::{BookingStatus, FitnessClass},
    interval::TimeInterval,
    maintenance::{MaintenanceStatus, MaintenanceWindow},
    schedule::MemberScheduleEntry,
    trainer::{Specialization, UnavailabilityPeriod},
};

pub use memory::MemoryStore;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn BookingTx>>;
}

/// One transaction against the club's booking tables.
///
/// Overlap counts use the half-open rule and ignore cancelled rows. An
/// `exclude` id leaves that row out of the count so that an update does not
/// conflict with the record it replaces.
#[async_trait]
pub trait BookingTx: Send {
    async fn room_exists(&mut self, room_id: Uuid) -> Result<bool>;

    async fn member_exists(&mut self, member_id: Uuid) -> Result<bool>;

    /// `None` when the trainer does not exist.
    async fn trainer_specialization(&mut self, trainer_id: Uuid) -> Result<Option<Specialization>>;

    async fn find_class(&mut self, class_id: Uuid) -> Result<Option<FitnessClass>>;

    async fn find_schedule_entry(&mut self, entry_id: Uuid) -> Result<Option<MemberScheduleEntry>>;

    async fn find_maintenance(&mut self, maintenance_id: Uuid) -> Result<Option<MaintenanceWindow>>;

    /// Only `Scheduled` windows are counted.
    async fn count_scheduled_maintenance_overlapping(
        &mut self,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64>;

    async fn count_room_classes_overlapping(
        &mut self,
        room_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64>;

    async fn count_trainer_classes_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64>;

    async fn count_trainer_sessions_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64>;

    async fn count_trainer_unavailability_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<i64>;

    /// Classes whose activity is equipment dependent.
    async fn count_equipment_classes_overlapping(&mut self, interval: &TimeInterval) -> Result<i64>;

    /// Personal training sessions of any trainer.
    async fn count_private_sessions_overlapping(&mut self, interval: &TimeInterval) -> Result<i64>;

    async fn count_class_registrations(&mut self, class_id: Uuid) -> Result<i64>;

    async fn find_unavailability(&mut self, period_id: Uuid) -> Result<Option<UnavailabilityPeriod>>;

    async fn insert_class(&mut self, class: &FitnessClass) -> Result<()>;

    async fn update_class_interval(&mut self, class_id: Uuid, interval: &TimeInterval) -> Result<()>;

    async fn set_class_status(&mut self, class_id: Uuid, status: BookingStatus) -> Result<()>;

    /// Removes every schedule entry referencing the class. Returns the count.
    async fn delete_class_registrations(&mut self, class_id: Uuid) -> Result<u64>;

    /// Removes one member's registration for a class. Returns the count.
    async fn delete_registration(&mut self, member_id: Uuid, class_id: Uuid) -> Result<u64>;

    async fn insert_schedule_entry(&mut self, entry: &MemberScheduleEntry) -> Result<()>;

    async fn update_session_interval(&mut self, entry_id: Uuid, interval: &TimeInterval) -> Result<()>;

    async fn set_schedule_entry_status(&mut self, entry_id: Uuid, status: BookingStatus) -> Result<()>;

    async fn insert_maintenance(&mut self, window: &MaintenanceWindow) -> Result<()>;

    async fn update_maintenance_interval(
        &mut self,
        maintenance_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<()>;

    async fn set_maintenance_status(
        &mut self,
        maintenance_id: Uuid,
        status: MaintenanceStatus,
    ) -> Result<()>;

    async fn insert_unavailability(&mut self, period: &UnavailabilityPeriod) -> Result<()>;

    async fn update_unavailability(&mut self, period_id: Uuid, interval: &TimeInterval) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
