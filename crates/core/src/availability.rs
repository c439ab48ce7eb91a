//! Per-resource availability checkers.
//!
//! Each checker answers one question against the state visible through a
//! [`BookingTx`]: is this candidate interval blocked, and if so, why. The
//! polarity is fixed: [`AvailabilityChecker::blocked_by`] returns the
//! blocking reason, and [`AvailabilityChecker::is_available`] is its
//! negation. Nothing here writes.

use async_trait::async_trait;
use eyre::Result;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    booking::RejectReason, interval::TimeInterval, schedule::SessionType,
    trainer::Specialization,
};
use crate::store::BookingTx;

#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    /// Returns the reason `candidate` cannot be booked, or `None` when it is
    /// free. `exclude` names a record of the checked kind to ignore, which is
    /// how updates avoid conflicting with themselves.
    async fn blocked_by(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<Option<RejectReason>>;

    async fn is_available(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        Ok(self.blocked_by(tx, candidate, exclude).await?.is_none())
    }
}

/// Blocks any candidate that overlaps a `Scheduled` maintenance window.
///
/// `exclude` is a maintenance window id.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentMaintenanceChecker;

impl EquipmentMaintenanceChecker {
    /// True when maintenance is scheduled during the candidate.
    pub async fn is_under_maintenance(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<bool> {
        let overlapping = tx
            .count_scheduled_maintenance_overlapping(candidate, exclude)
            .await?;
        debug!(
            "Maintenance check for {} - {}: {} overlapping window(s)",
            candidate.start, candidate.end, overlapping
        );
        Ok(overlapping > 0)
    }
}

#[async_trait]
impl AvailabilityChecker for EquipmentMaintenanceChecker {
    async fn blocked_by(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<Option<RejectReason>> {
        if self.is_under_maintenance(tx, candidate, exclude).await? {
            return Ok(Some(RejectReason::EquipmentConflict));
        }
        Ok(None)
    }
}

/// A room is free when no maintenance is running and no other live class
/// occupies it. `exclude` is a class id.
#[derive(Debug, Clone, Copy)]
pub struct RoomAvailabilityChecker {
    pub room_id: Uuid,
}

impl RoomAvailabilityChecker {
    pub fn new(room_id: Uuid) -> Self {
        Self { room_id }
    }
}

#[async_trait]
impl AvailabilityChecker for RoomAvailabilityChecker {
    async fn blocked_by(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<Option<RejectReason>> {
        if EquipmentMaintenanceChecker
            .is_under_maintenance(tx, candidate, None)
            .await?
        {
            debug!("Room {} blocked by equipment maintenance", self.room_id);
            return Ok(Some(RejectReason::EquipmentConflict));
        }

        let classes = tx
            .count_room_classes_overlapping(self.room_id, candidate, exclude)
            .await?;
        debug!("Room {} has {} overlapping class(es)", self.room_id, classes);
        if classes > 0 {
            return Ok(Some(RejectReason::RoomConflict));
        }
        Ok(None)
    }
}

/// A trainer is free when none of these hold:
///
/// 1. maintenance overlaps and the trainer's specialization needs equipment
///    (Yoga, Swimming);
/// 2. a declared unavailability period overlaps;
/// 3. another live class or private session of the trainer overlaps.
///
/// `exclude` names a class when `session_type` is `GroupClass` and a private
/// session when it is `PersonalTraining`.
#[derive(Debug, Clone, Copy)]
pub struct TrainerAvailabilityChecker {
    pub trainer_id: Uuid,
    pub specialization: Specialization,
    pub session_type: SessionType,
}

impl TrainerAvailabilityChecker {
    pub fn new(trainer_id: Uuid, specialization: Specialization, session_type: SessionType) -> Self {
        Self {
            trainer_id,
            specialization,
            session_type,
        }
    }
}

#[async_trait]
impl AvailabilityChecker for TrainerAvailabilityChecker {
    async fn blocked_by(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<Option<RejectReason>> {
        if !self.specialization.is_maintenance_exempt()
            && EquipmentMaintenanceChecker
                .is_under_maintenance(tx, candidate, None)
                .await?
        {
            debug!(
                "Trainer {} ({}) blocked by equipment maintenance",
                self.trainer_id, self.specialization
            );
            return Ok(Some(RejectReason::EquipmentConflict));
        }

        let unavailable = tx
            .count_trainer_unavailability_overlapping(self.trainer_id, candidate)
            .await?;
        if unavailable > 0 {
            debug!("Trainer {} declared unavailable", self.trainer_id);
            return Ok(Some(RejectReason::TrainerConflict));
        }

        let (exclude_class, exclude_session) = match self.session_type {
            SessionType::GroupClass => (exclude, None),
            SessionType::PersonalTraining => (None, exclude),
        };
        let sessions = tx
            .count_trainer_sessions_overlapping(self.trainer_id, candidate, exclude_session)
            .await?;
        let classes = tx
            .count_trainer_classes_overlapping(self.trainer_id, candidate, exclude_class)
            .await?;
        debug!(
            "Trainer {} availability for {}: {} session(s), {} class(es) overlapping",
            self.trainer_id, self.session_type, sessions, classes
        );
        if sessions + classes > 0 {
            return Ok(Some(RejectReason::TrainerConflict));
        }
        Ok(None)
    }
}

/// Maintenance may only be placed where no other maintenance, no live
/// equipment-dependent class and no live private session overlaps.
/// `exclude` is a maintenance window id.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintenanceSchedulingChecker;

#[async_trait]
impl AvailabilityChecker for MaintenanceSchedulingChecker {
    async fn blocked_by(
        &self,
        tx: &mut dyn BookingTx,
        candidate: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<Option<RejectReason>> {
        if EquipmentMaintenanceChecker
            .is_under_maintenance(tx, candidate, exclude)
            .await?
        {
            debug!("Maintenance already scheduled during the candidate");
            return Ok(Some(RejectReason::EquipmentConflict));
        }

        let classes = tx.count_equipment_classes_overlapping(candidate).await?;
        let sessions = tx.count_private_sessions_overlapping(candidate).await?;
        debug!(
            "Maintenance candidate overlaps {} class(es) and {} session(s)",
            classes, sessions
        );
        if classes + sessions > 0 {
            return Ok(Some(RejectReason::EquipmentConflict));
        }
        Ok(None)
    }
}
