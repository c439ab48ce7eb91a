//! Booking orchestrator.
//!
//! Every operation opens one repository transaction, runs the checkers that
//! guard the affected resources, and only then writes. A rejection drops the
//! transaction unwritten. Expected outcomes (conflicts, a full class, an
//! unknown id) come back as [`BookingOutcome`]; only repository failures
//! surface as [`ClubError::Storage`].

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::availability::{
    AvailabilityChecker, EquipmentMaintenanceChecker, MaintenanceSchedulingChecker,
    RoomAvailabilityChecker, TrainerAvailabilityChecker,
};
use crate::errors::ClubResult;
use crate::models::{
    booking::{BookingOutcome, NewClass, RejectReason},
    class::{BookingStatus, FitnessClass},
    interval::TimeInterval,
    maintenance::{MaintenanceStatus, MaintenanceWindow},
    schedule::{MemberScheduleEntry, SessionType},
    trainer::UnavailabilityPeriod,
};
use crate::store::{BookingStore, BookingTx};

pub const DEFAULT_CLASS_CAPACITY: i64 = 5;

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    class_capacity: i64,
}

fn not_found() -> BookingOutcome {
    BookingOutcome::rejected(RejectReason::NotFound)
}

/// Runs the checks in order and reports the first blocking reason.
async fn first_conflict(
    tx: &mut dyn BookingTx,
    candidate: &TimeInterval,
    checks: &[(&dyn AvailabilityChecker, Option<Uuid>)],
) -> eyre::Result<Option<RejectReason>> {
    for (checker, exclude) in checks {
        if let Some(reason) = checker.blocked_by(tx, candidate, *exclude).await? {
            return Ok(Some(reason));
        }
    }
    Ok(None)
}

async fn logged<F>(operation: &'static str, work: F) -> ClubResult<BookingOutcome>
where
    F: Future<Output = ClubResult<BookingOutcome>>,
{
    match work.await {
        Ok(outcome) => {
            match outcome {
                BookingOutcome::Approved { id } => info!("{} approved: {}", operation, id),
                BookingOutcome::Rejected { reason } => info!("{} rejected: {}", operation, reason),
            }
            Ok(outcome)
        }
        Err(e) => {
            error!("{} failed: {}", operation, e);
            Err(e)
        }
    }
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self {
            store,
            class_capacity: DEFAULT_CLASS_CAPACITY,
        }
    }

    pub fn with_class_capacity(mut self, capacity: i64) -> Self {
        self.class_capacity = capacity;
        self
    }

    pub fn class_capacity(&self) -> i64 {
        self.class_capacity
    }

    /// Schedules a class once the trainer, the room and the equipment are all
    /// free for the whole interval.
    pub async fn schedule_class(&self, request: NewClass) -> ClubResult<BookingOutcome> {
        logged("schedule_class", async {
            let mut tx = self.store.begin().await?;
            if !tx.room_exists(request.room_id).await? {
                return Ok(not_found());
            }
            let Some(specialization) = tx.trainer_specialization(request.trainer_id).await? else {
                return Ok(not_found());
            };

            let trainer = TrainerAvailabilityChecker::new(
                request.trainer_id,
                specialization,
                SessionType::GroupClass,
            );
            let room = RoomAvailabilityChecker::new(request.room_id);
            let checks: [(&dyn AvailabilityChecker, Option<Uuid>); 3] = [
                (&trainer, None),
                (&room, None),
                (&EquipmentMaintenanceChecker, None),
            ];
            if let Some(reason) = first_conflict(tx.as_mut(), &request.interval, &checks).await? {
                return Ok(BookingOutcome::rejected(reason));
            }

            let class = FitnessClass {
                id: Uuid::new_v4(),
                name: request.name,
                activity: request.activity,
                room_id: request.room_id,
                trainer_id: request.trainer_id,
                interval: request.interval,
                status: BookingStatus::Scheduled,
            };
            tx.insert_class(&class).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(class.id))
        })
        .await
    }

    /// Moves a live class, re-running the scheduling checks with the class
    /// itself left out.
    pub async fn update_class_schedule(
        &self,
        class_id: Uuid,
        interval: TimeInterval,
    ) -> ClubResult<BookingOutcome> {
        logged("update_class_schedule", async {
            let mut tx = self.store.begin().await?;
            let Some(class) = tx.find_class(class_id).await?.filter(FitnessClass::is_active) else {
                return Ok(not_found());
            };
            let Some(specialization) = tx.trainer_specialization(class.trainer_id).await? else {
                return Ok(not_found());
            };

            let trainer = TrainerAvailabilityChecker::new(
                class.trainer_id,
                specialization,
                SessionType::GroupClass,
            );
            let room = RoomAvailabilityChecker::new(class.room_id);
            let checks: [(&dyn AvailabilityChecker, Option<Uuid>); 3] = [
                (&trainer, Some(class_id)),
                (&room, Some(class_id)),
                (&EquipmentMaintenanceChecker, None),
            ];
            if let Some(reason) = first_conflict(tx.as_mut(), &interval, &checks).await? {
                return Ok(BookingOutcome::rejected(reason));
            }

            tx.update_class_interval(class_id, &interval).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(class_id))
        })
        .await
    }

    /// Deregisters every member of the class, then marks it cancelled, in one
    /// transaction. Cancelling a cancelled class changes nothing and is
    /// approved.
    pub async fn cancel_class(&self, class_id: Uuid) -> ClubResult<BookingOutcome> {
        logged("cancel_class", async {
            let mut tx = self.store.begin().await?;
            let Some(class) = tx.find_class(class_id).await? else {
                return Ok(not_found());
            };
            if !class.is_active() {
                return Ok(BookingOutcome::approved(class_id));
            }

            let removed = tx.delete_class_registrations(class_id).await?;
            tx.set_class_status(class_id, BookingStatus::Cancelled).await?;
            tx.commit().await?;
            info!("Class {} cancelled, {} registration(s) removed", class_id, removed);
            Ok(BookingOutcome::approved(class_id))
        })
        .await
    }

    /// Books a private session. Only the trainer is consumed; no room.
    pub async fn book_private_session(
        &self,
        member_id: Uuid,
        trainer_id: Uuid,
        interval: TimeInterval,
    ) -> ClubResult<BookingOutcome> {
        logged("book_private_session", async {
            let mut tx = self.store.begin().await?;
            if !tx.member_exists(member_id).await? {
                return Ok(not_found());
            }
            let Some(specialization) = tx.trainer_specialization(trainer_id).await? else {
                return Ok(not_found());
            };

            let trainer =
                TrainerAvailabilityChecker::new(trainer_id, specialization, SessionType::PersonalTraining);
            if let Some(reason) = trainer.blocked_by(tx.as_mut(), &interval, None).await? {
                return Ok(BookingOutcome::rejected(reason));
            }

            let entry = MemberScheduleEntry::private_session(member_id, trainer_id, interval);
            tx.insert_schedule_entry(&entry).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(entry.id))
        })
        .await
    }

    pub async fn reschedule_session(
        &self,
        session_id: Uuid,
        interval: TimeInterval,
    ) -> ClubResult<BookingOutcome> {
        logged("reschedule_session", async {
            let mut tx = self.store.begin().await?;
            let Some(trainer_id) = tx
                .find_schedule_entry(session_id)
                .await?
                .filter(|e| e.is_active() && e.session_type == SessionType::PersonalTraining)
                .and_then(|e| e.trainer_id)
            else {
                return Ok(not_found());
            };
            let Some(specialization) = tx.trainer_specialization(trainer_id).await? else {
                return Ok(not_found());
            };

            let trainer =
                TrainerAvailabilityChecker::new(trainer_id, specialization, SessionType::PersonalTraining);
            if let Some(reason) = trainer.blocked_by(tx.as_mut(), &interval, Some(session_id)).await? {
                return Ok(BookingOutcome::rejected(reason));
            }

            tx.update_session_interval(session_id, &interval).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(session_id))
        })
        .await
    }

    /// A member cancels one of their own scheduled private sessions.
    pub async fn cancel_session(&self, member_id: Uuid, session_id: Uuid) -> ClubResult<BookingOutcome> {
        logged("cancel_session", async {
            let mut tx = self.store.begin().await?;
            let owned = tx.find_schedule_entry(session_id).await?.is_some_and(|e| {
                e.member_id == member_id
                    && e.session_type == SessionType::PersonalTraining
                    && e.status == BookingStatus::Scheduled
            });
            if !owned {
                return Ok(not_found());
            }

            tx.set_schedule_entry_status(session_id, BookingStatus::Cancelled)
                .await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(session_id))
        })
        .await
    }

    /// Registers a member for a live class while it has free places.
    pub async fn register_for_class(&self, member_id: Uuid, class_id: Uuid) -> ClubResult<BookingOutcome> {
        logged("register_for_class", async {
            let mut tx = self.store.begin().await?;
            if !tx.member_exists(member_id).await? {
                return Ok(not_found());
            }
            let live = tx
                .find_class(class_id)
                .await?
                .is_some_and(|c| c.is_active());
            if !live {
                return Ok(not_found());
            }

            let registered = tx.count_class_registrations(class_id).await?;
            if registered >= self.class_capacity {
                return Ok(BookingOutcome::rejected(RejectReason::CapacityExceeded));
            }

            let entry = MemberScheduleEntry::registration(member_id, class_id);
            tx.insert_schedule_entry(&entry).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(entry.id))
        })
        .await
    }

    /// A member leaves a class. Approved with the class id.
    pub async fn drop_class(&self, member_id: Uuid, class_id: Uuid) -> ClubResult<BookingOutcome> {
        logged("drop_class", async {
            let mut tx = self.store.begin().await?;
            let removed = tx.delete_registration(member_id, class_id).await?;
            if removed == 0 {
                return Ok(not_found());
            }
            tx.commit().await?;
            Ok(BookingOutcome::approved(class_id))
        })
        .await
    }

    pub async fn schedule_maintenance(&self, interval: TimeInterval) -> ClubResult<BookingOutcome> {
        logged("schedule_maintenance", async {
            let mut tx = self.store.begin().await?;
            if let Some(reason) = MaintenanceSchedulingChecker
                .blocked_by(tx.as_mut(), &interval, None)
                .await?
            {
                return Ok(BookingOutcome::rejected(reason));
            }

            let window = MaintenanceWindow {
                id: Uuid::new_v4(),
                interval,
                status: MaintenanceStatus::Scheduled,
            };
            tx.insert_maintenance(&window).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(window.id))
        })
        .await
    }

    pub async fn reschedule_maintenance(
        &self,
        maintenance_id: Uuid,
        interval: TimeInterval,
    ) -> ClubResult<BookingOutcome> {
        logged("reschedule_maintenance", async {
            let mut tx = self.store.begin().await?;
            let scheduled = tx
                .find_maintenance(maintenance_id)
                .await?
                .is_some_and(|w| w.status == MaintenanceStatus::Scheduled);
            if !scheduled {
                return Ok(not_found());
            }

            if let Some(reason) = MaintenanceSchedulingChecker
                .blocked_by(tx.as_mut(), &interval, Some(maintenance_id))
                .await?
            {
                return Ok(BookingOutcome::rejected(reason));
            }

            tx.update_maintenance_interval(maintenance_id, &interval).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(maintenance_id))
        })
        .await
    }

    /// Unconditional status change. Bookings are not re-validated.
    pub async fn update_maintenance_status(
        &self,
        maintenance_id: Uuid,
        status: MaintenanceStatus,
    ) -> ClubResult<BookingOutcome> {
        logged("update_maintenance_status", async {
            let mut tx = self.store.begin().await?;
            if tx.find_maintenance(maintenance_id).await?.is_none() {
                return Ok(not_found());
            }
            tx.set_maintenance_status(maintenance_id, status).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(maintenance_id))
        })
        .await
    }

    pub async fn declare_unavailability(
        &self,
        trainer_id: Uuid,
        interval: TimeInterval,
    ) -> ClubResult<BookingOutcome> {
        logged("declare_unavailability", async {
            let mut tx = self.store.begin().await?;
            if tx.trainer_specialization(trainer_id).await?.is_none() {
                return Ok(not_found());
            }

            let period = UnavailabilityPeriod {
                id: Uuid::new_v4(),
                trainer_id,
                interval,
            };
            tx.insert_unavailability(&period).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(period.id))
        })
        .await
    }

    pub async fn update_unavailability(
        &self,
        period_id: Uuid,
        interval: TimeInterval,
    ) -> ClubResult<BookingOutcome> {
        logged("update_unavailability", async {
            let mut tx = self.store.begin().await?;
            if tx.find_unavailability(period_id).await?.is_none() {
                return Ok(not_found());
            }
            tx.update_unavailability(period_id, &interval).await?;
            tx.commit().await?;
            Ok(BookingOutcome::approved(period_id))
        })
        .await
    }
}
