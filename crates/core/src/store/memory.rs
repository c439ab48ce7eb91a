use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use eyre::{eyre, Result};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::{
    class::{BookingStatus, FitnessClass},
    interval::TimeInterval,
    maintenance::{MaintenanceStatus, MaintenanceWindow},
    schedule::{MemberScheduleEntry, SessionType},
    trainer::{Specialization, Trainer, UnavailabilityPeriod},
};
use crate::store::{BookingStore, BookingTx};

#[derive(Debug, Clone, Default)]
struct ClubState {
    rooms: HashSet<Uuid>,
    members: HashSet<Uuid>,
    trainers: HashMap<Uuid, Trainer>,
    classes: HashMap<Uuid, FitnessClass>,
    entries: HashMap<Uuid, MemberScheduleEntry>,
    unavailability: HashMap<Uuid, UnavailabilityPeriod>,
    maintenance: HashMap<Uuid, MaintenanceWindow>,
}

/// Process-local booking store.
///
/// A transaction owns the store lock until it is committed or dropped and
/// works on a private copy of the state, so transactions never interleave and
/// an abandoned one leaves nothing behind.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<ClubState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_room(&self, room_id: Uuid) {
        self.state.lock().await.rooms.insert(room_id);
    }

    pub async fn add_member(&self, member_id: Uuid) {
        self.state.lock().await.members.insert(member_id);
    }

    pub async fn add_trainer(&self, trainer: Trainer) {
        self.state.lock().await.trainers.insert(trainer.id, trainer);
    }

    pub async fn class(&self, class_id: Uuid) -> Option<FitnessClass> {
        self.state.lock().await.classes.get(&class_id).cloned()
    }

    pub async fn maintenance(&self, maintenance_id: Uuid) -> Option<MaintenanceWindow> {
        self.state.lock().await.maintenance.get(&maintenance_id).cloned()
    }

    pub async fn unavailability(&self, period_id: Uuid) -> Option<UnavailabilityPeriod> {
        self.state.lock().await.unavailability.get(&period_id).cloned()
    }

    pub async fn schedule_entry(&self, entry_id: Uuid) -> Option<MemberScheduleEntry> {
        self.state.lock().await.entries.get(&entry_id).cloned()
    }

    /// Entries of any status that reference the class.
    pub async fn entries_for_class(&self, class_id: Uuid) -> Vec<MemberScheduleEntry> {
        self.state
            .lock()
            .await
            .entries
            .values()
            .filter(|entry| entry.class_id == Some(class_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn BookingTx>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<ClubState>,
    working: ClubState,
}

fn overlapping(interval: &Option<TimeInterval>, candidate: &TimeInterval) -> bool {
    interval.as_ref().is_some_and(|i| i.overlaps(candidate))
}

fn not_excluded(id: Uuid, exclude: Option<Uuid>) -> bool {
    exclude != Some(id)
}

fn count<I: Iterator>(iter: I) -> i64 {
    iter.count() as i64
}

impl MemoryTx {
    fn class_mut(&mut self, class_id: Uuid) -> Result<&mut FitnessClass> {
        self.working
            .classes
            .get_mut(&class_id)
            .ok_or_else(|| eyre!("Fitness class {} not found", class_id))
    }

    fn entry_mut(&mut self, entry_id: Uuid) -> Result<&mut MemberScheduleEntry> {
        self.working
            .entries
            .get_mut(&entry_id)
            .ok_or_else(|| eyre!("Schedule entry {} not found", entry_id))
    }

    fn maintenance_mut(&mut self, maintenance_id: Uuid) -> Result<&mut MaintenanceWindow> {
        self.working
            .maintenance
            .get_mut(&maintenance_id)
            .ok_or_else(|| eyre!("Maintenance window {} not found", maintenance_id))
    }
}

#[async_trait]
impl BookingTx for MemoryTx {
    async fn room_exists(&mut self, room_id: Uuid) -> Result<bool> {
        Ok(self.working.rooms.contains(&room_id))
    }

    async fn member_exists(&mut self, member_id: Uuid) -> Result<bool> {
        Ok(self.working.members.contains(&member_id))
    }

    async fn trainer_specialization(&mut self, trainer_id: Uuid) -> Result<Option<Specialization>> {
        Ok(self.working.trainers.get(&trainer_id).map(|t| t.specialization))
    }

    async fn find_class(&mut self, class_id: Uuid) -> Result<Option<FitnessClass>> {
        Ok(self.working.classes.get(&class_id).cloned())
    }

    async fn find_schedule_entry(&mut self, entry_id: Uuid) -> Result<Option<MemberScheduleEntry>> {
        Ok(self.working.entries.get(&entry_id).cloned())
    }

    async fn find_maintenance(&mut self, maintenance_id: Uuid) -> Result<Option<MaintenanceWindow>> {
        Ok(self.working.maintenance.get(&maintenance_id).cloned())
    }

    async fn count_scheduled_maintenance_overlapping(
        &mut self,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        Ok(count(self.working.maintenance.values().filter(|w| {
            w.status == MaintenanceStatus::Scheduled
                && not_excluded(w.id, exclude)
                && w.interval.overlaps(interval)
        })))
    }

    async fn count_room_classes_overlapping(
        &mut self,
        room_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        Ok(count(self.working.classes.values().filter(|c| {
            c.room_id == room_id
                && c.is_active()
                && not_excluded(c.id, exclude)
                && c.interval.overlaps(interval)
        })))
    }

    async fn count_trainer_classes_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        Ok(count(self.working.classes.values().filter(|c| {
            c.trainer_id == trainer_id
                && c.is_active()
                && not_excluded(c.id, exclude)
                && c.interval.overlaps(interval)
        })))
    }

    async fn count_trainer_sessions_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
        exclude: Option<Uuid>,
    ) -> Result<i64> {
        Ok(count(self.working.entries.values().filter(|e| {
            e.trainer_id == Some(trainer_id)
                && e.is_active()
                && not_excluded(e.id, exclude)
                && overlapping(&e.interval, interval)
        })))
    }

    async fn count_trainer_unavailability_overlapping(
        &mut self,
        trainer_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<i64> {
        Ok(count(self.working.unavailability.values().filter(|p| {
            p.trainer_id == trainer_id && p.interval.overlaps(interval)
        })))
    }

    async fn count_equipment_classes_overlapping(&mut self, interval: &TimeInterval) -> Result<i64> {
        Ok(count(self.working.classes.values().filter(|c| {
            c.activity.is_equipment_dependent() && c.is_active() && c.interval.overlaps(interval)
        })))
    }

    async fn count_private_sessions_overlapping(&mut self, interval: &TimeInterval) -> Result<i64> {
        Ok(count(self.working.entries.values().filter(|e| {
            e.session_type == SessionType::PersonalTraining
                && e.is_active()
                && overlapping(&e.interval, interval)
        })))
    }

    async fn count_class_registrations(&mut self, class_id: Uuid) -> Result<i64> {
        Ok(count(
            self.working
                .entries
                .values()
                .filter(|e| e.class_id == Some(class_id) && e.is_active()),
        ))
    }

    async fn find_unavailability(&mut self, period_id: Uuid) -> Result<Option<UnavailabilityPeriod>> {
        Ok(self.working.unavailability.get(&period_id).cloned())
    }

    async fn insert_class(&mut self, class: &FitnessClass) -> Result<()> {
        self.working.classes.insert(class.id, class.clone());
        Ok(())
    }

    async fn update_class_interval(&mut self, class_id: Uuid, interval: &TimeInterval) -> Result<()> {
        self.class_mut(class_id)?.interval = *interval;
        Ok(())
    }

    async fn set_class_status(&mut self, class_id: Uuid, status: BookingStatus) -> Result<()> {
        self.class_mut(class_id)?.status = status;
        Ok(())
    }

    async fn delete_class_registrations(&mut self, class_id: Uuid) -> Result<u64> {
        let before = self.working.entries.len();
        self.working.entries.retain(|_, e| e.class_id != Some(class_id));
        Ok((before - self.working.entries.len()) as u64)
    }

    async fn delete_registration(&mut self, member_id: Uuid, class_id: Uuid) -> Result<u64> {
        let before = self.working.entries.len();
        self.working
            .entries
            .retain(|_, e| !(e.member_id == member_id && e.class_id == Some(class_id)));
        Ok((before - self.working.entries.len()) as u64)
    }

    async fn insert_schedule_entry(&mut self, entry: &MemberScheduleEntry) -> Result<()> {
        self.working.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update_session_interval(&mut self, entry_id: Uuid, interval: &TimeInterval) -> Result<()> {
        self.entry_mut(entry_id)?.interval = Some(*interval);
        Ok(())
    }

    async fn set_schedule_entry_status(&mut self, entry_id: Uuid, status: BookingStatus) -> Result<()> {
        self.entry_mut(entry_id)?.status = status;
        Ok(())
    }

    async fn insert_maintenance(&mut self, window: &MaintenanceWindow) -> Result<()> {
        self.working.maintenance.insert(window.id, window.clone());
        Ok(())
    }

    async fn update_maintenance_interval(
        &mut self,
        maintenance_id: Uuid,
        interval: &TimeInterval,
    ) -> Result<()> {
        self.maintenance_mut(maintenance_id)?.interval = *interval;
        Ok(())
    }

    async fn set_maintenance_status(
        &mut self,
        maintenance_id: Uuid,
        status: MaintenanceStatus,
    ) -> Result<()> {
        self.maintenance_mut(maintenance_id)?.status = status;
        Ok(())
    }

    async fn insert_unavailability(&mut self, period: &UnavailabilityPeriod) -> Result<()> {
        self.working.unavailability.insert(period.id, period.clone());
        Ok(())
    }

    async fn update_unavailability(&mut self, period_id: Uuid, interval: &TimeInterval) -> Result<()> {
        let period = self
            .working
            .unavailability
            .get_mut(&period_id)
            .ok_or_else(|| eyre!("Unavailability period {} not found", period_id))?;
        period.interval = *interval;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
