use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClubResult;
use crate::models::interval::TimeInterval;
use crate::models::maintenance::MaintenanceStatus;
use crate::models::schedule::SessionType;
use crate::models::trainer::Specialization;

/// Why a booking request was turned down. These are normal answers, not
/// failures: the caller can pick another slot or another class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    RoomConflict,
    TrainerConflict,
    EquipmentConflict,
    CapacityExceeded,
    NotFound,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::RoomConflict => "room is already booked for that time",
            RejectReason::TrainerConflict => "trainer is not available for that time",
            RejectReason::EquipmentConflict => "equipment maintenance conflicts with that time",
            RejectReason::CapacityExceeded => "class is already full",
            RejectReason::NotFound => "referenced record does not exist",
        };
        f.write_str(text)
    }
}

/// Tagged result of every booking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    Approved { id: Uuid },
    Rejected { reason: RejectReason },
}

impl BookingOutcome {
    pub fn approved(id: Uuid) -> Self {
        BookingOutcome::Approved { id }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        BookingOutcome::Rejected { reason }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, BookingOutcome::Approved { .. })
    }

    pub fn approved_id(&self) -> Option<Uuid> {
        match self {
            BookingOutcome::Approved { id } => Some(*id),
            BookingOutcome::Rejected { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            BookingOutcome::Approved { .. } => None,
            BookingOutcome::Rejected { reason } => Some(*reason),
        }
    }
}

/// A class to be scheduled, before any checks ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub name: String,
    pub activity: Specialization,
    pub room_id: Uuid,
    pub trainer_id: Uuid,
    pub interval: TimeInterval,
}

/// Start plus duration as supplied by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
}

impl SlotRequest {
    pub fn interval(&self) -> ClubResult<TimeInterval> {
        TimeInterval::starting_at(self.start, self.duration_minutes)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleClassRequest {
    pub name: String,
    pub activity: Specialization,
    pub room_id: Uuid,
    pub trainer_id: Uuid,
    #[serde(flatten)]
    pub slot: SlotRequest,
}

impl ScheduleClassRequest {
    pub fn into_new_class(self) -> ClubResult<NewClass> {
        let interval = self.slot.interval()?;
        Ok(NewClass {
            name: self.name,
            activity: self.activity,
            room_id: self.room_id,
            trainer_id: self.trainer_id,
            interval,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSessionRequest {
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    #[serde(flatten)]
    pub slot: SlotRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRequest {
    pub member_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailabilityRequest {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl UnavailabilityRequest {
    pub fn interval(&self) -> ClubResult<TimeInterval> {
        TimeInterval::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceStatusRequest {
    pub status: MaintenanceStatus,
}

/// Listing row for scheduled classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassListing {
    pub id: Uuid,
    pub name: String,
    pub activity: Specialization,
    pub room_id: Uuid,
    pub trainer_id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub registered: i64,
}

/// One line of a member's or trainer's upcoming schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: Uuid,
    pub title: String,
    pub session_type: SessionType,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
