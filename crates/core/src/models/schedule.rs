use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClubError;
use crate::models::class::BookingStatus;
use crate::models::interval::TimeInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    GroupClass,
    PersonalTraining,
}

impl SessionType {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::GroupClass => "Group Class",
            SessionType::PersonalTraining => "Personal Training",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Group Class" => Ok(SessionType::GroupClass),
            "Personal Training" => Ok(SessionType::PersonalTraining),
            other => Err(ClubError::Validation(format!("Unknown session type: {}", other))),
        }
    }
}

/// A row of a member's schedule: either a class registration (`class_id`
/// set, no own interval) or a private session with a trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberScheduleEntry {
    pub id: Uuid,
    pub member_id: Uuid,
    pub class_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub interval: Option<TimeInterval>,
    pub session_type: SessionType,
    pub status: BookingStatus,
}

impl MemberScheduleEntry {
    pub fn registration(member_id: Uuid, class_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            class_id: Some(class_id),
            trainer_id: None,
            interval: None,
            session_type: SessionType::GroupClass,
            status: BookingStatus::Scheduled,
        }
    }

    pub fn private_session(member_id: Uuid, trainer_id: Uuid, interval: TimeInterval) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            class_id: None,
            trainer_id: Some(trainer_id),
            interval: Some(interval),
            session_type: SessionType::PersonalTraining,
            status: BookingStatus::Scheduled,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}
