use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClubError;
use crate::models::interval::TimeInterval;
use crate::models::trainer::Specialization;

/// Lifecycle of classes and member schedule entries. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "Scheduled",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(BookingStatus::Scheduled),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(ClubError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessClass {
    pub id: Uuid,
    pub name: String,
    pub activity: Specialization,
    pub room_id: Uuid,
    pub trainer_id: Uuid,
    pub interval: TimeInterval,
    pub status: BookingStatus,
}

impl FitnessClass {
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}
