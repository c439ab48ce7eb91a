use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClubError;
use crate::models::interval::TimeInterval;

/// Trainer specialization, also used as the activity of a fitness class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    WeightLoss,
    Strength,
    Cardio,
    Yoga,
    Swimming,
    Rehab,
    Health,
}

impl Specialization {
    pub const ALL: [Specialization; 7] = [
        Specialization::WeightLoss,
        Specialization::Strength,
        Specialization::Cardio,
        Specialization::Yoga,
        Specialization::Swimming,
        Specialization::Rehab,
        Specialization::Health,
    ];

    /// Activities that cannot run while club equipment is under maintenance.
    pub const EQUIPMENT_DEPENDENT: [Specialization; 4] = [
        Specialization::Yoga,
        Specialization::Swimming,
        Specialization::Strength,
        Specialization::Cardio,
    ];

    pub fn is_equipment_dependent(self) -> bool {
        Self::EQUIPMENT_DEPENDENT.contains(&self)
    }

    /// Trainers with these specializations keep working through maintenance.
    pub fn is_maintenance_exempt(self) -> bool {
        !matches!(self, Specialization::Yoga | Specialization::Swimming)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Specialization::WeightLoss => "Weight Loss",
            Specialization::Strength => "Strength",
            Specialization::Cardio => "Cardio",
            Specialization::Yoga => "Yoga",
            Specialization::Swimming => "Swimming",
            Specialization::Rehab => "Rehab",
            Specialization::Health => "Health",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialization {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|spec| spec.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClubError::Validation(format!("Unknown specialization: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialization: Specialization,
    pub credentials: Option<String>,
}

/// Blackout declared by or for a trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityPeriod {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub interval: TimeInterval,
}
