use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ClubError, ClubResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessGoal {
    pub id: Uuid,
    pub member_id: Uuid,
    pub goal_type: String,
    pub target_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub id: Uuid,
    pub member_id: Uuid,
    pub metric_type: String,
    pub metric_value: String,
    pub recorded_on: NaiveDate,
}

fn required(field: &str, value: &str) -> ClubResult<()> {
    if value.trim().is_empty() {
        return Err(ClubError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoalRequest {
    pub goal_type: String,
    pub target_value: String,
}

impl NewGoalRequest {
    pub fn validate(&self) -> ClubResult<()> {
        required("goal_type", &self.goal_type)?;
        required("target_value", &self.target_value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub target_value: String,
}

impl UpdateGoalRequest {
    pub fn validate(&self) -> ClubResult<()> {
        required("target_value", &self.target_value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMetricRequest {
    pub metric_type: String,
    pub metric_value: String,
}

impl NewMetricRequest {
    pub fn validate(&self) -> ClubResult<()> {
        required("metric_type", &self.metric_type)?;
        required("metric_value", &self.metric_value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMetricRequest {
    pub metric_value: String,
}

impl UpdateMetricRequest {
    pub fn validate(&self) -> ClubResult<()> {
        required("metric_value", &self.metric_value)
    }
}

/// Name fragment matched against first and last names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSearchQuery {
    pub name: String,
}

impl MemberSearchQuery {
    /// The trimmed fragment, rejected when blank.
    pub fn fragment(&self) -> ClubResult<&str> {
        let fragment = self.name.trim();
        required("name", fragment)?;
        Ok(fragment)
    }
}
