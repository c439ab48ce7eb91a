use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unprocessed,
    Processed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unprocessed => "Unprocessed",
            PaymentStatus::Processed => "Processed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unprocessed" => Ok(PaymentStatus::Unprocessed),
            "Processed" => Ok(PaymentStatus::Processed),
            other => Err(ClubError::Validation(format!("Unknown payment status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub member_id: Uuid,
    pub amount: f64,
    pub service: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}
