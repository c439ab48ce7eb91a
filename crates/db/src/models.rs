use chrono::{NaiveDate, NaiveDateTime};
use fitclub_core::ClubError;
use fitclub_core::models::{
    booking::{ClassListing, ScheduleItem},
    class::FitnessClass,
    interval::TimeInterval,
    maintenance::MaintenanceWindow,
    member::{FitnessGoal, HealthMetric, Member},
    payment::Payment,
    schedule::MemberScheduleEntry,
    trainer::{Trainer, UnavailabilityPeriod},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTrainer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub credentials: Option<String>,
}

impl TryFrom<DbTrainer> for Trainer {
    type Error = ClubError;

    fn try_from(row: DbTrainer) -> Result<Self, Self::Error> {
        Ok(Trainer {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            specialization: row.specialization.parse()?,
            credentials: row.credentials,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFitnessClass {
    pub id: Uuid,
    pub name: String,
    pub activity: String,
    pub room_id: Uuid,
    pub trainer_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
}

impl TryFrom<DbFitnessClass> for FitnessClass {
    type Error = ClubError;

    fn try_from(row: DbFitnessClass) -> Result<Self, Self::Error> {
        Ok(FitnessClass {
            id: row.id,
            name: row.name,
            activity: row.activity.parse()?,
            room_id: row.room_id,
            trainer_id: row.trainer_id,
            interval: TimeInterval::new(row.start_time, row.end_time)?,
            status: row.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleEntry {
    pub id: Uuid,
    pub member_id: Uuid,
    pub class_id: Option<Uuid>,
    pub trainer_id: Option<Uuid>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub session_type: String,
    pub status: String,
}

impl TryFrom<DbScheduleEntry> for MemberScheduleEntry {
    type Error = ClubError;

    fn try_from(row: DbScheduleEntry) -> Result<Self, Self::Error> {
        let interval = match (row.start_time, row.end_time) {
            (Some(start), Some(end)) => Some(TimeInterval::new(start, end)?),
            _ => None,
        };

        Ok(MemberScheduleEntry {
            id: row.id,
            member_id: row.member_id,
            class_id: row.class_id,
            trainer_id: row.trainer_id,
            interval,
            session_type: row.session_type.parse()?,
            status: row.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMaintenance {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
}

impl TryFrom<DbMaintenance> for MaintenanceWindow {
    type Error = ClubError;

    fn try_from(row: DbMaintenance) -> Result<Self, Self::Error> {
        Ok(MaintenanceWindow {
            id: row.id,
            interval: TimeInterval::new(row.start_time, row.end_time)?,
            status: row.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUnavailability {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl TryFrom<DbUnavailability> for UnavailabilityPeriod {
    type Error = ClubError;

    fn try_from(row: DbUnavailability) -> Result<Self, Self::Error> {
        Ok(UnavailabilityPeriod {
            id: row.id,
            trainer_id: row.trainer_id,
            interval: TimeInterval::new(row.start_time, row.end_time)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPayment {
    pub id: Uuid,
    pub member_id: Uuid,
    pub amount: f64,
    pub service: String,
    pub status: String,
}

impl TryFrom<DbPayment> for Payment {
    type Error = ClubError;

    fn try_from(row: DbPayment) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: row.id,
            member_id: row.member_id,
            amount: row.amount,
            service: row.service,
            status: row.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<DbMember> for Member {
    fn from(row: DbMember) -> Self {
        Member {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFitnessGoal {
    pub id: Uuid,
    pub member_id: Uuid,
    pub goal_type: String,
    pub target_value: String,
}

impl From<DbFitnessGoal> for FitnessGoal {
    fn from(row: DbFitnessGoal) -> Self {
        FitnessGoal {
            id: row.id,
            member_id: row.member_id,
            goal_type: row.goal_type,
            target_value: row.target_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHealthMetric {
    pub id: Uuid,
    pub member_id: Uuid,
    pub metric_type: String,
    pub metric_value: String,
    pub recorded_on: NaiveDate,
}

impl From<DbHealthMetric> for HealthMetric {
    fn from(row: DbHealthMetric) -> Self {
        HealthMetric {
            id: row.id,
            member_id: row.member_id,
            metric_type: row.metric_type,
            metric_value: row.metric_value,
            recorded_on: row.recorded_on,
        }
    }
}

/// Scheduled class joined with its live registration count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClassListing {
    pub id: Uuid,
    pub name: String,
    pub activity: String,
    pub room_id: Uuid,
    pub trainer_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub registered: i64,
}

impl TryFrom<DbClassListing> for ClassListing {
    type Error = ClubError;

    fn try_from(row: DbClassListing) -> Result<Self, Self::Error> {
        Ok(ClassListing {
            id: row.id,
            name: row.name,
            activity: row.activity.parse()?,
            room_id: row.room_id,
            trainer_id: row.trainer_id,
            start: row.start_time,
            end: row.end_time,
            registered: row.registered,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleItem {
    pub id: Uuid,
    pub title: String,
    pub session_type: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl TryFrom<DbScheduleItem> for ScheduleItem {
    type Error = ClubError;

    fn try_from(row: DbScheduleItem) -> Result<Self, Self::Error> {
        Ok(ScheduleItem {
            id: row.id,
            title: row.title,
            session_type: row.session_type.parse()?,
            start: row.start_time,
            end: row.end_time,
        })
    }
}

/// Converts a batch of rows, failing on the first one that does not parse.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, ClubError>
where
    T: TryFrom<R, Error = ClubError>,
{
    rows.into_iter().map(T::try_from).collect()
}
