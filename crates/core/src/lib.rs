//! # FitClub Core
//!
//! Booking rules for a health club: the interval model, the per-resource
//! availability checkers and the orchestrator that turns a scheduling request
//! into an approved write or a typed rejection.
//!
//! Storage is consumed through the [`store::BookingStore`] capability. Every
//! orchestrator operation runs its checks and its writes inside one
//! [`store::BookingTx`], so a check can never be invalidated by a concurrent
//! writer before the write lands.

pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod store;

pub use availability::{
    AvailabilityChecker, EquipmentMaintenanceChecker, MaintenanceSchedulingChecker,
    RoomAvailabilityChecker, TrainerAvailabilityChecker,
};
pub use booking::{BookingService, DEFAULT_CLASS_CAPACITY};
pub use errors::{ClubError, ClubResult};
pub use models::interval::{overlaps, TimeInterval};
