pub mod booking;
pub mod class;
pub mod interval;
pub mod maintenance;
pub mod member;
pub mod payment;
pub mod schedule;
pub mod trainer;
