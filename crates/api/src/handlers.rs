pub mod classes;
pub mod maintenance;
pub mod members;
pub mod payments;
pub mod sessions;
pub mod trainers;
