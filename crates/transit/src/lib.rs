//! Public-transportation domain module.
//!
//! Vehicles, stations and passengers with seat bookings and station
//! schedules (no IO, no clocks).

pub mod passenger;
pub mod station;
pub mod system;
pub mod vehicle;

pub use passenger::{FIRST_PASSENGER_ID, Passenger, PassengerId};
pub use station::{MAX_SCHEDULES, Station, StationId, StationMode};
pub use system::TransitSystem;
pub use vehicle::{BASE_SPEED_KMH, EXPRESS_TIME_FACTOR, ServiceStatus, Vehicle, VehicleId, VehicleKind};
