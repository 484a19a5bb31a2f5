use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, define_id};

define_id!(VehicleId, "VehicleId");

/// Cruising speed assumed for regular vehicles, in km/h.
pub const BASE_SPEED_KMH: f64 = 40.0;

/// Express buses make fewer stops: their raw travel time is scaled by this.
pub const EXPRESS_TIME_FACTOR: f64 = 0.8;

/// Vehicle variant and its travel policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum VehicleKind {
    Regular,
    Express { speed_kmh: f64, max_stops: u32 },
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Regular => "Regular Vehicle",
            VehicleKind::Express { .. } => "Express Bus",
        }
    }

    /// Hours needed to cover `distance_km`.
    pub fn travel_time(&self, distance_km: f64) -> f64 {
        match self {
            VehicleKind::Regular => distance_km / BASE_SPEED_KMH,
            VehicleKind::Express { speed_kmh, .. } => {
                distance_km / speed_kmh * EXPRESS_TIME_FACTOR
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    OnTime,
    Delayed,
}

impl core::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ServiceStatus::OnTime => "On-time",
            ServiceStatus::Delayed => "Delayed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    route: String,
    capacity: u32,
    passengers: u32,
    status: ServiceStatus,
    kind: VehicleKind,
}

impl Vehicle {
    pub(crate) fn new(id: VehicleId, route: String, capacity: u32, kind: VehicleKind) -> Self {
        Self {
            id,
            route,
            capacity,
            passengers: 0,
            status: ServiceStatus::OnTime,
            kind,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    pub fn available_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.passengers)
    }

    pub fn has_available_seats(&self) -> bool {
        self.passengers < self.capacity
    }

    pub fn travel_time(&self, distance_km: f64) -> f64 {
        self.kind.travel_time(distance_km)
    }

    pub(crate) fn book_seat(&mut self) -> DomainResult<()> {
        if !self.has_available_seats() {
            return Err(DomainError::rule(format!(
                "vehicle {} ({}) is full: {}/{} seats taken",
                self.id, self.route, self.passengers, self.capacity
            )));
        }
        self.passengers += 1;
        Ok(())
    }

    pub(crate) fn release_seat(&mut self) -> DomainResult<()> {
        if self.passengers == 0 {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} has no booked seats",
                self.id
            )));
        }
        self.passengers -= 1;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: ServiceStatus) {
        self.status = status;
    }
}

impl Entity for Vehicle {
    type Id = VehicleId;
    const KIND: &'static str = "vehicle";

    fn id(&self) -> VehicleId {
        self.id
    }
}
