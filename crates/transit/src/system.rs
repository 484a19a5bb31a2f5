//! The transit registry: vehicles, stations and passengers plus the
//! bookings and schedules that link them.

use desk_core::{DomainError, DomainResult, Registry};

use crate::passenger::{FIRST_PASSENGER_ID, Passenger, PassengerId};
use crate::station::{Station, StationId, StationMode};
use crate::vehicle::{ServiceStatus, Vehicle, VehicleId, VehicleKind};

#[derive(Debug, Clone)]
pub struct TransitSystem {
    vehicles: Registry<Vehicle>,
    stations: Registry<Station>,
    passengers: Registry<Passenger>,
}

impl Default for TransitSystem {
    fn default() -> Self {
        Self {
            vehicles: Registry::new(),
            stations: Registry::new(),
            passengers: Registry::starting_at(FIRST_PASSENGER_ID),
        }
    }
}

impl TransitSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vehicle(&mut self, route: impl Into<String>, capacity: u32) -> VehicleId {
        let route = route.into();
        self.vehicles
            .create(|id| Vehicle::new(id, route, capacity, VehicleKind::Regular))
    }

    /// Register an express bus. `speed_kmh` must be a positive, finite speed.
    pub fn add_express_bus(
        &mut self,
        route: impl Into<String>,
        capacity: u32,
        speed_kmh: f64,
        max_stops: u32,
    ) -> DomainResult<VehicleId> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(DomainError::validation("express speed must be positive"));
        }
        let route = route.into();
        let kind = VehicleKind::Express {
            speed_kmh,
            max_stops,
        };
        Ok(self
            .vehicles
            .create(|id| Vehicle::new(id, route, capacity, kind)))
    }

    pub fn add_station(
        &mut self,
        name: impl Into<String>,
        location: impl Into<String>,
        mode: StationMode,
    ) -> StationId {
        let (name, location) = (name.into(), location.into());
        self.stations
            .create(|id| Station::new(id, name, location, mode))
    }

    pub fn add_passenger(&mut self, name: impl Into<String>) -> PassengerId {
        let name = name.into();
        self.passengers.create(|id| Passenger::new(id, name))
    }

    /// Take one seat on `vehicle` for `passenger`.
    ///
    /// A full vehicle rejects the booking and neither side changes.
    pub fn book_ride(&mut self, passenger: PassengerId, vehicle: VehicleId) -> DomainResult<()> {
        self.passengers.ensure(passenger)?;
        self.vehicles.require_mut(vehicle)?.book_seat()?;
        self.passengers.require_mut(passenger)?.add_booking(vehicle);
        Ok(())
    }

    /// Give back one seat the passenger holds on `vehicle`.
    pub fn cancel_ride(&mut self, passenger: PassengerId, vehicle: VehicleId) -> DomainResult<()> {
        self.vehicles.ensure(vehicle)?;
        let holder = self.passengers.require(passenger)?;
        if !holder.has_booking(vehicle) {
            return Err(DomainError::invalid_state(format!(
                "{} has no booking on vehicle {}",
                holder.name(),
                vehicle
            )));
        }

        self.vehicles.require_mut(vehicle)?.release_seat()?;
        self.passengers.require_mut(passenger)?.remove_booking(vehicle)
    }

    /// Put `vehicle` on the timetable of `station`.
    pub fn schedule_vehicle(&mut self, station: StationId, vehicle: VehicleId) -> DomainResult<()> {
        self.vehicles.ensure(vehicle)?;
        self.stations.require_mut(station)?.add_schedule(vehicle)
    }

    pub fn unschedule_vehicle(&mut self, station: StationId, vehicle: VehicleId) -> DomainResult<()> {
        self.vehicles.ensure(vehicle)?;
        self.stations.require_mut(station)?.remove_schedule(vehicle)
    }

    pub fn set_vehicle_status(&mut self, vehicle: VehicleId, status: ServiceStatus) -> DomainResult<()> {
        self.vehicles.require_mut(vehicle)?.set_status(status);
        Ok(())
    }

    /// Hours `vehicle` needs for `distance_km` under its travel policy.
    pub fn travel_time(&self, vehicle: VehicleId, distance_km: f64) -> DomainResult<f64> {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(DomainError::validation("distance must be positive"));
        }
        Ok(self.vehicles.require(vehicle)?.travel_time(distance_km))
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.find(id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.find(id)
    }

    /// Stations are also addressable by their (exact) name.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.find_by(|s| s.name() == name)
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.find(id)
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn passengers(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter()
    }
}
