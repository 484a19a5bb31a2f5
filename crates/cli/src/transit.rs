//! Transit menu and renderers.

use std::io::{BufRead, Write};

use desk_core::{DomainError, Entity};
use desk_transit::{
    Passenger, PassengerId, ServiceStatus, Station, StationId, StationMode, TransitSystem, Vehicle,
    VehicleId, VehicleKind,
};

use crate::menu::{Menu, Outcome, listing};
use crate::prompt::{Prompt, PromptError};

pub struct TransitMenu {
    system: TransitSystem,
}

impl TransitMenu {
    pub fn new(system: TransitSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &TransitSystem {
        &self.system
    }
}

impl Menu for TransitMenu {
    const NAME: &'static str = "transit";
    const TITLE: &'static str = "PUBLIC TRANSPORTATION MENU";
    const OPTIONS: &'static [&'static str] = &[
        "Add Vehicle",
        "Add Express Bus",
        "Add Station",
        "Add Passenger",
        "Book Ride",
        "Cancel Ride",
        "Schedule Vehicle at Station",
        "Remove Vehicle from Station",
        "Set Vehicle Status",
        "Calculate Travel Time",
        "Show All Vehicles",
        "Show All Stations",
        "Show All Passengers",
        "Find Station by Name",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        prompt: &mut Prompt<R, W>,
    ) -> Result<Outcome, PromptError> {
        match choice {
            1 => self.add_vehicle(prompt),
            2 => self.add_express(prompt),
            3 => self.add_station(prompt),
            4 => {
                let name = prompt.text("Enter passenger name: ")?;
                let id = self.system.add_passenger(name);
                tracing::info!(entity = "passenger", %id, "passenger registered");
                Ok(Ok(format!("Passenger registered with ID: {id}")))
            }
            5 => self.book(prompt),
            6 => self.cancel(prompt),
            7 => self.schedule(prompt),
            8 => self.unschedule(prompt),
            9 => self.set_status(prompt),
            10 => {
                let vehicle = prompt.value::<VehicleId>("Enter vehicle ID: ")?;
                let distance = prompt.value::<f64>("Enter distance (km): ")?;
                Ok(self.system.travel_time(vehicle, distance).map(|hours| {
                    format!("Travel time for vehicle {vehicle} over {distance} km: {hours:.2} hours")
                }))
            }
            11 => Ok(Ok(listing(self.system.vehicles(), "No vehicles registered.", vehicle_card))),
            12 => Ok(Ok(listing(self.system.stations(), "No stations registered.", station_card))),
            13 => Ok(Ok(listing(self.system.passengers(), "No passengers registered.", passenger_card))),
            14 => {
                let name = prompt.text("Enter station name: ")?;
                Ok(self
                    .system
                    .station_by_name(&name)
                    .map(station_card)
                    .ok_or_else(|| DomainError::not_found("station", &name)))
            }
            other => Ok(Err(DomainError::validation(format!("no menu option {other}")))),
        }
    }
}

impl TransitMenu {
    fn add_vehicle<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let route = p.text("Enter route: ")?;
        let capacity = p.value::<u32>("Enter capacity: ")?;
        let id = self.system.add_vehicle(route, capacity);
        tracing::info!(entity = "vehicle", %id, capacity, "vehicle added");
        Ok(Ok(format!("Vehicle added with ID: {id}")))
    }

    fn add_express<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let route = p.text("Enter route: ")?;
        let capacity = p.value::<u32>("Enter capacity: ")?;
        let speed = p.value::<f64>("Enter speed (km/h): ")?;
        let max_stops = p.value::<u32>("Enter maximum stops: ")?;
        Ok(self
            .system
            .add_express_bus(route, capacity, speed, max_stops)
            .map(|id| {
                tracing::info!(entity = "vehicle", %id, capacity, "express bus added");
                format!("Express bus added with ID: {id}")
            }))
    }

    fn add_station<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let name = p.text("Enter station name: ")?;
        let location = p.text("Enter location: ")?;
        let mode = p.parse_with("Enter type (bus/train): ", |s| {
            match s.to_ascii_lowercase().as_str() {
                "bus" => Ok(StationMode::Bus),
                "train" => Ok(StationMode::Train),
                _ => Err("type must be `bus` or `train`"),
            }
        })?;
        let id = self.system.add_station(name, location, mode);
        tracing::info!(entity = "station", %id, "station added");
        Ok(Ok(format!("Station added with ID: {id}")))
    }

    fn book<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let passenger = p.value::<PassengerId>("Enter passenger ID: ")?;
        let vehicle = p.value::<VehicleId>("Enter vehicle ID: ")?;
        Ok(self.system.book_ride(passenger, vehicle).map(|()| {
            tracing::info!(entity = "passenger", id = %passenger, %vehicle, "ride booked");
            format!("Passenger {passenger} booked on vehicle {vehicle}")
        }))
    }

    fn cancel<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let passenger = p.value::<PassengerId>("Enter passenger ID: ")?;
        let vehicle = p.value::<VehicleId>("Enter vehicle ID: ")?;
        Ok(self.system.cancel_ride(passenger, vehicle).map(|()| {
            tracing::info!(entity = "passenger", id = %passenger, %vehicle, "ride canceled");
            format!("Booking on vehicle {vehicle} canceled for passenger {passenger}")
        }))
    }

    fn schedule<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let station = p.value::<StationId>("Enter station ID: ")?;
        let vehicle = p.value::<VehicleId>("Enter vehicle ID: ")?;
        Ok(self.system.schedule_vehicle(station, vehicle).map(|()| {
            tracing::info!(entity = "station", id = %station, %vehicle, "vehicle scheduled");
            format!("Vehicle {vehicle} scheduled at station {station}")
        }))
    }

    fn unschedule<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let station = p.value::<StationId>("Enter station ID: ")?;
        let vehicle = p.value::<VehicleId>("Enter vehicle ID: ")?;
        Ok(self.system.unschedule_vehicle(station, vehicle).map(|()| {
            tracing::info!(entity = "station", id = %station, %vehicle, "vehicle unscheduled");
            format!("Vehicle {vehicle} removed from station {station}")
        }))
    }

    fn set_status<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let vehicle = p.value::<VehicleId>("Enter vehicle ID: ")?;
        let status = p.parse_with("Enter status (1 = On-time, 2 = Delayed): ", |s| match s {
            "1" => Ok(ServiceStatus::OnTime),
            "2" => Ok(ServiceStatus::Delayed),
            _ => Err("status must be 1 or 2"),
        })?;
        Ok(self.system.set_vehicle_status(vehicle, status).map(|()| {
            tracing::info!(entity = "vehicle", id = %vehicle, %status, "status changed");
            format!("Vehicle {vehicle} is now {status}")
        }))
    }
}

fn vehicle_card(vehicle: &Vehicle) -> String {
    let mut lines = vec![
        format!("Vehicle ID: {}", vehicle.id()),
        format!("Type: {}", vehicle.kind().label()),
        format!("Route: {}", vehicle.route()),
        format!(
            "Passengers: {}/{} ({} seats free)",
            vehicle.passengers(),
            vehicle.capacity(),
            vehicle.available_seats()
        ),
        format!("Status: {}", vehicle.status()),
    ];
    if let VehicleKind::Express {
        speed_kmh,
        max_stops,
    } = vehicle.kind()
    {
        lines.push(format!("Speed: {speed_kmh} km/h"));
        lines.push(format!("Max Stops: {max_stops}"));
    }
    lines.join("\n")
}

fn station_card(station: &Station) -> String {
    let scheduled = if station.scheduled().is_empty() {
        "none".to_string()
    } else {
        station
            .scheduled()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Station ID: {}\nName: {}\nLocation: {}\nType: {}\nScheduled Vehicles: {scheduled}\nFree Slots: {}",
        station.id(),
        station.name(),
        station.location(),
        station.mode(),
        station.free_slots()
    )
}

fn passenger_card(passenger: &Passenger) -> String {
    let bookings = if passenger.bookings().is_empty() {
        "none".to_string()
    } else {
        passenger
            .bookings()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Passenger ID: {}\nName: {}\nBooked Vehicles: {bookings}",
        passenger.id(),
        passenger.name()
    )
}
