use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, define_id};

use crate::vehicle::VehicleId;

define_id!(PassengerId, "PassengerId");

/// Passenger numbering starts here rather than at 1.
pub const FIRST_PASSENGER_ID: u32 = 1001;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    id: PassengerId,
    name: String,
    bookings: Vec<VehicleId>,
}

impl Passenger {
    pub(crate) fn new(id: PassengerId, name: String) -> Self {
        Self {
            id,
            name,
            bookings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// One entry per booked seat; a vehicle appears once per seat held.
    pub fn bookings(&self) -> &[VehicleId] {
        &self.bookings
    }

    pub fn has_booking(&self, vehicle: VehicleId) -> bool {
        self.bookings.contains(&vehicle)
    }

    pub(crate) fn add_booking(&mut self, vehicle: VehicleId) {
        self.bookings.push(vehicle);
    }

    pub(crate) fn remove_booking(&mut self, vehicle: VehicleId) -> DomainResult<()> {
        let pos = self
            .bookings
            .iter()
            .position(|v| *v == vehicle)
            .ok_or_else(|| {
                DomainError::invalid_state(format!(
                    "{} has no booking on vehicle {}",
                    self.name, vehicle
                ))
            })?;
        self.bookings.remove(pos);
        Ok(())
    }
}

impl Entity for Passenger {
    type Id = PassengerId;
    const KIND: &'static str = "passenger";

    fn id(&self) -> PassengerId {
        self.id
    }
}
