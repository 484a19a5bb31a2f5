use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, define_id};

use crate::vehicle::VehicleId;

define_id!(StationId, "StationId");

/// Most vehicles a single station timetable can hold.
pub const MAX_SCHEDULES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationMode {
    Bus,
    Train,
}

impl core::fmt::Display for StationMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            StationMode::Bus => "Bus",
            StationMode::Train => "Train",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    name: String,
    location: String,
    mode: StationMode,
    scheduled: Vec<VehicleId>,
}

impl Station {
    pub(crate) fn new(id: StationId, name: String, location: String, mode: StationMode) -> Self {
        Self {
            id,
            name,
            location,
            mode,
            scheduled: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn mode(&self) -> StationMode {
        self.mode
    }

    pub fn scheduled(&self) -> &[VehicleId] {
        &self.scheduled
    }

    pub fn free_slots(&self) -> usize {
        MAX_SCHEDULES.saturating_sub(self.scheduled.len())
    }

    pub(crate) fn add_schedule(&mut self, vehicle: VehicleId) -> DomainResult<()> {
        if self.scheduled.contains(&vehicle) {
            return Err(DomainError::invalid_state(format!(
                "vehicle {} is already scheduled at {}",
                vehicle, self.name
            )));
        }
        if self.scheduled.len() >= MAX_SCHEDULES {
            return Err(DomainError::rule(format!(
                "maximum schedules ({MAX_SCHEDULES}) reached for {} station",
                self.name
            )));
        }
        self.scheduled.push(vehicle);
        Ok(())
    }

    pub(crate) fn remove_schedule(&mut self, vehicle: VehicleId) -> DomainResult<()> {
        let pos = self
            .scheduled
            .iter()
            .position(|v| *v == vehicle)
            .ok_or_else(|| {
                DomainError::invalid_state(format!(
                    "vehicle {} is not scheduled at {}",
                    vehicle, self.name
                ))
            })?;
        self.scheduled.remove(pos);
        Ok(())
    }
}

impl Entity for Station {
    type Id = StationId;
    const KIND: &'static str = "station";

    fn id(&self) -> StationId {
        self.id
    }
}
