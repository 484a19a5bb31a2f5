use serde::{Deserialize, Serialize};

use desk_core::{Entity, define_id};

use crate::appointment::AppointmentId;

define_id!(DoctorId, "DoctorId");

/// A doctor and the appointments currently on their books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    id: DoctorId,
    name: String,
    specialty: String,
    appointments: Vec<AppointmentId>,
}

impl Doctor {
    pub(crate) fn new(id: DoctorId, name: String, specialty: String) -> Self {
        Self {
            id,
            name,
            specialty,
            appointments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    /// Appointments assigned and not canceled, in scheduling order.
    pub fn appointments(&self) -> &[AppointmentId] {
        &self.appointments
    }

    pub(crate) fn assign(&mut self, appointment: AppointmentId) {
        self.appointments.push(appointment);
    }

    pub(crate) fn release(&mut self, appointment: AppointmentId) {
        self.appointments.retain(|a| *a != appointment);
    }
}

impl Entity for Doctor {
    type Id = DoctorId;
    const KIND: &'static str = "doctor";

    fn id(&self) -> DoctorId {
        self.id
    }
}
