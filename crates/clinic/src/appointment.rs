use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, Lifecycle, define_id};

use crate::doctor::DoctorId;
use crate::patient::PatientId;

define_id!(AppointmentId, "AppointmentId");

/// Appointment status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Canceled,
}

impl core::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Canceled => "Canceled",
        })
    }
}

impl Lifecycle for AppointmentStatus {
    fn is_terminal(self) -> bool {
        self != AppointmentStatus::Scheduled
    }
}

/// Input for [`Clinic::schedule_appointment`](crate::Clinic::schedule_appointment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub reason: String,
    pub patient: PatientId,
    pub doctor: DoctorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    date: NaiveDate,
    time: NaiveTime,
    reason: String,
    patient: PatientId,
    doctor: DoctorId,
    status: AppointmentStatus,
}

impl Appointment {
    pub(crate) fn new(id: AppointmentId, req: NewAppointment) -> Self {
        Self {
            id,
            date: req.date,
            time: req.time,
            reason: req.reason,
            patient: req.patient,
            doctor: req.doctor,
            status: AppointmentStatus::Scheduled,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn doctor(&self) -> DoctorId {
        self.doctor
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Status change; the appointment is untouched when the move is illegal.
    pub(crate) fn set_status(&mut self, next: AppointmentStatus) -> DomainResult<()> {
        self.status = self.status.transition(next)?;
        Ok(())
    }

    pub(crate) fn reschedule(&mut self, date: NaiveDate, time: NaiveTime) -> DomainResult<()> {
        if self.status != AppointmentStatus::Scheduled {
            return Err(DomainError::invalid_state(format!(
                "cannot reschedule appointment {}: it is {}",
                self.id, self.status
            )));
        }
        self.date = date;
        self.time = time;
        Ok(())
    }
}

impl Entity for Appointment {
    type Id = AppointmentId;
    const KIND: &'static str = "appointment";

    fn id(&self) -> AppointmentId {
        self.id
    }
}
