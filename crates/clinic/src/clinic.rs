//! The clinic registry: owns every clinic collection and enforces that
//! cross references always point at existing entities.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use desk_core::{DomainError, DomainResult, Entity, Registry};

use crate::appointment::{Appointment, AppointmentId, AppointmentStatus, NewAppointment};
use crate::bill::{Bill, BillId, BillStatus};
use crate::doctor::{Doctor, DoctorId};
use crate::medicine::{Medicine, MedicineId, NewMedicine};
use crate::patient::{Patient, PatientId, PatientKind};
use crate::prescription::{NewPrescription, PrescribedItem, Prescription, PrescriptionId};

#[derive(Debug, Clone, Default)]
pub struct Clinic {
    patients: Registry<Patient>,
    doctors: Registry<Doctor>,
    appointments: Registry<Appointment>,
    medicines: Registry<Medicine>,
    prescriptions: Registry<Prescription>,
    bills: Registry<Bill>,
}

impl Clinic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_patient(&mut self, name: impl Into<String>, age: u32) -> PatientId {
        let name = name.into();
        self.patients
            .create(|id| Patient::new(id, name, age, PatientKind::Regular))
    }

    pub fn add_chronic_patient(
        &mut self,
        name: impl Into<String>,
        age: u32,
        condition: impl Into<String>,
        last_checkup: NaiveDate,
    ) -> PatientId {
        let name = name.into();
        let kind = PatientKind::Chronic {
            condition: condition.into(),
            last_checkup,
        };
        self.patients.create(|id| Patient::new(id, name, age, kind))
    }

    pub fn add_doctor(&mut self, name: impl Into<String>, specialty: impl Into<String>) -> DoctorId {
        let (name, specialty) = (name.into(), specialty.into());
        self.doctors.create(|id| Doctor::new(id, name, specialty))
    }

    /// Stock a new medicine. The unit price must be finite and not negative.
    pub fn add_medicine(&mut self, medicine: NewMedicine) -> DomainResult<MedicineId> {
        if !medicine.price.is_finite() || medicine.price < 0.0 {
            return Err(DomainError::validation("medicine price must be a non-negative amount"));
        }
        Ok(self.medicines.create(|id| Medicine::new(id, medicine)))
    }

    /// Book a patient with a doctor. Both must already be registered.
    pub fn schedule_appointment(&mut self, req: NewAppointment) -> DomainResult<AppointmentId> {
        self.patients.ensure(req.patient)?;
        self.doctors.ensure(req.doctor)?;

        let doctor = req.doctor;
        let id = self.appointments.create(|id| Appointment::new(id, req));
        self.doctors.require_mut(doctor)?.assign(id);
        Ok(id)
    }

    /// Cancel a scheduled appointment and free the doctor's slot.
    pub fn cancel_appointment(&mut self, id: AppointmentId) -> DomainResult<()> {
        let appointment = self.appointments.require_mut(id)?;
        appointment.set_status(AppointmentStatus::Canceled)?;
        let doctor = appointment.doctor();
        self.doctors.require_mut(doctor)?.release(id);
        Ok(())
    }

    /// Complete a scheduled appointment, filing `note` in the patient's history.
    ///
    /// Chronic patients also get their last-checkup date moved to the
    /// appointment date.
    pub fn complete_appointment(
        &mut self,
        id: AppointmentId,
        note: impl Into<String>,
    ) -> DomainResult<()> {
        let appointment = self.appointments.require_mut(id)?;
        appointment.set_status(AppointmentStatus::Completed)?;
        let (patient_id, date) = (appointment.patient(), appointment.date());

        let patient = self.patients.require_mut(patient_id)?;
        patient.add_record(note);
        if patient.is_chronic() {
            patient.record_checkup(date)?;
        }
        Ok(())
    }

    pub fn reschedule_appointment(
        &mut self,
        id: AppointmentId,
        date: NaiveDate,
        time: NaiveTime,
    ) -> DomainResult<()> {
        self.appointments.require_mut(id)?.reschedule(date, time)
    }

    /// Write a prescription and dispense one unit of each listed medicine.
    ///
    /// Every id and every unit of stock is checked before anything is taken,
    /// so a rejected prescription leaves the inventory untouched. A medicine
    /// listed twice needs two units.
    pub fn create_prescription(&mut self, req: NewPrescription) -> DomainResult<PrescriptionId> {
        self.patients.ensure(req.patient)?;
        self.doctors.ensure(req.doctor)?;

        let mut wanted: BTreeMap<MedicineId, u32> = BTreeMap::new();
        for medicine in &req.medicines {
            *wanted.entry(*medicine).or_default() += 1;
        }
        for (medicine, quantity) in &wanted {
            self.medicines
                .require(*medicine)?
                .ensure_dispensable(*quantity, req.date)?;
        }

        let mut items = Vec::with_capacity(req.medicines.len());
        for medicine_id in &req.medicines {
            let medicine = self.medicines.require(*medicine_id)?;
            items.push(PrescribedItem {
                medicine: *medicine_id,
                name: medicine.name().to_string(),
                price: medicine.price(),
            });
        }
        for (medicine, quantity) in wanted {
            self.medicines.require_mut(medicine)?.take_stock(quantity)?;
        }

        let NewPrescription {
            patient,
            doctor,
            date,
            instructions,
            ..
        } = req;
        Ok(self.prescriptions.create(|id| {
            Prescription::new(id, patient, doctor, date, instructions, items)
        }))
    }

    /// Bill a prescription: consultation fee plus the prescription's cost.
    ///
    /// The optional appointment must belong to the prescription's patient.
    /// A prescription is billed at most once.
    pub fn generate_bill(
        &mut self,
        prescription: PrescriptionId,
        consultation_fee: f64,
        issued_on: NaiveDate,
        appointment: Option<AppointmentId>,
    ) -> DomainResult<BillId> {
        if !consultation_fee.is_finite() || consultation_fee < 0.0 {
            return Err(DomainError::validation(
                "consultation fee must be a non-negative amount",
            ));
        }

        let rx = self.prescriptions.require(prescription)?;
        let (patient, medication_cost) = (rx.patient(), rx.total_cost());

        if let Some(appointment_id) = appointment {
            let appt = self.appointments.require(appointment_id)?;
            if appt.patient() != patient {
                return Err(DomainError::rule(format!(
                    "appointment {} belongs to patient {}, not patient {}",
                    appointment_id,
                    appt.patient(),
                    patient
                )));
            }
        }

        if let Some(existing) = self.bills.find_by(|b| b.prescription() == prescription) {
            return Err(DomainError::invalid_state(format!(
                "prescription {} is already billed (bill {})",
                prescription,
                existing.id()
            )));
        }

        Ok(self.bills.create(|id| {
            Bill::new(
                id,
                patient,
                prescription,
                appointment,
                consultation_fee,
                medication_cost,
                issued_on,
            )
        }))
    }

    pub fn pay_bill(&mut self, id: BillId) -> DomainResult<()> {
        self.bills.require_mut(id)?.mark_paid()
    }

    /// Sum of the patient's unpaid bill totals.
    pub fn outstanding_balance(&self, patient: PatientId) -> DomainResult<f64> {
        self.patients.ensure(patient)?;
        Ok(self
            .bills
            .iter()
            .filter(|b| b.patient() == patient && b.status() == BillStatus::Unpaid)
            .map(Bill::total)
            .sum())
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.find(id)
    }

    pub fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.find(id)
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.find(id)
    }

    pub fn medicine(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.find(id)
    }

    pub fn prescription(&self, id: PrescriptionId) -> Option<&Prescription> {
        self.prescriptions.find(id)
    }

    pub fn bill(&self, id: BillId) -> Option<&Bill> {
        self.bills.find(id)
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter()
    }

    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    pub fn medicines(&self) -> impl Iterator<Item = &Medicine> {
        self.medicines.iter()
    }

    pub fn prescriptions(&self) -> impl Iterator<Item = &Prescription> {
        self.prescriptions.iter()
    }

    pub fn bills(&self) -> impl Iterator<Item = &Bill> {
        self.bills.iter()
    }
}
