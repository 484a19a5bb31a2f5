//! Clinic menu and renderers.

use std::io::{BufRead, Write};

use desk_clinic::{
    Appointment, AppointmentId, Bill, BillId, Clinic, Doctor, DoctorId, Medicine, MedicineId,
    NewAppointment, NewMedicine, NewPrescription, Patient, PatientId, PatientKind, Prescription,
    PrescriptionId,
};
use desk_core::{DomainError, Entity};

use crate::menu::{Menu, Outcome, listing, money};
use crate::prompt::{DATE_FORMAT, Prompt, PromptError, TIME_FORMAT};

pub struct ClinicMenu {
    clinic: Clinic,
}

impl ClinicMenu {
    pub fn new(clinic: Clinic) -> Self {
        Self { clinic }
    }

    pub fn clinic(&self) -> &Clinic {
        &self.clinic
    }
}

impl Menu for ClinicMenu {
    const NAME: &'static str = "clinic";
    const TITLE: &'static str = "CLINIC MANAGEMENT MENU";
    const OPTIONS: &'static [&'static str] = &[
        "Add Patient",
        "Add Doctor",
        "Schedule Appointment",
        "Reschedule Appointment",
        "Complete Appointment",
        "Cancel Appointment",
        "Create Prescription",
        "Generate Bill",
        "Show All Medicines",
        "Show All Appointments",
        "Find Patient by ID",
        "Find Doctor by ID",
        "Show All Patients",
        "Show All Doctors",
        "Show All Prescriptions",
        "Show All Bills",
        "Pay Bill",
        "Add Medicine",
        "Outstanding Balance",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        prompt: &mut Prompt<R, W>,
    ) -> Result<Outcome, PromptError> {
        match choice {
            1 => self.add_patient(prompt),
            2 => self.add_doctor(prompt),
            3 => self.schedule(prompt),
            4 => self.reschedule(prompt),
            5 => self.complete(prompt),
            6 => self.cancel(prompt),
            7 => self.prescribe(prompt),
            8 => self.bill(prompt),
            9 => Ok(Ok(listing(self.clinic.medicines(), "No medicines in inventory.", medicine_line))),
            10 => Ok(Ok(listing(self.clinic.appointments(), "No appointments scheduled.", appointment_card))),
            11 => {
                let id = prompt.value::<PatientId>("Enter patient ID to find: ")?;
                Ok(self.clinic.patient(id).map(patient_card).ok_or_else(|| DomainError::not_found("patient", id)))
            }
            12 => {
                let id = prompt.value::<DoctorId>("Enter doctor ID to find: ")?;
                Ok(self.clinic.doctor(id).map(doctor_card).ok_or_else(|| DomainError::not_found("doctor", id)))
            }
            13 => Ok(Ok(listing(self.clinic.patients(), "No patients registered.", patient_card))),
            14 => Ok(Ok(listing(self.clinic.doctors(), "No doctors registered.", doctor_card))),
            15 => Ok(Ok(listing(self.clinic.prescriptions(), "No prescriptions available.", |rx| {
                prescription_card(&self.clinic, rx)
            }))),
            16 => Ok(Ok(listing(self.clinic.bills(), "No bills available.", bill_card))),
            17 => self.pay(prompt),
            18 => self.add_medicine(prompt),
            19 => {
                let id = prompt.value::<PatientId>("Enter patient ID: ")?;
                Ok(self
                    .clinic
                    .outstanding_balance(id)
                    .map(|due| format!("Outstanding balance for patient {id}: {}", money(due))))
            }
            other => Ok(Err(DomainError::validation(format!("no menu option {other}")))),
        }
    }
}

impl ClinicMenu {
    fn add_patient<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let kind = p.value::<u32>("Choose patient type:\n1. Regular\n2. Chronic\nEnter choice: ")?;
        if kind != 1 && kind != 2 {
            return Ok(Err(DomainError::validation("patient type must be 1 (regular) or 2 (chronic)")));
        }
        let name = p.text("Enter patient name: ")?;
        let age = p.value::<u32>("Enter age: ")?;

        let id = if kind == 2 {
            let condition = p.text("Enter chronic condition: ")?;
            let last_checkup = p.date("Enter last checkup date (YYYY-MM-DD): ")?;
            self.clinic.add_chronic_patient(name, age, condition, last_checkup)
        } else {
            self.clinic.add_patient(name, age)
        };
        tracing::info!(entity = "patient", %id, "patient added");
        Ok(Ok(format!("Patient added with ID: {id}")))
    }

    fn add_doctor<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let name = p.text("Enter doctor name: ")?;
        let specialty = p.text("Enter specialty: ")?;
        let id = self.clinic.add_doctor(name, specialty);
        tracing::info!(entity = "doctor", %id, "doctor added");
        Ok(Ok(format!("Doctor added with ID: {id}")))
    }

    fn add_medicine<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let name = p.text("Enter medicine name: ")?;
        let description = p.text("Enter description: ")?;
        let price = p.parse_with("Enter unit price: $", |s| match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err("price must be a non-negative number"),
        })?;
        let stock = p.value::<u32>("Enter stock quantity: ")?;
        let expires_on = p.date("Enter expiry date (YYYY-MM-DD): ")?;
        let manufacturer = p.text("Enter manufacturer: ")?;

        let medicine = NewMedicine {
            name,
            description,
            price,
            stock,
            expires_on,
            manufacturer,
        };
        Ok(self.clinic.add_medicine(medicine).map(|id| {
            tracing::info!(entity = "medicine", %id, "medicine added");
            format!("Medicine added with ID: {id}")
        }))
    }

    fn schedule<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let date = p.date("Enter date (YYYY-MM-DD): ")?;
        let time = p.time("Enter time (HH:MM): ")?;
        let reason = p.text("Enter reason: ")?;
        let patient = p.value::<PatientId>("Enter patient ID: ")?;
        let doctor = p.value::<DoctorId>("Enter doctor ID: ")?;

        Ok(self
            .clinic
            .schedule_appointment(NewAppointment {
                date,
                time,
                reason,
                patient,
                doctor,
            })
            .map(|id| {
                tracing::info!(entity = "appointment", %id, %patient, %doctor, "appointment scheduled");
                format!("Appointment scheduled with ID: {id}")
            }))
    }

    fn reschedule<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let id = p.value::<AppointmentId>("Enter appointment ID: ")?;
        let date = p.date("New date (YYYY-MM-DD): ")?;
        let time = p.time("New time (HH:MM): ")?;
        Ok(self.clinic.reschedule_appointment(id, date, time).map(|()| {
            tracing::info!(entity = "appointment", %id, "appointment rescheduled");
            format!(
                "Appointment {id} rescheduled to {} {}",
                date.format(DATE_FORMAT),
                time.format(TIME_FORMAT)
            )
        }))
    }

    fn complete<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let id = p.value::<AppointmentId>("Enter appointment ID: ")?;
        let note = p.text("Treatment record: ")?;
        Ok(self.clinic.complete_appointment(id, note).map(|()| {
            tracing::info!(entity = "appointment", %id, "appointment completed");
            format!("Appointment {id} marked as Completed")
        }))
    }

    fn cancel<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let id = p.value::<AppointmentId>("Enter appointment ID: ")?;
        Ok(self.clinic.cancel_appointment(id).map(|()| {
            tracing::info!(entity = "appointment", %id, "appointment canceled");
            format!("Appointment {id} canceled")
        }))
    }

    fn prescribe<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let patient = p.value::<PatientId>("Enter patient ID: ")?;
        let doctor = p.value::<DoctorId>("Enter doctor ID: ")?;
        let date = p.date("Enter prescription date (YYYY-MM-DD): ")?;
        let instructions = p.text("Enter instructions: ")?;

        p.say("\n=== AVAILABLE MEDICINES ===")?;
        p.say(&listing(self.clinic.medicines(), "No medicines in inventory.", medicine_line))?;
        let medicines = p.list::<MedicineId>("Enter medicine IDs to prescribe (separated by spaces): ")?;

        Ok(self
            .clinic
            .create_prescription(NewPrescription {
                patient,
                doctor,
                date,
                instructions,
                medicines,
            })
            .map(|id| {
                tracing::info!(entity = "prescription", %id, %patient, "prescription created");
                format!("Prescription created with ID: {id}")
            }))
    }

    fn bill<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let prescription = p.value::<PrescriptionId>("Enter prescription ID: ")?;
        let fee = p.value::<f64>("Enter consultation fee: $")?;
        let issued_on = p.date("Enter bill date (YYYY-MM-DD): ")?;
        let appointment =
            p.optional::<AppointmentId>("Enter appointment ID (blank for none): ")?;

        let id = match self.clinic.generate_bill(prescription, fee, issued_on, appointment) {
            Ok(id) => id,
            Err(err) => return Ok(Err(err)),
        };
        tracing::info!(entity = "bill", %id, %prescription, "bill generated");
        Ok(self
            .clinic
            .bill(id)
            .map(bill_card)
            .ok_or_else(|| DomainError::not_found("bill", id)))
    }

    fn pay<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let id = p.value::<BillId>("Enter bill ID: ")?;
        Ok(self.clinic.pay_bill(id).map(|()| {
            tracing::info!(entity = "bill", %id, "bill paid");
            format!("Bill {id} paid")
        }))
    }
}

fn patient_card(patient: &Patient) -> String {
    let mut lines = vec![
        format!("Patient ID: {}", patient.id()),
        format!("Name: {}", patient.name()),
        format!("Age: {}", patient.age()),
        format!("Type: {}", patient.kind().label()),
    ];
    if let PatientKind::Chronic {
        condition,
        last_checkup,
    } = patient.kind()
    {
        lines.push(format!("Condition: {condition}"));
        lines.push(format!("Last Checkup: {}", last_checkup.format(DATE_FORMAT)));
    }
    lines.push(format!(
        "Appointment Frequency: {}",
        patient.kind().appointment_frequency()
    ));
    if patient.medical_history().is_empty() {
        lines.push("Medical History: none".to_string());
    } else {
        lines.push("Medical History:".to_string());
        lines.extend(patient.medical_history().iter().map(|r| format!("  - {r}")));
    }
    lines.join("\n")
}

fn doctor_card(doctor: &Doctor) -> String {
    let assigned = if doctor.appointments().is_empty() {
        "none".to_string()
    } else {
        doctor
            .appointments()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Doctor ID: {}\nName: {}\nSpecialty: {}\nAppointments: {assigned}",
        doctor.id(),
        doctor.name(),
        doctor.specialty()
    )
}

fn appointment_card(appt: &Appointment) -> String {
    format!(
        "Appointment ID: {}\nDate: {} {}\nReason: {}\nPatient ID: {}\nDoctor ID: {}\nStatus: {}",
        appt.id(),
        appt.date().format(DATE_FORMAT),
        appt.time().format(TIME_FORMAT),
        appt.reason(),
        appt.patient(),
        appt.doctor(),
        appt.status()
    )
}

fn medicine_line(medicine: &Medicine) -> String {
    format!(
        "ID: {} | {} ({}) - {} | stock {} | expires {} | {}",
        medicine.id(),
        medicine.name(),
        medicine.description(),
        money(medicine.price()),
        medicine.stock(),
        medicine.expires_on().format(DATE_FORMAT),
        medicine.manufacturer()
    )
}

fn prescription_card(clinic: &Clinic, rx: &Prescription) -> String {
    let patient = clinic.patient(rx.patient()).map_or("?", Patient::name);
    let doctor = clinic.doctor(rx.doctor()).map_or("?", Doctor::name);
    let mut lines = vec![
        format!("Prescription ID: {}", rx.id()),
        format!("Patient: {patient} (ID {})", rx.patient()),
        format!("Doctor: {doctor} (ID {})", rx.doctor()),
        format!("Date: {}", rx.date().format(DATE_FORMAT)),
        format!("Instructions: {}", rx.instructions()),
        "Medicines:".to_string(),
    ];
    lines.extend(
        rx.items()
            .iter()
            .map(|item| format!("  - {} {}", item.name, money(item.price))),
    );
    lines.push(format!("Total Medication Cost: {}", money(rx.total_cost())));
    lines.join("\n")
}

fn bill_card(bill: &Bill) -> String {
    let appointment = bill
        .appointment()
        .map_or_else(|| "none".to_string(), |id| id.to_string());
    format!(
        "Bill ID: {}\nPatient ID: {}\nPrescription ID: {}\nAppointment: {appointment}\n\
         Date: {}\nConsultation Fee: {}\nMedication Cost: {}\nTotal: {}\nStatus: {}",
        bill.id(),
        bill.patient(),
        bill.prescription(),
        bill.issued_on().format(DATE_FORMAT),
        money(bill.consultation_fee()),
        money(bill.medication_cost()),
        money(bill.total()),
        bill.status()
    )
}
