//! Clinic domain module.
//!
//! Patients, doctors, appointments, medicine inventory, prescriptions and
//! bills, implemented purely as deterministic domain logic (no IO).

pub mod appointment;
pub mod bill;
pub mod clinic;
pub mod doctor;
pub mod medicine;
pub mod patient;
pub mod prescription;

pub use appointment::{Appointment, AppointmentId, AppointmentStatus, NewAppointment};
pub use bill::{Bill, BillId, BillStatus};
pub use clinic::Clinic;
pub use doctor::{Doctor, DoctorId};
pub use medicine::{Medicine, MedicineId, NewMedicine};
pub use patient::{Patient, PatientId, PatientKind};
pub use prescription::{NewPrescription, PrescribedItem, Prescription, PrescriptionId};
