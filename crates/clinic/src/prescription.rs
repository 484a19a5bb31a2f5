use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use desk_core::{Entity, define_id};

use crate::doctor::DoctorId;
use crate::medicine::MedicineId;
use crate::patient::PatientId;

define_id!(PrescriptionId, "PrescriptionId");

/// Input for [`Clinic::create_prescription`](crate::Clinic::create_prescription).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrescription {
    pub patient: PatientId,
    pub doctor: DoctorId,
    pub date: NaiveDate,
    pub instructions: String,
    pub medicines: Vec<MedicineId>,
}

/// One dispensed medicine, priced at the time of prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedItem {
    pub medicine: MedicineId,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    id: PrescriptionId,
    patient: PatientId,
    doctor: DoctorId,
    date: NaiveDate,
    instructions: String,
    items: Vec<PrescribedItem>,
}

impl Prescription {
    pub(crate) fn new(
        id: PrescriptionId,
        patient: PatientId,
        doctor: DoctorId,
        date: NaiveDate,
        instructions: String,
        items: Vec<PrescribedItem>,
    ) -> Self {
        Self {
            id,
            patient,
            doctor,
            date,
            instructions,
            items,
        }
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn doctor(&self) -> DoctorId {
        self.doctor
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn items(&self) -> &[PrescribedItem] {
        &self.items
    }

    /// Sum of the item prices.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }
}

impl Entity for Prescription {
    type Id = PrescriptionId;
    const KIND: &'static str = "prescription";

    fn id(&self) -> PrescriptionId {
        self.id
    }
}
