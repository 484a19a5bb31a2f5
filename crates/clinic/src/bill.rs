use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use desk_core::{DomainResult, Entity, Lifecycle, define_id};

use crate::appointment::AppointmentId;
use crate::patient::PatientId;
use crate::prescription::PrescriptionId;

define_id!(BillId, "BillId");

/// Bill payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Unpaid,
    Paid,
}

impl core::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            BillStatus::Unpaid => "Unpaid",
            BillStatus::Paid => "Paid",
        })
    }
}

impl Lifecycle for BillStatus {
    fn is_terminal(self) -> bool {
        self == BillStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    id: BillId,
    patient: PatientId,
    prescription: PrescriptionId,
    appointment: Option<AppointmentId>,
    consultation_fee: f64,
    medication_cost: f64,
    issued_on: NaiveDate,
    status: BillStatus,
}

impl Bill {
    pub(crate) fn new(
        id: BillId,
        patient: PatientId,
        prescription: PrescriptionId,
        appointment: Option<AppointmentId>,
        consultation_fee: f64,
        medication_cost: f64,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            patient,
            prescription,
            appointment,
            consultation_fee,
            medication_cost,
            issued_on,
            status: BillStatus::Unpaid,
        }
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn prescription(&self) -> PrescriptionId {
        self.prescription
    }

    pub fn appointment(&self) -> Option<AppointmentId> {
        self.appointment
    }

    pub fn consultation_fee(&self) -> f64 {
        self.consultation_fee
    }

    pub fn medication_cost(&self) -> f64 {
        self.medication_cost
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    pub fn status(&self) -> BillStatus {
        self.status
    }

    /// Consultation fee plus medication cost.
    pub fn total(&self) -> f64 {
        self.consultation_fee + self.medication_cost
    }

    pub(crate) fn mark_paid(&mut self) -> DomainResult<()> {
        self.status = self.status.transition(BillStatus::Paid)?;
        Ok(())
    }
}

impl Entity for Bill {
    type Id = BillId;
    const KIND: &'static str = "bill";

    fn id(&self) -> BillId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::DomainError;

    fn bill() -> Bill {
        Bill::new(
            BillId::new(1),
            PatientId::new(1),
            PrescriptionId::new(1),
            None,
            20.0,
            7.5,
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
        )
    }

    #[test]
    fn total_is_fee_plus_medication() {
        assert_eq!(bill().total(), 27.5);
    }

    #[test]
    fn paying_twice_fails() {
        let mut bill = bill();
        bill.mark_paid().unwrap();
        assert_eq!(bill.status(), BillStatus::Paid);
        assert!(matches!(bill.mark_paid(), Err(DomainError::InvalidState(_))));
        assert_eq!(bill.status(), BillStatus::Paid);
    }
}
