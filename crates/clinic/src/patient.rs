use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, define_id};

define_id!(
    /// Patient identifier, issued by the owning [`Clinic`](crate::Clinic).
    PatientId,
    "PatientId"
);

/// Patient variant and the data only that variant carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PatientKind {
    Regular,
    Chronic {
        condition: String,
        last_checkup: NaiveDate,
    },
}

impl PatientKind {
    pub fn label(&self) -> &'static str {
        match self {
            PatientKind::Regular => "Regular Patient",
            PatientKind::Chronic { .. } => "Chronic Patient",
        }
    }

    /// How often this kind of patient should be seen.
    pub fn appointment_frequency(&self) -> &'static str {
        match self {
            PatientKind::Regular => "As needed",
            PatientKind::Chronic { .. } => "Every 3 months (chronic condition)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    id: PatientId,
    name: String,
    age: u32,
    kind: PatientKind,
    medical_history: Vec<String>,
}

impl Patient {
    pub(crate) fn new(id: PatientId, name: String, age: u32, kind: PatientKind) -> Self {
        Self {
            id,
            name,
            age,
            kind,
            medical_history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn kind(&self) -> &PatientKind {
        &self.kind
    }

    pub fn is_chronic(&self) -> bool {
        matches!(self.kind, PatientKind::Chronic { .. })
    }

    pub fn medical_history(&self) -> &[String] {
        &self.medical_history
    }

    pub(crate) fn add_record(&mut self, record: impl Into<String>) {
        self.medical_history.push(record.into());
    }

    /// Move a chronic patient's last checkup forward.
    ///
    /// Dates earlier than the one on file are ignored so completing an old
    /// appointment never rewinds the record.
    pub(crate) fn record_checkup(&mut self, on: NaiveDate) -> DomainResult<()> {
        match &mut self.kind {
            PatientKind::Chronic { last_checkup, .. } => {
                if on > *last_checkup {
                    *last_checkup = on;
                }
                Ok(())
            }
            PatientKind::Regular => Err(DomainError::invalid_state(format!(
                "patient {} is not a chronic patient",
                self.id
            ))),
        }
    }
}

impl Entity for Patient {
    type Id = PatientId;
    const KIND: &'static str = "patient";

    fn id(&self) -> PatientId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chronic() -> Patient {
        Patient::new(
            PatientId::new(2),
            "Mary Johnson".to_string(),
            62,
            PatientKind::Chronic {
                condition: "Type 2 Diabetes".to_string(),
                last_checkup: date(2024, 1, 15),
            },
        )
    }

    #[test]
    fn kinds_expose_their_policy_text() {
        let regular = Patient::new(PatientId::new(1), "John Smith".into(), 35, PatientKind::Regular);
        assert_eq!(regular.kind().label(), "Regular Patient");
        assert_eq!(regular.kind().appointment_frequency(), "As needed");

        let chronic = chronic();
        assert_eq!(chronic.kind().label(), "Chronic Patient");
        assert_eq!(
            chronic.kind().appointment_frequency(),
            "Every 3 months (chronic condition)"
        );
    }

    #[test]
    fn checkup_only_moves_forward() {
        let mut patient = chronic();
        patient.record_checkup(date(2023, 6, 1)).unwrap();
        patient.record_checkup(date(2024, 3, 16)).unwrap();
        match patient.kind() {
            PatientKind::Chronic { last_checkup, .. } => assert_eq!(*last_checkup, date(2024, 3, 16)),
            PatientKind::Regular => panic!("expected chronic patient"),
        }
    }

    #[test]
    fn regular_patient_has_no_checkup_date() {
        let mut patient = Patient::new(PatientId::new(1), "Bob".into(), 28, PatientKind::Regular);
        assert!(matches!(
            patient.record_checkup(date(2024, 1, 1)),
            Err(DomainError::InvalidState(_))
        ));
    }
}
