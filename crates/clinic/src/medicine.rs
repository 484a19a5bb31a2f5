use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, define_id};

define_id!(MedicineId, "MedicineId");

/// Input for [`Clinic::add_medicine`](crate::Clinic::add_medicine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub description: String,
    /// Unit price in dollars.
    pub price: f64,
    pub stock: u32,
    pub expires_on: NaiveDate,
    pub manufacturer: String,
}

/// An inventory line: one medicine and how many units are on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    id: MedicineId,
    name: String,
    description: String,
    price: f64,
    stock: u32,
    expires_on: NaiveDate,
    manufacturer: String,
}

impl Medicine {
    pub(crate) fn new(id: MedicineId, req: NewMedicine) -> Self {
        Self {
            id,
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
            expires_on: req.expires_on,
            manufacturer: req.manufacturer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn expires_on(&self) -> NaiveDate {
        self.expires_on
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Expired strictly after its expiry date; usable on the date itself.
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        self.expires_on < on
    }

    pub fn has_stock(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// Check that `quantity` units may be dispensed on `on`.
    pub(crate) fn ensure_dispensable(&self, quantity: u32, on: NaiveDate) -> DomainResult<()> {
        if self.is_expired(on) {
            return Err(DomainError::rule(format!(
                "{} (medicine {}) expired on {}",
                self.name, self.id, self.expires_on
            )));
        }
        if !self.has_stock(quantity) {
            return Err(DomainError::rule(format!(
                "insufficient stock for {} (medicine {}): requested {}, available {}",
                self.name, self.id, quantity, self.stock
            )));
        }
        Ok(())
    }

    pub(crate) fn take_stock(&mut self, quantity: u32) -> DomainResult<()> {
        self.stock = self.stock.checked_sub(quantity).ok_or_else(|| {
            DomainError::rule(format!(
                "insufficient stock for {}: requested {}, available {}",
                self.name, quantity, self.stock
            ))
        })?;
        Ok(())
    }
}

impl Entity for Medicine {
    type Id = MedicineId;
    const KIND: &'static str = "medicine";

    fn id(&self) -> MedicineId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paracetamol(stock: u32) -> Medicine {
        Medicine::new(
            MedicineId::new(1),
            NewMedicine {
                name: "Paracetamol".to_string(),
                description: "Pain relief".to_string(),
                price: 2.5,
                stock,
                expires_on: date(2026, 1, 1),
                manufacturer: "PharmaCo".to_string(),
            },
        )
    }

    #[test]
    fn expiry_is_inclusive_of_the_expiry_date() {
        let med = paracetamol(10);
        assert!(!med.is_expired(date(2026, 1, 1)));
        assert!(med.is_expired(date(2026, 1, 2)));
    }

    #[test]
    fn take_stock_never_goes_negative() {
        let mut med = paracetamol(1);
        med.take_stock(1).unwrap();
        assert_eq!(med.stock(), 0);
        assert!(matches!(med.take_stock(1), Err(DomainError::RuleViolation(_))));
        assert_eq!(med.stock(), 0);
    }

    #[test]
    fn expired_medicine_is_not_dispensable() {
        let med = paracetamol(5);
        let err = med.ensure_dispensable(1, date(2026, 6, 1)).unwrap_err();
        assert!(err.to_string().contains("expired"));
        assert!(med.ensure_dispensable(5, date(2025, 6, 1)).is_ok());
        assert!(med.ensure_dispensable(6, date(2025, 6, 1)).is_err());
    }
}
