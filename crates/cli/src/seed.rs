//! Sample data loaded at startup unless `--no-seed` is given.

use chrono::{NaiveDate, NaiveTime};

use desk_bank::{Bank, SavingsTerms};
use desk_clinic::{Clinic, MedicineId, NewAppointment, NewMedicine, NewPrescription};
use desk_core::{DomainError, DomainResult};
use desk_transit::{StationMode, TransitSystem};

fn date(y: i32, m: u32, d: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::validation(format!("invalid date {y}-{m}-{d}")))
}

fn time(h: u32, m: u32) -> DomainResult<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
        .ok_or_else(|| DomainError::validation(format!("invalid time {h}:{m}")))
}

pub fn clinic() -> DomainResult<Clinic> {
    let mut clinic = Clinic::new();

    let cardio = clinic.add_doctor("Dr. Nguyen Van Binh", "Cardiology");
    let derma = clinic.add_doctor("Dr. Tran Thi Mai", "Dermatology");
    let pediatrics = clinic.add_doctor("Dr. Le Quang Huy", "Pediatrics");

    let trung = clinic.add_patient("Doan Trong Trung", 22);
    let lan = clinic.add_patient("Nguyen Thi Lan", 35);
    let hoa = clinic.add_chronic_patient("Pham Van Hoa", 60, "Diabetes", date(2025, 8, 10)?);
    let huong = clinic.add_chronic_patient("Le Thi Huong", 55, "Hypertension", date(2025, 7, 20)?);

    let inventory = [
        ("Paracetamol", "Pain relief", 2.5, 100, date(2026, 1, 1)?, "PharmaCo"),
        ("Amoxicillin", "Antibiotic", 5.0, 50, date(2025, 12, 31)?, "HealthMed"),
        ("Metformin", "Diabetes control", 3.2, 80, date(2026, 3, 15)?, "Glucare"),
        ("Losartan", "Blood pressure", 4.5, 60, date(2026, 2, 10)?, "CardioPharm"),
    ];
    let medicines = inventory
        .into_iter()
        .map(|(name, description, price, stock, expires_on, manufacturer)| {
            clinic.add_medicine(NewMedicine {
                name: name.to_string(),
                description: description.to_string(),
                price,
                stock,
                expires_on,
                manufacturer: manufacturer.to_string(),
            })
        })
        .collect::<DomainResult<Vec<MedicineId>>>()?;

    let visits = [
        (date(2025, 9, 15)?, time(9, 0)?, "General Checkup", trung, cardio),
        (date(2025, 9, 16)?, time(10, 30)?, "Skin Rash", lan, derma),
        (date(2025, 9, 17)?, time(8, 0)?, "Diabetes Follow-up", hoa, cardio),
        (date(2025, 9, 18)?, time(11, 0)?, "Blood Pressure Review", huong, pediatrics),
    ];
    for (date, time, reason, patient, doctor) in visits {
        clinic.schedule_appointment(NewAppointment {
            date,
            time,
            reason: reason.to_string(),
            patient,
            doctor,
        })?;
    }

    let scripts = [
        (trung, cardio, date(2025, 9, 15)?, "Take after meals", medicines[0], 20.0),
        (trung, derma, date(2025, 9, 17)?, "Take twice daily", medicines[2], 25.0),
        (hoa, derma, date(2025, 9, 18)?, "Take once daily", medicines[3], 30.0),
    ];
    for (patient, doctor, date, instructions, medicine, fee) in scripts {
        let rx = clinic.create_prescription(NewPrescription {
            patient,
            doctor,
            date,
            instructions: instructions.to_string(),
            medicines: vec![medicine],
        })?;
        clinic.generate_bill(rx, fee, date, None)?;
    }

    Ok(clinic)
}

pub fn transit() -> DomainResult<TransitSystem> {
    let mut ts = TransitSystem::new();

    ts.add_vehicle("Route A", 40);
    ts.add_express_bus("Route B", 30, 60.0, 5)?;

    let small_bus = ts.add_vehicle("City Center Route", 2);
    let john = ts.add_passenger("John Doe");
    let jane = ts.add_passenger("Jane Smith");
    let bob = ts.add_passenger("Bob Wilson");
    ts.book_ride(john, small_bus)?;
    ts.book_ride(jane, small_bus)?;
    ts.cancel_ride(john, small_bus)?;
    ts.book_ride(bob, small_bus)?;

    let central = ts.add_station("Central Station", "City Center", StationMode::Bus);
    let route_x = ts.add_vehicle("Route X", 50);
    let route_y = ts.add_express_bus("Route Y", 40, 70.0, 4)?;
    ts.schedule_vehicle(central, route_x)?;
    ts.schedule_vehicle(central, route_y)?;

    Ok(ts)
}

pub fn bank() -> DomainResult<Bank> {
    let mut bank = Bank::new();

    let alice = bank.create_customer("Alice Johnson");
    let bob = bank.create_customer("Bob Smith");
    let charlie = bank.create_customer("Charlie Brown");

    let alice_checking = bank.open_checking("Alice Johnson", 1000.0)?;
    let alice_savings = bank.open_savings(
        "Alice Johnson",
        5000.0,
        SavingsTerms {
            annual_rate: 0.025,
            withdrawal_limit: 500.0,
        },
    )?;
    let bob_checking = bank.open_checking("Bob Smith", 750.0)?;
    let charlie_savings = bank.open_savings(
        "Charlie Brown",
        3000.0,
        SavingsTerms {
            annual_rate: 0.03,
            withdrawal_limit: 300.0,
        },
    )?;

    bank.assign_account(alice, alice_checking)?;
    bank.assign_account(alice, alice_savings)?;
    bank.assign_account(bob, bob_checking)?;
    bank.assign_account(charlie, charlie_savings)?;

    bank.deposit(alice_checking, 200.0)?;
    bank.withdraw(alice_checking, 150.0)?;
    bank.deposit(alice_savings, 1000.0)?;
    bank.transfer(alice_checking, bob_checking, 100.0)?;

    Ok(bank)
}
