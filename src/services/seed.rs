use crate::models::{Hours, Patient};
use crate::services::ledger::{Ledger, LedgerError};

/// Sample roster loaded when `SEED_DEMO_DATA` is on.
pub fn demo_patients() -> Vec<Patient> {
    [
        ("1", "Alice Johnson", 15, 3, "(555) 123-4567", "alice.j@email.com"),
        ("2", "Bob Smith", 10, 7, "(555) 987-6543", "bob.smith@email.com"),
        ("3", "Carol Davis", 20, 5, "(555) 456-7890", "carol.davis@email.com"),
    ]
    .into_iter()
    .map(|(id, name, total, used, phone, email)| Patient {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        total_hours: Hours::from_minutes(total * 60),
        used_hours: Hours::from_minutes(used * 60),
    })
    .collect()
}

pub fn seed_demo_patients(ledger: &mut Ledger) -> Result<usize, LedgerError> {
    let patients = demo_patients();
    let count = patients.len();
    for patient in patients {
        ledger.import_patient(patient)?;
    }
    tracing::info!("seeded {count} demo patients");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ids::SequentialIds;

    #[test]
    fn test_seed_demo_patients() {
        let mut ledger = Ledger::new(Box::new(SequentialIds::new("")));
        assert_eq!(seed_demo_patients(&mut ledger).unwrap(), 3);

        let stats = ledger.aggregate_stats();
        assert_eq!(stats.patient_count, 3);
        assert_eq!(stats.total_hours_remaining, Hours::from_minutes(30 * 60));

        // Sequential ids would collide with the seeded "1".."3".
        let dave = ledger
            .register_patient("Dave", Hours::from_minutes(600), "555", "d@e.com")
            .unwrap();
        assert_eq!(dave.id, "4");
    }

    #[test]
    fn test_seed_twice_fails() {
        let mut ledger = Ledger::new(Box::new(SequentialIds::new("")));
        seed_demo_patients(&mut ledger).unwrap();
        assert!(seed_demo_patients(&mut ledger).is_err());
    }
}
