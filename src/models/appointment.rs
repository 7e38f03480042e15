use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Hours;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Durations offered by the scheduling form.
pub const ALLOWED_DURATIONS: [Hours; 6] = [
    Hours::from_minutes(30),
    Hours::from_minutes(60),
    Hours::from_minutes(90),
    Hours::from_minutes(120),
    Hours::from_minutes(150),
    Hours::from_minutes(180),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    /// Patient name at the moment of scheduling; not updated afterwards.
    pub patient_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: Hours,
    pub treatment: String,
}

impl Appointment {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + chrono::Duration::minutes(self.duration.minutes())
    }
}

/// Input to [`crate::services::ledger::Ledger::schedule_appointment`].
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: Hours,
    pub treatment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerStats {
    pub patient_count: usize,
    pub appointment_count: usize,
    pub total_hours_allocated: Hours,
    pub total_hours_used: Hours,
    pub total_hours_remaining: Hours,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_at_adds_duration() {
        let appt = Appointment {
            id: "a-1".to_string(),
            patient_id: "p-1".to_string(),
            patient_name: "Alice Johnson".to_string(),
            date: NaiveDate::parse_from_str("2025-06-16", DATE_FORMAT).unwrap(),
            time: NaiveTime::parse_from_str("16:30", TIME_FORMAT).unwrap(),
            duration: Hours::from_minutes(90),
            treatment: "Root Canal".to_string(),
        };
        assert_eq!(appt.ends_at().format("%Y-%m-%d %H:%M").to_string(), "2025-06-16 18:00");
    }
}
