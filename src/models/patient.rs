use serde::{Deserialize, Serialize};

use super::Hours;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_hours: Hours,
    pub used_hours: Hours,
}

impl Patient {
    pub fn remaining_hours(&self) -> Hours {
        self.total_hours - self.used_hours
    }

    /// Share of the allotment already consumed, 0-100.
    pub fn usage_percent(&self) -> f64 {
        if !self.total_hours.is_positive() {
            return 0.0;
        }
        self.used_hours.minutes() as f64 * 100.0 / self.total_hours.minutes() as f64
    }

    pub fn can_schedule(&self) -> bool {
        self.remaining_hours().is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(total: i64, used: i64) -> Patient {
        Patient {
            id: "p-1".to_string(),
            name: "Bob Smith".to_string(),
            phone: "(555) 987-6543".to_string(),
            email: "bob.smith@email.com".to_string(),
            total_hours: Hours::from_minutes(total * 60),
            used_hours: Hours::from_minutes(used * 60),
        }
    }

    #[test]
    fn test_remaining_hours() {
        assert_eq!(patient(10, 7).remaining_hours(), Hours::from_minutes(180));
    }

    #[test]
    fn test_usage_percent() {
        assert_eq!(patient(10, 7).usage_percent(), 70.0);
        assert_eq!(patient(20, 0).usage_percent(), 0.0);
    }

    #[test]
    fn test_cannot_schedule_when_exhausted() {
        assert!(patient(10, 9).can_schedule());
        assert!(!patient(10, 10).can_schedule());
    }
}
