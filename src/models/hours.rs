use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A quantity of treatment time.
///
/// Stored as whole minutes, so adding and then subtracting the same value is
/// exact. On the wire it is a plain number of hours (`1.5`, `10`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hours(i64);

impl Hours {
    pub const ZERO: Hours = Hours(0);

    pub const fn from_minutes(minutes: i64) -> Self {
        Hours(minutes)
    }

    /// Converts a number of hours, rounding to the nearest minute.
    pub fn from_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() {
            return None;
        }
        let minutes = (hours * 60.0).round();
        if minutes.abs() > i64::MAX as f64 / 2.0 {
            return None;
        }
        Some(Hours(minutes as i64))
    }

    /// Like [`Hours::from_hours`], but `None` unless the value is a whole
    /// number of minutes.
    pub fn from_hours_exact(hours: f64) -> Option<Self> {
        let minutes = hours * 60.0;
        if (minutes - minutes.round()).abs() > 1e-6 {
            return None;
        }
        Hours::from_hours(hours)
    }

    pub fn minutes(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 60.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Subtracts, flooring the result at zero.
    pub fn saturating_sub(self, rhs: Hours) -> Hours {
        Hours(self.0.saturating_sub(rhs.0).max(0))
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Hours {
    type Output = Hours;

    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Self {
        iter.fold(Hours::ZERO, Add::add)
    }
}

impl TryFrom<f64> for Hours {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Hours::from_hours(value).ok_or_else(|| format!("invalid hour value: {value}"))
    }
}

impl From<Hours> for f64 {
    fn from(value: Hours) -> f64 {
        value.as_f64()
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}
