pub mod appointment;
pub mod hours;
pub mod notification;
pub mod patient;

pub use appointment::{Appointment, LedgerStats, NewAppointment, ALLOWED_DURATIONS};
pub use hours::Hours;
pub use notification::{Notification, NotificationKind};
pub use patient::Patient;
