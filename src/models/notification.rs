use serde::{Deserialize, Serialize};

use super::{Appointment, Patient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PatientAdded,
    AppointmentScheduled,
    AppointmentCancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PatientAdded => "patient_added",
            NotificationKind::AppointmentScheduled => "appointment_scheduled",
            NotificationKind::AppointmentCancelled => "appointment_cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, description: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            created_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn patient_added(patient: &Patient) -> Self {
        Self::new(
            NotificationKind::PatientAdded,
            "Patient Added",
            format!(
                "{} has been added successfully with {} hours.",
                patient.name, patient.total_hours
            ),
        )
    }

    pub fn appointment_scheduled(appointment: &Appointment) -> Self {
        Self::new(
            NotificationKind::AppointmentScheduled,
            "Appointment Scheduled",
            format!(
                "Appointment for {} has been scheduled successfully.",
                appointment.patient_name
            ),
        )
    }

    pub fn appointment_cancelled() -> Self {
        Self::new(
            NotificationKind::AppointmentCancelled,
            "Appointment Cancelled",
            "The appointment has been cancelled and hours have been refunded.".to_string(),
        )
    }
}
