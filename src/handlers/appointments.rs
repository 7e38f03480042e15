use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::appointment::{DATE_FORMAT, TIME_FORMAT};
use crate::models::{Appointment, Hours, NewAppointment, Notification};
use crate::services::notifications;
use crate::state::AppState;

use super::patients::PatientResponse;

#[derive(Serialize)]
pub struct AppointmentResponse {
    id: String,
    patient_id: String,
    patient_name: String,
    date: String,
    time: String,
    duration: Hours,
    treatment: String,
    calendar_url: String,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(a: &Appointment) -> Self {
        Self {
            id: a.id.clone(),
            patient_id: a.patient_id.clone(),
            patient_name: a.patient_name.clone(),
            date: a.date.format(DATE_FORMAT).to_string(),
            time: a.time.format(TIME_FORMAT).to_string(),
            duration: a.duration,
            treatment: a.treatment.clone(),
            calendar_url: format!("/calendar/{}.ics", a.id),
        }
    }
}

/// Result of a mutation: the affected appointment plus the patient's new
/// balance, so the page can re-render without another round trip.
#[derive(Serialize)]
pub struct AppointmentChange {
    appointment: AppointmentResponse,
    patient: Option<PatientResponse>,
}

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<AppointmentResponse>> {
    let sorted = state.ledger().list_appointments_sorted();
    Json(sorted.iter().map(AppointmentResponse::from).collect())
}

// POST /api/appointments
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppointmentForm {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub duration: f64,
    pub treatment: String,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self {
            patient_id: String::new(),
            date: String::new(),
            time: String::new(),
            duration: 1.0,
            treatment: String::new(),
        }
    }
}

impl AppointmentForm {
    /// Required-field checks and parsing done before the ledger sees the form.
    pub fn validate(&self) -> Result<NewAppointment, AppError> {
        let mut missing = Vec::new();
        if self.patient_id.trim().is_empty() {
            missing.push("patient_id");
        }
        if self.date.trim().is_empty() {
            missing.push("date");
        }
        if self.time.trim().is_empty() {
            missing.push("time");
        }
        if self.treatment.trim().is_empty() {
            missing.push("treatment");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| AppError::Validation(format!("invalid date: {}", self.date)))?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT)
            .map_err(|_| AppError::Validation(format!("invalid time: {}", self.time)))?;
        let duration = Hours::from_hours_exact(self.duration).ok_or_else(|| {
            AppError::Validation(format!(
                "duration must be a whole number of minutes, got {}",
                self.duration
            ))
        })?;

        Ok(NewAppointment {
            patient_id: self.patient_id.trim().to_string(),
            date,
            time,
            duration,
            treatment: self.treatment.clone(),
        })
    }
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AppointmentForm>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentChange>), AppError> {
    let Json(form) = payload?;
    let request = form.validate()?;

    let (appointment, patient) = {
        let mut ledger = state.ledger();
        let appointment = ledger.schedule_appointment(request)?;
        let patient = ledger
            .patient(&appointment.patient_id)
            .map(PatientResponse::from);
        (appointment, patient)
    };

    notifications::publish(&state, Notification::appointment_scheduled(&appointment));
    Ok((
        StatusCode::CREATED,
        Json(AppointmentChange {
            appointment: AppointmentResponse::from(&appointment),
            patient,
        }),
    ))
}

// POST /api/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentChange>, AppError> {
    let (appointment, patient) = {
        let mut ledger = state.ledger();
        let appointment = ledger.cancel_appointment(&id)?;
        let patient = ledger
            .patient(&appointment.patient_id)
            .map(PatientResponse::from);
        (appointment, patient)
    };

    notifications::publish(&state, Notification::appointment_cancelled());
    Ok(Json(AppointmentChange {
        appointment: AppointmentResponse::from(&appointment),
        patient,
    }))
}
