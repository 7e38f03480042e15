use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Hours, Notification, Patient};
use crate::services::ledger::LedgerError;
use crate::services::notifications;
use crate::state::AppState;

const MIN_TOTAL_HOURS: f64 = 1.0;
const MAX_TOTAL_HOURS: f64 = 100.0;

#[derive(Serialize)]
pub struct PatientResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub total_hours: Hours,
    pub used_hours: Hours,
    pub remaining_hours: Hours,
    pub usage_percent: f64,
    pub can_schedule: bool,
}

impl From<&Patient> for PatientResponse {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            total_hours: p.total_hours,
            used_hours: p.used_hours,
            remaining_hours: p.remaining_hours(),
            usage_percent: p.usage_percent(),
            can_schedule: p.can_schedule(),
        }
    }
}

// GET /api/patients
pub async fn list_patients(State(state): State<Arc<AppState>>) -> Json<Vec<PatientResponse>> {
    let ledger = state.ledger();
    Json(ledger.patients().iter().map(PatientResponse::from).collect())
}

// POST /api/patients
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PatientForm {
    pub name: String,
    pub total_hours: Option<f64>,
    pub phone: String,
    pub email: String,
}

impl PatientForm {
    /// Required-field checks done before the ledger sees the form.
    pub fn validate(&self) -> Result<Hours, AppError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.total_hours.is_none() {
            missing.push("total_hours");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let total = self.total_hours.unwrap_or_default();
        if !(MIN_TOTAL_HOURS..=MAX_TOTAL_HOURS).contains(&total) {
            return Err(AppError::Validation(format!(
                "total_hours must be between {MIN_TOTAL_HOURS} and {MAX_TOTAL_HOURS}"
            )));
        }
        Hours::from_hours(total)
            .ok_or_else(|| AppError::Validation(format!("invalid total_hours: {total}")))
    }
}

pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PatientForm>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientResponse>), AppError> {
    let Json(form) = payload?;
    let total_hours = form.validate()?;

    let patient = {
        let mut ledger = state.ledger();
        ledger.register_patient(&form.name, total_hours, &form.phone, &form.email)?
    };

    notifications::publish(&state, Notification::patient_added(&patient));
    Ok((StatusCode::CREATED, Json(PatientResponse::from(&patient))))
}

// GET /api/patients/:id/preview?duration=1.5
#[derive(Deserialize)]
pub struct PreviewQuery {
    pub duration: Option<f64>,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub patient_id: String,
    pub remaining_hours: Hours,
    pub duration: Hours,
    pub after_appointment: Hours,
    pub can_schedule: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub async fn preview_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<PreviewResponse>, AppError> {
    let raw = query.duration.unwrap_or(1.0);
    let duration = Hours::from_hours_exact(raw).ok_or_else(|| {
        AppError::Validation(format!("duration must be a whole number of minutes, got {raw}"))
    })?;

    let (remaining, rejected) = {
        let ledger = state.ledger();
        let patient = ledger
            .patient(&id)
            .ok_or_else(|| LedgerError::PatientNotFound(id.clone()))?;
        (ledger.remaining_hours(patient), ledger.check_duration(duration).err())
    };

    let after_appointment = remaining - duration;
    Ok(Json(PreviewResponse {
        patient_id: id,
        remaining_hours: remaining,
        duration,
        after_appointment,
        can_schedule: rejected.is_none() && !after_appointment.is_negative(),
        reason: rejected.map(|e| e.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, total: Option<f64>, phone: &str, email: &str) -> PatientForm {
        PatientForm {
            name: name.to_string(),
            total_hours: total,
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let hours = form("Alice", Some(15.0), "555", "a@b.com").validate().unwrap();
        assert_eq!(hours, Hours::from_minutes(900));
    }

    #[test]
    fn test_missing_fields_listed() {
        let err = form("", None, "555", " ").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: missing required fields: name, total_hours, email"
        );
    }

    #[test]
    fn test_total_hours_range() {
        assert!(form("Alice", Some(0.0), "555", "a@b.com").validate().is_err());
        assert!(form("Alice", Some(100.5), "555", "a@b.com").validate().is_err());
        assert!(form("Alice", Some(f64::NAN), "555", "a@b.com").validate().is_err());
        assert!(form("Alice", Some(100.0), "555", "a@b.com").validate().is_ok());
    }
}
