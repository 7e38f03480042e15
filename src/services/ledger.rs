use crate::models::{Appointment, Hours, LedgerStats, NewAppointment, Patient, ALLOWED_DURATIONS};
use crate::services::ids::IdGenerator;

const MAX_ID_ATTEMPTS: usize = 16;

/// Upper bound on a single patient's budget.
pub const MAX_TOTAL_HOURS: Hours = Hours::from_minutes(1_000_000 * 60);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("insufficient hours: {remaining}h remaining, {requested}h requested")]
    InsufficientHours { remaining: Hours, requested: Hours },

    #[error("could not generate a fresh id (last tried {0})")]
    IdCollision(String),
}

/// Which appointment durations the ledger accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationPolicy {
    /// Only the form's fixed choices, see [`ALLOWED_DURATIONS`].
    #[default]
    Discrete,
    AnyPositive,
}

impl DurationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationPolicy::Discrete => "discrete",
            DurationPolicy::AnyPositive => "any_positive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "discrete" => Some(DurationPolicy::Discrete),
            "any_positive" | "any" => Some(DurationPolicy::AnyPositive),
            _ => None,
        }
    }

    fn check(&self, duration: Hours) -> Result<(), LedgerError> {
        if !duration.is_positive() {
            return Err(LedgerError::InvalidInput(format!(
                "duration must be at least one minute, got {duration}h"
            )));
        }
        if *self == DurationPolicy::Discrete && !ALLOWED_DURATIONS.contains(&duration) {
            return Err(LedgerError::InvalidInput(format!(
                "duration {duration}h is not one of 0.5, 1, 1.5, 2, 2.5, 3"
            )));
        }
        Ok(())
    }
}

/// Patient roster and appointment book.
///
/// Every method either applies its whole change or returns an error having
/// changed nothing. After any successful call each patient satisfies
/// `0 <= used_hours <= total_hours`.
pub struct Ledger {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    ids: Box<dyn IdGenerator>,
    duration_policy: DurationPolicy,
}

impl Ledger {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            patients: Vec::new(),
            appointments: Vec::new(),
            ids,
            duration_policy: DurationPolicy::default(),
        }
    }

    pub fn with_duration_policy(mut self, policy: DurationPolicy) -> Self {
        self.duration_policy = policy;
        self
    }

    /// Whether `schedule_appointment` would accept this duration.
    pub fn check_duration(&self, duration: Hours) -> Result<(), LedgerError> {
        self.duration_policy.check(duration)
    }

    // ── Reads ──

    /// Patients in registration order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn remaining_hours(&self, patient: &Patient) -> Hours {
        patient.remaining_hours()
    }

    /// All appointments ordered by start instant; equal instants keep
    /// scheduling order.
    pub fn list_appointments_sorted(&self) -> Vec<Appointment> {
        let mut sorted = self.appointments.clone();
        sorted.sort_by_key(|a| (a.date, a.time));
        sorted
    }

    pub fn aggregate_stats(&self) -> LedgerStats {
        let total_hours_allocated: Hours = self.patients.iter().map(|p| p.total_hours).sum();
        let total_hours_used: Hours = self.patients.iter().map(|p| p.used_hours).sum();
        let total_hours_remaining: Hours =
            self.patients.iter().map(|p| p.remaining_hours()).sum();

        LedgerStats {
            patient_count: self.patients.len(),
            appointment_count: self.appointments.len(),
            total_hours_allocated,
            total_hours_used,
            total_hours_remaining,
        }
    }

    // ── Mutations ──

    pub fn register_patient(
        &mut self,
        name: &str,
        total_hours: Hours,
        phone: &str,
        email: &str,
    ) -> Result<Patient, LedgerError> {
        let name = required("name", name)?;
        let phone = required("phone", phone)?;
        let email = required("email", email)?;
        check_total_hours(total_hours)?;

        let patient = Patient {
            id: self.fresh_patient_id()?,
            name,
            phone,
            email,
            total_hours,
            used_hours: Hours::ZERO,
        };
        self.patients.push(patient.clone());

        tracing::info!(patient_id = %patient.id, total_hours = %total_hours, "patient registered");
        Ok(patient)
    }

    /// Adds a patient record as-is, keeping its id and used hours.
    pub fn import_patient(&mut self, patient: Patient) -> Result<(), LedgerError> {
        required("id", &patient.id)?;
        required("name", &patient.name)?;
        required("phone", &patient.phone)?;
        required("email", &patient.email)?;
        check_total_hours(patient.total_hours)?;
        if patient.used_hours.is_negative() || patient.used_hours > patient.total_hours {
            return Err(LedgerError::InvalidInput(format!(
                "used hours {} outside 0..={}",
                patient.used_hours, patient.total_hours
            )));
        }
        if self.patient(&patient.id).is_some() {
            return Err(LedgerError::InvalidInput(format!(
                "duplicate patient id: {}",
                patient.id
            )));
        }
        self.patients.push(patient);
        Ok(())
    }

    pub fn schedule_appointment(
        &mut self,
        request: NewAppointment,
    ) -> Result<Appointment, LedgerError> {
        let treatment = required("treatment", &request.treatment)?;
        self.duration_policy.check(request.duration)?;

        let index = self
            .patients
            .iter()
            .position(|p| p.id == request.patient_id)
            .ok_or_else(|| LedgerError::PatientNotFound(request.patient_id.clone()))?;

        let remaining = self.patients[index].remaining_hours();
        if (remaining - request.duration).is_negative() {
            tracing::warn!(
                patient_id = %request.patient_id,
                remaining = %remaining,
                requested = %request.duration,
                "appointment rejected: insufficient hours"
            );
            return Err(LedgerError::InsufficientHours {
                remaining,
                requested: request.duration,
            });
        }

        let appointment = Appointment {
            id: self.fresh_appointment_id()?,
            patient_id: request.patient_id,
            patient_name: self.patients[index].name.clone(),
            date: request.date,
            time: request.time,
            duration: request.duration,
            treatment,
        };

        let patient = &mut self.patients[index];
        patient.used_hours = patient.used_hours + appointment.duration;
        self.appointments.push(appointment.clone());

        tracing::info!(
            appointment_id = %appointment.id,
            patient_id = %appointment.patient_id,
            duration = %appointment.duration,
            "appointment scheduled"
        );
        Ok(appointment)
    }

    /// Removes the appointment and refunds its hours. Returns the removed
    /// record.
    pub fn cancel_appointment(&mut self, appointment_id: &str) -> Result<Appointment, LedgerError> {
        let index = self
            .appointments
            .iter()
            .position(|a| a.id == appointment_id)
            .ok_or_else(|| LedgerError::AppointmentNotFound(appointment_id.to_string()))?;

        let appointment = self.appointments.remove(index);

        match self.patients.iter_mut().find(|p| p.id == appointment.patient_id) {
            Some(patient) => {
                patient.used_hours = patient.used_hours.saturating_sub(appointment.duration);
            }
            None => {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    patient_id = %appointment.patient_id,
                    "cancelled appointment references a missing patient, no hours refunded"
                );
            }
        }

        tracing::info!(
            appointment_id = %appointment.id,
            patient_id = %appointment.patient_id,
            refunded = %appointment.duration,
            "appointment cancelled"
        );
        Ok(appointment)
    }

    fn fresh_patient_id(&self) -> Result<String, LedgerError> {
        self.fresh_id(|id| self.patient(id).is_some())
    }

    fn fresh_appointment_id(&self) -> Result<String, LedgerError> {
        self.fresh_id(|id| self.appointment(id).is_some())
    }

    fn fresh_id(&self, taken: impl Fn(&str) -> bool) -> Result<String, LedgerError> {
        let mut last = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            last = self.ids.next_id();
            if !last.is_empty() && !taken(&last) {
                return Ok(last);
            }
        }
        Err(LedgerError::IdCollision(last))
    }
}

fn required(field: &str, value: &str) -> Result<String, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn check_total_hours(total_hours: Hours) -> Result<(), LedgerError> {
    if !total_hours.is_positive() || total_hours > MAX_TOTAL_HOURS {
        return Err(LedgerError::InvalidInput(format!(
            "total hours must be greater than 0 and at most {MAX_TOTAL_HOURS}, got {total_hours}"
        )));
    }
    Ok(())
}
