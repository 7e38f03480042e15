pub mod app;
pub mod appointments;
pub mod calendar;
pub mod events;
pub mod health;
pub mod patients;
pub mod stats;
