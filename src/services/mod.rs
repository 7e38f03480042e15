pub mod calendar;
pub mod ids;
pub mod ledger;
pub mod notifications;
pub mod seed;
