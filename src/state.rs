use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::models::Notification;
use crate::services::ledger::Ledger;

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub config: AppConfig,
    pub events_tx: broadcast::Sender<Notification>,
}

impl AppState {
    pub fn new(ledger: Ledger, config: AppConfig) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            ledger: Mutex::new(ledger),
            config,
            events_tx,
        }
    }

    /// Locks the ledger, recovering from poisoning. Ledger calls never leave
    /// partial state behind.
    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
