use crate::models::Notification;
use crate::state::AppState;

pub fn publish(state: &AppState, notification: Notification) {
    tracing::debug!(kind = notification.kind.as_str(), "publishing notification");
    // Broadcast to SSE subscribers; ignore if no receivers
    let _ = state.events_tx.send(notification);
}
