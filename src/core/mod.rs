pub mod battery;
pub mod call;
pub mod camera;
pub mod chat;
pub mod config;
pub mod memory;
pub mod messages;
pub mod network;
pub mod recorder;
pub mod rng;
pub mod state;

#[inline]
pub(crate) fn now_ms() -> u64 {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_e| {
            tracing::warn!(target: "movil::state", "System clock error (using fallback)");
            Duration::from_secs(0)
        })
        .as_millis() as u64
}
