use chrono::Utc;

/// Unix seconds, clamped at zero.
pub fn now_u64() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Seconds left until `epoch_secs`, zero once it has passed.
pub fn seconds_until(epoch_secs: u64) -> u64 {
    epoch_secs.saturating_sub(now_u64())
}
