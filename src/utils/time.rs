use chrono::Utc;

/// Milliseconds since the unix epoch, used to stamp sync transitions.
pub fn time_millis() -> i64 {
    Utc::now().timestamp_millis()
}
