use std::time::Duration;

use crate::config::parse_var;
use crate::error::AppError;

/// Timing knobs for the room flow service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// A move guard older than this is considered stale and may be taken over.
    pub move_cooldown: Duration,
    /// How many times `join_room` looks for the room document.
    pub seat_retry_attempts: u32,
    pub seat_retry_delay: Duration,
    /// Lifetime of a room from creation.
    pub room_ttl: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            move_cooldown: Duration::from_millis(1500),
            seat_retry_attempts: 3,
            seat_retry_delay: Duration::from_millis(200),
            room_ttl: Duration::from_secs(6 * 60 * 60),
        }
    }
}

impl FlowConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let mut cfg = Self::default();
        if let Some(ms) = parse_var::<u64>("RACE_MOVE_COOLDOWN_MS")? {
            cfg.move_cooldown = Duration::from_millis(ms);
        }
        if let Some(n) = parse_var::<u32>("RACE_SEAT_RETRY_ATTEMPTS")? {
            cfg.seat_retry_attempts = n.max(1);
        }
        if let Some(ms) = parse_var::<u64>("RACE_SEAT_RETRY_DELAY_MS")? {
            cfg.seat_retry_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>("RACE_ROOM_TTL_SECS")? {
            cfg.room_ttl = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    /// Room TTL as a `time` duration for timestamp arithmetic.
    pub fn room_ttl_time(&self) -> time::Duration {
        time::Duration::try_from(self.room_ttl).unwrap_or(time::Duration::MAX)
    }
}
