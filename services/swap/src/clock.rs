//! Wall-clock source for trade deadlines

use chrono::Utc;

/// Source of the current UNIX time in seconds
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> u64;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_unix() > 1_577_836_800);
    }
}
