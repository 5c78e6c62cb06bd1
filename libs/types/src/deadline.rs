//! Absolute trade deadlines

use std::fmt;

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// UNIX timestamp (seconds) after which the pool refuses the swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(u64);

impl Deadline {
    pub fn at(unix_secs: u64) -> Self {
        Self(unix_secs)
    }

    /// Deadline `window_secs` after `now_secs`
    pub fn after(now_secs: u64, window_secs: u64) -> Self {
        Self(now_secs.saturating_add(window_secs))
    }

    pub fn unix_secs(&self) -> u64 {
        self.0
    }

    pub fn as_u256(&self) -> U256 {
        U256::from(self.0)
    }

    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        now_secs > self.0
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_window() {
        let deadline = Deadline::after(1_700_000_000, 3600);
        assert_eq!(deadline.unix_secs(), 1_700_003_600);
        assert!(!deadline.is_expired_at(1_700_003_600));
        assert!(deadline.is_expired_at(1_700_003_601));
        assert_eq!(Deadline::after(u64::MAX, 1).unix_secs(), u64::MAX);
    }
}
