//! Standardized emoji logging for swap runs
//!
//! Each state transition logs at `info` with a fixed emoji so a run can be
//! followed at a glance; details go to `debug`.

/// Standard emoji set for swap logging
pub struct LogEmoji;

impl LogEmoji {
    // Status indicators
    pub const SUCCESS: &'static str = "✅";
    pub const ERROR: &'static str = "❌";
    pub const WARNING: &'static str = "⚠️";

    // Stages
    pub const SEARCH: &'static str = "🔍"; // Pool lookup
    pub const CHART: &'static str = "📊"; // Reserves and holdings
    pub const MONEY: &'static str = "💰"; // Quotes
    pub const UNITS: &'static str = "🖼️"; // Unit selection
    pub const APPROVAL: &'static str = "🔓"; // Operator approval
    pub const ORACLE: &'static str = "🔏"; // Attestations
    pub const SWAP: &'static str = "🔄"; // Submission
    pub const CLOCK: &'static str = "⏱️"; // Deadlines and confirmation waits
}

#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::SUCCESS, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!("{} {}", $crate::logging::LogEmoji::ERROR, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        tracing::warn!("{} {}", $crate::logging::LogEmoji::WARNING, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_search {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::SEARCH, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_reserves {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::CHART, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_quote {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::MONEY, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_units {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::UNITS, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_approval {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::APPROVAL, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_oracle {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::ORACLE, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_swap {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::SWAP, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_timing {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::CLOCK, format!($($arg)*))
    };
}
