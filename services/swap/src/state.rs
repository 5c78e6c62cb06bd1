//! Linear swap state machine

use std::fmt;

use floorswap_types::Direction;

/// Stage reached by a swap run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapState {
    Start,
    PoolLocated,
    ReservesRead,
    Quoted,
    UnitsSelected,
    /// Sell only
    Approved,
    /// Sell only
    AttestationsResolved,
    Submitted,
    Terminal,
}

impl SwapState {
    /// The single successor of `self` on the given path
    ///
    /// Buys skip the approval and attestation stages. `Terminal` has no successor.
    pub fn next(self, direction: Direction) -> Option<Self> {
        let next = match (self, direction) {
            (Self::Start, _) => Self::PoolLocated,
            (Self::PoolLocated, _) => Self::ReservesRead,
            (Self::ReservesRead, _) => Self::Quoted,
            (Self::Quoted, _) => Self::UnitsSelected,
            (Self::UnitsSelected, Direction::Buy) => Self::Submitted,
            (Self::UnitsSelected, Direction::Sell) => Self::Approved,
            (Self::Approved, _) => Self::AttestationsResolved,
            (Self::AttestationsResolved, _) => Self::Submitted,
            (Self::Submitted, _) => Self::Terminal,
            (Self::Terminal, _) => return None,
        };
        Some(next)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PoolLocated => "pool_located",
            Self::ReservesRead => "reserves_read",
            Self::Quoted => "quoted",
            Self::UnitsSelected => "units_selected",
            Self::Approved => "approved",
            Self::AttestationsResolved => "attestations_resolved",
            Self::Submitted => "submitted",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for SwapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered record of the states one run has visited
///
/// Only forward moves along the direction's path are possible, so a trail is
/// always a prefix of that path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTrail {
    direction: Direction,
    visited: Vec<SwapState>,
}

impl StateTrail {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            visited: vec![SwapState::Start],
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current(&self) -> SwapState {
        self.visited
            .last()
            .copied()
            .unwrap_or(SwapState::Start)
    }

    /// Move to the next state and return it; stays put once terminal
    pub fn advance(&mut self) -> SwapState {
        if let Some(next) = self.current().next(self.direction) {
            self.visited.push(next);
        }
        self.current()
    }

    pub fn visited(&self) -> &[SwapState] {
        &self.visited
    }

    pub fn contains(&self, state: SwapState) -> bool {
        self.visited.contains(&state)
    }

    pub fn into_states(self) -> Vec<SwapState> {
        self.visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(direction: Direction) -> Vec<SwapState> {
        let mut trail = StateTrail::new(direction);
        while trail.current() != SwapState::Terminal {
            trail.advance();
        }
        trail.into_states()
    }

    #[test]
    fn test_buy_path_skips_sell_stages() {
        assert_eq!(
            run_to_end(Direction::Buy),
            vec![
                SwapState::Start,
                SwapState::PoolLocated,
                SwapState::ReservesRead,
                SwapState::Quoted,
                SwapState::UnitsSelected,
                SwapState::Submitted,
                SwapState::Terminal,
            ]
        );
    }

    #[test]
    fn test_sell_path_approves_before_attestations() {
        assert_eq!(
            run_to_end(Direction::Sell),
            vec![
                SwapState::Start,
                SwapState::PoolLocated,
                SwapState::ReservesRead,
                SwapState::Quoted,
                SwapState::UnitsSelected,
                SwapState::Approved,
                SwapState::AttestationsResolved,
                SwapState::Submitted,
                SwapState::Terminal,
            ]
        );
    }

    #[test]
    fn test_terminal_is_absorbing() {
        let mut trail = StateTrail::new(Direction::Buy);
        for _ in 0..20 {
            trail.advance();
        }
        assert_eq!(trail.current(), SwapState::Terminal);
        assert_eq!(trail.visited().len(), 7);
    }
}
