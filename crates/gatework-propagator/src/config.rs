//! Propagator configuration parameters.

use std::error::Error;
use std::fmt;

/// How a worklist with several pending ports is ordered before it is split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetOrder {
    /// Shuffle with the seeded RNG before every split.
    ///
    /// Needed for symmetric feedback circuits (cross-wired latches) to
    /// settle instead of oscillating in lockstep.
    #[default]
    Shuffled,
    /// Keep discovery order. Fully deterministic but can livelock
    /// symmetric feedback circuits.
    Sequential,
}

/// Configuration for a [`SignalPropagator`](crate::SignalPropagator).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagatorConfig {
    /// Maximum number of dirty visits any single port may receive within
    /// one `propagate` call before it is declared an infinite loop.
    ///
    /// Default: 100. Must be at least 1.
    pub visit_limit: u32,

    /// Seed for the worklist shuffle.
    ///
    /// Default: 0. Two propagators with the same seed make the same
    /// choices for the same sequence of calls.
    pub seed: u64,

    /// Worklist ordering. Default: [`TargetOrder::Shuffled`].
    pub order: TargetOrder,
}

impl PropagatorConfig {
    /// Default per-port visit limit.
    pub const DEFAULT_VISIT_LIMIT: u32 = 100;

    /// Default shuffle seed.
    pub const DEFAULT_SEED: u64 = 0;

    /// Default config with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Check the config for values the propagator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visit_limit == 0 {
            return Err(ConfigError::ZeroVisitLimit);
        }
        Ok(())
    }
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            visit_limit: Self::DEFAULT_VISIT_LIMIT,
            seed: Self::DEFAULT_SEED,
            order: TargetOrder::default(),
        }
    }
}

/// Invalid [`PropagatorConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `visit_limit` is zero, so no port could ever be visited.
    ZeroVisitLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroVisitLimit => write!(f, "visit_limit must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
