//! Errors surfaced by the [`Simulator`](crate::Simulator).

use std::error::Error;
use std::fmt;

use gatework_core::{CircuitError, SignalPropagationError};

/// Failure of an element-level simulation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulationError {
    /// The element or port could not be addressed.
    Circuit(CircuitError),
    /// Signal propagation did not settle.
    Propagation(SignalPropagationError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circuit(e) => write!(f, "circuit error: {e}"),
            Self::Propagation(e) => write!(f, "propagation error: {e}"),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Circuit(e) => Some(e),
            Self::Propagation(e) => Some(e),
        }
    }
}

impl From<CircuitError> for SimulationError {
    fn from(e: CircuitError) -> Self {
        Self::Circuit(e)
    }
}

impl From<SignalPropagationError> for SimulationError {
    fn from(e: SignalPropagationError) -> Self {
        Self::Propagation(e)
    }
}
