//! Errors raised while assembling composite elements.

use std::error::Error;
use std::fmt;

use gatework_core::{CircuitError, ConnectionError};

/// Failure to build a composite.
///
/// The circuit may hold partially built, unwired elements afterwards;
/// they are unreachable from any composite and never propagated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// An element could not be created or addressed.
    Circuit(CircuitError),
    /// Two ports could not be wired.
    Connection(ConnectionError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circuit(e) => write!(f, "build failed: {e}"),
            Self::Connection(e) => write!(f, "wiring failed: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Circuit(e) => Some(e),
            Self::Connection(e) => Some(e),
        }
    }
}

impl From<CircuitError> for BuildError {
    fn from(e: CircuitError) -> Self {
        Self::Circuit(e)
    }
}

impl From<ConnectionError> for BuildError {
    fn from(e: ConnectionError) -> Self {
        Self::Connection(e)
    }
}
