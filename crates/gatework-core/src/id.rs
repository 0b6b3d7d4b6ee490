//! Strongly-typed handles for circuit elements and ports.
//!
//! Handles are plain sequential indices assigned by the owning circuit
//! arena. There is no process-wide counter: each circuit is its own ID
//! scope, so two circuits built the same way hand out identical handles.

use std::fmt;

/// Identifies an element (gate, bus or composite) within a circuit.
///
/// `ElementId(n)` is the n-th element added to the circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl ElementId {
    /// The arena slot this handle refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a single port within a circuit.
///
/// Ports are allocated when their owning element is created, inputs
/// first, then outputs. `PortId(n)` is the n-th port in the circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub u32);

impl PortId {
    /// The arena slot this handle refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl From<u32> for PortId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Direction of a port, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Receives a value from at most one connected output.
    Input,
    /// Broadcasts its value to every connected input.
    Output,
}

impl PortDirection {
    /// Returns `true` for [`PortDirection::Input`].
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    /// Returns `true` for [`PortDirection::Output`].
    pub fn is_output(self) -> bool {
        matches!(self, Self::Output)
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}
