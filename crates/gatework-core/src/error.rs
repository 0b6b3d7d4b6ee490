//! Error types for the Gatework circuit simulator.
//!
//! Organized by subsystem: wiring (connection manager), signal
//! propagation, and circuit construction/addressing.

use std::error::Error;
use std::fmt;

use crate::id::{ElementId, PortId};

/// Errors raised by the connection manager.
///
/// All variants are recoverable: the circuit is left untouched when a
/// connection call fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionError {
    /// Both ports have the same direction.
    InvalidPortsPair {
        /// First port passed to the call.
        lhs: PortId,
        /// Second port passed to the call.
        rhs: PortId,
    },
    /// This exact output→input pair is already wired.
    DuplicateConnection {
        /// The input side of the pair.
        input: PortId,
        /// The output side of the pair.
        output: PortId,
    },
    /// The input is already wired to a different output.
    InputAlreadyConnected {
        /// The occupied input.
        input: PortId,
    },
    /// No such output→input wiring is recorded.
    ConnectionNotExist {
        /// The input side of the pair.
        input: PortId,
        /// The output side of the pair.
        output: PortId,
    },
    /// A handle does not belong to the circuit.
    UnknownPort {
        /// The unrecognised port.
        port: PortId,
    },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPortsPair { lhs, rhs } => {
                write!(f, "invalid ports pair: {lhs} and {rhs} have the same direction")
            }
            Self::DuplicateConnection { input, output } => {
                write!(f, "duplicate connection: {output} -> {input}")
            }
            Self::InputAlreadyConnected { input } => {
                write!(f, "input {input} is already connected")
            }
            Self::ConnectionNotExist { input, output } => {
                write!(f, "connection does not exist: {output} -> {input}")
            }
            Self::UnknownPort { port } => write!(f, "unknown port: {port}"),
        }
    }
}

impl Error for ConnectionError {}

/// Errors raised while pushing signals through a circuit.
///
/// Fatal to the propagation call that raised it: ports visited before
/// the abort keep whatever values they had reached. Later calls start
/// with fresh visit counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalPropagationError {
    /// A port exceeded the per-call visit limit.
    InfiniteLoop {
        /// The port whose visit count tripped the limit.
        port: PortId,
        /// The visit count at the moment of the abort.
        visits: u32,
    },
}

impl SignalPropagationError {
    /// The port where the error was detected.
    pub fn port(&self) -> PortId {
        match self {
            Self::InfiniteLoop { port, .. } => *port,
        }
    }
}

impl fmt::Display for SignalPropagationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfiniteLoop { port, visits } => {
                write!(f, "infinite loop detected at {port} after {visits} visits")
            }
        }
    }
}

impl Error for SignalPropagationError {}

/// Errors from element construction and handle addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitError {
    /// The element handle does not belong to the circuit.
    UnknownElement {
        /// The unrecognised element.
        element: ElementId,
    },
    /// The port handle does not belong to the circuit.
    UnknownPort {
        /// The unrecognised port.
        port: PortId,
    },
    /// A gate or bus was requested with zero ports.
    InvalidArity {
        /// Element kind being built.
        kind: &'static str,
        /// The rejected port count.
        count: usize,
    },
    /// A port index is past the end of the element's inputs or outputs.
    PortIndexOutOfRange {
        /// The addressed element.
        element: ElementId,
        /// The rejected index.
        index: usize,
        /// Number of ports in the addressed collection.
        len: usize,
    },
    /// A composite boundary was given an element that is not a bus.
    NotABus {
        /// The offending element.
        element: ElementId,
    },
    /// An atomic-only operation was called on a composite.
    NotAtomic {
        /// The offending element.
        element: ElementId,
    },
    /// A composite-only operation was called on an atomic element.
    NotComposite {
        /// The offending element.
        element: ElementId,
    },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { element } => write!(f, "unknown element: {element}"),
            Self::UnknownPort { port } => write!(f, "unknown port: {port}"),
            Self::InvalidArity { kind, count } => {
                write!(f, "{kind} needs at least one port, got {count}")
            }
            Self::PortIndexOutOfRange {
                element,
                index,
                len,
            } => {
                write!(
                    f,
                    "port index {index} out of range for {element} ({len} ports)"
                )
            }
            Self::NotABus { element } => write!(f, "element {element} is not a bus"),
            Self::NotAtomic { element } => write!(f, "element {element} is a composite"),
            Self::NotComposite { element } => write!(f, "element {element} is not a composite"),
        }
    }
}

impl Error for CircuitError {}
