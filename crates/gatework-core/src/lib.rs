//! Core types and traits for the Gatework circuit simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Gatework workspace:
//! element and port handles, the [`Signal`] value trait, the [`Gate`]
//! plugin trait, and the error types shared by every subsystem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::{CircuitError, ConnectionError, SignalPropagationError};
pub use id::{ElementId, PortDirection, PortId};
pub use traits::{Gate, Signal};
