//! Propagation algorithms and the element-level simulator for Gatework.
//!
//! Two worklist algorithms drive the port-level steps that
//! [`gatework_circuit::Circuit`] exposes:
//!
//! - [`SignalPropagator`] pushes changed values downstream until the
//!   circuit settles, aborting on feedback loops that never do.
//! - [`ResetPropagator`] marks an element's interior dirty so the next
//!   signal pass recomputes it from scratch.
//!
//! [`Simulator`] combines them into `init` / `propagate_element` /
//! `drive`, including the composite lifecycle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod reset;
pub mod signal;
pub mod simulator;

pub use config::{ConfigError, PropagatorConfig, TargetOrder};
pub use error::SimulationError;
pub use reset::ResetPropagator;
pub use signal::SignalPropagator;
pub use simulator::Simulator;
