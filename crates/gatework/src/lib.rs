//! Gatework: a discrete digital-logic circuit simulator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Gatework sub-crates. For most users, adding `gatework` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gatework::prelude::*;
//!
//! let mut circuit = Circuit::<bool>::new();
//! let mut wires = ConnectionManager::new();
//! let latch = CompositeFactory::new(&mut circuit, &mut wires)
//!     .rs_trigger_nor()
//!     .unwrap();
//!
//! let mut sim = Simulator::default();
//! sim.init(&mut circuit, latch).unwrap();
//!
//! // Set, then release: the latch holds Q = true.
//! sim.drive(&mut circuit, latch, 1, true).unwrap();
//! sim.drive(&mut circuit, latch, 1, false).unwrap();
//!
//! let q = circuit.output(latch, 0).unwrap();
//! let q_bar = circuit.output(latch, 1).unwrap();
//! assert_eq!(circuit.value(q), Some(&true));
//! assert_eq!(circuit.value(q_bar), Some(&false));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gatework-core` | Handles, the `Signal` and `Gate` traits, error enums |
//! | [`circuit`] | `gatework-circuit` | Port and element arena, connection manager |
//! | [`propagator`] | `gatework-propagator` | Signal and reset propagators, simulator |
//! | [`elements`] | `gatework-elements` | Composite factory (NOR, NAND, XOR, RS trigger) |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Handles, value and plugin traits, and errors (`gatework-core`).
pub use gatework_core as types;

/// Port and element arena plus wiring (`gatework-circuit`).
///
/// [`circuit::Circuit`] owns every port and element;
/// [`circuit::ConnectionManager`] enforces one source per input.
pub use gatework_circuit as circuit;

/// Propagation algorithms and the element-level driver (`gatework-propagator`).
///
/// Most callers only need [`propagator::Simulator`].
pub use gatework_propagator as propagator;

/// Ready-made composites (`gatework-elements`).
pub use gatework_elements as elements;

/// Common imports for typical Gatework usage.
///
/// ```rust
/// use gatework::prelude::*;
/// ```
pub mod prelude {
    // Handles and traits
    pub use gatework_core::{ElementId, Gate, PortDirection, PortId, Signal};

    // Errors
    pub use gatework_core::{CircuitError, ConnectionError, SignalPropagationError};
    pub use gatework_elements::BuildError;
    pub use gatework_propagator::{ConfigError, SimulationError};

    // Circuit
    pub use gatework_circuit::{Circuit, ConnectionManager, ElementKind};

    // Propagation
    pub use gatework_propagator::{PropagatorConfig, Simulator, TargetOrder};

    // Composites
    pub use gatework_elements::CompositeFactory;
}
