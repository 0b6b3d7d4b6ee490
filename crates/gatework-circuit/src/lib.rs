//! Arena storage for circuit ports and elements.
//!
//! Ports and elements reference each other cyclically (an input knows its
//! owner, the owner knows its outputs, an output knows the inputs it feeds).
//! Instead of shared pointers, everything lives in one [`Circuit`] arena and
//! every cross-reference is a `PortId` or `ElementId` handle.
//!
//! # Architecture
//!
//! ```text
//! Circuit<V>
//! ├── Vec<Port<V>>      (value, dirty flag, owner, index, output targets)
//! └── Vec<Element<V>>   (kind + input/output PortId lists)
//!     ├── atomic: And, Or, Not, Bus, Custom(Box<dyn Gate<V>>)
//!     └── Composite { input_bus, output_bus, initialized }
//!
//! ConnectionManager<V>  (input → output map, one source per input)
//! ```
//!
//! Port-level propagation ([`Circuit::propagate_port`]) lives here; the
//! worklist algorithms that drive it live in `gatework-propagator`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod circuit;
pub mod connection;
pub mod element;
pub mod port;

pub use circuit::Circuit;
pub use connection::ConnectionManager;
pub use element::{CompositeElement, Element, ElementKind};
pub use port::{Port, PortList};
