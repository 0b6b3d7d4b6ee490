//! Test utilities and fixture circuits for Gatework development.
//!
//! Provides truth-table input generators, small plugin gates
//! ([`XorGate`], [`ConstGate`]) and prewired circuits such as the
//! [`RingOscillator`] used to exercise loop detection.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstGate, InverterChain, RingOscillator, XorGate};

use gatework_circuit::{Circuit, ConnectionManager};
use gatework_core::{ElementId, PortId};

/// Every boolean input vector of length `len`, counting up in binary with
/// bit 0 in position 0.
///
/// ```
/// let rows = gatework_test_utils::bool_vectors(2);
/// assert_eq!(rows, vec![
///     vec![false, false],
///     vec![true, false],
///     vec![false, true],
///     vec![true, true],
/// ]);
/// ```
pub fn bool_vectors(len: usize) -> Vec<Vec<bool>> {
    (0..1u64 << len)
        .map(|bits| (0..len).map(|i| bits & (1 << i) != 0).collect())
        .collect()
}

/// Wire `from`'s output `from_index` to `to`'s input `to_index`.
///
/// Panics on any addressing or wiring error; fixtures are expected to be
/// well formed.
pub fn link(
    circuit: &mut Circuit<bool>,
    wires: &mut ConnectionManager<bool>,
    (from, from_index): (ElementId, usize),
    (to, to_index): (ElementId, usize),
) {
    let out = circuit.output(from, from_index).unwrap();
    let inp = circuit.input(to, to_index).unwrap();
    wires.connect(circuit, out, inp).unwrap();
}

/// Current values of `element`'s outputs.
pub fn output_values(circuit: &Circuit<bool>, element: ElementId) -> Vec<bool> {
    circuit
        .element(element)
        .unwrap()
        .outputs()
        .iter()
        .map(|&p| *circuit.value(p).unwrap())
        .collect()
}

/// Ports that are still dirty after a pass, for diagnostics in asserts.
pub fn dirty_ports(circuit: &Circuit<bool>) -> Vec<PortId> {
    circuit
        .ports()
        .filter(|(_, p)| p.is_dirty())
        .map(|(id, _)| id)
        .collect()
}
