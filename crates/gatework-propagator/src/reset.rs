//! Downstream dirty marking used before a composite's first settle.

use gatework_circuit::Circuit;
use gatework_core::{CircuitError, ElementId, PortId, Signal};
use indexmap::IndexSet;

/// Marks every port between an element's inputs and its outputs dirty.
///
/// The walk starts at the element's inputs and follows
/// [`Circuit::targets`] breadth-first. It stops at the element's own
/// outputs, so nothing outside the element is touched. For a composite
/// this forces every internal gate to recompute on the next signal pass,
/// even where a value happens to already match.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResetPropagator;

impl ResetPropagator {
    /// Create a reset propagator.
    pub fn new() -> Self {
        Self
    }

    /// Mark everything reachable from `element`'s inputs, up to and
    /// including its outputs, dirty. Returns the number of ports marked.
    pub fn propagate<V: Signal>(
        &self,
        circuit: &mut Circuit<V>,
        element: ElementId,
    ) -> Result<usize, CircuitError> {
        let target = circuit
            .element(element)
            .ok_or(CircuitError::UnknownElement { element })?;
        let stop: IndexSet<PortId> = target.outputs().iter().copied().collect();
        let mut targets: Vec<PortId> = target.inputs().to_vec();
        let mut visited: IndexSet<PortId> = IndexSet::new();

        while !targets.is_empty() {
            let mut next = Vec::new();
            for port in targets {
                if !visited.insert(port) {
                    continue;
                }
                circuit.make_dirty(port)?;
                if stop.contains(&port) {
                    continue;
                }
                next.extend(circuit.targets(port));
            }
            targets = next;
        }

        tracing::trace!(%element, marked = visited.len(), "reset propagation done");
        Ok(visited.len())
    }
}
