//! Element-level driver: `init`, `propagate` and `drive`.

use gatework_circuit::{Circuit, PortList};
use gatework_core::{CircuitError, ElementId, PortId, Signal, SignalPropagationError};
use indexmap::IndexSet;
use smallvec::smallvec;

use crate::config::{ConfigError, PropagatorConfig};
use crate::error::SimulationError;
use crate::reset::ResetPropagator;
use crate::signal::SignalPropagator;

/// Runs elements the way a caller-driven simulation loop needs them.
///
/// Atomic elements are evaluated in place. Composites follow a one-way
/// lifecycle: the first `init` or `propagate_element` call resets their
/// interior and settles it from every input; later calls only propagate
/// from the inputs that changed.
///
/// # Examples
///
/// ```
/// use gatework_circuit::{Circuit, ConnectionManager};
/// use gatework_propagator::Simulator;
///
/// // in_bus(1) → NOT → out_bus(1), wrapped as an inverter composite.
/// let mut circuit = Circuit::<bool>::new();
/// let mut wires = ConnectionManager::new();
/// let in_bus = circuit.add_bus(1).unwrap();
/// let not = circuit.add_not();
/// let out_bus = circuit.add_bus(1).unwrap();
/// for (from, to) in [(in_bus, not), (not, out_bus)] {
///     let (out, inp) = (circuit.output(from, 0).unwrap(), circuit.input(to, 0).unwrap());
///     wires.connect(&mut circuit, out, inp).unwrap();
/// }
/// let inverter = circuit.add_composite(in_bus, out_bus).unwrap();
///
/// let mut sim = Simulator::default();
/// sim.init(&mut circuit, inverter).unwrap();
/// let out = circuit.output(inverter, 0).unwrap();
/// assert_eq!(circuit.value(out), Some(&true));
///
/// sim.drive(&mut circuit, inverter, 0, true).unwrap();
/// assert_eq!(circuit.value(out), Some(&false));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    signal: SignalPropagator,
    reset: ResetPropagator,
}

impl Simulator {
    /// Create a simulator whose signal propagator uses `config`.
    pub fn new(config: PropagatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            signal: SignalPropagator::new(config)?,
            reset: ResetPropagator::new(),
        })
    }

    /// The signal propagator's configuration.
    pub fn config(&self) -> &PropagatorConfig {
        self.signal.config()
    }

    /// Run a signal propagation pass from `targets`.
    pub fn propagate<V: Signal>(
        &mut self,
        circuit: &mut Circuit<V>,
        targets: &[PortId],
    ) -> Result<IndexSet<PortId>, SignalPropagationError> {
        self.signal.propagate(circuit, targets)
    }

    /// Settle an element from its current inputs.
    ///
    /// Atomic elements recompute every output. Composites are reset and
    /// settled from all inputs, even when already initialized. Returns the
    /// element's outputs that changed.
    pub fn init<V: Signal>(
        &mut self,
        circuit: &mut Circuit<V>,
        element: ElementId,
    ) -> Result<PortList, SimulationError> {
        let boundary = Boundary::of(circuit, element)?;
        if !boundary.composite {
            return Ok(circuit.propagate_atomic(element, None)?);
        }

        self.reset.propagate(circuit, element)?;
        circuit.mark_initialized(element)?;
        let affected = self.signal.propagate(circuit, &boundary.inputs)?;

        tracing::debug!(%element, affected = affected.len(), "composite initialized");
        Ok(boundary.affected_outputs(&affected))
    }

    /// Re-evaluate an element after input `index` (or any input) changed.
    ///
    /// An uninitialized composite is initialized instead. Returns the
    /// element's outputs that changed.
    pub fn propagate_element<V: Signal>(
        &mut self,
        circuit: &mut Circuit<V>,
        element: ElementId,
        index: Option<usize>,
    ) -> Result<PortList, SimulationError> {
        let boundary = Boundary::of(circuit, element)?;
        let start: PortList = match index {
            Some(index) => smallvec![boundary.input(element, index)?],
            None => boundary.inputs.clone(),
        };

        if !boundary.composite {
            return Ok(circuit.propagate_atomic(element, index)?);
        }
        if !boundary.initialized {
            return self.init(circuit, element);
        }

        let affected = self.signal.propagate(circuit, &start)?;
        Ok(boundary.affected_outputs(&affected))
    }

    /// Set input `index` of `element` to `value` and propagate it.
    pub fn drive<V: Signal>(
        &mut self,
        circuit: &mut Circuit<V>,
        element: ElementId,
        index: usize,
        value: V,
    ) -> Result<PortList, SimulationError> {
        let input = circuit.input(element, index)?;
        circuit.set_value(input, value)?;
        self.propagate_element(circuit, element, Some(index))
    }
}

/// Snapshot of an element's ports and lifecycle state, taken before the
/// circuit is borrowed mutably.
struct Boundary {
    inputs: PortList,
    outputs: PortList,
    composite: bool,
    initialized: bool,
}

impl Boundary {
    fn of<V: Signal>(circuit: &Circuit<V>, element: ElementId) -> Result<Self, CircuitError> {
        let target = circuit
            .element(element)
            .ok_or(CircuitError::UnknownElement { element })?;
        let state = target.as_composite();
        Ok(Self {
            inputs: target.inputs().into(),
            outputs: target.outputs().into(),
            composite: state.is_some(),
            initialized: state.is_some_and(|c| c.is_initialized()),
        })
    }

    fn input(&self, element: ElementId, index: usize) -> Result<PortId, CircuitError> {
        self.inputs
            .get(index)
            .copied()
            .ok_or(CircuitError::PortIndexOutOfRange {
                element,
                index,
                len: self.inputs.len(),
            })
    }

    fn affected_outputs(&self, affected: &IndexSet<PortId>) -> PortList {
        self.outputs
            .iter()
            .copied()
            .filter(|p| affected.contains(p))
            .collect()
    }
}
