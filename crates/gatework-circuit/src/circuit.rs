//! The [`Circuit`] arena: element construction, port access and
//! port-level propagation.

use std::ops::Index;

use gatework_core::{CircuitError, ElementId, Gate, PortDirection, PortId, Signal};
use smallvec::{smallvec, SmallVec};

use crate::element::{CompositeElement, Element, ElementKind};
use crate::port::{Port, PortList};

/// Owner of every port and element in a circuit.
///
/// Handles are assigned sequentially and never reused; elements cannot be
/// removed, only rewired through a
/// [`ConnectionManager`](crate::ConnectionManager).
///
/// # Examples
///
/// ```
/// use gatework_circuit::Circuit;
///
/// let mut circuit = Circuit::<bool>::new();
/// let not = circuit.add_not();
/// let out = circuit.output(not, 0).unwrap();
///
/// circuit.propagate_atomic(not, None).unwrap();
/// assert_eq!(circuit.value(out), Some(&true));
/// ```
#[derive(Debug)]
pub struct Circuit<V> {
    ports: Vec<Port<V>>,
    elements: Vec<Element<V>>,
    /// Initial value of every newly created port.
    default_value: V,
}

impl<V: Signal + Default> Circuit<V> {
    /// Create an empty circuit whose ports start at `V::default()`.
    pub fn new() -> Self {
        Self::with_default(V::default())
    }
}

impl<V: Signal + Default> Default for Circuit<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Signal> Circuit<V> {
    /// Create an empty circuit whose ports start at `default_value`.
    pub fn with_default(default_value: V) -> Self {
        Self {
            ports: Vec::new(),
            elements: Vec::new(),
            default_value,
        }
    }

    /// The value every new port starts with.
    pub fn default_value(&self) -> &V {
        &self.default_value
    }

    // ── Access ─────────────────────────────────────────────────────

    /// Number of ports across all elements.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Number of elements, composites included.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Look up a port.
    pub fn port(&self, id: PortId) -> Option<&Port<V>> {
        self.ports.get(id.index())
    }

    pub(crate) fn port_mut(&mut self, id: PortId) -> Option<&mut Port<V>> {
        self.ports.get_mut(id.index())
    }

    /// Look up an element.
    pub fn element(&self, id: ElementId) -> Option<&Element<V>> {
        self.elements.get(id.index())
    }

    /// All ports with their handles, in allocation order.
    pub fn ports(&self) -> impl Iterator<Item = (PortId, &Port<V>)> {
        self.ports
            .iter()
            .enumerate()
            .map(|(i, p)| (PortId(i as u32), p))
    }

    /// All elements with their handles, in allocation order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element<V>)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i as u32), e))
    }

    /// Current value of a port.
    pub fn value(&self, id: PortId) -> Option<&V> {
        self.port(id).map(Port::value)
    }

    /// Dirty flag of a port.
    pub fn is_dirty(&self, id: PortId) -> Option<bool> {
        self.port(id).map(Port::is_dirty)
    }

    /// The `index`-th input of an element.
    pub fn input(&self, element: ElementId, index: usize) -> Result<PortId, CircuitError> {
        let inputs = self.checked_element(element)?.inputs();
        inputs
            .get(index)
            .copied()
            .ok_or(CircuitError::PortIndexOutOfRange {
                element,
                index,
                len: inputs.len(),
            })
    }

    /// The `index`-th output of an element.
    pub fn output(&self, element: ElementId, index: usize) -> Result<PortId, CircuitError> {
        let outputs = self.checked_element(element)?.outputs();
        outputs
            .get(index)
            .copied()
            .ok_or(CircuitError::PortIndexOutOfRange {
                element,
                index,
                len: outputs.len(),
            })
    }

    /// Ports reachable in one step from `id`.
    ///
    /// An input reaches its owner's outputs; an output reaches the inputs
    /// it is wired to. Unknown handles reach nothing.
    pub fn targets(&self, id: PortId) -> PortList {
        let Some(port) = self.port(id) else {
            return PortList::new();
        };
        match port.direction() {
            PortDirection::Input => self
                .element(port.owner())
                .map(|owner| owner.outputs().iter().copied().collect())
                .unwrap_or_default(),
            PortDirection::Output => port.connected().iter().copied().collect(),
        }
    }

    fn checked_element(&self, id: ElementId) -> Result<&Element<V>, CircuitError> {
        self.element(id)
            .ok_or(CircuitError::UnknownElement { element: id })
    }

    // ── Mutation ───────────────────────────────────────────────────

    /// Store a value on a port, marking it dirty if it changed.
    ///
    /// Nothing downstream is touched until the port is propagated.
    pub fn set_value(&mut self, id: PortId, value: V) -> Result<(), CircuitError> {
        self.port_mut(id)
            .ok_or(CircuitError::UnknownPort { port: id })?
            .set_value(value);
        Ok(())
    }

    /// Force a port dirty without changing its value.
    pub fn make_dirty(&mut self, id: PortId) -> Result<(), CircuitError> {
        self.port_mut(id)
            .ok_or(CircuitError::UnknownPort { port: id })?
            .make_dirty();
        Ok(())
    }

    /// Flag a composite as initialized.
    ///
    /// The flag is one-way and only means something once the composite's
    /// interior has been reset and settled; `Simulator::init` calls this
    /// between those two passes. Fails with [`CircuitError::NotComposite`]
    /// for atomic elements.
    pub fn mark_initialized(&mut self, element: ElementId) -> Result<(), CircuitError> {
        self.elements
            .get_mut(element.index())
            .ok_or(CircuitError::UnknownElement { element })?
            .as_composite_mut()
            .ok_or(CircuitError::NotComposite { element })?
            .mark_initialized();
        Ok(())
    }

    // ── Construction ───────────────────────────────────────────────

    /// Add an AND gate with `inputs` inputs and one output.
    pub fn add_and(&mut self, inputs: usize) -> Result<ElementId, CircuitError> {
        check_arity("and", inputs)?;
        Ok(self.push_atomic(ElementKind::And, inputs, 1))
    }

    /// Add an OR gate with `inputs` inputs and one output.
    pub fn add_or(&mut self, inputs: usize) -> Result<ElementId, CircuitError> {
        check_arity("or", inputs)?;
        Ok(self.push_atomic(ElementKind::Or, inputs, 1))
    }

    /// Add an inverter.
    pub fn add_not(&mut self) -> ElementId {
        self.push_atomic(ElementKind::Not, 1, 1)
    }

    /// Add a bus of `channels` identity channels.
    pub fn add_bus(&mut self, channels: usize) -> Result<ElementId, CircuitError> {
        check_arity("bus", channels)?;
        Ok(self.push_atomic(ElementKind::Bus, channels, channels))
    }

    /// Add a plugin gate with the arity it declares.
    pub fn add_gate(&mut self, gate: Box<dyn Gate<V>>) -> Result<ElementId, CircuitError> {
        let (inputs, outputs) = (gate.input_count(), gate.output_count());
        check_arity("gate inputs", inputs)?;
        check_arity("gate outputs", outputs)?;
        Ok(self.push_atomic(ElementKind::Custom(gate), inputs, outputs))
    }

    /// Wrap two buses, and everything wired between them, as a composite.
    ///
    /// The composite owns no ports of its own: its inputs are
    /// `input_bus`'s inputs and its outputs are `output_bus`'s outputs.
    pub fn add_composite(
        &mut self,
        input_bus: ElementId,
        output_bus: ElementId,
    ) -> Result<ElementId, CircuitError> {
        let inputs: SmallVec<[PortId; 4]> = self.checked_bus(input_bus)?.inputs().into();
        let outputs: SmallVec<[PortId; 4]> = self.checked_bus(output_bus)?.outputs().into();

        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element::new(
            ElementKind::Composite(CompositeElement::new(input_bus, output_bus)),
            inputs,
            outputs,
        ));
        Ok(id)
    }

    fn checked_bus(&self, id: ElementId) -> Result<&Element<V>, CircuitError> {
        let element = self.checked_element(id)?;
        match element.kind() {
            ElementKind::Bus => Ok(element),
            _ => Err(CircuitError::NotABus { element: id }),
        }
    }

    fn push_atomic(&mut self, kind: ElementKind<V>, inputs: usize, outputs: usize) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        let input_ports = self.alloc_ports(id, PortDirection::Input, inputs);
        let output_ports = self.alloc_ports(id, PortDirection::Output, outputs);
        self.elements
            .push(Element::new(kind, input_ports, output_ports));
        id
    }

    fn alloc_ports(
        &mut self,
        owner: ElementId,
        direction: PortDirection,
        count: usize,
    ) -> SmallVec<[PortId; 4]> {
        (0..count)
            .map(|index| {
                let id = PortId(self.ports.len() as u32);
                self.ports.push(Port::new(
                    owner,
                    index,
                    direction,
                    self.default_value.clone(),
                ));
                id
            })
            .collect()
    }

    // ── Propagation ────────────────────────────────────────────────

    /// Push one port's pending change one step downstream.
    ///
    /// - Clean ports do nothing and return an empty list.
    /// - A dirty input is cleaned and its owner is re-evaluated; the
    ///   owner's outputs that ended up dirty are returned.
    /// - A dirty output is cleaned and its value is copied onto every
    ///   connected input; the inputs that ended up dirty are returned.
    pub fn propagate_port(&mut self, id: PortId) -> PortList {
        let Some(port) = self.ports.get_mut(id.index()) else {
            return PortList::new();
        };
        if !port.take_dirty() {
            return PortList::new();
        }

        match port.direction() {
            PortDirection::Input => {
                let (owner, index) = (port.owner(), port.index());
                self.evaluate(owner, Some(index))
            }
            PortDirection::Output => {
                let value = port.value().clone();
                let targets: PortList = port.connected().iter().copied().collect();
                targets
                    .into_iter()
                    .filter(|target| {
                        let target = &mut self.ports[target.index()];
                        target.set_value(value.clone());
                        target.is_dirty()
                    })
                    .collect()
            }
        }
    }

    /// Re-evaluate an atomic element and report its dirty outputs.
    ///
    /// `index` names the input that triggered the call. Gates ignore it
    /// and recompute their whole truth table. A bus given an index only
    /// updates and reports that channel; without one it updates all.
    pub fn propagate_atomic(
        &mut self,
        element: ElementId,
        index: Option<usize>,
    ) -> Result<PortList, CircuitError> {
        let target = self.checked_element(element)?;
        if target.is_composite() {
            return Err(CircuitError::NotAtomic { element });
        }
        if let Some(index) = index {
            let len = target.inputs().len();
            if index >= len {
                return Err(CircuitError::PortIndexOutOfRange {
                    element,
                    index,
                    len,
                });
            }
        }
        Ok(self.evaluate(element, index))
    }

    fn evaluate(&mut self, id: ElementId, index: Option<usize>) -> PortList {
        let Some(element) = self.elements.get(id.index()) else {
            return PortList::new();
        };
        let ports = &mut self.ports;
        let (inputs, outputs) = (element.inputs(), element.outputs());

        match element.kind() {
            ElementKind::And => {
                if let Some(value) = reduce(ports, inputs, V::and) {
                    ports[outputs[0].index()].set_value(value);
                }
            }
            ElementKind::Or => {
                if let Some(value) = reduce(ports, inputs, V::or) {
                    ports[outputs[0].index()].set_value(value);
                }
            }
            ElementKind::Not => {
                let value = ports[inputs[0].index()].value().negate();
                ports[outputs[0].index()].set_value(value);
            }
            ElementKind::Bus => {
                if let Some(channel) = index {
                    let (Some(&input), Some(&output)) = (inputs.get(channel), outputs.get(channel))
                    else {
                        return PortList::new();
                    };
                    let value = ports[input.index()].value().clone();
                    let port = &mut ports[output.index()];
                    port.set_value(value);
                    return if port.is_dirty() {
                        smallvec![output]
                    } else {
                        PortList::new()
                    };
                }
                for (input, output) in inputs.iter().zip(outputs) {
                    let value = ports[input.index()].value().clone();
                    ports[output.index()].set_value(value);
                }
            }
            ElementKind::Custom(gate) => {
                let in_values: SmallVec<[V; 4]> = inputs
                    .iter()
                    .map(|p| ports[p.index()].value().clone())
                    .collect();
                let mut out_values: SmallVec<[V; 4]> = outputs
                    .iter()
                    .map(|p| ports[p.index()].value().clone())
                    .collect();
                gate.evaluate(&in_values, &mut out_values);
                for (port, value) in outputs.iter().zip(out_values) {
                    ports[port.index()].set_value(value);
                }
            }
            // Composites own no ports, so no port propagation lands here.
            ElementKind::Composite(_) => return PortList::new(),
        }

        outputs
            .iter()
            .copied()
            .filter(|p| ports[p.index()].is_dirty())
            .collect()
    }
}

impl<V> Index<PortId> for Circuit<V> {
    type Output = Port<V>;

    fn index(&self, id: PortId) -> &Port<V> {
        &self.ports[id.index()]
    }
}

impl<V> Index<ElementId> for Circuit<V> {
    type Output = Element<V>;

    fn index(&self, id: ElementId) -> &Element<V> {
        &self.elements[id.index()]
    }
}

fn check_arity(kind: &'static str, count: usize) -> Result<(), CircuitError> {
    if count == 0 {
        return Err(CircuitError::InvalidArity { kind, count });
    }
    Ok(())
}

/// Fold the values on `inputs` with `op`. `None` for an empty list.
fn reduce<V: Signal>(ports: &[Port<V>], inputs: &[PortId], op: fn(&V, &V) -> V) -> Option<V> {
    let mut values = inputs.iter().map(|p| ports[p.index()].value());
    let first = values.next()?.clone();
    Some(values.fold(first, |acc, v| op(&acc, v)))
}
