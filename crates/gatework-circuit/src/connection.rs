//! Wiring between outputs and inputs.

use gatework_core::{ConnectionError, PortDirection, PortId, Signal};
use indexmap::IndexMap;

use crate::circuit::Circuit;

/// Records which output feeds each input and keeps the circuit's port
/// targets in sync with that record.
///
/// An input has at most one source; an output may feed any number of
/// inputs. The manager only knows about connections made through it, so
/// use one manager per circuit.
///
/// # Examples
///
/// ```
/// use gatework_circuit::{Circuit, ConnectionManager};
///
/// let mut circuit = Circuit::<bool>::new();
/// let a = circuit.add_not();
/// let b = circuit.add_not();
/// let mut wires = ConnectionManager::new();
///
/// let out = circuit.output(a, 0).unwrap();
/// let inp = circuit.input(b, 0).unwrap();
/// wires.connect(&mut circuit, out, inp).unwrap();
/// assert_eq!(wires.source_of(inp), Some(out));
/// ```
#[derive(Clone, Debug)]
pub struct ConnectionManager<V> {
    /// Value written to an input when it is disconnected.
    default_value: V,
    /// input → output.
    sources: IndexMap<PortId, PortId>,
}

impl<V: Signal + Default> ConnectionManager<V> {
    /// Create a manager that resets disconnected inputs to `V::default()`.
    pub fn new() -> Self {
        Self::with_default(V::default())
    }
}

impl<V: Signal + Default> Default for ConnectionManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Signal> ConnectionManager<V> {
    /// Create a manager that resets disconnected inputs to `default_value`.
    pub fn with_default(default_value: V) -> Self {
        Self {
            default_value,
            sources: IndexMap::new(),
        }
    }

    /// Wire an output to an input. The ports may be given in either order.
    ///
    /// On success the output's value is copied onto the input, which
    /// becomes dirty if the value changed.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::UnknownPort`] if either handle is foreign.
    /// - [`ConnectionError::InvalidPortsPair`] if both ports share a direction.
    /// - [`ConnectionError::DuplicateConnection`] if the pair is already wired.
    /// - [`ConnectionError::InputAlreadyConnected`] if the input has
    ///   another source.
    pub fn connect(
        &mut self,
        circuit: &mut Circuit<V>,
        a: PortId,
        b: PortId,
    ) -> Result<(), ConnectionError> {
        let (output, input) = resolve(circuit, a, b)?;

        if let Some(&existing) = self.sources.get(&input) {
            return Err(if existing == output {
                ConnectionError::DuplicateConnection { input, output }
            } else {
                ConnectionError::InputAlreadyConnected { input }
            });
        }

        let value = circuit[output].value().clone();
        if let Some(port) = circuit.port_mut(output) {
            port.add_target(input);
        }
        if let Some(port) = circuit.port_mut(input) {
            port.set_value(value);
        }
        self.sources.insert(input, output);

        tracing::debug!(%output, %input, "connected");
        Ok(())
    }

    /// Remove a wire. The ports may be given in either order.
    ///
    /// The input is reset to the manager's default value, which dirties
    /// it if the value changed.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::UnknownPort`] if either handle is foreign.
    /// - [`ConnectionError::InvalidPortsPair`] if both ports share a direction.
    /// - [`ConnectionError::ConnectionNotExist`] if the input has no source
    ///   or is fed by a different output.
    pub fn disconnect(
        &mut self,
        circuit: &mut Circuit<V>,
        a: PortId,
        b: PortId,
    ) -> Result<(), ConnectionError> {
        let (output, input) = resolve(circuit, a, b)?;

        if self.sources.get(&input) != Some(&output) {
            return Err(ConnectionError::ConnectionNotExist { input, output });
        }

        if let Some(port) = circuit.port_mut(output) {
            port.remove_target(input);
        }
        if let Some(port) = circuit.port_mut(input) {
            port.set_value(self.default_value.clone());
        }
        self.sources.shift_remove(&input);

        tracing::debug!(%output, %input, "disconnected");
        Ok(())
    }

    /// The output feeding `input`, if any.
    pub fn source_of(&self, input: PortId) -> Option<PortId> {
        self.sources.get(&input).copied()
    }

    /// All recorded `(output, input)` wires, in connection order.
    pub fn connections(&self) -> impl Iterator<Item = (PortId, PortId)> + '_ {
        self.sources.iter().map(|(&input, &output)| (output, input))
    }

    /// Number of recorded wires.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// `true` if nothing is wired.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Order a port pair as `(output, input)`.
fn resolve<V: Signal>(
    circuit: &Circuit<V>,
    a: PortId,
    b: PortId,
) -> Result<(PortId, PortId), ConnectionError> {
    let direction = |id: PortId| {
        circuit
            .port(id)
            .map(|p| p.direction())
            .ok_or(ConnectionError::UnknownPort { port: id })
    };
    match (direction(a)?, direction(b)?) {
        (PortDirection::Output, PortDirection::Input) => Ok((a, b)),
        (PortDirection::Input, PortDirection::Output) => Ok((b, a)),
        _ => Err(ConnectionError::InvalidPortsPair { lhs: a, rhs: b }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatework_core::ElementId;

    struct Fixture {
        circuit: Circuit<bool>,
        wires: ConnectionManager<bool>,
        a: ElementId,
        b: ElementId,
        c: ElementId,
    }

    fn fixture() -> Fixture {
        let mut circuit = Circuit::new();
        let a = circuit.add_not();
        let b = circuit.add_not();
        let c = circuit.add_bus(2).unwrap();
        Fixture {
            circuit,
            wires: ConnectionManager::new(),
            a,
            b,
            c,
        }
    }

    impl Fixture {
        fn out(&self, element: ElementId, i: usize) -> PortId {
            self.circuit.output(element, i).unwrap()
        }

        fn inp(&self, element: ElementId, i: usize) -> PortId {
            self.circuit.input(element, i).unwrap()
        }
    }

    #[test]
    fn connect_either_order() {
        let mut f = fixture();
        let (out, inp) = (f.out(f.a, 0), f.inp(f.b, 0));
        f.wires.connect(&mut f.circuit, inp, out).unwrap();
        assert_eq!(f.wires.source_of(inp), Some(out));
        assert!(f.circuit[out].connected().contains(&inp));
        assert_eq!(f.circuit.targets(out).as_slice(), &[inp]);
    }

    #[test]
    fn connect_copies_output_value() {
        let mut f = fixture();
        let (out, inp) = (f.out(f.a, 0), f.inp(f.b, 0));
        f.circuit.propagate_atomic(f.a, None).unwrap();
        f.circuit.propagate_port(inp);
        f.wires.connect(&mut f.circuit, out, inp).unwrap();
        assert_eq!(f.circuit.value(inp), Some(&true));
        assert_eq!(f.circuit.is_dirty(inp), Some(true));
    }

    #[test]
    fn duplicate_connection_is_rejected() {
        let mut f = fixture();
        let (out, inp) = (f.out(f.a, 0), f.inp(f.b, 0));
        f.wires.connect(&mut f.circuit, out, inp).unwrap();
        assert_eq!(
            f.wires.connect(&mut f.circuit, out, inp),
            Err(ConnectionError::DuplicateConnection { input: inp, output: out })
        );
        assert_eq!(f.wires.len(), 1);
    }

    #[test]
    fn second_source_is_rejected() {
        let mut f = fixture();
        let inp = f.inp(f.c, 0);
        let (first, second) = (f.out(f.a, 0), f.out(f.b, 0));
        f.wires.connect(&mut f.circuit, first, inp).unwrap();
        assert_eq!(
            f.wires.connect(&mut f.circuit, second, inp),
            Err(ConnectionError::InputAlreadyConnected { input: inp })
        );
        assert_eq!(f.wires.source_of(inp), Some(first));
        assert!(f.circuit[second].connected().is_empty());
    }

    #[test]
    fn same_direction_pairs_are_rejected() {
        let mut f = fixture();
        let (in1, in2) = (f.inp(f.c, 0), f.inp(f.c, 1));
        let (out1, out2) = (f.out(f.a, 0), f.out(f.b, 0));
        assert_eq!(
            f.wires.connect(&mut f.circuit, in1, in2),
            Err(ConnectionError::InvalidPortsPair { lhs: in1, rhs: in2 })
        );
        assert_eq!(
            f.wires.connect(&mut f.circuit, out1, out2),
            Err(ConnectionError::InvalidPortsPair { lhs: out1, rhs: out2 })
        );
        assert!(f.wires.is_empty());
    }

    #[test]
    fn unknown_port_is_rejected() {
        let mut f = fixture();
        let out = f.out(f.a, 0);
        assert_eq!(
            f.wires.connect(&mut f.circuit, out, PortId(500)),
            Err(ConnectionError::UnknownPort { port: PortId(500) })
        );
    }

    #[test]
    fn one_output_feeds_many_inputs() {
        let mut f = fixture();
        let out = f.out(f.a, 0);
        let targets = [f.inp(f.b, 0), f.inp(f.c, 0), f.inp(f.c, 1)];
        for t in targets {
            f.wires.connect(&mut f.circuit, out, t).unwrap();
        }
        assert_eq!(f.circuit.targets(out).as_slice(), &targets);
        assert_eq!(
            f.wires.connections().collect::<Vec<_>>(),
            targets.iter().map(|&t| (out, t)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn disconnect_resets_input_and_allows_rewiring() {
        let mut f = fixture();
        let (out, inp) = (f.out(f.a, 0), f.inp(f.b, 0));
        f.circuit.propagate_atomic(f.a, None).unwrap();
        f.wires.connect(&mut f.circuit, out, inp).unwrap();
        f.circuit.propagate_port(inp);

        f.wires.disconnect(&mut f.circuit, inp, out).unwrap();
        assert_eq!(f.circuit.value(inp), Some(&false));
        assert_eq!(f.circuit.is_dirty(inp), Some(true));
        assert!(f.circuit[out].connected().is_empty());
        assert_eq!(f.wires.source_of(inp), None);

        let (other, spare) = (f.out(f.b, 0), f.inp(f.c, 0));
        f.wires.connect(&mut f.circuit, other, spare).unwrap();
        f.wires.connect(&mut f.circuit, out, inp).unwrap();
        assert_eq!(f.wires.len(), 2);
    }

    #[test]
    fn disconnect_requires_exact_pair() {
        let mut f = fixture();
        let inp = f.inp(f.c, 0);
        let (first, second) = (f.out(f.a, 0), f.out(f.b, 0));
        assert_eq!(
            f.wires.disconnect(&mut f.circuit, first, inp),
            Err(ConnectionError::ConnectionNotExist { input: inp, output: first })
        );

        f.wires.connect(&mut f.circuit, first, inp).unwrap();
        assert_eq!(
            f.wires.disconnect(&mut f.circuit, second, inp),
            Err(ConnectionError::ConnectionNotExist { input: inp, output: second })
        );
        assert_eq!(f.wires.source_of(inp), Some(first));
    }

    #[test]
    fn custom_default_value_on_disconnect() {
        let mut circuit = Circuit::<u8>::with_default(0);
        let src = circuit.add_bus(1).unwrap();
        let dst = circuit.add_bus(1).unwrap();
        let mut wires = ConnectionManager::with_default(0xAA);
        let (out, inp) = (circuit.output(src, 0).unwrap(), circuit.input(dst, 0).unwrap());

        wires.connect(&mut circuit, out, inp).unwrap();
        wires.disconnect(&mut circuit, out, inp).unwrap();
        assert_eq!(circuit.value(inp), Some(&0xAA));
    }
}
