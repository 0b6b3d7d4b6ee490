//! Builders for the standard composite elements.

use gatework_circuit::{Circuit, ConnectionManager};
use gatework_core::{CircuitError, ElementId, Signal};

use crate::error::BuildError;

/// Signature shared by `Circuit::add_and` and `Circuit::add_or`.
type AddGate<V> = fn(&mut Circuit<V>, usize) -> Result<ElementId, CircuitError>;

/// Assembles composites inside a circuit, wiring them through the
/// circuit's connection manager.
///
/// Every builder returns the composite's handle. The interior elements
/// stay in the same circuit but are only reachable through the
/// composite's buses.
///
/// # Examples
///
/// ```
/// use gatework_circuit::{Circuit, ConnectionManager};
/// use gatework_elements::CompositeFactory;
///
/// let mut circuit = Circuit::<bool>::new();
/// let mut wires = ConnectionManager::new();
/// let nand = CompositeFactory::new(&mut circuit, &mut wires).not_and(2).unwrap();
///
/// assert_eq!(circuit.element(nand).unwrap().inputs().len(), 2);
/// assert_eq!(circuit.element(nand).unwrap().outputs().len(), 1);
/// ```
#[derive(Debug)]
pub struct CompositeFactory<'a, V> {
    circuit: &'a mut Circuit<V>,
    wires: &'a mut ConnectionManager<V>,
}

impl<'a, V: Signal> CompositeFactory<'a, V> {
    /// Build into `circuit`, recording wires in `wires`.
    pub fn new(circuit: &'a mut Circuit<V>, wires: &'a mut ConnectionManager<V>) -> Self {
        Self { circuit, wires }
    }

    /// Wrap two existing buses, and whatever is wired between them, as a
    /// composite.
    pub fn composite(
        &mut self,
        input_bus: ElementId,
        output_bus: ElementId,
    ) -> Result<ElementId, BuildError> {
        Ok(self.circuit.add_composite(input_bus, output_bus)?)
    }

    /// `n`-input NOR: `bus(n) → OR(n) → NOT → bus(1)`.
    ///
    /// Every builder that takes `n` fails with
    /// [`CircuitError::InvalidArity`] from the input bus when `n` is zero,
    /// before anything is added.
    pub fn not_or(&mut self, n: usize) -> Result<ElementId, BuildError> {
        self.negated("nor", n, Circuit::add_or)
    }

    /// `n`-input NAND: `bus(n) → AND(n) → NOT → bus(1)`.
    pub fn not_and(&mut self, n: usize) -> Result<ElementId, BuildError> {
        self.negated("nand", n, Circuit::add_and)
    }

    /// `n`-input exclusive-or: true when some but not all inputs are true.
    ///
    /// The input bus fans out to `OR(n)` and `AND(n)`; the OR and the
    /// negated AND meet in an `AND(2)`. For two inputs this is plain XOR.
    pub fn xor(&mut self, n: usize) -> Result<ElementId, BuildError> {
        let in_bus = self.circuit.add_bus(n)?;
        let any = self.circuit.add_or(n)?;
        let all = self.circuit.add_and(n)?;
        let not_all = self.circuit.add_not();
        let join = self.circuit.add_and(2)?;
        let out_bus = self.circuit.add_bus(1)?;

        for i in 0..n {
            self.link((in_bus, i), (any, i))?;
            self.link((in_bus, i), (all, i))?;
        }
        self.link((all, 0), (not_all, 0))?;
        self.link((any, 0), (join, 0))?;
        self.link((not_all, 0), (join, 1))?;
        self.link((join, 0), (out_bus, 0))?;

        let id = self.composite(in_bus, out_bus)?;
        tracing::debug!(element = %id, inputs = n, "built xor");
        Ok(id)
    }

    /// RS latch from two cross-coupled NORs.
    ///
    /// Inputs are `[R, S]`, outputs are `[Q, !Q]`. With both inputs low
    /// the latch holds; with both high both outputs go low.
    pub fn rs_trigger_nor(&mut self) -> Result<ElementId, BuildError> {
        let in_bus = self.circuit.add_bus(2)?;
        let out_bus = self.circuit.add_bus(2)?;
        let q = self.not_or(2)?;
        let q_bar = self.not_or(2)?;

        self.link((in_bus, 0), (q, 0))?;
        self.link((in_bus, 1), (q_bar, 0))?;
        self.link((q, 0), (q_bar, 1))?;
        self.link((q_bar, 0), (q, 1))?;
        self.link((q, 0), (out_bus, 0))?;
        self.link((q_bar, 0), (out_bus, 1))?;

        let id = self.composite(in_bus, out_bus)?;
        tracing::debug!(element = %id, "built rs trigger");
        Ok(id)
    }

    fn negated(
        &mut self,
        name: &'static str,
        n: usize,
        add_gate: AddGate<V>,
    ) -> Result<ElementId, BuildError> {
        let in_bus = self.circuit.add_bus(n)?;
        let gate = add_gate(self.circuit, n)?;
        let not = self.circuit.add_not();
        let out_bus = self.circuit.add_bus(1)?;

        for i in 0..n {
            self.link((in_bus, i), (gate, i))?;
        }
        self.link((gate, 0), (not, 0))?;
        self.link((not, 0), (out_bus, 0))?;

        let id = self.composite(in_bus, out_bus)?;
        tracing::debug!(element = %id, inputs = n, "built {name}");
        Ok(id)
    }

    /// Wire output `from.1` of `from.0` to input `to.1` of `to.0`.
    fn link(&mut self, from: (ElementId, usize), to: (ElementId, usize)) -> Result<(), BuildError> {
        let output = self.circuit.output(from.0, from.1)?;
        let input = self.circuit.input(to.0, to.1)?;
        self.wires.connect(self.circuit, output, input)?;
        Ok(())
    }
}
