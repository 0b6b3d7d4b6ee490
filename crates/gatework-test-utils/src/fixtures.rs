//! Reusable fixture gates and circuits.
//!
//! - [`XorGate`]: two-input exclusive-or plugin gate.
//! - [`ConstGate`]: plugin gate that ignores its input.
//! - [`InverterChain`]: `in_bus(1) → NOT → out_bus(1)`.
//! - [`RingOscillator`]: an inverter chain whose output feeds its input.

use gatework_circuit::{Circuit, ConnectionManager};
use gatework_core::{ElementId, Gate, PortId};

use crate::link;

/// Two-input exclusive-or.
#[derive(Clone, Copy, Debug, Default)]
pub struct XorGate;

impl Gate<bool> for XorGate {
    fn name(&self) -> &str {
        "xor"
    }

    fn input_count(&self) -> usize {
        2
    }

    fn output_count(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[bool], outputs: &mut [bool]) {
        outputs[0] = inputs[0] != inputs[1];
    }
}

/// One input, one output, always `value`.
#[derive(Clone, Copy, Debug)]
pub struct ConstGate {
    pub value: bool,
}

impl Gate<bool> for ConstGate {
    fn name(&self) -> &str {
        "const"
    }

    fn input_count(&self) -> usize {
        1
    }

    fn output_count(&self) -> usize {
        1
    }

    fn evaluate(&self, _inputs: &[bool], outputs: &mut [bool]) {
        outputs[0] = self.value;
    }
}

/// `in_bus(1) → NOT → out_bus(1)`, unwrapped.
#[derive(Clone, Copy, Debug)]
pub struct InverterChain {
    pub in_bus: ElementId,
    pub not: ElementId,
    pub out_bus: ElementId,
}

impl InverterChain {
    /// Build and wire the chain into `circuit`.
    pub fn build(circuit: &mut Circuit<bool>, wires: &mut ConnectionManager<bool>) -> Self {
        let in_bus = circuit.add_bus(1).unwrap();
        let not = circuit.add_not();
        let out_bus = circuit.add_bus(1).unwrap();
        link(circuit, wires, (in_bus, 0), (not, 0));
        link(circuit, wires, (not, 0), (out_bus, 0));
        Self {
            in_bus,
            not,
            out_bus,
        }
    }

    /// The chain's single input port.
    pub fn input(&self, circuit: &Circuit<bool>) -> PortId {
        circuit.input(self.in_bus, 0).unwrap()
    }

    /// The chain's single output port.
    pub fn output(&self, circuit: &Circuit<bool>) -> PortId {
        circuit.output(self.out_bus, 0).unwrap()
    }

    /// Every port of the chain, in allocation order.
    pub fn ports(&self, circuit: &Circuit<bool>) -> Vec<PortId> {
        [self.in_bus, self.not, self.out_bus]
            .iter()
            .flat_map(|&e| {
                let element = circuit.element(e).unwrap();
                element.inputs().iter().chain(element.outputs()).copied().collect::<Vec<_>>()
            })
            .collect()
    }
}

/// An inverter chain with `out_bus.out → in_bus.in`. Never settles.
#[derive(Clone, Copy, Debug)]
pub struct RingOscillator {
    pub chain: InverterChain,
}

impl RingOscillator {
    /// Build and wire the ring into `circuit`.
    pub fn build(circuit: &mut Circuit<bool>, wires: &mut ConnectionManager<bool>) -> Self {
        let chain = InverterChain::build(circuit, wires);
        link(circuit, wires, (chain.out_bus, 0), (chain.in_bus, 0));
        Self { chain }
    }

    /// The port to start propagation from.
    pub fn start(&self, circuit: &Circuit<bool>) -> PortId {
        self.chain.input(circuit)
    }

    /// Every port on the ring.
    pub fn ports(&self, circuit: &Circuit<bool>) -> Vec<PortId> {
        self.chain.ports(circuit)
    }
}
