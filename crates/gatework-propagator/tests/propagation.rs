//! Integration tests for signal propagation through wired circuits.

use gatework_circuit::{Circuit, ConnectionManager};
use gatework_core::{ElementId, PortId, SignalPropagationError};
use gatework_propagator::{PropagatorConfig, SimulationError, Simulator, TargetOrder};
use gatework_test_utils::{link, ConstGate, InverterChain, RingOscillator, XorGate};

fn value(circuit: &Circuit<bool>, port: PortId) -> bool {
    *circuit.value(port).unwrap()
}

#[test]
fn inverter_chain_follows_input() {
    let mut circuit = Circuit::new();
    let mut wires = ConnectionManager::new();
    let in_bus = circuit.add_bus(1).unwrap();
    let not = circuit.add_not();
    let out_bus = circuit.add_bus(1).unwrap();

    let mut sim = Simulator::default();
    for element in [in_bus, not, out_bus] {
        sim.init(&mut circuit, element).unwrap();
    }
    link(&mut circuit, &mut wires, (in_bus, 0), (not, 0));
    link(&mut circuit, &mut wires, (not, 0), (out_bus, 0));

    let input = circuit.input(in_bus, 0).unwrap();
    let taps = [
        circuit.output(in_bus, 0).unwrap(),
        circuit.output(not, 0).unwrap(),
        circuit.output(out_bus, 0).unwrap(),
    ];

    sim.propagate(&mut circuit, &[input]).unwrap();
    assert_eq!(taps.map(|p| value(&circuit, p)), [false, true, true]);

    circuit.set_value(input, true).unwrap();
    sim.propagate(&mut circuit, &[input]).unwrap();
    assert_eq!(taps.map(|p| value(&circuit, p)), [true, false, false]);
}

#[test]
fn ring_oscillator_reports_a_ring_port() {
    let mut circuit = Circuit::new();
    let mut wires = ConnectionManager::new();
    let ring = RingOscillator::build(&mut circuit, &mut wires);
    let mut sim = Simulator::default();

    let start = ring.start(&circuit);
    let err = sim.propagate(&mut circuit, &[start]).unwrap_err();
    assert!(ring.ports(&circuit).contains(&err.port()));
    assert!(matches!(err, SignalPropagationError::InfiniteLoop { visits: 101, .. }));
}

#[test]
fn ring_oscillator_as_composite_fails_init() {
    let mut circuit = Circuit::new();
    let mut wires = ConnectionManager::new();
    let ring = RingOscillator::build(&mut circuit, &mut wires);
    let composite = circuit
        .add_composite(ring.chain.in_bus, ring.chain.out_bus)
        .unwrap();

    let mut sim = Simulator::default();
    let err = sim.init(&mut circuit, composite).unwrap_err();
    assert!(matches!(err, SimulationError::Propagation(_)));

    // The composite is marked initialized before the failing pass.
    let state = circuit.element(composite).unwrap().as_composite().unwrap();
    assert!(state.is_initialized());
}

#[test]
fn chain_inside_a_larger_circuit_drives_downstream() {
    let mut circuit = Circuit::new();
    let mut wires = ConnectionManager::new();
    let chain = InverterChain::build(&mut circuit, &mut wires);
    let inverter = circuit.add_composite(chain.in_bus, chain.out_bus).unwrap();
    let xor = circuit.add_gate(Box::new(XorGate)).unwrap();
    link(&mut circuit, &mut wires, (inverter, 0), (xor, 0));

    let mut sim = Simulator::default();
    sim.init(&mut circuit, xor).unwrap();
    sim.init(&mut circuit, inverter).unwrap();
    let xor_out = circuit.output(xor, 0).unwrap();
    // inverter(false) = true, xor(true, false) = true
    assert!(value(&circuit, xor_out));

    sim.drive(&mut circuit, xor, 1, true).unwrap();
    assert!(!value(&circuit, xor_out));
    sim.drive(&mut circuit, inverter, 0, true).unwrap();
    assert!(value(&circuit, xor_out));
}

#[test]
fn composite_init_skips_gates_off_the_input_path() {
    // in_bus(1) → AND.in0, CONST(true) → AND.in1, AND → out_bus(1).
    let mut circuit = Circuit::<bool>::new();
    let mut wires = ConnectionManager::new();
    let in_bus = circuit.add_bus(1).unwrap();
    let constant = circuit.add_gate(Box::new(ConstGate { value: true })).unwrap();
    let and = circuit.add_and(2).unwrap();
    let out_bus = circuit.add_bus(1).unwrap();
    link(&mut circuit, &mut wires, (in_bus, 0), (and, 0));
    link(&mut circuit, &mut wires, (constant, 0), (and, 1));
    link(&mut circuit, &mut wires, (and, 0), (out_bus, 0));
    let gated = circuit.add_composite(in_bus, out_bus).unwrap();
    let out = circuit.output(gated, 0).unwrap();
    let mut sim = Simulator::default();

    // The first drive initializes the composite, but the reset walk starts
    // at the composite inputs and never reaches the constant.
    sim.drive(&mut circuit, gated, 0, true).unwrap();
    assert!(!value(&circuit, out));
    let const_out = circuit.output(constant, 0).unwrap();
    assert!(!value(&circuit, const_out));

    // Settling the constant on its own closes the gap.
    sim.init(&mut circuit, constant).unwrap();
    let affected = sim.propagate(&mut circuit, &[const_out]).unwrap();
    assert!(affected.contains(&out));
    assert!(value(&circuit, out));
}

/// Gate recipes: kind (0 = AND, 1 = OR, else NOT) and two source picks.
type GateRecipe = (u8, proptest::sample::Index, proptest::sample::Index);

/// A primary input bus feeding a random feed-forward network of gates.
fn acyclic(width: usize, gates: &[GateRecipe]) -> (Circuit<bool>, ElementId) {
    let mut circuit = Circuit::new();
    let mut wires = ConnectionManager::new();
    let bus = circuit.add_bus(width).unwrap();
    let mut sources: Vec<PortId> = circuit.element(bus).unwrap().outputs().to_vec();

    for (kind, a, b) in gates {
        let element = match kind {
            0 => circuit.add_and(2).unwrap(),
            1 => circuit.add_or(2).unwrap(),
            _ => circuit.add_not(),
        };
        let inputs = circuit.element(element).unwrap().inputs().to_vec();
        for (input, pick) in inputs.into_iter().zip([a, b]) {
            let source = *pick.get(&sources);
            wires.connect(&mut circuit, source, input).unwrap();
        }
        sources.extend_from_slice(circuit.element(element).unwrap().outputs());
    }
    (circuit, bus)
}

fn drive_bus(circuit: &mut Circuit<bool>, bus: ElementId, values: &[bool]) -> Vec<PortId> {
    let inputs = circuit.element(bus).unwrap().inputs().to_vec();
    for (&port, &v) in inputs.iter().zip(values) {
        circuit.set_value(port, v).unwrap();
    }
    inputs
}

fn values(circuit: &Circuit<bool>) -> Vec<bool> {
    circuit.ports().map(|(_, p)| *p.value()).collect()
}

fn simulator(seed: u64) -> Simulator {
    Simulator::new(PropagatorConfig {
        visit_limit: 10_000,
        seed,
        order: TargetOrder::Shuffled,
    })
    .unwrap()
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn settled_values_do_not_depend_on_seed(
            first in proptest::collection::vec(any::<bool>(), 1..5),
            flips in proptest::collection::vec(any::<bool>(), 5),
            gates in proptest::collection::vec((0u8..3, any::<proptest::sample::Index>(), any::<proptest::sample::Index>()), 1..12),
            seeds in (any::<u64>(), any::<u64>()),
        ) {
            let width = first.len();
            let (mut c1, bus1) = acyclic(width, &gates);
            let (mut c2, bus2) = acyclic(width, &gates);
            let (mut s1, mut s2) = (simulator(seeds.0), simulator(seeds.1));

            // Fresh circuit: everything reachable is visited, whatever the order.
            let start = drive_bus(&mut c1, bus1, &first);
            let mut a1: Vec<PortId> = s1.propagate(&mut c1, &start).unwrap().into_iter().collect();
            let start = drive_bus(&mut c2, bus2, &first);
            let mut a2: Vec<PortId> = s2.propagate(&mut c2, &start).unwrap().into_iter().collect();
            a1.sort();
            a2.sort();
            prop_assert_eq!(a1, a2);
            prop_assert_eq!(values(&c1), values(&c2));

            // Second pass: glitches may differ, settled values may not.
            let second: Vec<bool> = first.iter().zip(&flips).map(|(v, f)| v ^ f).collect();
            let before = values(&c1);
            let start = drive_bus(&mut c1, bus1, &second);
            let a1 = s1.propagate(&mut c1, &start).unwrap();
            let start = drive_bus(&mut c2, bus2, &second);
            let a2 = s2.propagate(&mut c2, &start).unwrap();
            let after = values(&c1);
            prop_assert_eq!(&after, &values(&c2));

            for (i, (old, new)) in before.iter().zip(&after).enumerate() {
                if old != new {
                    let port = PortId(i as u32);
                    prop_assert!(a1.contains(&port) && a2.contains(&port), "{} changed but was not reported", port);
                }
            }
        }
    }
}
