//! NOR-based RS latch: initial state and operation sequences.

use gatework_circuit::{Circuit, ConnectionManager};
use gatework_core::ElementId;
use gatework_elements::CompositeFactory;
use gatework_propagator::{PropagatorConfig, Simulator};
use gatework_test_utils::output_values;

const R: usize = 0;
const S: usize = 1;
const T: bool = true;
const F: bool = false;

/// (input index, value, expected Q, expected !Q)
type Op = (usize, bool, bool, bool);

fn latch(seed: u64) -> (Circuit<bool>, ElementId, Simulator) {
    let mut circuit = Circuit::new();
    let mut wires = ConnectionManager::new();
    let rs = CompositeFactory::new(&mut circuit, &mut wires)
        .rs_trigger_nor()
        .unwrap();
    let mut sim = Simulator::new(PropagatorConfig::with_seed(seed)).unwrap();
    sim.init(&mut circuit, rs).unwrap();
    (circuit, rs, sim)
}

fn run(ops: &[Op]) {
    for seed in 0..64 {
        let (mut circuit, rs, mut sim) = latch(seed);
        for (step, &(index, value, q, q_bar)) in ops.iter().enumerate() {
            sim.drive(&mut circuit, rs, index, value).unwrap();
            assert_eq!(
                output_values(&circuit, rs),
                vec![q, q_bar],
                "seed {seed}, step {step}: input {index} <- {value}"
            );
        }
    }
}

#[test]
fn init_settles_to_a_valid_state() {
    for seed in 0..16 {
        let (circuit, rs, _) = latch(seed);
        let out = output_values(&circuit, rs);
        assert_ne!(out[0], out[1], "seed {seed}");
    }
}

#[test]
fn reset_then_hold() {
    run(&[
        (R, T, F, T),
        (R, F, F, T),
        (S, T, T, F),
        (S, F, T, F),
        (R, T, F, T),
        (R, F, F, T),
        (R, T, F, T),
        (R, F, F, T),
    ]);
}

#[test]
fn set_then_hold() {
    run(&[
        (S, T, T, F),
        (S, F, T, F),
        (R, T, F, T),
        (R, F, F, T),
        (S, T, T, F),
        (S, F, T, F),
        (S, T, T, F),
        (S, F, T, F),
    ]);
}

#[test]
fn forbidden_state_after_reset() {
    run(&[
        (R, T, F, T),
        (S, T, F, F),
        (S, F, F, T),
        (R, F, F, T),
        (S, T, T, F),
    ]);
}

#[test]
fn forbidden_state_after_set() {
    run(&[
        (S, T, T, F),
        (R, T, F, F),
        (R, F, T, F),
        (S, F, T, F),
        (R, T, F, T),
    ]);
}

#[test]
fn reinit_keeps_the_stored_bit() {
    let (mut circuit, rs, mut sim) = latch(3);
    sim.drive(&mut circuit, rs, S, T).unwrap();
    sim.drive(&mut circuit, rs, S, F).unwrap();
    let before = output_values(&circuit, rs);
    sim.init(&mut circuit, rs).unwrap();
    assert_eq!(output_values(&circuit, rs), before);
    assert_eq!(before, vec![T, F]);
}
