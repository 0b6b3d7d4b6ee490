//! Forward signal propagation with loop detection.

use gatework_circuit::Circuit;
use gatework_core::{PortId, Signal, SignalPropagationError};
use indexmap::{IndexMap, IndexSet};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, PropagatorConfig, TargetOrder};

/// Drives port-level propagation until the circuit settles.
///
/// Each call walks a worklist of ports. When the worklist holds more than
/// one port it is shuffled (see [`TargetOrder`]) and split in half: the
/// first half is propagated now and the ports they report are queued
/// ahead of the deferred second half. This interleaving lets symmetric
/// feedback circuits break their symmetry and settle.
///
/// Every time a port is visited while dirty its counter goes up. A
/// counter that passes [`PropagatorConfig::visit_limit`] aborts the call
/// with [`SignalPropagationError::InfiniteLoop`]. Counters start from zero
/// on every call, so a failed call does not affect the next one.
///
/// # Examples
///
/// ```
/// use gatework_circuit::{Circuit, ConnectionManager};
/// use gatework_propagator::SignalPropagator;
///
/// let mut circuit = Circuit::<bool>::new();
/// let mut wires = ConnectionManager::new();
/// let a = circuit.add_not();
/// let b = circuit.add_not();
/// let (a_out, b_in) = (circuit.output(a, 0).unwrap(), circuit.input(b, 0).unwrap());
/// wires.connect(&mut circuit, a_out, b_in).unwrap();
///
/// let mut propagator = SignalPropagator::default();
/// let a_in = circuit.input(a, 0).unwrap();
/// propagator.propagate(&mut circuit, &[a_in]).unwrap();
///
/// let b_out = circuit.output(b, 0).unwrap();
/// assert_eq!(circuit.value(b_out), Some(&false));
/// ```
#[derive(Clone, Debug)]
pub struct SignalPropagator {
    config: PropagatorConfig,
    rng: ChaCha8Rng,
}

impl SignalPropagator {
    /// Create a propagator from a validated config.
    pub fn new(config: PropagatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    /// The active configuration.
    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    /// Push pending changes out from `targets` until nothing is dirty.
    ///
    /// Returns every port that was visited while dirty, in first-visit
    /// order. On error, ports already updated keep their new values.
    pub fn propagate<V: Signal>(
        &mut self,
        circuit: &mut Circuit<V>,
        targets: &[PortId],
    ) -> Result<IndexSet<PortId>, SignalPropagationError> {
        let mut pass = Pass::new(self.config.visit_limit);
        let mut targets: Vec<PortId> = targets.to_vec();

        while !targets.is_empty() {
            if let [single] = targets[..] {
                targets = pass.visit(circuit, single)?;
                continue;
            }

            if self.config.order == TargetOrder::Shuffled {
                targets.shuffle(&mut self.rng);
            }
            let deferred = targets.split_off(targets.len().div_ceil(2));

            let mut next = Vec::with_capacity(targets.len() + deferred.len());
            for target in targets {
                next.extend(pass.visit(circuit, target)?);
            }
            next.extend(deferred);
            targets = next;
        }

        tracing::trace!(affected = pass.visited.len(), "signal propagation settled");
        Ok(pass.visited)
    }
}

impl Default for SignalPropagator {
    fn default() -> Self {
        let config = PropagatorConfig::default();
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }
}

/// Per-call bookkeeping.
struct Pass {
    limit: u32,
    visits: IndexMap<PortId, u32>,
    visited: IndexSet<PortId>,
}

impl Pass {
    fn new(limit: u32) -> Self {
        Self {
            limit,
            visits: IndexMap::new(),
            visited: IndexSet::new(),
        }
    }

    fn visit<V: Signal>(
        &mut self,
        circuit: &mut Circuit<V>,
        port: PortId,
    ) -> Result<Vec<PortId>, SignalPropagationError> {
        if circuit.is_dirty(port) == Some(true) {
            let visits = self.visits.entry(port).or_insert(0);
            *visits += 1;
            if *visits > self.limit {
                tracing::warn!(%port, visits = *visits, "visit limit exceeded");
                return Err(SignalPropagationError::InfiniteLoop {
                    port,
                    visits: *visits,
                });
            }
            self.visited.insert(port);
        }
        Ok(circuit.propagate_port(port).into_vec())
    }
}
