//! Worklist evaluation of a [`CircuitGraph`].
//!
//! Evaluation starts from a partial [`Assignment`] and fires every gate whose inputs are both
//! resolved, until nothing changes. Wires outside the region reachable from the seeds stay
//! unresolved, which is how the repair search probes a single adder bit.
//!
//! Every wire receives at most one value per evaluation. A gate that would write an
//! already-resolved wire closes a cycle, and the evaluation fails with [`CycleError`].
//!
//! # Examples
//!
//! ```
//! use adder_rs::circuit::CircuitGraph;
//! use adder_rs::eval::Assignment;
//! use adder_rs::gate::Gate;
//!
//! let circuit = CircuitGraph::new(vec![
//!     Gate::xor("x00", "y00", "z00"),
//!     Gate::and("x00", "y00", "z01"),
//! ])
//! .unwrap();
//!
//! let values = circuit.evaluate(&Assignment::from_iter([("x00", true), ("y00", true)])).unwrap();
//! assert_eq!(values.get("z00"), Some(false));
//! assert_eq!(values.get("z01"), Some(true));
//! ```

use std::collections::{BTreeMap, HashSet, VecDeque};

use log::debug;
use num_bigint::BigUint;

use crate::circuit::CircuitGraph;
use crate::error::{CycleError, EvalError};
use crate::wire::{Port, Wire};

/// Values of resolved wires.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Assignment {
    values: BTreeMap<Wire, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, wire: impl AsRef<str>) -> Option<bool> {
        self.values.get(wire.as_ref()).copied()
    }

    pub fn contains(&self, wire: impl AsRef<str>) -> bool {
        self.values.contains_key(wire.as_ref())
    }

    /// Sets `wire`, returning the previous value if there was one.
    pub fn insert(&mut self, wire: impl Into<Wire>, value: bool) -> Option<bool> {
        self.values.insert(wire.into(), value)
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Wire, bool)> {
        self.values.iter().map(|(wire, &value)| (wire, value))
    }
}

impl<W: Into<Wire>> FromIterator<(W, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (W, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(wire, value)| (wire.into(), value)).collect(),
        }
    }
}

impl<W: Into<Wire>> Extend<(W, bool)> for Assignment {
    fn extend<T: IntoIterator<Item = (W, bool)>>(&mut self, iter: T) {
        for (wire, value) in iter {
            self.insert(wire, value);
        }
    }
}

impl CircuitGraph {
    /// Propagates `initial` through the circuit until fixpoint.
    ///
    /// The result contains the seeds plus every wire that could be derived from them.
    pub fn evaluate(&self, initial: &Assignment) -> Result<Assignment, CycleError> {
        let mut values = initial.clone();
        let mut queue: VecDeque<&Wire> = VecDeque::new();
        let mut queued: HashSet<&Wire> = HashSet::new();

        for wire in initial.wires() {
            for gate in self.consumers_of(wire) {
                if queued.insert(&gate.output) {
                    queue.push_back(&gate.output);
                }
            }
        }

        while let Some(output) = queue.pop_front() {
            queued.remove(output);
            let Some(gate) = self.gate(output) else {
                continue;
            };
            let Some(value) = gate.apply(|wire| values.get(wire)) else {
                // Retried once the missing input gets resolved.
                continue;
            };
            if values.contains(output) {
                debug!("evaluate: cycle through {}", output);
                return Err(CycleError { wire: output.clone() });
            }
            values.insert(output.clone(), value);
            for consumer in self.consumers_of(output) {
                if queued.insert(&consumer.output) {
                    queue.push_back(&consumer.output);
                }
            }
        }

        Ok(values)
    }

    /// Encodes the operands `x` and `y` on the `x`/`y` input wires.
    ///
    /// Bits beyond [`input_width`][CircuitGraph::input_width] are ignored.
    pub fn inputs(&self, x: &BigUint, y: &BigUint) -> Assignment {
        let mut assignment = Assignment::new();
        for i in 0..self.input_width() {
            for (port, operand) in [(Port::X, x), (Port::Y, y)] {
                if let Some(wire) = self.port(port, i) {
                    assignment.insert(wire.clone(), operand.bit(i as u64));
                }
            }
        }
        assignment
    }

    /// Assembles the `z` outputs into a number, `sum(z_i * 2^i)`.
    ///
    /// Returns `None` if some output wire is unresolved.
    pub fn output_value(&self, values: &Assignment) -> Option<BigUint> {
        let mut result = BigUint::ZERO;
        for (i, wire) in self.outputs().into_iter().enumerate() {
            if values.get(wire)? {
                result.set_bit(i as u64, true);
            }
        }
        Some(result)
    }

    /// Runs the circuit as an adder on the given operands.
    pub fn add(&self, x: &BigUint, y: &BigUint) -> Result<BigUint, EvalError> {
        let values = self.evaluate(&self.inputs(x, y))?;
        if let Some(wire) = self.outputs().into_iter().find(|wire| !values.contains(wire)) {
            return Err(EvalError::Unresolved { wire: wire.clone() });
        }
        Ok(self.output_value(&values).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::gate::Gate;

    fn half_adder() -> CircuitGraph {
        CircuitGraph::new(vec![Gate::xor("x0", "y0", "z0"), Gate::and("x0", "y0", "c")]).unwrap()
    }

    #[test]
    fn test_half_adder_truth_table() {
        let circuit = half_adder();
        for x in [false, true] {
            for y in [false, true] {
                let values = circuit.evaluate(&Assignment::from_iter([("x0", x), ("y0", y)])).unwrap();
                assert_eq!(values.get("z0"), Some(x ^ y));
                assert_eq!(values.get("c"), Some(x & y));
            }
        }
    }

    #[test]
    fn test_partial_seed_leaves_wires_unresolved() {
        let circuit = half_adder();
        let values = circuit.evaluate(&Assignment::from_iter([("x0", true)])).unwrap();
        assert_eq!(values.len(), 1);
        assert!(!values.contains("z0"));
    }

    #[test]
    fn test_assignment_extend() {
        let circuit = half_adder();
        let mut seeds = Assignment::new();
        seeds.extend([("x0", true)]);
        seeds.extend([(Wire::from("y0"), true), (Wire::from("x0"), false)]);
        assert_eq!(seeds.get("x0"), Some(false));

        let values = circuit.evaluate(&seeds).unwrap();
        let resolved: Vec<(&str, bool)> = values.iter().map(|(wire, value)| (wire.name(), value)).collect();
        assert_eq!(resolved, vec![("c", false), ("x0", false), ("y0", true), ("z0", true)]);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let circuit = half_adder();
        let seeds = Assignment::from_iter([("x0", true), ("y0", false)]);
        let first = circuit.evaluate(&seeds).unwrap();
        let second = circuit.evaluate(&seeds).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_detected() {
        let circuit = CircuitGraph::new(vec![
            Gate::xor("x00", "b", "a"),
            Gate::and("a", "y00", "b"),
            Gate::or("a", "b", "z00"),
        ])
        .unwrap();
        // Seeding `b` lets `a` fire, which lets `b` fire again.
        let seeds = Assignment::from_iter([("x00", true), ("y00", true), ("b", true)]);
        let err = circuit.evaluate(&seeds).unwrap_err();
        assert_eq!(err.wire, Wire::from("b"));
    }

    #[test]
    fn test_diamond_fires_once() {
        // `z00` is enqueued by both of its inputs, but fires only once.
        let circuit = CircuitGraph::new(vec![
            Gate::xor("x00", "y00", "a"),
            Gate::and("x00", "y00", "b"),
            Gate::or("a", "b", "z00"),
        ])
        .unwrap();
        let values = circuit.evaluate(&Assignment::from_iter([("x00", true), ("y00", false)])).unwrap();
        assert_eq!(values.get("z00"), Some(true));
    }

    #[test]
    fn test_output_value() {
        let circuit = CircuitGraph::new(vec![Gate::xor("x00", "y00", "z00"), Gate::and("x00", "y00", "z01")]).unwrap();
        let sum = circuit.add(&BigUint::from(1u32), &BigUint::from(1u32)).unwrap();
        assert_eq!(sum, BigUint::from(2u32));

        let partial = Assignment::from_iter([("z00", true)]);
        assert_eq!(circuit.output_value(&partial), None);
    }
}
