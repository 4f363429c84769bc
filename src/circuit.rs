use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use crate::error::CircuitError;
use crate::gate::Gate;
use crate::wire::{Port, Wire};

/// A combinational network of two-input gates.
///
/// Gates are keyed by the wire they drive. The consumer index (`wire -> gates reading it`)
/// is derived from the gates and rebuilt after every [`swap`][CircuitGraph::swap].
#[derive(Debug, Clone)]
pub struct CircuitGraph {
    gates: BTreeMap<Wire, Gate>,
    consumers: HashMap<Wire, BTreeSet<Wire>>,
    ports: HashMap<(Port, usize), Wire>,
}

impl CircuitGraph {
    pub fn new(gates: impl IntoIterator<Item = Gate>) -> Result<Self, CircuitError> {
        let mut by_output = BTreeMap::new();
        for gate in gates {
            if gate.output.is_primary_input() {
                return Err(CircuitError::DrivenInput { wire: gate.output });
            }
            if by_output.contains_key(&gate.output) {
                return Err(CircuitError::DuplicateDriver { wire: gate.output });
            }
            by_output.insert(gate.output.clone(), gate);
        }

        for gate in by_output.values() {
            for input in gate.inputs() {
                if !input.is_primary_input() && !by_output.contains_key(input) {
                    return Err(CircuitError::UndefinedWire {
                        gate: gate.to_string(),
                        wire: input.clone(),
                    });
                }
            }
        }

        let mut ports: HashMap<(Port, usize), Wire> = HashMap::new();
        for gate in by_output.values() {
            for wire in gate.inputs().iter().chain(std::iter::once(&gate.output)) {
                let Some((port, index)) = wire.primary() else {
                    continue;
                };
                match ports.get(&(port, index)) {
                    Some(known) if known != wire => {
                        return Err(CircuitError::DuplicatePort {
                            port,
                            index,
                            wires: (known.clone(), wire.clone()),
                        });
                    }
                    Some(_) => {}
                    None => {
                        ports.insert((port, index), wire.clone());
                    }
                }
            }
        }

        let mut circuit = Self {
            gates: by_output,
            consumers: HashMap::new(),
            ports,
        };
        circuit.rebuild_consumers();
        debug!("circuit: {} gates, {} ports", circuit.gates.len(), circuit.ports.len());
        Ok(circuit)
    }

    fn rebuild_consumers(&mut self) {
        self.consumers.clear();
        for (output, gate) in self.gates.iter() {
            for input in gate.inputs() {
                self.consumers.entry(input.clone()).or_default().insert(output.clone());
            }
        }
    }
}

// Getters
impl CircuitGraph {
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The gate driving `wire`, if any.
    pub fn gate(&self, wire: &Wire) -> Option<&Gate> {
        self.gates.get(wire)
    }

    /// All gates, ordered by output wire.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.values()
    }

    /// All gate-driven wires, ordered by name.
    pub fn driven_wires(&self) -> impl Iterator<Item = &Wire> {
        self.gates.keys()
    }

    /// Gates that read `wire` as one of their inputs.
    pub fn consumers_of<'a>(&'a self, wire: &Wire) -> impl Iterator<Item = &'a Gate> + 'a {
        self.consumers
            .get(wire)
            .into_iter()
            .flatten()
            .filter_map(|output| self.gates.get(output))
    }

    /// The wire of the given family and bit, as named in this circuit.
    pub fn port(&self, port: Port, index: usize) -> Option<&Wire> {
        self.ports.get(&(port, index))
    }

    /// Number of consecutive low bits that have both an `x` and a `y` input.
    pub fn input_width(&self) -> usize {
        (0..)
            .take_while(|&i| self.port(Port::X, i).is_some() && self.port(Port::Y, i).is_some())
            .count()
    }

    /// The `z` wires, ordered by bit index.
    pub fn outputs(&self) -> Vec<&Wire> {
        let mut outputs: Vec<(usize, &Wire)> = self
            .ports
            .iter()
            .filter(|((port, _), _)| *port == Port::Z)
            .map(|((_, index), wire)| (*index, wire))
            .collect();
        outputs.sort();
        outputs.into_iter().map(|(_, wire)| wire).collect()
    }
}

// Mutation
impl CircuitGraph {
    /// Exchanges the drivers of `a` and `b`.
    ///
    /// The gate that drove `a` now drives `b` and vice versa. Swapping the same pair twice
    /// restores the original circuit.
    pub fn swap(&mut self, a: &Wire, b: &Wire) -> Result<(), CircuitError> {
        for wire in [a, b] {
            if !self.gates.contains_key(wire) {
                return Err(CircuitError::UnknownWire { wire: wire.clone() });
            }
        }
        if a == b {
            return Ok(());
        }

        debug!("swap({}, {})", a, b);
        let mut gate_a = self.gates.remove(a).ok_or_else(|| CircuitError::UnknownWire { wire: a.clone() })?;
        let mut gate_b = self.gates.remove(b).ok_or_else(|| CircuitError::UnknownWire { wire: b.clone() })?;
        std::mem::swap(&mut gate_a.output, &mut gate_b.output);
        self.gates.insert(gate_a.output.clone(), gate_a);
        self.gates.insert(gate_b.output.clone(), gate_b);
        self.rebuild_consumers();
        Ok(())
    }
}
