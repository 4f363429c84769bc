//! Circuit to DOT (Graphviz) conversion.
//!
//! # DOT Format
//!
//! - **Primary inputs** (`x<i>`, `y<i>`) are rendered at the top (source rank),
//!   **primary outputs** (`z<i>`) at the bottom (sink rank).
//! - **Gates** are nodes named after the wire they drive, labeled with their operation.
//! - **Edges** go from each input wire to the gate reading it.
//! - **Highlighted** wires (typically the ones touched by a repair) are filled.
//!
//! # Examples
//!
//! ```
//! use adder_rs::adder::ripple_carry;
//! use adder_rs::circuit::CircuitGraph;
//! use adder_rs::wire::Wire;
//!
//! let circuit = CircuitGraph::new(ripple_carry(2)).unwrap();
//! let dot = circuit.to_dot(&[Wire::z(1)]).unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Render with: dot -Tsvg circuit.dot -o circuit.svg
//! ```

use std::collections::BTreeSet;

use crate::circuit::CircuitGraph;
use crate::gate::GateOp;
use crate::wire::Wire;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for primary inputs (default: "circle")
    pub input_shape: &'static str,
    /// Shape for gates (default: "box")
    pub gate_shape: &'static str,
    /// Shape for gates driving a primary output (default: "doublecircle")
    pub output_shape: &'static str,
    /// Fill color for highlighted wires (default: "salmon")
    pub highlight_color: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            input_shape: "circle",
            gate_shape: "box",
            output_shape: "doublecircle",
            highlight_color: "salmon",
        }
    }
}

fn op_color(op: GateOp) -> &'static str {
    match op {
        GateOp::And => "lightblue",
        GateOp::Or => "lightgreen",
        GateOp::Xor => "khaki",
    }
}

impl CircuitGraph {
    pub fn to_dot(&self, highlight: &[Wire]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(highlight, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, highlight: &[Wire], config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let highlight: BTreeSet<&Wire> = highlight.iter().collect();
        let inputs: BTreeSet<&Wire> = self
            .gates()
            .flat_map(|gate| gate.inputs())
            .filter(|wire| wire.is_primary_input())
            .collect();

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir=TB;")?;

        writeln!(dot, "{{ rank=source")?;
        for wire in inputs.iter() {
            writeln!(dot, "\"{}\" [shape={}];", wire, config.input_shape)?;
        }
        writeln!(dot, "}}")?;

        let mut outputs = Vec::new();
        for gate in self.gates() {
            let shape = if gate.output.is_primary_output() {
                outputs.push(&gate.output);
                config.output_shape
            } else {
                config.gate_shape
            };
            let color = if highlight.contains(&gate.output) {
                config.highlight_color
            } else {
                op_color(gate.op)
            };
            writeln!(
                dot,
                "\"{}\" [shape={}, style=filled, fillcolor={}, label=\"{}\\n{}\"];",
                gate.output, shape, color, gate.output, gate.op
            )?;
        }

        writeln!(dot, "{{ rank=sink")?;
        for wire in outputs {
            writeln!(dot, "\"{}\";", wire)?;
        }
        writeln!(dot, "}}")?;

        for gate in self.gates() {
            for input in gate.inputs() {
                writeln!(dot, "\"{}\" -> \"{}\";", input, gate.output)?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
