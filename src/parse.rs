//! Reader for the textual circuit description.
//!
//! # Format
//!
//! ```text
//! x00: 1          # initial wire values, one per line
//! y00: 0
//!                 # blank line
//! x00 AND y00 -> z00
//! x00 XOR y00 -> abc
//! ```
//!
//! The first section may be empty. Blank lines inside the gate section are skipped.

use crate::circuit::CircuitGraph;
use crate::error::{CircuitError, ParseError};
use crate::eval::Assignment;
use crate::gate::Gate;

/// Initial wire values plus the gate list.
#[derive(Debug, Clone, Default)]
pub struct Puzzle {
    pub initial: Assignment,
    pub gates: Vec<Gate>,
}

impl Puzzle {
    pub fn circuit(&self) -> Result<CircuitGraph, CircuitError> {
        CircuitGraph::new(self.gates.iter().cloned())
    }
}

pub fn parse_puzzle(input: &str) -> Result<Puzzle, ParseError> {
    let mut puzzle = Puzzle::default();
    let mut in_gates = false;

    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();

        if line.is_empty() {
            in_gates = true;
            continue;
        }

        // Tolerate a missing separator before the first gate.
        if !in_gates && line.contains("->") {
            in_gates = true;
        }

        if in_gates {
            let gate: Gate = line.parse().map_err(|e: ParseError| e.at_line(line_no))?;
            puzzle.gates.push(gate);
        } else {
            let (wire, value) = parse_value(line).map_err(|e| e.at_line(line_no))?;
            if puzzle.initial.insert(wire, value).is_some() {
                return Err(ParseError::new(line_no, format!("wire '{}' assigned twice", wire)));
            }
        }
    }

    Ok(puzzle)
}

fn parse_value(line: &str) -> Result<(&str, bool), ParseError> {
    let (wire, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::new(0, format!("expected 'wire: value' but got '{}'", line)))?;
    let value = match value.trim() {
        "0" => false,
        "1" => true,
        other => return Err(ParseError::new(0, format!("bad wire value '{}'", other))),
    };
    Ok((wire.trim(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    use num_bigint::BigUint;
    use test_log::test;

    const SMALL: &str = "\
x00: 1
x01: 1
x02: 1
y00: 0
y01: 1
y02: 0

x00 AND y00 -> z00
x01 XOR y01 -> z01
x02 OR y02 -> z02
";

    #[test]
    fn test_parse_small() {
        let puzzle = parse_puzzle(SMALL).unwrap();
        assert_eq!(puzzle.initial.len(), 6);
        assert_eq!(puzzle.initial.get("x02"), Some(true));
        assert_eq!(puzzle.initial.get("y02"), Some(false));
        assert_eq!(puzzle.gates.len(), 3);
        assert_eq!(puzzle.gates[1], Gate::xor("x01", "y01", "z01"));
    }

    #[test]
    fn test_evaluate_small() {
        let puzzle = parse_puzzle(SMALL).unwrap();
        let circuit = puzzle.circuit().unwrap();
        let values = circuit.evaluate(&puzzle.initial).unwrap();
        assert_eq!(circuit.output_value(&values), Some(BigUint::from(4u32)));
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_puzzle("x00: 2\n").unwrap_err();
        assert_eq!(err.line, 1);

        let err = parse_puzzle("x00: 1\n\nx00 NAND y00 -> z00\n").unwrap_err();
        assert_eq!(err.line, 3);

        let err = parse_puzzle("x00: 1\nx00: 0\n").unwrap_err();
        assert_eq!(err.line, 2);

        let err = parse_puzzle("x00 1\n").unwrap_err();
        assert_eq!(err.line, 1);
    }
}
