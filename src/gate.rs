use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ParseError;
use crate::wire::Wire;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateOp {
    And,
    Or,
    Xor,
}

impl GateOp {
    pub const fn apply(self, a: bool, b: bool) -> bool {
        match self {
            GateOp::And => a & b,
            GateOp::Or => a | b,
            GateOp::Xor => a ^ b,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GateOp::And => "AND",
            GateOp::Or => "OR",
            GateOp::Xor => "XOR",
        }
    }
}

impl Display for GateOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GateOp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(GateOp::And),
            "OR" => Ok(GateOp::Or),
            "XOR" => Ok(GateOp::Xor),
            _ => Err(ParseError::new(0, format!("unknown gate operation '{}'", s))),
        }
    }
}

/// A two-input gate driving a single named wire.
///
/// A gate is identified by its output wire. Swapping outputs between gates relabels them,
/// the operation and inputs stay untouched.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Gate {
    pub inputs: [Wire; 2],
    pub op: GateOp,
    pub output: Wire,
}

// Constructors
impl Gate {
    pub fn new(a: impl Into<Wire>, op: GateOp, b: impl Into<Wire>, output: impl Into<Wire>) -> Gate {
        Gate {
            inputs: [a.into(), b.into()],
            op,
            output: output.into(),
        }
    }

    pub fn and(a: impl Into<Wire>, b: impl Into<Wire>, output: impl Into<Wire>) -> Gate {
        Gate::new(a, GateOp::And, b, output)
    }

    pub fn or(a: impl Into<Wire>, b: impl Into<Wire>, output: impl Into<Wire>) -> Gate {
        Gate::new(a, GateOp::Or, b, output)
    }

    pub fn xor(a: impl Into<Wire>, b: impl Into<Wire>, output: impl Into<Wire>) -> Gate {
        Gate::new(a, GateOp::Xor, b, output)
    }
}

impl Gate {
    pub fn inputs(&self) -> &[Wire] {
        &self.inputs
    }

    /// Computes the output from the input values, if both are known.
    pub fn apply(&self, lookup: impl Fn(&Wire) -> Option<bool>) -> Option<bool> {
        let a = lookup(&self.inputs[0])?;
        let b = lookup(&self.inputs[1])?;
        Some(self.op.apply(a, b))
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} -> {}", self.inputs[0], self.op, self.inputs[1], self.output)
    }
}

impl FromStr for Gate {
    type Err = ParseError;

    /// Parses `a OP b -> out`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lhs, output) = s
            .split_once("->")
            .ok_or_else(|| ParseError::new(0, format!("missing '->' in '{}'", s)))?;
        let parts: Vec<&str> = lhs.split_whitespace().collect();
        let [a, op, b] = parts[..] else {
            return Err(ParseError::new(0, format!("expected 'a OP b' but got '{}'", lhs.trim())));
        };
        let output = output.trim();
        if output.is_empty() || output.contains(char::is_whitespace) {
            return Err(ParseError::new(0, format!("bad output wire '{}'", output)));
        }
        Ok(Gate::new(a, op.parse()?, b, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_ops() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(GateOp::And.apply(a, b), a && b);
                assert_eq!(GateOp::Or.apply(a, b), a || b);
                assert_eq!(GateOp::Xor.apply(a, b), a != b);
            }
        }
    }

    #[test]
    fn test_gate_apply_waits_for_both_inputs() {
        let gate = Gate::xor("x00", "y00", "z00");
        assert_eq!(gate.apply(|w| (w.name() == "x00").then_some(true)), None);
        assert_eq!(gate.apply(|_| Some(true)), Some(false));
        assert_eq!(gate.inputs(), &[Wire::from("x00"), Wire::from("y00")]);
    }

    #[test]
    fn test_gate_parse() {
        let gate: Gate = "ntg XOR fgs -> mjb".parse().unwrap();
        assert_eq!(gate, Gate::xor("ntg", "fgs", "mjb"));
        assert_eq!(gate.to_string(), "ntg XOR fgs -> mjb");

        let gate: Gate = "y02 OR x01 -> tnw".parse().unwrap();
        assert_eq!(gate.op, GateOp::Or);

        assert!("a NAND b -> c".parse::<Gate>().is_err());
        assert!("a AND b c".parse::<Gate>().is_err());
        assert!("a AND -> c".parse::<Gate>().is_err());
    }
}
