//! Error types.

use thiserror::Error;

use crate::wire::{Port, Wire};

/// Propagation re-derived a wire that already held a value.
///
/// A combinational circuit evaluated from scratch never does that, so the circuit
/// contains a cycle through `wire`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("cycle detected: wire {wire} was derived twice")]
pub struct CycleError {
    pub wire: Wire,
}

/// Violation of the structural invariants of a circuit.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CircuitError {
    #[error("wire {wire} is driven by more than one gate")]
    DuplicateDriver { wire: Wire },
    #[error("primary input {wire} is driven by a gate")]
    DrivenInput { wire: Wire },
    #[error("gate '{gate}' reads undefined wire {wire}")]
    UndefinedWire { gate: String, wire: Wire },
    #[error("no gate drives wire {wire}")]
    UnknownWire { wire: Wire },
    #[error("bit {index} of port {port} is spelled both {} and {}", .wires.0, .wires.1)]
    DuplicatePort { port: Port, index: usize, wires: (Wire, Wire) },
}

/// Failure of a full evaluation.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error("output wire {wire} was never resolved")]
    Unresolved { wire: Wire },
}

/// Unrecoverable outcome of the repair search.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RepairError {
    #[error("bit {bit}: {source}")]
    Cycle { bit: usize, source: CycleError },
    #[error("bit {bit}: expected exactly one fixing swap, found {}: {candidates:?}", .candidates.len())]
    AmbiguousFix { bit: usize, candidates: Vec<(Wire, Wire)> },
    #[error("bit {bit}: expected exactly one carry wire, found {}: {candidates:?}", .candidates.len())]
    AmbiguousCarry { bit: usize, candidates: Vec<Wire> },
    #[error("bit {bit}: circuit has no {port} wire for this bit")]
    MissingPort { port: Port, bit: usize },
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

/// Malformed circuit description.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number, or 0 when unknown.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn at_line(self, line: usize) -> Self {
        Self { line, ..self }
    }
}
