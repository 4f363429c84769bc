//! # adder-rs: simulate and repair ripple-carry adders
//!
//! **`adder-rs`** evaluates networks of two-input boolean gates (AND, OR, XOR) wired as a binary
//! ripple-carry adder, checks every bit against the full-adder truth table, and repairs a miswired
//! adder by finding the pairs of gates whose outputs were swapped.
//!
//! ## Wires and gates
//!
//! Every signal is a named [`Wire`][crate::wire::Wire]. Wires `x<i>` and `y<i>` carry bit `i` of
//! the two operands, `z<i>` carries bit `i` of the sum, and every other wire is internal. Each
//! non-input wire is driven by exactly one [`Gate`][crate::gate::Gate].
//!
//! ## Basic Usage
//!
//! ```rust
//! use adder_rs::adder::ripple_carry;
//! use adder_rs::circuit::CircuitGraph;
//! use adder_rs::repair::Repair;
//! use adder_rs::wire::Wire;
//! use num_bigint::BigUint;
//!
//! // 1. Build a correct 8-bit adder
//! let mut circuit = CircuitGraph::new(ripple_carry(8)).unwrap();
//!
//! // 2. Use it
//! let sum = circuit.add(&BigUint::from(100u32), &BigUint::from(55u32)).unwrap();
//! assert_eq!(sum, BigUint::from(155u32));
//!
//! // 3. Break it: exchange the drivers of two wires
//! circuit.swap(&Wire::z(5), &Wire::new("c05")).unwrap();
//!
//! // 4. Repair it
//! let report = Repair::new(&mut circuit).run().unwrap();
//! assert_eq!(report.answer(), "c05,z05");
//! ```
//!
//! ## Core Components
//!
//! - **[`circuit`]**: the gate network, its consumer index and wire swaps.
//! - **[`eval`]**: worklist evaluation with cycle detection.
//! - **[`adder`]**: the full-adder truth table and a reference adder builder.
//! - **[`repair`]**: the bit-by-bit swap search.
//! - **[`parse`]** and **[`dot`]**: reading circuits from text and rendering them with Graphviz.

pub mod adder;
pub mod circuit;
pub mod dot;
pub mod error;
pub mod eval;
pub mod gate;
pub mod parse;
pub mod repair;
pub mod wire;
