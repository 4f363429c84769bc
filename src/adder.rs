//! What a correct ripple-carry adder bit computes.
//!
//! Bit `i` of an adder is a full adder over `x_i`, `y_i` and the carry coming out of bit `i-1`:
//!
//! ```text
//! z_i       = x_i XOR y_i XOR carry_in
//! carry_out = MAJ(x_i, y_i, carry_in)
//! ```
//!
//! Bit 0 has no carry-in, so its truth table has 4 rows instead of 8.

use crate::gate::Gate;
use crate::wire::Wire;

pub const fn expected_sum(x: bool, y: bool, carry_in: bool) -> bool {
    x ^ y ^ carry_in
}

/// Majority: at least two of the three bits are set.
pub const fn expected_carry(x: bool, y: bool, carry_in: bool) -> bool {
    (x & y) | (x & carry_in) | (y & carry_in)
}

/// One row of the full-adder truth table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TruthRow {
    pub x: bool,
    pub y: bool,
    pub carry_in: bool,
}

impl TruthRow {
    pub const fn sum(&self) -> bool {
        expected_sum(self.x, self.y, self.carry_in)
    }

    pub const fn carry(&self) -> bool {
        expected_carry(self.x, self.y, self.carry_in)
    }
}

/// All input combinations for one adder bit.
///
/// With `has_carry_in == false` the carry-in is fixed at 0.
pub fn truth_table(has_carry_in: bool) -> Vec<TruthRow> {
    let carries: &[bool] = if has_carry_in { &[false, true] } else { &[false] };
    let mut rows = Vec::with_capacity(carries.len() * 4);
    for &carry_in in carries {
        for x in [false, true] {
            for y in [false, true] {
                rows.push(TruthRow { x, y, carry_in });
            }
        }
    }
    rows
}

/// Builds a correct `bits`-wide ripple-carry adder.
///
/// Bit 0 is a half adder, every other bit a five-gate full adder. The carry out of the top
/// bit drives `z<bits>`, so the circuit has `bits + 1` outputs. Internal wires are named
/// `s<i>` (partial sum), `a<i>`, `p<i>` (carry terms) and `c<i>` (carry out).
pub fn ripple_carry(bits: usize) -> Vec<Gate> {
    let name = |prefix: char, i: usize| Wire::new(format!("{}{:02}", prefix, i));
    let carry = |i: usize| {
        if i + 1 == bits {
            Wire::z(bits)
        } else {
            name('c', i)
        }
    };

    let mut gates = Vec::new();
    for i in 0..bits {
        if i == 0 {
            gates.push(Gate::xor(Wire::x(0), Wire::y(0), Wire::z(0)));
            gates.push(Gate::and(Wire::x(0), Wire::y(0), carry(0)));
            continue;
        }
        let carry_in = name('c', i - 1);
        gates.push(Gate::xor(Wire::x(i), Wire::y(i), name('s', i)));
        gates.push(Gate::xor(name('s', i), carry_in.clone(), Wire::z(i)));
        gates.push(Gate::and(Wire::x(i), Wire::y(i), name('a', i)));
        gates.push(Gate::and(name('s', i), carry_in, name('p', i)));
        gates.push(Gate::or(name('a', i), name('p', i), carry(i)));
    }
    gates
}
