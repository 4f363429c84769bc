//! Bit-by-bit repair of a miswired ripple-carry adder.
//!
//! The repair walks the adder from the least significant bit upwards, carrying forward the
//! name of the wire that holds the carry out of the previous bit. For every bit `i`:
//!
//! 1. **Verify.** Seed `x_i`, `y_i` and the incoming carry with every row of the full-adder
//!    truth table and check that `z_i` comes out as `x_i ^ y_i ^ carry_in`. A cycle counts as
//!    a failure. At the top bit, `z_{i+1}` must also equal the carry out.
//! 2. **Cone.** Seed the same three wires with ones; every wire that gets resolved, apart from
//!    the seeds, is downstream of this bit.
//! 3. **Search.** Try swapping every pair `(a, b)` of eligible wires with `a` in the cone.
//!    Each swap is speculative: it is verified and then reverted. Exactly one pair must pass.
//! 4. **Commit.** Apply the passing swap for good.
//! 5. **Carry.** Among the internal wires of the (fixed) cone, exactly one must behave like
//!    `MAJ(x_i, y_i, carry_in)` on every row; it becomes the carry-in of bit `i+1`.
//!
//! Wires in the cone of a verified bit are retired from the pool of swap candidates: a wire
//! that correctly computes bit `i` can never be part of the fix of bit `i+1`.
//!
//! The search never backtracks. Zero or several passing swaps for the same bit abort the repair
//! with [`RepairError::AmbiguousFix`], since picking one would be a guess.
//!
//! # Examples
//!
//! ```
//! use adder_rs::adder::ripple_carry;
//! use adder_rs::circuit::CircuitGraph;
//! use adder_rs::repair::Repair;
//! use adder_rs::wire::Wire;
//!
//! let mut circuit = CircuitGraph::new(ripple_carry(4)).unwrap();
//! circuit.swap(&Wire::z(2), &Wire::new("a02")).unwrap();
//!
//! let report = Repair::new(&mut circuit).run().unwrap();
//! assert_eq!(report.defective_bits, vec![2]);
//! assert_eq!(report.answer(), "a02,z02");
//! ```

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use log::{debug, info, trace};

use crate::adder::{truth_table, TruthRow};
use crate::circuit::CircuitGraph;
use crate::error::{CycleError, RepairError};
use crate::eval::Assignment;
use crate::wire::{Port, Wire};

/// An unordered pair of wires whose drivers were exchanged.
///
/// Stored normalized, with `a <= b`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SwapRecord {
    pub a: Wire,
    pub b: Wire,
}

impl SwapRecord {
    pub fn new(a: Wire, b: Wire) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    pub fn wires(&self) -> [&Wire; 2] {
        [&self.a, &self.b]
    }
}

impl Display for SwapRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct RepairReport {
    /// Committed swaps, in the order they were applied.
    pub swaps: Vec<SwapRecord>,
    /// Bits that failed verification before their fix.
    pub defective_bits: Vec<usize>,
    /// Carry-out wire of each verified bit.
    pub carries: Vec<Wire>,
}

impl RepairReport {
    /// All swapped wires, sorted by name.
    pub fn wires(&self) -> Vec<&Wire> {
        let mut wires: Vec<&Wire> = self.swaps.iter().flat_map(|swap| swap.wires()).collect();
        wires.sort();
        wires
    }

    /// The swapped wires as a sorted, comma-joined list.
    pub fn answer(&self) -> String {
        self.wires().iter().map(|wire| wire.name()).collect::<Vec<_>>().join(",")
    }
}

/// The primary wires of one adder bit.
#[derive(Debug, Clone)]
struct BitPorts {
    bit: usize,
    x: Wire,
    y: Wire,
    z: Wire,
    /// `z_{i+1}` when bit `i` is the top bit.
    carry_out: Option<Wire>,
}

impl BitPorts {
    fn seeds(&self, carry_in: Option<&Wire>, row: TruthRow) -> Assignment {
        let mut seeds = Assignment::from_iter([(self.x.clone(), row.x), (self.y.clone(), row.y)]);
        if let Some(carry_in) = carry_in {
            seeds.insert(carry_in.clone(), row.carry_in);
        }
        seeds
    }

    fn probe(&self, carry_in: Option<&Wire>) -> Assignment {
        self.seeds(
            carry_in,
            TruthRow {
                x: true,
                y: true,
                carry_in: true,
            },
        )
    }
}

pub struct Repair<'a> {
    circuit: &'a mut CircuitGraph,
    width: usize,
}

impl<'a> Repair<'a> {
    pub fn new(circuit: &'a mut CircuitGraph) -> Self {
        let width = circuit.input_width();
        Self { circuit, width }
    }

    pub fn circuit(&self) -> &CircuitGraph {
        &*self.circuit
    }

    /// Number of adder bits the repair walks over.
    pub fn width(&self) -> usize {
        self.width
    }

    fn ports(&self, bit: usize) -> Result<BitPorts, RepairError> {
        let port = |port: Port| {
            self.circuit
                .port(port, bit)
                .cloned()
                .ok_or(RepairError::MissingPort { port, bit })
        };
        let carry_out = if bit + 1 == self.width {
            self.circuit.port(Port::Z, bit + 1).cloned()
        } else {
            None
        };
        Ok(BitPorts {
            bit,
            x: port(Port::X)?,
            y: port(Port::Y)?,
            z: port(Port::Z)?,
            carry_out,
        })
    }

    /// Checks bit `bit` against the full-adder truth table, with `carry_in` as its carry.
    pub fn verify_bit(&self, bit: usize, carry_in: Option<&Wire>) -> Result<bool, RepairError> {
        let ports = self.ports(bit)?;
        Ok(self.verify(&ports, carry_in))
    }

    fn verify(&self, ports: &BitPorts, carry_in: Option<&Wire>) -> bool {
        for row in truth_table(carry_in.is_some()) {
            let values = match self.circuit.evaluate(&ports.seeds(carry_in, row)) {
                Ok(values) => values,
                Err(e) => {
                    trace!("verify bit {}: {}", ports.bit, e);
                    return false;
                }
            };
            if values.get(&ports.z) != Some(row.sum()) {
                return false;
            }
            if let Some(carry_out) = &ports.carry_out {
                if values.get(carry_out) != Some(row.carry()) {
                    return false;
                }
            }
        }
        true
    }

    /// Wires downstream of bit `bit`, excluding its seeds.
    pub fn cone(&self, bit: usize, carry_in: Option<&Wire>) -> Result<BTreeSet<Wire>, RepairError> {
        let ports = self.ports(bit)?;
        self.cone_of(&ports, carry_in).map_err(|source| RepairError::Cycle { bit, source })
    }

    fn cone_of(&self, ports: &BitPorts, carry_in: Option<&Wire>) -> Result<BTreeSet<Wire>, CycleError> {
        let seeds = ports.probe(carry_in);
        let values = self.circuit.evaluate(&seeds)?;
        Ok(values.wires().filter(|wire| !seeds.contains(wire)).cloned().collect())
    }

    /// Finds the single swap that makes bit `ports.bit` verify.
    fn search(
        &mut self,
        ports: &BitPorts,
        carry_in: Option<&Wire>,
        cone: &BTreeSet<Wire>,
        pool: &BTreeSet<Wire>,
    ) -> Result<SwapRecord, RepairError> {
        let mut tried = BTreeSet::new();
        let mut fixes = Vec::new();

        for a in cone.intersection(pool) {
            for b in pool.iter() {
                if a == b {
                    continue;
                }
                let candidate = SwapRecord::new(a.clone(), b.clone());
                if !tried.insert(candidate.clone()) {
                    continue;
                }

                self.circuit.swap(a, b)?;
                let passes = self.verify(ports, carry_in);
                self.circuit.swap(a, b)?;

                trace!("bit {}: {} -> {}", ports.bit, candidate, passes);
                if passes {
                    fixes.push(candidate);
                }
            }
        }
        debug!("bit {}: tried {} swaps, {} pass", ports.bit, tried.len(), fixes.len());

        match <[SwapRecord; 1]>::try_from(fixes) {
            Ok([fix]) => Ok(fix),
            Err(fixes) => Err(RepairError::AmbiguousFix {
                bit: ports.bit,
                candidates: fixes.into_iter().map(|swap| (swap.a, swap.b)).collect(),
            }),
        }
    }

    /// Finds the internal wire that computes the carry out of bit `ports.bit`.
    fn derive_carry(
        &self,
        ports: &BitPorts,
        carry_in: Option<&Wire>,
        cone: &BTreeSet<Wire>,
    ) -> Result<Wire, RepairError> {
        let bit = ports.bit;
        let mut candidates: BTreeSet<&Wire> = cone.iter().filter(|wire| !wire.is_primary()).collect();

        for row in truth_table(carry_in.is_some()) {
            let values = self
                .circuit
                .evaluate(&ports.seeds(carry_in, row))
                .map_err(|source| RepairError::Cycle { bit, source })?;
            candidates.retain(|wire| values.get(wire) == Some(row.carry()));
        }

        let mut candidates = candidates.into_iter();
        match (candidates.next(), candidates.next()) {
            (Some(carry), None) => Ok(carry.clone()),
            (first, second) => Err(RepairError::AmbiguousCarry {
                bit,
                candidates: first.into_iter().chain(second).chain(candidates).cloned().collect(),
            }),
        }
    }

    /// Verifies and repairs every bit, committing one swap per defective bit.
    pub fn run(mut self) -> Result<RepairReport, RepairError> {
        let mut report = RepairReport::default();
        let mut pool: BTreeSet<Wire> = self.circuit.driven_wires().cloned().collect();
        let mut carry_in: Option<Wire> = None;

        info!("repair: {} bits, {} gates", self.width, self.circuit.len());

        for bit in 0..self.width {
            let ports = self.ports(bit)?;

            if !self.verify(&ports, carry_in.as_ref()) {
                info!("bit {} is defective", bit);
                report.defective_bits.push(bit);

                let cone = self
                    .cone_of(&ports, carry_in.as_ref())
                    .map_err(|source| RepairError::Cycle { bit, source })?;
                debug!("bit {}: cone of {} wires", bit, cone.len());

                let fix = self.search(&ports, carry_in.as_ref(), &cone, &pool)?;
                self.circuit.swap(&fix.a, &fix.b)?;
                info!("bit {}: committed {}", bit, fix);
                report.swaps.push(fix);
            }

            let cone = self
                .cone_of(&ports, carry_in.as_ref())
                .map_err(|source| RepairError::Cycle { bit, source })?;
            let carry = match &ports.carry_out {
                Some(carry_out) => carry_out.clone(),
                // Top bit without a carry output.
                None if bit + 1 == self.width => break,
                None => self.derive_carry(&ports, carry_in.as_ref(), &cone)?,
            };
            debug!("bit {}: carry out is {}", bit, carry);

            for wire in cone.iter() {
                pool.remove(wire);
            }
            report.carries.push(carry.clone());
            carry_in = Some(carry);
        }

        Ok(report)
    }
}
