//! Evaluation and repair benchmarks on reference ripple-carry adders.
//!
//! Run with:
//! ```bash
//! cargo bench --bench repair
//! ```

use adder_rs::adder::ripple_carry;
use adder_rs::circuit::CircuitGraph;
use adder_rs::repair::Repair;
use adder_rs::wire::Wire;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// Benchmark: Full evaluation
// ============================================================================

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("adder/add");

    for bits in [8, 16, 32, 45] {
        let circuit = CircuitGraph::new(ripple_carry(bits)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let operands: Vec<(BigUint, BigUint)> = (0..64)
            .map(|_| {
                let x = rng.gen::<u64>() >> (64 - bits);
                let y = rng.gen::<u64>() >> (64 - bits);
                (BigUint::from(x), BigUint::from(y))
            })
            .collect();

        group.throughput(Throughput::Elements(operands.len() as u64));
        group.bench_with_input(BenchmarkId::new("bits", bits), &operands, |b, operands| {
            b.iter(|| {
                operands
                    .iter()
                    .map(|(x, y)| circuit.add(x, y).unwrap())
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Repair search
// ============================================================================

fn faulty_adder(bits: usize, faults: usize) -> CircuitGraph {
    let mut circuit = CircuitGraph::new(ripple_carry(bits)).unwrap();
    // One sum/carry swap every few bits, away from the half adder and the top bit.
    for k in 0..faults {
        let bit = 2 + k * (bits - 3) / faults.max(1);
        circuit.swap(&Wire::z(bit), &Wire::new(format!("c{:02}", bit))).unwrap();
    }
    circuit
}

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("adder/repair");
    group.sample_size(10);

    for faults in [0, 1, 4] {
        group.bench_with_input(BenchmarkId::new("faults", faults), &faults, |b, &faults| {
            b.iter_batched(
                || faulty_adder(45, faults),
                |mut circuit| Repair::new(&mut circuit).run().unwrap(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add, bench_repair);

criterion_main!(benches);
