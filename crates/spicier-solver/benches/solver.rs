//! Benchmarks for complex solves and truncation estimates.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_complex::Complex;
use spicier_core::{AcMatrix, NodeId, StateAllocator, StateVector};
use spicier_solver::{ComplexMna, IntegrationMethod, LteEstimator};

fn ladder(size: usize) -> ComplexMna {
    let mut mna = ComplexMna::new(size);
    for i in 1..=size as u32 {
        mna.add_admittance(NodeId::new(i), NodeId::GROUND, Complex::new(1e-3, 1e-6));
        if (i as usize) < size {
            mna.add_admittance(NodeId::new(i), NodeId::new(i + 1), Complex::new(1e-2, 0.0));
        }
    }
    mna
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_to");

    for size in [10, 50, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &size,
            |bencher, &size| {
                let mna = ladder(size);
                let out = NodeId::new(size as u32);
                bencher.iter(|| mna.transfer_to(black_box(out)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_truncate(c: &mut Criterion) {
    c.bench_function("lte_gear2_1000_slots", |b| {
        let mut states = StateVector::new(8);
        let base = states.reserve(2000);
        for age in 0..8 {
            for slot in 0..2000 {
                states.set(age, base + slot, (slot as f64 + age as f64).sin() * 1e-12);
            }
        }
        let deltas = [1e-9; 8];
        let est = LteEstimator::new(&states, IntegrationMethod::Gear, 2, &deltas).unwrap();
        b.iter(|| {
            let mut step = 1.0;
            for slot in (0..2000).step_by(2) {
                spicier_core::Truncator::truncate(&est, black_box(slot), &mut step);
            }
            step
        });
    });
}

criterion_group!(benches, bench_transfer, bench_truncate);
criterion_main!(benches);
