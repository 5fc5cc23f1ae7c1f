//! Benchmarks for BSIM4 derivation and small-signal assembly.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use spicier_bsim4::batch::{self, BatchConfig};
use spicier_bsim4::size_dep::SizeDependParams;
use spicier_bsim4::{Bsim4Model, Bsim4Nodes, InstanceParams, ModelTemp, OperatingPoint, ac};
use spicier_core::NodeId;
use spicier_solver::ComplexMna;

fn model_temp() -> Arc<ModelTemp> {
    let mut m = Bsim4Model::nmos("nch");
    m.set("toxe", 1.8e-9).unwrap();
    m.set("rgatemod", 3.0).unwrap();
    m.set("rbodymod", 1.0).unwrap();
    m.set("rdsmod", 1.0).unwrap();
    m.setup().unwrap();
    m.at_temperature(300.15).unwrap()
}

fn bench_size_bundle(c: &mut Criterion) {
    let mt = model_temp();
    c.bench_function("size_bundle", |b| {
        b.iter(|| SizeDependParams::build(&mt, "M1", black_box(1e-6), black_box(9e-8), 2.0).unwrap());
    });
}

fn bench_instance_derivation(c: &mut Criterion) {
    let mt = model_temp();
    let params = InstanceParams::with_geometry(1e-6, 9e-8);
    c.bench_function("derive_instance", |b| {
        b.iter(|| batch::derive_one(&mt, "M1", black_box(&params)).unwrap());
    });

    let netlist: Vec<_> = (0..1000)
        .map(|i| {
            let w = 1e-6 * (1 + i % 8) as f64;
            (format!("M{i}"), InstanceParams::with_geometry(w, 9e-8))
        })
        .collect();
    c.bench_function("derive_1000_instances", |b| {
        b.iter(|| batch::derive_all(&mt, black_box(&netlist), &BatchConfig::default()));
    });
}

fn bench_ac_load(c: &mut Criterion) {
    let mt = model_temp();
    let d = batch::derive_one(&mt, "M1", &InstanceParams::with_geometry(1e-6, 9e-8)).unwrap();
    let n = NodeId::new;
    let nodes = Bsim4Nodes {
        drain: n(1),
        gate: n(2),
        source: n(3),
        bulk: n(4),
        drain_prime: n(5),
        gate_prime: n(6),
        gate_mid: n(7),
        source_prime: n(8),
        bulk_prime: n(9),
        drain_body: n(10),
        source_body: n(11),
        charge: None,
    };
    let op = OperatingPoint {
        cd: 2e-4,
        gm: 2e-3,
        gds: 1e-4,
        gmbs: 3e-4,
        gbd: 1e-9,
        gbs: 2e-9,
        ..Default::default()
    };

    c.bench_function("ac_load", |b| {
        let mut mna = ComplexMna::new(11);
        b.iter(|| {
            mna.clear();
            ac::load(&d, &op, &nodes, black_box(2.0 * std::f64::consts::PI * 1e9), 0.0, &mut mna);
        });
    });
}

criterion_group!(benches, bench_size_bundle, bench_instance_derivation, bench_ac_load);
criterion_main!(benches);
