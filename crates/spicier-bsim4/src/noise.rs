//! Noise generators.
//!
//! A BSIM4 device contributes fourteen named noise generators. Each is
//! expressed with the solver's noise-source primitives: series and body
//! resistances and the channel are thermal (4kT·g), gate leakage is shot
//! noise (2q·|I|), flicker noise is a density computed here and the induced
//! gate noise is a source correlated with the channel.
//!
//! | name     | port         | kind       |
//! |----------|--------------|------------|
//! | `rd`     | d' → d       | thermal    |
//! | `rs`     | s' → s       | thermal    |
//! | `rg`     | g' → g       | thermal    |
//! | `rbps`   | b' → sb      | thermal    |
//! | `rbpd`   | b' → db      | thermal    |
//! | `rbpb`   | b' → b       | thermal    |
//! | `rbsb`   | b → sb       | thermal    |
//! | `rbdb`   | b → db       | thermal    |
//! | `id`     | d' → s'      | thermal    |
//! | `1overf` | d' → s'      | density    |
//! | `igs`    | g' → s'      | shot       |
//! | `igd`    | g' → d'      | shot       |
//! | `igb`    | g' → b'      | shot       |
//! | `corl`   | d' → s', g' → s' | correlated |

use std::f64::consts::{FRAC_PI_2, PI};

use spicier_solver::noise::total_output_density;
use spicier_solver::{NoisePort, NoiseSource, Transfer};

use crate::consts::{BOLTZMANN, CHARGE, N_MINLOG};
use crate::derive::{InstanceDerived, body_mode};
use crate::mosfet::Bsim4Nodes;
use crate::op::{Mode, OperatingPoint};

/// Floor of the drain current over drain voltage in the partitioned
/// channel noise model.
const MIN_IDOV_VDS: f64 = 1.0e-9;

/// Floor of the carrier densities (m⁻²) dividing the unified flicker noise
/// terms, reached when the channel is not inverted.
const MIN_CARRIER_DENSITY: f64 = 1.0;

/// The named noise generators of one device, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseGenerator {
    DrainResistance,
    SourceResistance,
    GateResistance,
    BodyPrimeSource,
    BodyPrimeDrain,
    BodyPrimeBulk,
    BulkSource,
    BulkDrain,
    Channel,
    Flicker,
    GateSource,
    GateDrain,
    GateBody,
    Correlated,
}

impl NoiseGenerator {
    /// Every generator, in reporting order.
    pub const ALL: [NoiseGenerator; 14] = [
        NoiseGenerator::DrainResistance,
        NoiseGenerator::SourceResistance,
        NoiseGenerator::GateResistance,
        NoiseGenerator::BodyPrimeSource,
        NoiseGenerator::BodyPrimeDrain,
        NoiseGenerator::BodyPrimeBulk,
        NoiseGenerator::BulkSource,
        NoiseGenerator::BulkDrain,
        NoiseGenerator::Channel,
        NoiseGenerator::Flicker,
        NoiseGenerator::GateSource,
        NoiseGenerator::GateDrain,
        NoiseGenerator::GateBody,
        NoiseGenerator::Correlated,
    ];

    /// SPICE name of the generator.
    pub fn name(self) -> &'static str {
        match self {
            NoiseGenerator::DrainResistance => "rd",
            NoiseGenerator::SourceResistance => "rs",
            NoiseGenerator::GateResistance => "rg",
            NoiseGenerator::BodyPrimeSource => "rbps",
            NoiseGenerator::BodyPrimeDrain => "rbpd",
            NoiseGenerator::BodyPrimeBulk => "rbpb",
            NoiseGenerator::BulkSource => "rbsb",
            NoiseGenerator::BulkDrain => "rbdb",
            NoiseGenerator::Channel => "id",
            NoiseGenerator::Flicker => "1overf",
            NoiseGenerator::GateSource => "igs",
            NoiseGenerator::GateDrain => "igd",
            NoiseGenerator::GateBody => "igb",
            NoiseGenerator::Correlated => "corl",
        }
    }

    fn port(self, n: &Bsim4Nodes) -> NoisePort {
        let (pos, neg) = match self {
            NoiseGenerator::DrainResistance => (n.drain_prime, n.drain),
            NoiseGenerator::SourceResistance => (n.source_prime, n.source),
            NoiseGenerator::GateResistance => (n.gate_prime, n.gate),
            NoiseGenerator::BodyPrimeSource => (n.bulk_prime, n.source_body),
            NoiseGenerator::BodyPrimeDrain => (n.bulk_prime, n.drain_body),
            NoiseGenerator::BodyPrimeBulk => (n.bulk_prime, n.bulk),
            NoiseGenerator::BulkSource => (n.bulk, n.source_body),
            NoiseGenerator::BulkDrain => (n.bulk, n.drain_body),
            NoiseGenerator::Channel | NoiseGenerator::Flicker | NoiseGenerator::Correlated => {
                (n.drain_prime, n.source_prime)
            }
            NoiseGenerator::GateSource => (n.gate_prime, n.source_prime),
            NoiseGenerator::GateDrain => (n.gate_prime, n.drain_prime),
            NoiseGenerator::GateBody => (n.gate_prime, n.bulk_prime),
        };
        NoisePort::new(pos, neg)
    }
}

/// Noise generators of one device at one frequency.
#[derive(Debug, Clone)]
pub struct Bsim4Noise {
    sources: Vec<NoiseSource>,
    temperature: f64,
}

impl Bsim4Noise {
    /// Evaluate every generator at `freq` (Hz).
    ///
    /// `vds` is the present drain-source voltage from the state history; it
    /// decides which series resistance carries the partitioned channel
    /// noise and drives the flicker clamp length.
    pub fn evaluate(
        d: &InstanceDerived,
        op: &OperatingPoint,
        nodes: &Bsim4Nodes,
        vds: f64,
        freq: f64,
    ) -> Self {
        let m = &d.model.params;
        let channel = ChannelNoise::new(d, op, vds, freq);
        let body = body_conductances(d);

        let (igs, igd) = match op.mode {
            Mode::Forward => (op.igs + op.igcs, op.igd + op.igcd),
            Mode::Reverse => (op.igs + op.igcd, op.igd + op.igcs),
        };

        let flicker = match m.fnoimod.as_i32() {
            0 => flicker_power_law(d, op, freq),
            _ => flicker_unified(d, op, vds.abs(), freq),
        };

        let sources = NoiseGenerator::ALL
            .iter()
            .map(|&g| {
                let port = g.port(nodes);
                match g {
                    NoiseGenerator::DrainResistance => {
                        NoiseSource::thermal(g.name(), port, channel.gdpr)
                    }
                    NoiseGenerator::SourceResistance => {
                        NoiseSource::thermal(g.name(), port, channel.gspr)
                    }
                    NoiseGenerator::GateResistance => {
                        NoiseSource::thermal(g.name(), port, gate_conductance(d, op))
                    }
                    NoiseGenerator::BodyPrimeSource => NoiseSource::thermal(g.name(), port, body[0]),
                    NoiseGenerator::BodyPrimeDrain => NoiseSource::thermal(g.name(), port, body[1]),
                    NoiseGenerator::BodyPrimeBulk => NoiseSource::thermal(g.name(), port, body[2]),
                    NoiseGenerator::BulkSource => NoiseSource::thermal(g.name(), port, body[3]),
                    NoiseGenerator::BulkDrain => NoiseSource::thermal(g.name(), port, body[4]),
                    NoiseGenerator::Channel => NoiseSource::thermal(g.name(), port, channel.id),
                    NoiseGenerator::Flicker => NoiseSource::gain(g.name(), port, flicker),
                    NoiseGenerator::GateSource => NoiseSource::shot(g.name(), port, igs),
                    NoiseGenerator::GateDrain => NoiseSource::shot(g.name(), port, igd),
                    NoiseGenerator::GateBody => NoiseSource::shot(g.name(), port, op.igb),
                    NoiseGenerator::Correlated => NoiseSource::correlated(
                        g.name(),
                        port,
                        NoisePort::new(nodes.gate_prime, nodes.source_prime),
                        channel.corl_s1,
                        channel.corl_s2,
                        FRAC_PI_2,
                    ),
                }
            })
            .collect();

        log::trace!(
            "{}: noise at {freq:e} Hz, id={:e} S, flicker={:e} A²/Hz",
            d.name(),
            channel.id,
            flicker
        );

        Self {
            sources,
            temperature: d.model.temp,
        }
    }

    /// All generators, in [`NoiseGenerator::ALL`] order.
    pub fn sources(&self) -> &[NoiseSource] {
        &self.sources
    }

    pub fn get(&self, generator: NoiseGenerator) -> &NoiseSource {
        &self.sources[generator as usize]
    }

    /// Look a generator up by its SPICE name.
    pub fn by_name(&self, name: &str) -> Option<&NoiseSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Device temperature the thermal generators are evaluated at (K).
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Output noise density (V²/Hz) of the whole device through `transfer`.
    pub fn total_output_density(&self, transfer: &Transfer) -> f64 {
        total_output_density(&self.sources, transfer, self.temperature)
    }
}

/// Series resistance and channel noise, which share the thermal noise
/// model selector.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelNoise {
    gdpr: f64,
    gspr: f64,
    /// Uncorrelated channel noise conductance (S)
    id: f64,
    corl_s1: f64,
    corl_s2: f64,
}

impl ChannelNoise {
    fn new(d: &InstanceDerived, op: &OperatingPoint, vds: f64, freq: f64) -> Self {
        let m = &d.model.params;
        let p = &d.size;
        let n = &op.noise;

        let (mut gdpr, mut gspr) = if m.rdsmod.as_i32() == 0 {
            (d.drain_conductance, d.source_conductance)
        } else {
            (op.series.gdtot, op.series.gstot)
        };

        let leff = p.leff;
        let lateral = (n.vgsteff / n.esat_l).powi(2);
        let beta = m.rnoia.value * (1.0 + lateral * m.tnoia.value * leff);
        let theta_raw = m.rnoib.value * (1.0 + lateral * m.tnoib.value * leff);

        match m.tnoimod.as_i32() {
            0 => {
                let tmp = if m.rdsmod.as_i32() == 0 && n.grdsw > 0.0 {
                    1.0 / n.grdsw
                } else {
                    0.0
                };
                let t0 = n.ueff * n.qinv.abs();
                let t1 = t0 * tmp + leff * leff;
                Self {
                    gdpr,
                    gspr,
                    id: t0 / t1 * m.ntnoi.value,
                    ..Default::default()
                }
            }
            1 => {
                let theta = partition_theta(beta, theta_raw);
                let idov_vds = n.idov_vds.max(MIN_IDOV_VDS);
                if vds >= 0.0 {
                    gspr *= 1.0 + theta * theta * gspr / idov_vds;
                } else {
                    gdpr *= 1.0 + theta * theta * gdpr / idov_vds;
                }

                let gsum = op.gm + op.gmbs + op.gds;
                let igsquare = theta * theta * gsum * gsum / idov_vds;
                let t1 = beta * (op.gm + op.gmbs) + op.gds;
                Self {
                    gdpr,
                    gspr,
                    id: t1 * t1 / idov_vds - igsquare,
                    ..Default::default()
                }
            }
            _ => {
                let h = holistic(d, op, beta, theta_raw);
                let ctnoi2 = h.ctnoi * h.ctnoi;
                let wsig = 2.0 * PI * freq * h.sigrat;
                let wsig2 = wsig * wsig;
                Self {
                    gdpr,
                    gspr,
                    id: h.gamma_gd0 * (1.0 - ctnoi2),
                    corl_s1: h.gamma_gd0 * ctnoi2,
                    corl_s2: h.gamma_gd0 * wsig2 / (1.0 + wsig2),
                }
            }
        }
    }
}

/// Induced gate noise partition factor, bounded by 0.9 and by 0.9·β.
fn partition_theta(beta: f64, theta: f64) -> f64 {
    theta.min(0.9).min(0.9 * beta)
}

/// Coefficients of the holistic (tnoiMod 2) channel noise model.
#[derive(Debug, Clone, Copy)]
struct Holistic {
    gamma_gd0: f64,
    ctnoi: f64,
    sigrat: f64,
}

fn holistic(d: &InstanceDerived, op: &OperatingPoint, beta: f64, theta: f64) -> Holistic {
    let m = &d.model.params;
    let p = &d.size;
    let n = &op.noise;
    let leff = p.leff;

    let eta = 1.0 - n.vdseff * n.abov_vgst2_vtm;
    let t0 = 1.0 - eta;
    let t1 = 1.0 + eta;
    let t2 = t1 + 2.0 * n.abulk * d.model.vtm / n.vgsteff;
    let lvsat = leff * (1.0 + n.vdseff / n.esat_l);
    let t6 = leff / lvsat;

    let gamma = t6 * (0.5 * t1 + t0 * t0 / (6.0 * t2));
    let t3 = t2 * t2;
    let t4 = t0 * t0;
    let t5 = t3 * t3;
    let delta = (t1 / t3 - (5.0 * t1 + t2) * t4 / (15.0 * t5) + t4 * t4 / (9.0 * t5 * t2))
        / (6.0 * t6 * t6 * t6);
    let t7 = t0 / t2;
    let epsilon = (t7 - t7 * t7 * t7 / 3.0) / (6.0 * t6);

    let lateral = (n.vgsteff / n.esat_l).powi(2);
    let npart_c = m.rnoic.value * (1.0 + lateral * m.tnoic.value * leff);
    let ctnoi = epsilon / (gamma * delta).sqrt() * (2.5316 * npart_c);

    let gamma = gamma * (3.0 * beta * beta);
    let delta = delta * (3.75 * theta * theta);

    let c0 = n.coxeff * p.weff_cv * d.inst.nf.value * p.leff_cv;
    Holistic {
        gamma_gd0: gamma * n.noi_gd0,
        ctnoi,
        sigrat: c0 / n.noi_gd0 * (delta / gamma).sqrt(),
    }
}

/// Thermal conductance of the gate electrode.
fn gate_conductance(d: &InstanceDerived, op: &OperatingPoint) -> f64 {
    match d.inst.rgatemod.as_i32() {
        1 | 3 => d.grgeltd,
        2 => {
            let t0 = 1.0 + d.grgeltd / op.gate_resistance.gcrg;
            d.grgeltd / (t0 * t0)
        }
        _ => 0.0,
    }
}

/// Body network conductances in the order rbps, rbpd, rbpb, rbsb, rbdb.
///
/// With rbodyMod 2 the resistors whose scaling parameters were left out
/// are treated as absent.
fn body_conductances(d: &InstanceDerived) -> [f64; 5] {
    let b = &d.body;
    match (d.inst.rbodymod.as_i32(), body_mode(&d.model.params)) {
        (0, _) => [0.0; 5],
        (2, 1) => [0.0, 0.0, b.grbpb, 0.0, 0.0],
        (2, 3) => [b.grbps, b.grbpd, b.grbpb, 0.0, 0.0],
        _ => [b.grbps, b.grbpd, b.grbpb, b.grbsb, b.grbdb],
    }
}

/// Power-law flicker noise: KF·|Id|^AF / (f^EF·Leff²·Coxe).
fn flicker_power_law(d: &InstanceDerived, op: &OperatingPoint, freq: f64) -> f64 {
    let m = &d.model.params;
    let leff = d.size.leff;
    m.kf.value * (m.af.value * op.cd.abs().max(N_MINLOG).ln()).exp()
        / (freq.powf(m.ef.value) * leff * leff * d.model.coxe)
}

/// Unified flicker noise: the number-fluctuation density of the linear
/// region in parallel with the mobility-fluctuation density of the
/// saturated region.
fn flicker_unified(d: &InstanceDerived, op: &OperatingPoint, vds: f64, freq: f64) -> f64 {
    let m = &d.model.params;
    let temp = d.model.temp;
    let p = &d.size;
    let n = &op.noise;
    let nf = d.inst.nf.value;
    let noia = m.noia.value;

    let ssi = oxide_trap_density(d, op, vds, freq);
    let t10 = noia * BOLTZMANN * temp;
    let nstar = n.nstar.max(MIN_CARRIER_DENSITY);
    let t11 = p.weff * nf * p.leff * freq.powf(m.ef.value) * 1.0e10 * nstar * nstar;
    let swi = t10 / t11 * op.cd * op.cd;

    let total = ssi + swi;
    if total > 0.0 { ssi * swi / total } else { 0.0 }
}

/// Oxide trap number and mobility fluctuation density along the channel,
/// including the velocity-saturated clamp region.
fn oxide_trap_density(d: &InstanceDerived, op: &OperatingPoint, vds: f64, freq: f64) -> f64 {
    let m = &d.model.params;
    let temp = d.model.temp;
    let coxe = d.model.coxe;
    let p = &d.size;
    let n = &op.noise;
    let (noia, noib, noic) = (m.noia.value, m.noib.value, m.noic.value);

    let cd = op.cd.abs();
    let leff = p.leff - 2.0 * m.lintnoi.value;
    let leffsq = leff * leff;
    let esat = 2.0 * d.vsattemp / n.ueff;
    let del_clm = if m.em.value <= 0.0 {
        0.0
    } else {
        let t0 = ((vds - n.vdseff) / p.litl + m.em.value) / esat;
        (p.litl * t0.max(N_MINLOG).ln()).max(0.0)
    };

    let eff_freq = freq.powf(m.ef.value);
    let t1 = CHARGE * CHARGE * BOLTZMANN * cd * temp * n.ueff;
    let t2 = 1.0e10 * eff_freq * n.abulk * coxe * leffsq;
    let n0 = coxe * n.vgsteff / CHARGE;
    let nl = coxe * n.vgsteff * (1.0 - n.abov_vgst2_vtm * n.vdseff) / CHARGE;

    let tail = (nl + n.nstar).max(MIN_CARRIER_DENSITY);
    let t3 = noia * ((n0 + n.nstar).max(MIN_CARRIER_DENSITY) / tail).max(N_MINLOG).ln();
    let t4 = noib * (n0 - nl);
    let t5 = noic * 0.5 * (n0 * n0 - nl * nl);

    let t6 = BOLTZMANN * temp * cd * cd;
    let t7 = 1.0e10 * eff_freq * leffsq * p.weff * d.inst.nf.value;
    let t8 = noia + noib * nl + noic * nl * nl;
    let t9 = tail * tail;
    t1 / t2 * (t3 + t4 + t5) + t6 / t7 * del_clm * t8 / t9
}
