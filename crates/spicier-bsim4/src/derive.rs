//! Instance derivation: the per-device half of the temperature stage.
//!
//! Starting from the shared size bundle, this applies the layout stress
//! and well proximity corrections, the threshold voltage offset, body and
//! gate resistance networks, diffusion geometry, series conductances,
//! junction diode limits and the effective oxide extraction. The result is
//! an immutable [`InstanceDerived`] value that the AC and noise stages read.

use std::sync::Arc;

use crate::check;
use crate::consts::{EPS0, EXP_THRESHOLD, KB_OVER_Q, MIN_EXP};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::geometry::{ContactSpacing, DiffusionSheet, Terminal, pa_eff_geo, rdseff_geo};
use crate::helpers::{dexp, dio_ijth_vjm_eval, poly_depletion, theta};
use crate::instance::InstanceParams;
use crate::model::{ModelParams, ModelTemp};
use crate::size_dep::SizeDependParams;

/// Whether the drain and source get their own internal (prime) nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesNodes {
    pub drain: bool,
    pub source: bool,
}

impl SeriesNodes {
    /// Decide which series resistances need an internal node.
    ///
    /// Always with bias-dependent Rds or the partitioned thermal noise
    /// model; otherwise when the diffusion has a sheet resistance and
    /// either a positive square count or a positive geometric resistance.
    pub fn for_instance(m: &ModelParams, inst: &InstanceParams, diag: &mut Diagnostics) -> Self {
        let forced = m.rdsmod.as_i32() != 0 || m.tnoimod.as_i32() == 1;
        let sheet = DiffusionSheet {
            weffcj: inst.w.value,
            rsh: m.rsh.value,
            spacing: contact_spacing(m),
        };
        let mut needs = |squares: &crate::param::Param, terminal: Terminal| {
            if forced {
                return true;
            }
            if m.rsh.value <= 0.0 {
                return false;
            }
            if squares.given {
                squares.value > 0.0
            } else if inst.rgeomod.as_i32() != 0 {
                rdseff_geo(
                    inst.nf.value,
                    inst.geomod.as_i32(),
                    inst.rgeomod.as_i32(),
                    inst.min_sd(),
                    &sheet,
                    terminal,
                    diag,
                ) > 0.0
            } else {
                false
            }
        };
        Self {
            drain: needs(&inst.nrd, Terminal::Drain),
            source: needs(&inst.nrs, Terminal::Source),
        }
    }
}

fn contact_spacing(m: &ModelParams) -> ContactSpacing {
    ContactSpacing {
        dmcg: m.dmcg_eff(),
        dmci: m.dmci_eff(),
        dmdg: m.dmdg_eff(),
    }
}

/// Body resistance network conductances (S).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyConductances {
    pub grbdb: f64,
    pub grbpb: f64,
    pub grbps: f64,
    pub grbsb: f64,
    pub grbpd: f64,
}

/// Junction diode limits and saturation currents of one diffusion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JunctionDiode {
    /// Total saturation current (A)
    pub sat_current: f64,
    /// Emission coefficient times thermal voltage (V)
    pub nvtm: f64,
    /// Breakdown pre-factor `xjbv·exp(-bv/Nvtm)`
    pub xexpbv: f64,
    /// Forward knee voltage (V)
    pub vjm_fwd: f64,
    /// Current at the forward knee (A)
    pub ivjm_fwd: f64,
    /// Slope beyond the forward knee (S)
    pub slp_fwd: f64,
    /// Reverse knee voltage (V)
    pub vjm_rev: f64,
    /// Current at the reverse knee (A)
    pub ivjm_rev: f64,
    /// Slope beyond the reverse knee (S)
    pub slp_rev: f64,
    /// Trap-assisted tunnelling saturation current, bottom (A)
    pub tat_bottom: f64,
    /// Trap-assisted tunnelling saturation current, isolation sidewall (A)
    pub tat_sidewall: f64,
    /// Trap-assisted tunnelling saturation current, gate sidewall (A)
    pub tat_gate_sidewall: f64,
}

/// Temperature- and geometry-dependent values of one instance.
#[derive(Debug, Clone)]
pub struct InstanceDerived {
    pub model: Arc<ModelTemp>,
    pub size: Arc<SizeDependParams>,
    /// Instance parameters after fallbacks and corrections.
    pub inst: InstanceParams,

    pub u0temp: f64,
    pub vsattemp: f64,
    pub vth0: f64,
    pub eta0: f64,
    pub k2: f64,
    pub vfb: f64,
    pub vtfbphi1: f64,
    pub vtfbphi2: f64,
    pub vbsc: f64,
    pub k2ox: f64,
    pub vfbzb: f64,
    pub cgso: f64,
    pub cgdo: f64,

    pub body: BodyConductances,
    /// Gate electrode conductance (S)
    pub grgeltd: f64,

    pub pseff: f64,
    pub pdeff: f64,
    pub aseff: f64,
    pub adeff: f64,
    pub source_conductance: f64,
    pub drain_conductance: f64,
    pub source: JunctionDiode,
    pub drain: JunctionDiode,

    /// Physical oxide thickness (m)
    pub toxp: f64,
    pub coxp: f64,

    pub diagnostics: Diagnostics,
}

impl InstanceDerived {
    /// Derive instance `name` of model state `mt`.
    ///
    /// `inst` must already be resolved against the model. Fails when the
    /// size bundle cannot be built or the parameter check finds a fatal
    /// condition.
    pub fn new(
        name: &str,
        mt: &Arc<ModelTemp>,
        inst: &InstanceParams,
        series: SeriesNodes,
    ) -> Result<Self> {
        let mut diag = Diagnostics::new(name);
        let m = &mt.params;
        let mut inst = inst.clone();
        let nf = inst.nf.value;
        let size = mt.size_params(name, inst.w.value, inst.l.value, nf)?;
        diag.absorb(&size.diagnostics);
        let p = &size.bin;
        let ldrn = inst.l.value;
        let wdrn = inst.w.value / nf;
        let sign = mt.type_sign();

        // ====================================================================
        // Layout stress
        // ====================================================================

        let mut u0temp = size.u0temp;
        let mut vsattemp = size.vsattemp;
        let mut vth0 = p.vth0;
        let mut eta0 = p.eta0;
        let mut k2 = p.k2;
        if stress_active(&inst) {
            let mut kvsat = m.kvsat.value;
            if kvsat < -1.0 {
                diag.warn(format!("Warning: KVSAT = {kvsat} is too small; - 1.0 is used."));
                kvsat = -1.0;
            }
            if kvsat > 1.0 {
                diag.warn(format!("Warning: KVSAT = {kvsat} is too big; 1.0 is used."));
                kvsat = 1.0;
            }

            let (sa, sb, sd) = (inst.sa.value, inst.sb.value, inst.sd.value);
            let mut inv_sa = 0.0;
            let mut inv_sb = 0.0;
            let mut i = 0.0;
            while i < nf {
                inv_sa += 1.0 / nf / (sa + 0.5 * ldrn + i * (sd + ldrn));
                inv_sb += 1.0 / nf / (sb + 0.5 * ldrn + i * (sd + ldrn));
                i += 1.0;
            }
            let inv_od_eff = inv_sa + inv_sb;
            let rho = m.ku0.value / size.ku0temp * inv_od_eff;
            u0temp = size.u0temp * (1.0 + rho) / (1.0 + size.rho_ref);
            vsattemp = size.vsattemp * (1.0 + kvsat * rho) / (1.0 + kvsat * size.rho_ref);

            let od_offset = inv_od_eff - size.inv_od_ref;
            let dvth0_lod = m.kvth0.value / size.kvth0 * od_offset;
            let dk2_lod = m.stk2.value / size.kvth0.powf(m.lodk2.value) * od_offset;
            let deta0_lod = m.steta0.value / size.kvth0.powf(m.lodeta0.value) * od_offset;
            vth0 = p.vth0 + dvth0_lod;
            eta0 = p.eta0 + deta0_lod;
            k2 = p.k2 + dk2_lod;
        }

        // ====================================================================
        // Well proximity
        // ====================================================================

        if m.wpemod.as_i32() != 0 {
            let scref = m.scref.value;
            if !inst.sca.given && !inst.scb.given && !inst.scc.given {
                let sc = inst.sc.value;
                if inst.sc.given && sc > 0.0 {
                    let t1 = sc + wdrn;
                    let t2 = 1.0 / scref;
                    inst.sca.assign(scref * scref / (sc * t1));
                    inst.scb.assign(
                        ((0.1 * sc + 0.01 * scref) * (-10.0 * sc * t2).exp()
                            - (0.1 * t1 + 0.01 * scref) * (-10.0 * t1 * t2).exp())
                            / wdrn,
                    );
                    inst.scc.assign(
                        ((0.05 * sc + 0.0025 * scref) * (-20.0 * sc * t2).exp()
                            - (0.05 * t1 + 0.0025 * scref) * (-20.0 * t1 * t2).exp())
                            / wdrn,
                    );
                } else {
                    diag.warn(
                        "Warning: No WPE as none of SCA, SCB, SCC, SC is given and / or SC not positive.",
                    );
                }
            }

            for (param, label) in [
                (&mut inst.sca, "SCA"),
                (&mut inst.scb, "SCB"),
                (&mut inst.scc, "SCC"),
                (&mut inst.sc, "SC"),
            ] {
                if param.value < 0.0 {
                    diag.warn(format!("Warning: {label} = {} is negative. Set to 0.0.", param.value));
                    param.assign(0.0);
                }
            }

            let sceff = inst.sca.value + m.web.value * inst.scb.value + m.wec.value * inst.scc.value;
            vth0 += p.kvth0we * sceff;
            k2 += p.k2we * sceff;
            let mut t3 = 1.0 + p.ku0we * sceff;
            if t3 <= 0.0 {
                t3 = 0.0;
                diag.warn(format!(
                    "Warning: ku0we = {} is negatively too high. Negative mobility! ",
                    p.ku0we
                ));
            }
            u0temp *= t3;
        }

        vth0 += inst.delvto.value;
        let vfb = p.vfb + sign * inst.delvto.value;

        let t3 = sign * vth0 - vfb - size.phi;
        let vtfbphi1 = if mt.params.mos_type.is_nmos() {
            2.0 * t3
        } else {
            2.5 * t3
        }
        .max(0.0);
        let vtfbphi2 = (4.0 * t3).max(0.0);

        let mut vbsc = if k2 < 0.0 {
            let t0 = 0.5 * p.k1 / k2;
            (0.9 * (size.phi - t0 * t0)).clamp(-30.0, -3.0)
        } else {
            -30.0
        };
        if vbsc > p.vbm {
            vbsc = p.vbm;
        }
        let k2ox = k2 * mt.toxe / m.toxm.value;
        let vfbzb = size.vfbzbfactor + sign * vth0;

        // ====================================================================
        // Body and gate resistance
        // ====================================================================

        let body = body_network(m, &mut inst, &size);

        let grgeltd = m.rshg.value * (inst.xgw.value + size.weff_cj / 3.0 / inst.ngcon.value)
            / (inst.ngcon.value * nf * (size.lnew - m.xgl.value));
        let grgeltd = if grgeltd > 0.0 {
            1.0 / grgeltd
        } else {
            if inst.rgatemod.as_i32() != 0 {
                diag.warn("Warning: The gate conductance reset to 1.0e3 mho.");
            }
            1.0e3
        };

        // ====================================================================
        // Diffusion perimeters, areas and series conductances
        // ====================================================================

        let spacing = contact_spacing(m);
        let geo = pa_eff_geo(
            nf,
            inst.geomod.as_i32(),
            inst.min_sd(),
            size.weff_cj,
            spacing,
            &mut diag,
        )
        .unwrap_or_default();
        let permod = m.permod.as_i32();
        let perimeter = |given: &crate::param::Param,
                         fallback: f64,
                         label: &str,
                         diag: &mut Diagnostics| {
            if !given.given {
                return fallback;
            }
            if given.value == 0.0 {
                0.0
            } else if given.value < 0.0 {
                diag.warn(format!(
                    "Warning: {label} Perimeter is specified as negative, it is set to zero."
                ));
                0.0
            } else if permod == 0 {
                given.value
            } else {
                given.value - size.weff_cj * nf
            }
        };
        let pseff = perimeter(&inst.ps, geo.ps, "Source", &mut diag);
        let pseff = non_negative(pseff, "Pseff", &mut diag);
        let pdeff = perimeter(&inst.pd, geo.pd, "Drain", &mut diag);
        let pdeff = non_negative(pdeff, "Pdeff", &mut diag);
        let aseff = if inst.as_.given { inst.as_.value } else { geo.as_ };
        let aseff = non_negative(aseff, "Aseff", &mut diag);
        let adeff = if inst.ad.given { inst.ad.value } else { geo.ad };
        let adeff = non_negative(adeff, "Adeff", &mut diag);

        let sheet = DiffusionSheet {
            weffcj: size.weff_cj,
            rsh: m.rsh.value,
            spacing,
        };
        let source_conductance = if series.source {
            series_conductance(&inst, &inst.nrs, &sheet, Terminal::Source, &mut diag)
        } else {
            0.0
        };
        let drain_conductance = if series.drain {
            series_conductance(&inst, &inst.nrd, &sheet, Terminal::Drain, &mut diag)
        } else {
            0.0
        };

        // ====================================================================
        // Junction diodes
        // ====================================================================

        let nvtms = mt.vtm * m.njs.value;
        let nvtmd = mt.vtm * m.njd.value;
        let jct_width = size.weff_cj * nf;
        let s_sat = sat_current(aseff, pseff, jct_width, &mt.source);
        let d_sat = sat_current(adeff, pdeff, jct_width, &mt.drain);
        let mut source = diode_limits(
            m.diomod.as_i32(),
            s_sat,
            nvtms,
            DiodeLimitsInput {
                bv: m.bvs.value,
                xjbv: m.xjbvs.value,
                ijth_fwd: m.ijthsfwd.value,
                ijth_rev: m.ijthsrev.value,
                side: "s",
            },
            &mut diag,
        );
        let mut drain = diode_limits(
            m.diomod.as_i32(),
            d_sat,
            nvtmd,
            DiodeLimitsInput {
                bv: m.bvd.value,
                xjbv: m.xjbvd.value,
                ijth_fwd: m.ijthdfwd.value,
                ijth_rev: m.ijthdrev.value,
                side: "d",
            },
            &mut diag,
        );

        // trap-assisted tunnelling reverse saturation currents
        let t7 = mt.eg0 / mt.vtm * (mt.tratio - 1.0);
        let mut jtweff = m.jtweff.value;
        if jtweff < 0.0 {
            jtweff = 0.0;
            diag.warn("TAT width dependence effect is negative. Jtweff is clamped to zero.");
        }
        let t11 = (jtweff / size.weff_cj).sqrt() + 1.0;
        source.tat_bottom = dexp(m.xtss.value * t7) * aseff * m.jtss.value;
        drain.tat_bottom = dexp(m.xtsd.value * t7) * adeff * m.jtsd.value;
        source.tat_sidewall = dexp(m.xtssws.value * t7) * pseff * m.jtssws.value;
        drain.tat_sidewall = dexp(m.xtsswd.value * t7) * pdeff * m.jtsswd.value;
        source.tat_gate_sidewall = dexp(m.xtsswgs.value * t7) * jct_width * t11 * m.jtsswgs.value;
        drain.tat_gate_sidewall = dexp(m.xtsswgd.value * t7) * jct_width * t11 * m.jtsswgd.value;

        let (toxp, coxp) = if m.mtrlmod.as_i32() != 0 && m.mtrlcompatmod.as_i32() == 0 {
            let toxp = extract_toxp(mt, &size, vth0, vfb);
            (toxp, mt.epsrox * EPS0 / m.toxp.value)
        } else {
            (m.toxp.value, mt.coxp)
        };

        let mut derived = Self {
            model: Arc::clone(mt),
            cgso: size.cgso,
            cgdo: size.cgdo,
            size,
            inst,
            u0temp,
            vsattemp,
            vth0,
            eta0,
            k2,
            vfb,
            vtfbphi1,
            vtfbphi2,
            vbsc,
            k2ox,
            vfbzb,
            body,
            grgeltd,
            pseff,
            pdeff,
            aseff,
            adeff,
            source_conductance,
            drain_conductance,
            source,
            drain,
            toxp,
            coxp,
            diagnostics: diag,
        };
        check::check_instance(&mut derived)?;
        log::debug!(
            "{name}: vth0={} u0temp={} vsattemp={} toxp={}",
            derived.vth0,
            derived.u0temp,
            derived.vsattemp,
            derived.toxp
        );
        Ok(derived)
    }

    pub fn name(&self) -> &str {
        self.diagnostics.owner()
    }

    /// `type` in the BSIM4 equations: +1 for NMOS, -1 for PMOS.
    pub fn type_sign(&self) -> f64 {
        self.model.type_sign()
    }
}

/// Stress corrections apply with both poly distances given and a
/// consistent finger spacing.
pub(crate) fn stress_active(inst: &InstanceParams) -> bool {
    let nf = inst.nf.value;
    inst.sa.value > 0.0 && inst.sb.value > 0.0 && (nf == 1.0 || (nf > 1.0 && inst.sd.value > 0.0))
}

fn non_negative(value: f64, label: &str, diag: &mut Diagnostics) -> f64 {
    if value < 0.0 {
        diag.warn(format!("Warning: {label} is negative, it is set to zero."));
        0.0
    } else {
        value
    }
}

fn series_conductance(
    inst: &InstanceParams,
    squares: &crate::param::Param,
    sheet: &DiffusionSheet,
    terminal: Terminal,
    diag: &mut Diagnostics,
) -> f64 {
    let resistance = if squares.given {
        sheet.rsh * squares.value
    } else if inst.rgeomod.as_i32() > 0 {
        rdseff_geo(
            inst.nf.value,
            inst.geomod.as_i32(),
            inst.rgeomod.as_i32(),
            inst.min_sd(),
            sheet,
            terminal,
            diag,
        )
    } else {
        0.0
    };
    if resistance > 0.0 {
        1.0 / resistance
    } else {
        let label = match terminal {
            Terminal::Source => "Source",
            Terminal::Drain => "Drain",
        };
        diag.warn(format!("Warning: {label} conductance reset to 1.0e3 mho."));
        1.0e3
    }
}

/// Resolve the body resistances and their conductances.
///
/// Under rbodyMod 2 the resistances scale with geometry; which of them do
/// depends on the scaling parameters that were given.
/// How many resistors of the scalable body network the model defines: 1
/// (rbpb only), 3 (no junction-side resistors) or 5 (all of them).
pub(crate) fn body_mode(m: &ModelParams) -> u8 {
    if !m.rbps0.given || !m.rbpd0.given {
        1
    } else if (!m.rbsbx0.given && !m.rbsby0.given) || (!m.rbdbx0.given && !m.rbdby0.given) {
        3
    } else {
        5
    }
}

fn body_network(
    m: &ModelParams,
    inst: &mut InstanceParams,
    size: &SizeDependParams,
) -> BodyConductances {
    let lnl = (size.leff * 1.0e6).ln();
    let lnw = (size.weff * 1.0e6).ln();
    let lnnf = inst.nf.value.ln();
    let scaled = |r0: f64, l: f64, w: f64, nf: f64| r0 * (l * lnl + w * lnw + nf * lnnf).exp();
    let parallel = |a: f64, b: f64| a * b / (a + b);

    let bodymode = body_mode(m);

    let rbodymod = inst.rbodymod.as_i32();
    if rbodymod == 2 {
        if bodymode == 5 {
            let rbsbx = scaled(m.rbsbx0.value, m.rbsdbxl.value, m.rbsdbxw.value, m.rbsdbxnf.value);
            let rbsby = scaled(m.rbsby0.value, m.rbsdbyl.value, m.rbsdbyw.value, m.rbsdbynf.value);
            inst.rbsb.assign(parallel(rbsbx, rbsby));
            let rbdbx = scaled(m.rbdbx0.value, m.rbsdbxl.value, m.rbsdbxw.value, m.rbsdbxnf.value);
            let rbdby = scaled(m.rbdby0.value, m.rbsdbyl.value, m.rbsdbyw.value, m.rbsdbynf.value);
            inst.rbdb.assign(parallel(rbdbx, rbdby));
        }
        if bodymode == 3 || bodymode == 5 {
            inst.rbps.assign(scaled(m.rbps0.value, m.rbpsl.value, m.rbpsw.value, m.rbpsnf.value));
            inst.rbpd.assign(scaled(m.rbpd0.value, m.rbpdl.value, m.rbpdw.value, m.rbpdnf.value));
        }
        let rbpbx = scaled(m.rbpbx0.value, m.rbpbxl.value, m.rbpbxw.value, m.rbpbxnf.value);
        let rbpby = scaled(m.rbpby0.value, m.rbpbyl.value, m.rbpbyw.value, m.rbpbynf.value);
        inst.rbpb.assign(parallel(rbpbx, rbpby));
    }

    let gbmin = m.gbmin.value;
    let conductance = |r: f64| if r < 1.0e-3 { 1.0e3 } else { gbmin + 1.0 / r };

    let mut g = BodyConductances::default();
    if rbodymod == 1 || (rbodymod == 2 && bodymode == 5) {
        g.grbdb = conductance(inst.rbdb.value);
        g.grbpb = conductance(inst.rbpb.value);
        g.grbps = conductance(inst.rbps.value);
        g.grbsb = conductance(inst.rbsb.value);
        g.grbpd = conductance(inst.rbpd.value);
    } else if rbodymod == 2 && bodymode == 3 {
        g.grbdb = gbmin;
        g.grbsb = gbmin;
        g.grbpb = conductance(inst.rbpb.value);
        g.grbps = conductance(inst.rbps.value);
        g.grbpd = conductance(inst.rbpd.value);
    } else if rbodymod == 2 && bodymode == 1 {
        g.grbdb = gbmin;
        g.grbsb = gbmin;
        g.grbps = 1.0e3;
        g.grbpd = 1.0e3;
        g.grbpb = conductance(inst.rbpb.value);
    }
    g
}

fn sat_current(area: f64, perimeter: f64, gate_width: f64, side: &crate::model::JunctionSide) -> f64 {
    if area <= 0.0 && perimeter <= 0.0 {
        0.0
    } else {
        area * side.js + perimeter * side.jsw + gate_width * side.jswg
    }
}

struct DiodeLimitsInput {
    bv: f64,
    xjbv: f64,
    ijth_fwd: f64,
    ijth_rev: f64,
    /// "s" or "d", for the diagnostics
    side: &'static str,
}

/// Knee voltages and slopes of one junction diode for `diomod`.
fn diode_limits(
    diomod: i32,
    isat: f64,
    nvtm: f64,
    input: DiodeLimitsInput,
    diag: &mut Diagnostics,
) -> JunctionDiode {
    let mut d = JunctionDiode {
        sat_current: isat,
        nvtm,
        ..JunctionDiode::default()
    };
    if isat <= 0.0 {
        return d;
    }
    let DiodeLimitsInput {
        bv,
        xjbv,
        ijth_fwd,
        ijth_rev,
        side,
    } = input;
    let xexpbv = if bv / nvtm > EXP_THRESHOLD {
        xjbv * MIN_EXP
    } else {
        xjbv * (-bv / nvtm).exp()
    };
    match diomod {
        0 => d.xexpbv = xexpbv,
        1 => {
            d.vjm_fwd = dio_ijth_vjm_eval(nvtm, ijth_fwd, isat, 0.0);
            d.ivjm_fwd = isat * (d.vjm_fwd / nvtm).exp();
        }
        2 => {
            d.xexpbv = xexpbv;
            d.vjm_fwd = dio_ijth_vjm_eval(nvtm, ijth_fwd, isat, d.xexpbv);
            let t0 = (d.vjm_fwd / nvtm).exp();
            d.ivjm_fwd = isat * (t0 - d.xexpbv / t0 + d.xexpbv - 1.0);
            d.slp_fwd = isat * (t0 + d.xexpbv / t0) / nvtm;

            let mut t2 = ijth_rev / isat;
            if t2 < 1.0 {
                t2 = 10.0;
                diag.warn(format!(
                    "Warning: ijth{side}rev too small and set to 10 times I{side}bSat."
                ));
            }
            d.vjm_rev = -bv - nvtm * ((t2 - 1.0) / xjbv).ln();
            let t1 = xjbv * (-(bv + d.vjm_rev) / nvtm).exp();
            d.ivjm_rev = isat * (1.0 + t1);
            d.slp_rev = -isat * t1 / nvtm;
        }
        other => diag.warn(format!("Specified dioMod = {other} not matched")),
    }
    d
}

/// Physical oxide thickness from the equivalent oxide thickness.
///
/// Evaluates the threshold voltage at the EOT extraction conditions, then
/// iterates the charge centroid thickness to a fixed point.
fn extract_toxp(mt: &ModelTemp, size: &SizeDependParams, vth0: f64, vfb: f64) -> f64 {
    let m = &mt.params;
    let p = &size.bin;
    let sign = mt.type_sign();
    let vtm0eot = KB_OVER_Q * m.tempeot.value;
    let leffeot = m.leffeot.value;
    let weffeot = m.weffeot.value;

    let vbieot = vtm0eot * (p.nsd * p.ndep / (mt.ni * mt.ni)).ln();
    let phieot = vtm0eot * (p.ndep / mt.ni).ln() + p.phin + 0.4;
    let vddeot = sign * m.vddeot.value;
    let (vgs_eff, _) = poly_depletion(
        vfb + phieot,
        p.ngate,
        m.epsrgate.value * EPS0,
        mt.coxe,
        vddeot,
    );

    // threshold voltage at Vds = Vbs = 0
    let v0 = vbieot - phieot;
    let lt1 = mt.factor1 * size.sqrt_xdep0;
    let theta0 = theta(p.dvt1 * leffeot / lt1);
    let delt_vth = p.dvt0 * theta0 * v0;
    let t2 = p.dvt0w * theta(p.dvt1w * weffeot * leffeot / lt1) * v0;
    let temp_ratio = m.tempeot.value / m.tnom.value - 1.0;
    let t0 = (1.0 + p.lpe0 / leffeot).sqrt();
    let t1 = size.k1ox * (t0 - 1.0) * phieot.sqrt() + (p.kt1 + p.kt1l / leffeot) * temp_ratio;
    let vth_narrow_w = mt.toxe * phieot / (weffeot + p.w0);
    let lpe_vb = (1.0 + p.lpeb / leffeot).sqrt();
    let mut vth = sign * vth0 + (size.k1ox - p.k1) * phieot.sqrt() * lpe_vb - delt_vth - t2
        + p.k3 * vth_narrow_w
        + t1;

    let tmp3 = (p.nfactor * mt.epssub / size.xdep0 + p.cdsc * theta0 + p.cit) / mt.coxe;
    let n = if tmp3 >= -0.5 {
        1.0 + tmp3
    } else {
        (1.0 + 3.0 * tmp3) / (3.0 + 8.0 * tmp3)
    };
    // pocket implant
    if p.dvtp0 > 0.0 {
        let t3 = leffeot + p.dvtp0 * 2.0;
        vth -= n * vtm0eot * (leffeot / t3).ln();
    }
    let vgsteff = vgs_eff - vth;

    let vtfbphi2eot = (4.0 * (sign * vth0 - vfb - phieot)).max(0.0);
    let mut toxpf = mt.toxe;
    let mut niter = 0;
    loop {
        let toxpi = toxpf;
        let t0 = (vgsteff + vtfbphi2eot) / (2.0e8 * toxpf);
        let t1 = 1.0 + (m.bdos.value * 0.7 * t0.ln()).exp();
        let tcen = m.ados.value * 1.9e-9 / t1;
        toxpf = mt.toxe - mt.epsrox / m.epsrsub.value * tcen;
        niter += 1;
        if niter > 4 || (toxpf - toxpi).abs() <= 1e-12 {
            break;
        }
    }
    log::trace!("toxp converged to {toxpf} after {niter} iterations");
    toxpf
}
