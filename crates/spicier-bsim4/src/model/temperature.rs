//! Model-level temperature stage.
//!
//! One [`ModelTemp`] exists per model and circuit temperature. It owns a
//! corrected copy of the model parameters, the temperature-scaled junction
//! data for both diffusion sides, and the size-dependent parameter cache
//! shared by every instance of the model at that temperature.

use std::sync::Arc;

use super::ModelParams;
use crate::consts::{EPS0, EPS_SI, KB_OVER_Q, REFTEMP, VT_REF};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::param::Param;
use crate::size_dep::{SizeCache, SizeDependParams, SizeKey};

/// Temperature-scaled junction data for one diffusion side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JunctionSide {
    /// Bottom saturation current density (A/m²)
    pub js: f64,
    /// Isolation-edge sidewall saturation current density (A/m)
    pub jsw: f64,
    /// Gate-edge sidewall saturation current density (A/m)
    pub jswg: f64,
    /// Bottom junction capacitance per area (F/m²)
    pub cj: f64,
    /// Sidewall junction capacitance per length (F/m)
    pub cjsw: f64,
    /// Gate-edge sidewall junction capacitance per length (F/m)
    pub cjswg: f64,
    /// Bottom built-in potential (V)
    pub phib: f64,
    /// Sidewall built-in potential (V)
    pub phibsw: f64,
    /// Gate-edge sidewall built-in potential (V)
    pub phibswg: f64,
    /// Trap-assisted tunnelling emission coefficients at temperature
    pub njts: f64,
    pub njtssw: f64,
    pub njtsswg: f64,
}

/// Model state at one circuit temperature.
#[derive(Debug)]
pub struct ModelTemp {
    name: String,
    /// Model parameters after the temperature-stage corrections.
    pub params: ModelParams,

    /// Circuit temperature (K)
    pub temp: f64,
    /// Nominal temperature (K)
    pub tnom: f64,
    /// temp / tnom
    pub tratio: f64,
    /// temp - tnom (K)
    pub del_temp: f64,
    /// Thermal voltage at temp (V)
    pub vtm: f64,
    /// Thermal voltage at tnom (V)
    pub vtm0: f64,
    /// Band gap at tnom (eV)
    pub eg0: f64,
    /// Band gap at temp (eV)
    pub eg: f64,
    /// Intrinsic carrier density at tnom (cm⁻³)
    pub ni: f64,
    /// Junction critical voltage (V)
    pub vcrit: f64,
    pub factor1: f64,

    /// Effective oxide permittivity relative to vacuum
    pub epsrox: f64,
    /// Effective electrical oxide thickness (m)
    pub toxe: f64,
    /// Substrate permittivity (F/m)
    pub epssub: f64,
    /// Electrical oxide capacitance per area (F/m²)
    pub coxe: f64,
    /// Physical oxide capacitance per area (F/m²)
    pub coxp: f64,

    pub source: JunctionSide,
    pub drain: JunctionSide,

    diagnostics: Diagnostics,
    sizes: SizeCache,
}

/// Band gap of the substrate at `t`.
fn band_gap(m: &ModelParams, t: f64) -> f64 {
    if m.mtrlmod.as_i32() == 0 {
        1.16 - 7.02e-4 * t * t / (t + 1108.0)
    } else {
        m.bg0sub.value - m.tbgasub.value * t * t / (t + m.tbgbsub.value)
    }
}

fn floor_potential(p: &mut Param, name: &str, diag: &mut Diagnostics) {
    if p.value < 0.1 {
        p.assign(0.1);
        let upper = capitalize(name);
        diag.warn(format!(
            "Given {name} is less than 0.1. {upper} is set to 0.1."
        ));
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Scale a junction capacitance by `1 + t0`, clamping at zero.
fn scale_cap(cap: f64, t0: f64, name: &str, diag: &mut Diagnostics) -> f64 {
    if t0 >= -1.0 {
        cap * (1.0 + t0)
    } else {
        if cap > 0.0 {
            let upper = capitalize(name);
            diag.warn(format!(
                "Temperature effect has caused {name} to be negative. {upper} is clamped to zero."
            ));
        }
        0.0
    }
}

/// Built-in potential at temperature with its floor.
fn scale_potential(pb: f64, tc: f64, del_temp: f64, strict: bool, name: &str, diag: &mut Diagnostics) -> f64 {
    let phi = pb - tc * del_temp;
    let low = if strict { phi < 0.01 } else { phi <= 0.01 };
    if low {
        let upper = capitalize(name);
        diag.warn(format!(
            "Temperature effect has caused {name} to be less than 0.01. {upper} is clamped to 0.01."
        ));
        0.01
    } else {
        phi
    }
}

fn zero_if_negative(p: &mut Param, name: &str, diag: &mut Diagnostics) {
    if p.value < 0.0 {
        diag.warn(format!("Warning: {name} = {} is negative. Set to zero.", p.value));
        p.assign(0.0);
    }
}

/// Corrections the parameter check applies to the model itself.
///
/// Runs once per temperature stage on its private copy, so every instance
/// sees the corrected values and the warnings are reported once.
fn correct_model(m: &mut ModelParams, diag: &mut Diagnostics) {
    zero_if_negative(&mut m.cgdo, "cgdo", diag);
    zero_if_negative(&mut m.cgso, "cgso", diag);
    zero_if_negative(&mut m.cgbo, "cgbo", diag);

    let tnoimod = m.tnoimod.as_i32();
    if tnoimod == 1 || tnoimod == 2 {
        zero_if_negative(&mut m.tnoia, "tnoia", diag);
        zero_if_negative(&mut m.tnoib, "tnoib", diag);
        zero_if_negative(&mut m.rnoia, "rnoia", diag);
        zero_if_negative(&mut m.rnoib, "rnoib", diag);
    }
    if tnoimod == 2 {
        zero_if_negative(&mut m.tnoic, "tnoic", diag);
        zero_if_negative(&mut m.rnoic, "rnoic", diag);
    }

    for (p, name) in [(&mut m.njs, "Njs"), (&mut m.njd, "Njd")] {
        if p.value < 0.1 {
            diag.warn(format!(
                "Warning: {name} = {} is less than 0.1. Setting {name} to 0.1.",
                p.value
            ));
            p.assign(0.1);
        } else if p.value < 0.7 {
            diag.warn(format!("Warning: {name} = {} is less than 0.7.", p.value));
        }
    }

    zero_if_negative(&mut m.ntnoi, "ntnoi", diag);

    for (p, name) in [
        (&mut m.mjs, "MJS"),
        (&mut m.mjsws, "MJSWS"),
        (&mut m.mjswgs, "MJSWGS"),
        (&mut m.mjd, "MJD"),
        (&mut m.mjswd, "MJSWD"),
        (&mut m.mjswgd, "MJSWGD"),
    ] {
        if p.value >= 0.99 {
            diag.warn(format!("Warning: {name} = {} is too big. Set to 0.99.", p.value));
            p.assign(0.99);
        }
    }

    if m.wpemod.as_i32() == 1 && m.scref.value <= 0.0 {
        diag.warn(format!(
            "Warning: SCREF = {} is not positive. Set to 1e-6.",
            m.scref.value
        ));
        m.scref.assign(1e-6);
    }
}

impl ModelTemp {
    /// Build the temperature stage from resolved model parameters.
    pub fn new(name: &str, resolved: &ModelParams, temp: f64) -> Self {
        let mut diag = Diagnostics::new(name);
        let mut m = resolved.clone();

        floor_potential(&mut m.pbs, "pbs", &mut diag);
        floor_potential(&mut m.pbsws, "pbsws", &mut diag);
        floor_potential(&mut m.pbswgs, "pbswgs", &mut diag);
        floor_potential(&mut m.pbd, "pbd", &mut diag);
        floor_potential(&mut m.pbswd, "pbswd", &mut diag);
        floor_potential(&mut m.pbswgd, "pbswgd", &mut diag);

        // ================================================================
        // Oxide thickness
        // ================================================================

        if m.mtrlmod.as_i32() == 0 {
            if m.toxe.given
                && m.toxp.given
                && m.dtox.given
                && m.toxe.value != m.toxp.value + m.dtox.value
            {
                diag.warn("Warning: toxe, toxp and dtox all given and toxe != toxp + dtox; dtox ignored.");
            } else if m.toxe.given && !m.toxp.given {
                m.toxp.assign(m.toxe.value - m.dtox.value);
            } else if !m.toxe.given && m.toxp.given {
                m.toxe.assign(m.toxp.value + m.dtox.value);
                if !m.toxm.given {
                    m.toxm.assign(m.toxe.value);
                }
            }
        } else if m.mtrlcompatmod.as_i32() != 0 {
            let t0 = m.epsrox.value / 3.9;
            if m.eot.given
                && m.toxp.given
                && m.dtox.given
                && (m.eot.value * t0 - (m.toxp.value + m.dtox.value)).abs() > 1.0e-20
            {
                diag.warn("Warning: eot, toxp and dtox all given and eot * EPSROX / 3.9 != toxp + dtox; dtox ignored.");
            } else if m.eot.given && !m.toxp.given {
                m.toxp.assign(t0 * m.eot.value - m.dtox.value);
            } else if !m.eot.given && m.toxp.given {
                m.eot.assign((m.toxp.value + m.dtox.value) / t0);
                if !m.toxm.given {
                    m.toxm.assign(m.eot.value);
                }
            }
        }

        let (epsrox, toxe, epssub) = if m.mtrlmod.as_i32() != 0 {
            (3.9, m.eot.value, EPS0 * m.epsrsub.value)
        } else {
            (m.epsrox.value, m.toxe.value, EPS_SI)
        };
        let coxe = epsrox * EPS0 / toxe;
        // the material model leaves coxp to the instance stage
        let coxp = if m.mtrlmod.as_i32() == 0 || m.mtrlcompatmod.as_i32() != 0 {
            m.epsrox.value * EPS0 / m.toxp.value
        } else {
            0.0
        };

        // overlap capacitances
        let dlc_positive = m.dlc.given && m.dlc.value > 0.0;
        if !m.cgdo.given {
            let v = if dlc_positive {
                m.dlc.value * coxe - m.cgdl.base.value
            } else {
                0.6 * m.xj.base.value * coxe
            };
            m.cgdo.assign(v);
        }
        if !m.cgso.given {
            let v = if dlc_positive {
                m.dlc.value * coxe - m.cgsl.base.value
            } else {
                0.6 * m.xj.base.value * coxe
            };
            m.cgso.assign(v);
        }
        if !m.cgbo.given {
            m.cgbo.assign(2.0 * m.dwc.value * coxe);
        }

        if m.paramchk.as_i32() == 1 {
            correct_model(&mut m, &mut diag);
        }

        // ================================================================
        // Temperature scaling
        // ================================================================

        let tnom = m.tnom.value;
        let tratio = temp / tnom;
        let vcrit = VT_REF * (VT_REF / (std::f64::consts::SQRT_2 * 1.0e-14)).ln();
        let factor1 = (epssub / (epsrox * EPS0) * toxe).sqrt();
        let vtm0 = KB_OVER_Q * tnom;

        let eg0 = band_gap(&m, tnom);
        let tnom_ratio = tnom / REFTEMP;
        let ni = if m.mtrlmod.as_i32() == 0 {
            1.45e10 * tnom_ratio * tnom_ratio.sqrt() * (21.5565981 - eg0 / (2.0 * vtm0)).exp()
        } else {
            let t0 = m.bg0sub.value - m.tbgasub.value * 90090.0225 / (REFTEMP + m.tbgbsub.value);
            m.ni0sub.value * tnom_ratio * tnom_ratio.sqrt() * ((t0 - eg0) / (2.0 * vtm0)).exp()
        };
        let vtm = KB_OVER_Q * temp;
        let eg = band_gap(&m, temp);

        let (s_scale, d_scale) = if temp != tnom {
            let t0 = eg0 / vtm0 - eg / vtm;
            let t1 = (temp / tnom).ln();
            (
                ((t0 + m.xtis.value * t1) / m.njs.value).exp(),
                ((t0 + m.xtid.value * t1) / m.njd.value).exp(),
            )
        } else {
            (1.0, 1.0)
        };

        let mut source = JunctionSide {
            js: (m.jss.value * s_scale).max(0.0),
            jsw: (m.jsws.value * s_scale).max(0.0),
            jswg: (m.jswgs.value * s_scale).max(0.0),
            ..JunctionSide::default()
        };
        let mut drain = JunctionSide {
            js: (m.jsd.value * d_scale).max(0.0),
            jsw: (m.jswd.value * d_scale).max(0.0),
            jswg: (m.jswgd.value * d_scale).max(0.0),
            ..JunctionSide::default()
        };

        // junction capacitance
        let del_temp = temp - tnom;
        let t0 = m.tcj.value * del_temp;
        source.cj = scale_cap(m.cjs.value, t0, "cjs", &mut diag);
        drain.cj = scale_cap(m.cjd.value, t0, "cjd", &mut diag);

        if m.cjsws.value < 0.0 {
            m.cjsws.assign(0.0);
            diag.warn("CJSWS is negative. Cjsws is clamped to zero.");
        }
        if m.cjswd.value < 0.0 {
            m.cjswd.assign(0.0);
            diag.warn("CJSWD is negative. Cjswd is clamped to zero.");
        }
        let t0 = m.tcjsw.value * del_temp;
        source.cjsw = scale_cap(m.cjsws.value, t0, "cjsws", &mut diag);
        drain.cjsw = scale_cap(m.cjswd.value, t0, "cjswd", &mut diag);
        let t0 = m.tcjswg.value * del_temp;
        source.cjswg = scale_cap(m.cjswgs.value, t0, "cjswgs", &mut diag);
        drain.cjswg = scale_cap(m.cjswgd.value, t0, "cjswgd", &mut diag);

        source.phib = scale_potential(m.pbs.value, m.tpb.value, del_temp, true, "pbs", &mut diag);
        drain.phib = scale_potential(m.pbd.value, m.tpb.value, del_temp, true, "pbd", &mut diag);
        source.phibsw =
            scale_potential(m.pbsws.value, m.tpbsw.value, del_temp, false, "pbsws", &mut diag);
        drain.phibsw =
            scale_potential(m.pbswd.value, m.tpbsw.value, del_temp, false, "pbswd", &mut diag);
        source.phibswg =
            scale_potential(m.pbswgs.value, m.tpbswg.value, del_temp, false, "pbswgs", &mut diag);
        drain.phibswg =
            scale_potential(m.pbswgd.value, m.tpbswg.value, del_temp, false, "pbswgd", &mut diag);

        // diode limiting currents and breakdown
        for (p, name) in [
            (&mut m.ijthdfwd, "Ijthdfwd"),
            (&mut m.ijthsfwd, "Ijthsfwd"),
            (&mut m.ijthdrev, "Ijthdrev"),
            (&mut m.ijthsrev, "Ijthsrev"),
        ] {
            if p.value <= 0.0 {
                p.assign(0.0);
                diag.warn(format!("{name} reset to 0."));
            }
        }

        let diomod = m.diomod.as_i32();
        for (xjbv, bv, xname, bname) in [
            (&mut m.xjbvd, &mut m.bvd, "Xjbvd", "BVD"),
            (&mut m.xjbvs, &mut m.bvs, "Xjbvs", "BVS"),
        ] {
            if (xjbv.value <= 0.0 && diomod == 2) || (xjbv.value < 0.0 && diomod == 0) {
                xjbv.assign(0.0);
                diag.warn(format!("{xname} reset to 0."));
            }
            if bv.value <= 0.0 {
                bv.assign(0.0);
                diag.warn(format!("{bname} reset to 0."));
            }
        }

        let t0 = tratio - 1.0;
        source.njts = m.njts.value * (1.0 + m.tnjts.value * t0);
        source.njtssw = m.njtssw.value * (1.0 + m.tnjtssw.value * t0);
        source.njtsswg = m.njtsswg.value * (1.0 + m.tnjtsswg.value * t0);
        drain.njts = m.njtsd.value * (1.0 + m.tnjtsd.value * t0);
        drain.njtssw = m.njtsswd.value * (1.0 + m.tnjtsswd.value * t0);
        drain.njtsswg = m.njtsswgd.value * (1.0 + m.tnjtsswgd.value * t0);

        if m.paramchk.as_i32() == 1 {
            for (v, name, check) in [
                (source.njts, "Njts", true),
                (source.njtssw, "Njtssw", true),
                (source.njtsswg, "Njtsswg", true),
                (drain.njts, "Njtsd", m.njtsd.given),
                (drain.njtssw, "Njtsswd", m.njtsswd.given),
                (drain.njtsswg, "Njtsswgd", m.njtsswgd.given),
            ] {
                if check && v < 0.0 {
                    diag.warn(format!(
                        "Warning: {name} = {v} is negative at temperature = {temp}."
                    ));
                }
            }
        }

        log::debug!("{}: model temperature stage at {} K", name, temp);

        Self {
            name: name.to_string(),
            params: m,
            temp,
            tnom,
            tratio,
            del_temp,
            vtm,
            vtm0,
            eg0,
            eg,
            ni,
            vcrit,
            factor1,
            epsrox,
            toxe,
            epssub,
            coxe,
            coxp,
            source,
            drain,
            diagnostics: diag,
            sizes: SizeCache::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Warnings raised while building this stage.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// `type` in the BSIM4 equations.
    pub fn type_sign(&self) -> f64 {
        self.params.mos_type.sign()
    }

    /// Junction data for one side.
    pub fn junction(&self, side: crate::geometry::Terminal) -> &JunctionSide {
        match side {
            crate::geometry::Terminal::Source => &self.source,
            crate::geometry::Terminal::Drain => &self.drain,
        }
    }

    /// Size-dependent parameters for a drawn geometry.
    ///
    /// Built on first use and shared afterwards; `instance` only names the
    /// caller in a fatal geometry error.
    pub fn size_params(
        &self,
        instance: &str,
        w: f64,
        l: f64,
        nf: f64,
    ) -> Result<Arc<SizeDependParams>> {
        let key = SizeKey::new(w, l, nf);
        self.sizes
            .get_or_try_insert(key, || SizeDependParams::build(self, instance, w, l, nf))
    }

    /// Number of distinct geometries seen so far.
    pub fn cached_sizes(&self) -> usize {
        self.sizes.len()
    }
}
