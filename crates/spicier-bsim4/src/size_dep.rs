//! Size-dependent parameter bundles and their shared cache.
//!
//! Every parameter that depends only on the drawn geometry (W, L, NF) and
//! the model temperature lives in a [`SizeDependParams`]. Bundles are built
//! once per distinct geometry and shared by every instance that uses it.
//!
//! # Features
//!
//! - Effective L/W for I-V, C-V and junctions with fatal checks
//! - Binning of every binned model parameter (`binunit` aware)
//! - tempMod 0 (linear offset) and 1/2/3 (fractional or power-law)
//!   temperature scaling of mobility, saturation velocity and resistances
//! - Body-effect coefficients either as given or from doping physics
//! - Reference terms of the layout stress model

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::consts::{CHARGE, DELTA, EPS0, EXP_THRESHOLD, MAX_EXP, MIN_EXP};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::helpers::{dexp, theta};
use crate::model::{BinnedValues, ModelTemp};

/// Cache key: the exact drawn geometry of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeKey {
    w: u64,
    l: u64,
    nf: u64,
}

impl SizeKey {
    pub fn new(w: f64, l: f64, nf: f64) -> Self {
        Self {
            w: w.to_bits(),
            l: l.to_bits(),
            nf: nf.to_bits(),
        }
    }

    pub fn w(&self) -> f64 {
        f64::from_bits(self.w)
    }

    pub fn l(&self) -> f64 {
        f64::from_bits(self.l)
    }

    pub fn nf(&self) -> f64 {
        f64::from_bits(self.nf)
    }
}

/// Geometry-dependent parameters at one model temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeDependParams {
    pub key: SizeKey,
    /// Number of fingers
    pub nf: f64,
    /// L + XL (m)
    pub lnew: f64,
    /// W/NF + XW (m)
    pub wnew: f64,

    // ========================================================================
    // Effective geometry
    // ========================================================================
    pub dl: f64,
    pub dlc: f64,
    pub dw: f64,
    pub dwc: f64,
    pub dwj: f64,
    /// Effective channel length (m)
    pub leff: f64,
    /// Effective channel width per finger (m)
    pub weff: f64,
    pub leff_cv: f64,
    pub weff_cv: f64,
    /// Effective junction width per finger (m)
    pub weff_cj: f64,

    /// Binned parameters, adjusted for temperature where BSIM4 does so.
    pub bin: BinnedValues,

    // ========================================================================
    // Derived
    // ========================================================================
    pub abulk_cv_factor: f64,
    /// Saturation velocity at temperature (m/s)
    pub vsattemp: f64,
    /// Internal Rds at temperature (Ω)
    pub rds0: f64,
    pub rdswmin: f64,
    pub rd0: f64,
    pub rdwmin: f64,
    pub rs0: f64,
    pub rswmin: f64,
    /// Low-field mobility at temperature (m²/Vs)
    pub u0temp: f64,
    pub lc: f64,
    pub tfactor: f64,
    /// Overlap capacitances scaled by width (F)
    pub cgdo: f64,
    pub cgso: f64,
    pub cgbo: f64,
    /// Surface potential (V)
    pub phi: f64,
    pub sqrt_phi: f64,
    pub phis3: f64,
    /// Zero-bias depletion width (m)
    pub xdep0: f64,
    pub sqrt_xdep0: f64,
    pub litl: f64,
    /// Built-in potential of the S/D junction (V)
    pub vbi: f64,
    pub vfbsd: f64,
    pub cdep0: f64,
    pub tox_ratio: f64,
    pub tox_ratio_edge: f64,
    pub aechvb: f64,
    pub bechvb: f64,
    pub aechvb_edge_s: f64,
    pub aechvb_edge_d: f64,
    pub bechvb_edge: f64,
    pub mstar: f64,
    pub mstarcv: f64,
    pub voffcbn: f64,
    pub voffcbncv: f64,
    pub ldeb: f64,
    pub k1ox: f64,
    pub theta0vb0: f64,
    pub theta_rout: f64,
    pub vfbzbfactor: f64,
    pub vgsteff_vth: f64,
    pub dvtp2factor: f64,

    // ========================================================================
    // Layout stress reference terms
    // ========================================================================
    pub ku0: f64,
    pub kvth0: f64,
    pub ku0temp: f64,
    pub inv_od_ref: f64,
    pub rho_ref: f64,

    pub diagnostics: Diagnostics,
}

impl SizeDependParams {
    /// Derive the bundle for drawn geometry `w`, `l`, `nf`.
    ///
    /// Fails with [`Error::EffectiveGeometry`] when any effective length
    /// or width is not positive.
    pub fn build(mt: &ModelTemp, instance: &str, w: f64, l: f64, nf: f64) -> Result<Self> {
        let m = &mt.params;
        let mut diag = Diagnostics::new(mt.name());
        let geometry_error = |what: &'static str| Error::EffectiveGeometry {
            instance: instance.to_string(),
            model: mt.name().to_string(),
            what,
        };

        let ldrn = l;
        let lnew = l + m.xl.value;
        let wnew = w / nf + m.xw.value;

        let t0 = lnew.powf(m.lln.value);
        let t1 = wnew.powf(m.lwn.value);
        let dl = m.lint.value + m.ll.value / t0 + m.lw.value / t1 + m.lwl.value / (t0 * t1);
        let dlc = m.dlc.value + m.llc.value / t0 + m.lwc.value / t1 + m.lwlc.value / (t0 * t1);

        let t2 = lnew.powf(m.wln.value);
        let t3 = wnew.powf(m.wwn.value);
        let dw = m.wint.value + m.wl.value / t2 + m.ww.value / t3 + m.wwl.value / (t2 * t3);
        let tmp2 = m.wlc.value / t2 + m.wwc.value / t3 + m.wwlc.value / (t2 * t3);
        let dwc = m.dwc.value + tmp2;
        let dwj = m.dwj.value + tmp2;

        let leff = lnew - 2.0 * dl;
        if leff <= 0.0 {
            return Err(geometry_error("length"));
        }
        let weff = wnew - 2.0 * dw;
        if weff <= 0.0 {
            return Err(geometry_error("width"));
        }
        let leff_cv = lnew - 2.0 * dlc;
        if leff_cv <= 0.0 {
            return Err(geometry_error("length for C-V"));
        }
        let weff_cv = wnew - 2.0 * dwc;
        if weff_cv <= 0.0 {
            return Err(geometry_error("width for C-V"));
        }
        let weff_cj = wnew - 2.0 * dwj;
        if weff_cj <= 0.0 {
            return Err(geometry_error("width for S/D junctions"));
        }

        let (inv_l, inv_w, inv_lw) = if m.binunit.as_i32() == 1 {
            (1.0e-6 / leff, 1.0e-6 / weff, 1.0e-12 / (leff * weff))
        } else {
            (1.0 / leff, 1.0 / weff, 1.0 / (leff * weff))
        };
        let mut p = m.bin(inv_l, inv_w, inv_lw);

        let abulk_cv_factor = 1.0 + (p.clc / leff_cv).powf(p.cle);

        // ====================================================================
        // Temperature scaling
        // ====================================================================

        let tratio = mt.tratio;
        let del_temp = mt.del_temp;
        let t0 = tratio - 1.0;
        let pow_weff_wr = (weff_cj * 1.0e6).powf(p.wr) * nf;

        let (mut t1, mut t2, mut t3, mut t4) = (0.0, 0.0, 0.0, 0.0);
        let rdsmod = m.rdsmod.as_i32() != 0;
        p.ucs *= tratio.powf(p.ucste);
        let vsattemp;
        let rds0;
        let rdswmin;
        match m.tempmod.as_i32() {
            0 => {
                p.ua += p.ua1 * t0;
                p.ub += p.ub1 * t0;
                p.uc += p.uc1 * t0;
                p.ud += p.ud1 * t0;
                vsattemp = p.vsat - p.at * t0;
                let t10 = p.prt * t0;
                if rdsmod {
                    t1 = p.rdw + t10;
                    t2 = m.rdwmin.value + t10;
                    t3 = p.rsw + t10;
                    t4 = m.rswmin.value + t10;
                }
                rds0 = (p.rdsw + t10) * nf / pow_weff_wr;
                rdswmin = (m.rdswmin.value + t10) * nf / pow_weff_wr;
            }
            tempmod => {
                if tempmod == 3 {
                    p.ua *= tratio.powf(p.ua1);
                    p.ub *= tratio.powf(p.ub1);
                    p.uc *= tratio.powf(p.uc1);
                    p.ud *= tratio.powf(p.ud1);
                } else {
                    p.ua *= 1.0 + p.ua1 * del_temp;
                    p.ub *= 1.0 + p.ub1 * del_temp;
                    p.uc *= 1.0 + p.uc1 * del_temp;
                    p.ud *= 1.0 + p.ud1 * del_temp;
                }
                vsattemp = p.vsat * (1.0 - p.at * del_temp);
                let t10 = 1.0 + p.prt * del_temp;
                if rdsmod {
                    t1 = p.rdw * t10;
                    t2 = m.rdwmin.value * t10;
                    t3 = p.rsw * t10;
                    t4 = m.rswmin.value * t10;
                }
                rds0 = p.rdsw * t10 * nf / pow_weff_wr;
                rdswmin = m.rdswmin.value * t10 * nf / pow_weff_wr;
            }
        }

        for (v, name) in [
            (&mut t1, "Rdw"),
            (&mut t2, "Rdwmin"),
            (&mut t3, "Rsw"),
            (&mut t4, "Rswmin"),
        ] {
            if *v < 0.0 {
                *v = 0.0;
                diag.warn(format!(
                    "Warning: {name} at current temperature is negative; set to 0."
                ));
            }
        }
        let rd0 = t1 / pow_weff_wr;
        let rdwmin = t2 / pow_weff_wr;
        let rs0 = t3 / pow_weff_wr;
        let rswmin = t4 / pow_weff_wr;

        if p.u0 > 1.0 {
            p.u0 /= 1.0e4;
        }
        // channel length dependence of mobility
        let t5 = 1.0 - p.up * (-leff / p.lp).exp();
        let u0temp = p.u0 * t5 * tratio.powf(p.ute);
        if p.eu < 0.0 {
            p.eu = 0.0;
            diag.warn("Warning: eu has been negative; reset to 0.0.");
        }
        if p.ucs < 0.0 {
            p.ucs = 0.0;
            diag.warn("Warning: ucs has been negative; reset to 0.0.");
        }

        p.vfbsdoff *= 1.0 + p.tvfbsdoff * del_temp;
        p.voff *= 1.0 + p.tvoff * del_temp;
        p.nfactor += p.tnfactor * del_temp / mt.tnom;
        p.voffcv *= 1.0 + p.tvoffcv * del_temp;
        p.eta0 += p.teta0 * del_temp / mt.tnom;

        // source end velocity limit
        let mut lc = 0.0;
        let mut tfactor = 0.0;
        if m.vtl.base.given && m.vtl.base.value > 0.0 {
            lc = m.lc.value.max(0.0);
            let t0 = leff / (p.xn * leff + lc);
            tfactor = (1.0 - t0) / (1.0 + t0);
        }

        let cgdo = (m.cgdo.value + p.cf) * weff_cv;
        let cgso = (m.cgso.value + p.cf) * weff_cv;
        let cgbo = m.cgbo.value * leff_cv * nf;

        // ====================================================================
        // Surface potential and depletion
        // ====================================================================

        let coxe = mt.coxe;
        let epssub = mt.epssub;
        let toxe = mt.toxe;
        let vtm0 = mt.vtm0;
        let ni = mt.ni;
        let sign = mt.type_sign();

        if !m.ndep.base.given && m.gamma1.base.given {
            let t0 = p.gamma1 * coxe;
            p.ndep = 3.01248e22 * t0 * t0;
        }

        let phi = vtm0 * (p.ndep / ni).ln() + p.phin + 0.4;
        let sqrt_phi = phi.sqrt();
        let phis3 = sqrt_phi * phi;
        let xdep0 = (2.0 * epssub / (CHARGE * p.ndep * 1.0e6)).sqrt() * sqrt_phi;
        let sqrt_xdep0 = xdep0.sqrt();

        let litl = if m.mtrlmod.as_i32() == 0 {
            (3.0 * 3.9 / mt.epsrox * p.xj * toxe).sqrt()
        } else {
            (m.epsrsub.value / mt.epsrox * p.xj * toxe).sqrt()
        };

        let vbi = vtm0 * (p.nsd * p.ndep / (ni * ni)).ln();
        let vfbsd = if m.mtrlmod.as_i32() == 0 {
            if p.ngate > 0.0 {
                vtm0 * (p.ngate / p.nsd).ln()
            } else {
                0.0
            }
        } else {
            let t1 = 0.5 * mt.eg0;
            let t0 = (vtm0 * (p.nsd / ni).ln()).min(t1);
            m.phig.value - (m.easub.value + t1 - sign * t0)
        };

        let cdep0 = (CHARGE * epssub * p.ndep * 1.0e6 / 2.0 / phi).sqrt();

        // gate tunnelling prefactors
        let tox_ratio = (p.ntox * (m.toxref.value / toxe).ln()).exp() / toxe / toxe;
        let tox_ratio_edge = (p.ntox * (m.toxref.value / (toxe * p.poxedge)).ln()).exp()
            / toxe
            / toxe
            / p.poxedge
            / p.poxedge;
        let (aechvb0, bechvb0) = if m.mos_type.is_nmos() {
            (4.97232e-7, 7.45669e11)
        } else {
            (3.42537e-7, 1.16645e12)
        };
        let aechvb_edge_s = aechvb0 * weff * m.dlcig.value * tox_ratio_edge;
        let aechvb_edge_d = aechvb0 * weff * m.dlcigd.value * tox_ratio_edge;
        let bechvb_edge = -bechvb0 * toxe * p.poxedge;
        let aechvb = aechvb0 * weff * leff * tox_ratio;
        let bechvb = -bechvb0 * toxe;

        let mstar = 0.5 + p.minv.atan() / PI;
        let mstarcv = 0.5 + p.minvcv.atan() / PI;
        let voffcbn = p.voff + m.voffl.value / leff;
        let voffcbncv = p.voffcv + m.voffcvl.value / leff;

        let ldeb = (epssub * vtm0 / (CHARGE * p.ndep * 1.0e6)).sqrt() / 3.0;
        p.acde *= (p.ndep / 2.0e16).powf(-0.25);

        // ====================================================================
        // Body effect
        // ====================================================================

        if m.k1.base.given || m.k2.base.given {
            if !m.k1.base.given {
                diag.warn("Warning: k1 should be specified with k2.");
                p.k1 = 0.53;
            }
            if !m.k2.base.given {
                diag.warn("Warning: k2 should be specified with k1.");
                p.k2 = -0.0186;
            }
            for (given, name) in [
                (m.nsub.base.given, "nsub"),
                (m.xt.base.given, "xt"),
                (m.vbx.base.given, "vbx"),
                (m.gamma1.base.given, "gamma1"),
                (m.gamma2.base.given, "gamma2"),
            ] {
                if given {
                    diag.warn(format!(
                        "Warning: {name} is ignored because k1 or k2 is given."
                    ));
                }
            }
        } else {
            if !m.vbx.base.given {
                p.vbx = phi - 7.7348e-4 * p.ndep * p.xt * p.xt;
            }
            if p.vbx > 0.0 {
                p.vbx = -p.vbx;
            }
            if p.vbm > 0.0 {
                p.vbm = -p.vbm;
            }
            if !m.gamma1.base.given {
                p.gamma1 = 5.753e-12 * p.ndep.sqrt() / coxe;
            }
            if !m.gamma2.base.given {
                p.gamma2 = 5.753e-12 * p.nsub.sqrt() / coxe;
            }
            let t0 = p.gamma1 - p.gamma2;
            let t1 = (phi - p.vbx).sqrt() - sqrt_phi;
            let t2 = (phi * (phi - p.vbm)).sqrt() - phi;
            p.k2 = t0 * t1 / (2.0 * t2 + p.vbm);
            p.k1 = p.gamma2 - 2.0 * p.k2 * (phi - p.vbm).sqrt();
        }

        if !m.vfb.base.given {
            p.vfb = if m.vth0.base.given {
                sign * p.vth0 - phi - p.k1 * sqrt_phi
            } else if m.mtrlmod.as_i32() != 0 && m.phig.given && m.nsub.base.given {
                let t1 = 0.5 * mt.eg0;
                let t0 = (vtm0 * (p.nsub / ni).ln()).min(t1);
                m.phig.value - (m.easub.value + t1 + sign * t0)
            } else {
                -1.0
            };
        }
        if !m.vth0.base.given {
            p.vth0 = sign * (p.vfb + phi + p.k1 * sqrt_phi);
        }

        let k1ox = p.k1 * toxe / m.toxm.value;

        let tmp = (epssub / (mt.epsrox * EPS0) * toxe * xdep0).sqrt();
        let theta0vb0 = theta(p.dsub * leff / tmp);
        let theta_rout = p.pdiblc1 * theta(p.drout * leff / tmp) + p.pdiblc2;

        // ====================================================================
        // Zero-bias flat-band factor
        // ====================================================================

        let tmp1 = vbi - phi;
        let tmp2 = mt.factor1 * sqrt_xdep0;
        let t8 = p.dvt0w * theta(p.dvt1w * weff * leff / tmp2) * tmp1;
        let t9 = p.dvt0 * theta(p.dvt1 * leff / tmp2) * tmp1;
        let t4 = toxe * phi / (weff + p.w0);
        let t0 = (1.0 + p.lpe0 / leff).sqrt();
        let t3 = match m.tempmod.as_i32() {
            0 | 1 => (p.kt1 + p.kt1l / leff) * (tratio - 1.0),
            _ => -p.kt1 * (tratio - 1.0),
        };
        let t5 = k1ox * (t0 - 1.0) * sqrt_phi + t3;
        let vfbzbfactor = -t8 - t9 + p.k3 * t4 + t5 - phi - p.k1 * sqrt_phi;

        // ====================================================================
        // Layout stress reference
        // ====================================================================

        let mut wlod = m.wlod.value;
        if wlod < 0.0 {
            diag.warn(format!("Warning: WLOD = {wlod} is less than 0. 0.0 is used"));
            wlod = 0.0;
        }
        let t0 = lnew.powf(m.llodku0.value);
        let w_tmp = wnew + wlod;
        let t1 = w_tmp.powf(m.wlodku0.value);
        let ku0 = 1.0 + m.lku0.value / t0 + m.wku0.value / t1 + m.pku0.value / (t0 * t1);

        let t0 = lnew.powf(m.llodvth.value);
        let t1 = w_tmp.powf(m.wlodvth.value);
        let kvth0 = 1.0 + m.lkvth0.value / t0 + m.wkvth0.value / t1 + m.pkvth0.value / (t0 * t1);
        let kvth0 = (kvth0 * kvth0 + DELTA).sqrt();

        let ku0temp = ku0 * (1.0 + m.tku0.value * (tratio - 1.0)) + DELTA;
        let inv_saref = 1.0 / (m.saref.value + 0.5 * ldrn);
        let inv_sbref = 1.0 / (m.sbref.value + 0.5 * ldrn);
        let inv_od_ref = inv_saref + inv_sbref;
        let rho_ref = m.ku0.value / ku0temp * inv_od_ref;

        // moderate inversion offset for the high-k mobility model
        let mut vgsteff_vth = 0.0;
        if m.mobmod.as_i32() == 3 {
            let lt1 = mt.factor1 * sqrt_xdep0;
            let theta0 = theta(p.dvt1 * leff / lt1);
            let tmp3 = (p.nfactor * epssub / xdep0 + p.cdsc * theta0 + p.cit) / coxe;
            let n0 = if tmp3 >= -0.5 {
                1.0 + tmp3
            } else {
                (1.0 + 3.0 * tmp3) / (3.0 + 8.0 * tmp3)
            };
            let t0 = n0 * mt.vtm;
            let t2 = voffcbn / t0;
            let e = if t2 < -EXP_THRESHOLD {
                MIN_EXP
            } else if t2 > EXP_THRESHOLD {
                MAX_EXP
            } else {
                t2.exp()
            };
            let t4 = mstar + e * coxe / cdep0 * n0;
            vgsteff_vth = t0 * 2.0_f64.ln() / t4;
        }

        let dvtp2factor = p.dvtp5 + p.dvtp2 * dexp(-p.dvtp3 * leff.ln());

        let mut bundle = Self {
            key: SizeKey::new(w, l, nf),
            nf,
            lnew,
            wnew,
            dl,
            dlc,
            dw,
            dwc,
            dwj,
            leff,
            weff,
            leff_cv,
            weff_cv,
            weff_cj,
            bin: p,
            abulk_cv_factor,
            vsattemp,
            rds0,
            rdswmin,
            rd0,
            rdwmin,
            rs0,
            rswmin,
            u0temp,
            lc,
            tfactor,
            cgdo,
            cgso,
            cgbo,
            phi,
            sqrt_phi,
            phis3,
            xdep0,
            sqrt_xdep0,
            litl,
            vbi,
            vfbsd,
            cdep0,
            tox_ratio,
            tox_ratio_edge,
            aechvb,
            bechvb,
            aechvb_edge_s,
            aechvb_edge_d,
            bechvb_edge,
            mstar,
            mstarcv,
            voffcbn,
            voffcbncv,
            ldeb,
            k1ox,
            theta0vb0,
            theta_rout,
            vfbzbfactor,
            vgsteff_vth,
            dvtp2factor,
            ku0,
            kvth0,
            ku0temp,
            inv_od_ref,
            rho_ref,
            diagnostics: Diagnostics::default(),
        };
        bundle.clamp(mt, &mut diag);
        log::trace!(
            "{}: size bundle W={} L={} NF={} leff={} weff={} rds0={} rdswmin={}",
            mt.name(),
            w,
            l,
            nf,
            leff,
            weff,
            bundle.rds0,
            bundle.rdswmin
        );
        bundle.diagnostics = diag;
        Ok(bundle)
    }

    /// Corrections the parameter check applies to the bundle.
    fn clamp(&mut self, mt: &ModelTemp, diag: &mut Diagnostics) {
        let m = &mt.params;
        let p = &mut self.bin;
        if p.ckappas < 0.02 {
            diag.warn(format!("Warning: ckappas = {} is too small.", p.ckappas));
            p.ckappas = 0.02;
        }
        if p.ckappad < 0.02 {
            diag.warn(format!("Warning: ckappad = {} is too small.", p.ckappad));
            p.ckappad = 0.02;
        }
        if m.paramchk.as_i32() != 1 {
            return;
        }

        if p.a2 < 0.01 {
            diag.warn(format!("Warning: A2 = {} is too small. Set to 0.01.", p.a2));
            p.a2 = 0.01;
        } else if p.a2 > 1.0 {
            diag.warn(format!(
                "Warning: A2 = {} is larger than 1. A2 is set to 1 and A1 is set to 0.",
                p.a2
            ));
            p.a2 = 1.0;
            p.a1 = 0.0;
        }
        if p.prwg < 0.0 {
            diag.warn(format!("Warning: Prwg = {} is negative. Set to zero.", p.prwg));
            p.prwg = 0.0;
        }
        if p.rdsw < 0.0 {
            diag.warn(format!("Warning: Rdsw = {} is negative. Set to zero.", p.rdsw));
            p.rdsw = 0.0;
            self.rds0 = 0.0;
        }
        if self.rds0 < 0.0 {
            diag.warn(format!(
                "Warning: Rds at current temperature = {} is negative. Set to zero.",
                self.rds0
            ));
            self.rds0 = 0.0;
        }
        if self.rdswmin < 0.0 {
            diag.warn(format!(
                "Warning: Rdswmin at current temperature = {} is negative. Set to zero.",
                self.rdswmin
            ));
            self.rdswmin = 0.0;
        }
        if m.vtl.base.given && p.vtl > 0.0 {
            if p.xn < 3.0 {
                diag.warn(format!(
                    "Warning: back scattering coeff xn = {} is too small. Reset to 3.0 ",
                    p.xn
                ));
                p.xn = 3.0;
            }
            if m.lc.value < 0.0 {
                diag.warn(format!(
                    "Warning: back scattering coeff lc = {} is too small. Reset to 0.0",
                    m.lc.value
                ));
                self.lc = 0.0;
            }
        }
    }
}

/// Shared cache of size bundles for one model temperature.
///
/// Bundles are computed outside the lock; when two callers race on a new
/// key the first inserted bundle wins and both receive it.
#[derive(Debug, Default)]
pub struct SizeCache {
    entries: Mutex<HashMap<SizeKey, Arc<SizeDependParams>>>,
}

impl SizeCache {
    fn lock(&self) -> MutexGuard<'_, HashMap<SizeKey, Arc<SizeDependParams>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `key`, building and inserting the bundle if absent.
    pub fn get_or_try_insert<F>(&self, key: SizeKey, build: F) -> Result<Arc<SizeDependParams>>
    where
        F: FnOnce() -> Result<SizeDependParams>,
    {
        if let Some(hit) = self.lock().get(&key) {
            log::debug!("size cache hit W={} L={} NF={}", key.w(), key.l(), key.nf());
            return Ok(Arc::clone(hit));
        }
        log::debug!("size cache miss W={} L={} NF={}", key.w(), key.l(), key.nf());
        let built = Arc::new(build()?);
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert(built);
        Ok(Arc::clone(entry))
    }

    pub fn get(&self, key: &SizeKey) -> Option<Arc<SizeDependParams>> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bsim4Model;

    fn model_temp(configure: impl FnOnce(&mut Bsim4Model)) -> Arc<ModelTemp> {
        let mut m = Bsim4Model::nmos("nch");
        configure(&mut m);
        m.setup().unwrap();
        m.at_temperature(300.15).unwrap()
    }

    #[test]
    fn test_key_is_exact() {
        assert_eq!(SizeKey::new(1e-6, 1e-7, 1.0), SizeKey::new(1e-6, 1e-7, 1.0));
        assert_ne!(SizeKey::new(1e-6, 1e-7, 1.0), SizeKey::new(1e-6, 1e-7, 2.0));
        let k = SizeKey::new(2e-6, 9e-8, 4.0);
        assert_eq!((k.w(), k.l(), k.nf()), (2e-6, 9e-8, 4.0));
    }

    #[test]
    fn test_build_is_deterministic() {
        let mt = model_temp(|_| {});
        let a = SizeDependParams::build(&mt, "M1", 5e-6, 5e-6, 1.0).unwrap();
        let b = SizeDependParams::build(&mt, "M2", 5e-6, 5e-6, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_bundle_per_key() {
        let mt = model_temp(|_| {});
        let a = mt.size_params("M1", 1e-6, 1e-7, 1.0).unwrap();
        let b = mt.size_params("M2", 1e-6, 1e-7, 1.0).unwrap();
        let c = mt.size_params("M3", 1e-6, 1e-7, 2.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(mt.cached_sizes(), 2);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = SizeCache::default();
        let mt = model_temp(|_| {});
        let key = SizeKey::new(5e-6, 5e-6, 1.0);
        let first = cache
            .get_or_try_insert(key, || SizeDependParams::build(&mt, "M1", 5e-6, 5e-6, 1.0))
            .unwrap();
        let second = cache
            .get_or_try_insert(key, || panic!("must not rebuild a cached key"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_effective_geometry() {
        let mt = model_temp(|m| {
            m.set("lint", 1e-8).unwrap();
            m.set("wint", 2e-8).unwrap();
            m.set("xl", -5e-9).unwrap();
        });
        let p = mt.size_params("M1", 2e-6, 1e-7, 2.0).unwrap();
        assert!((p.lnew - 9.5e-8).abs() < 1e-20);
        assert!((p.wnew - 1e-6).abs() < 1e-20);
        assert!((p.leff - (9.5e-8 - 2e-8)).abs() < 1e-20);
        assert!((p.weff - (1e-6 - 4e-8)).abs() < 1e-20);
        // C-V offsets default to the I-V ones
        assert_eq!(p.leff_cv, p.leff);
        assert_eq!(p.weff_cj, p.weff);
    }

    #[test]
    fn test_non_positive_length_is_fatal() {
        let mt = model_temp(|m| m.set("lint", 1e-6).unwrap());
        match mt.size_params("M7", 1e-6, 1e-6, 1.0) {
            Err(Error::EffectiveGeometry { instance, what, .. }) => {
                assert_eq!(instance, "M7");
                assert_eq!(what, "length");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(mt.cached_sizes(), 0);
    }

    #[test]
    fn test_binning_applies_length_term() {
        let mt = model_temp(|m| {
            m.set("vth0", 0.7).unwrap();
            m.set("lvth0", 0.01).unwrap();
        });
        let p = mt.size_params("M1", 1e-6, 1e-6, 1.0).unwrap();
        // binunit = 1: terms in micrometres
        let expected = 0.7 + 0.01 * 1.0e-6 / p.leff;
        assert!((p.bin.vth0 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_vth0_given_drives_vfb() {
        let mt = model_temp(|m| m.set("vth0", 0.45).unwrap());
        let p = mt.size_params("M1", 5e-6, 5e-6, 1.0).unwrap();
        assert_eq!(p.bin.vth0, 0.45);
        let vfb = 0.45 - p.phi - p.bin.k1 * p.sqrt_phi;
        assert!((p.bin.vfb - vfb).abs() < 1e-12);
    }

    #[test]
    fn test_k1_without_k2_warns() {
        let mt = model_temp(|m| {
            m.set("k1", 0.5).unwrap();
            m.set("nsub", 1e17).unwrap();
        });
        let p = mt.size_params("M1", 5e-6, 5e-6, 1.0).unwrap();
        assert_eq!(p.bin.k1, 0.5);
        assert_eq!(p.bin.k2, -0.0186);
        assert!(p.diagnostics.contains("Warning: k2 should be specified with k1."));
        assert!(p.diagnostics.contains("nsub is ignored because k1 or k2 is given."));
    }

    #[test]
    fn test_body_effect_from_doping() {
        let mt = model_temp(|_| {});
        let p = mt.size_params("M1", 5e-6, 5e-6, 1.0).unwrap();
        assert!(p.bin.k1 > 0.0);
        assert!(p.bin.vbx < 0.0);
        assert!(p.phi > 0.5 && p.phi < 1.5, "phi = {}", p.phi);
        assert!(p.diagnostics.is_empty(), "{:?}", p.diagnostics);
    }

    #[test]
    fn test_mobility_units_and_temperature() {
        let mt = model_temp(|m| m.set("u0", 400.0).unwrap());
        let p = mt.size_params("M1", 5e-6, 5e-6, 1.0).unwrap();
        assert!((p.bin.u0 - 0.04).abs() < 1e-15);
        assert!((p.u0temp - 0.04).abs() < 1e-15);
    }

    #[test]
    fn test_rds_scaling() {
        let mt = model_temp(|m| m.set("rdsw", 100.0).unwrap());
        let p = mt.size_params("M1", 4e-6, 1e-6, 2.0).unwrap();
        let pow = (p.weff_cj * 1.0e6).powf(1.0) * 2.0;
        assert!((p.rds0 - 100.0 * 2.0 / pow).abs() < 1e-9);
    }

    #[test]
    fn test_bundle_clamps() {
        let mt = model_temp(|m| {
            m.set("a2", 1.5).unwrap();
            m.set("a1", 0.3).unwrap();
            m.set("prwg", -1.0).unwrap();
            m.set("ckappas", 0.01).unwrap();
        });
        let p = mt.size_params("M1", 5e-6, 5e-6, 1.0).unwrap();
        assert_eq!(p.bin.a2, 1.0);
        assert_eq!(p.bin.a1, 0.0);
        assert_eq!(p.bin.prwg, 0.0);
        assert_eq!(p.bin.ckappas, 0.02);
        assert!(p.diagnostics.contains("A2 is set to 1 and A1 is set to 0."));
    }

    #[test]
    fn test_stress_reference_terms() {
        let mt = model_temp(|m| {
            m.set("saref", 1e-6).unwrap();
            m.set("sbref", 2e-6).unwrap();
        });
        let p = mt.size_params("M1", 1e-6, 1e-7, 1.0).unwrap();
        let expected = 1.0 / (1e-6 + 0.5e-7) + 1.0 / (2e-6 + 0.5e-7);
        assert!((p.inv_od_ref - expected).abs() / expected < 1e-12);
        // no ku0/kvth0 length or width terms: only the DELTA guard remains
        assert!((p.ku0 - 1.0).abs() < 1e-15);
        assert!((p.kvth0 - (1.0 + DELTA).sqrt()).abs() < 1e-15);
        assert_eq!(p.rho_ref, 0.0);
    }

    #[test]
    fn test_high_k_moderate_inversion_offset() {
        let mt = model_temp(|m| m.set("mobmod", 3.0).unwrap());
        let p = mt.size_params("M1", 1e-6, 1e-7, 1.0).unwrap();
        assert!(p.vgsteff_vth > 0.0 && p.vgsteff_vth.is_finite());
    }
}
