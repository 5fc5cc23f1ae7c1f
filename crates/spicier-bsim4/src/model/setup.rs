//! Default resolution performed once when a parameter set becomes a model.

use super::ModelParams;
use crate::consts::EPS0;
use crate::diagnostics::Diagnostics;
use crate::param::{Binned, Param};

/// Reset an out-of-range selector to its default.
///
/// A selector that was never given silently takes the default.
fn check_selector(
    p: &mut Param,
    name: &str,
    max: i32,
    default: i32,
    diag: &mut Diagnostics,
) {
    if !p.given {
        p.assign(f64::from(default));
        return;
    }
    let v = p.as_i32();
    if v < 0 || v > max || p.value.fract() != 0.0 {
        p.assign(f64::from(default));
        diag.warn(format!(
            "Warning: {name} has been set to its default value: {default}."
        ));
    }
}

/// Fill `p` with `value` unless it was given.
#[inline]
fn default_to(p: &mut Param, value: f64) {
    if !p.given {
        p.assign(value);
    }
}

/// Copy every term of `src` into the terms of `dst` that were not given.
fn inherit_binned(dst: &mut Binned, src: &Binned) {
    default_to(&mut dst.base, src.base.value);
    default_to(&mut dst.l, src.l.value);
    default_to(&mut dst.w, src.w.value);
    default_to(&mut dst.p, src.p.value);
}

/// Resolve the `*igs`/`*igd`/`*igsd` trio for one coefficient.
///
/// A given `*igsd` overrides both sides. The `l`/`w`/`p` terms follow the
/// grouped value unless only the per-side base values were given.
fn resolve_gate_tunnelling(sd: &mut Binned, s: &mut Binned, d: &mut Binned, default: f64) {
    if sd.base.given {
        s.base.assign(sd.base.value);
        d.base.assign(sd.base.value);
    } else {
        sd.base.assign(default);
        default_to(&mut s.base, default);
        default_to(&mut d.base, default);
    }
    if sd.base.given || !(s.base.given || d.base.given) {
        for (src, ds, dd) in [
            (sd.l, &mut s.l, &mut d.l),
            (sd.w, &mut s.w, &mut d.w),
            (sd.p, &mut s.p, &mut d.p),
        ] {
            ds.assign(src.value);
            dd.assign(src.value);
        }
    }
}

/// Apply selector validation and every dependent default to `m`.
///
/// Only parameters that were not given are touched, so running this twice
/// yields the same result.
pub(crate) fn apply_defaults(m: &mut ModelParams, nominal_temp: f64, diag: &mut Diagnostics) {
    // ====================================================================
    // Selectors
    // ====================================================================

    check_selector(&mut m.mobmod, "mobMod", 6, 0, diag);
    check_selector(&mut m.diomod, "dioMod", 2, 1, diag);
    check_selector(&mut m.capmod, "capMod", 2, 2, diag);
    check_selector(&mut m.rdsmod, "rdsMod", 1, 0, diag);
    check_selector(&mut m.rbodymod, "rbodyMod", 2, 0, diag);
    check_selector(&mut m.rgatemod, "rgateMod", 3, 0, diag);
    check_selector(&mut m.permod, "perMod", 1, 1, diag);
    check_selector(&mut m.fnoimod, "fnoiMod", 1, 1, diag);
    check_selector(&mut m.tnoimod, "tnoiMod", 2, 0, diag);
    check_selector(&mut m.trnqsmod, "trnqsMod", 1, 0, diag);
    check_selector(&mut m.acnqsmod, "acnqsMod", 1, 0, diag);
    check_selector(&mut m.mtrlmod, "mtrlMod", 1, 0, diag);
    check_selector(&mut m.mtrlcompatmod, "mtrlCompatMod", 1, 0, diag);
    check_selector(&mut m.igcmod, "igcMod", 2, 0, diag);
    check_selector(&mut m.igbmod, "igbMod", 1, 0, diag);
    check_selector(&mut m.tempmod, "tempMod", 3, 0, diag);
    check_selector(&mut m.wpemod, "wpemod", 1, 0, diag);

    let nmos = m.mos_type.is_nmos();
    let pick = |n: f64, p: f64| if nmos { n } else { p };

    // ====================================================================
    // Oxide and channel-type dependent defaults
    // ====================================================================

    default_to(&mut m.vddeot, pick(1.5, -1.5));
    let toxe = m.toxe.value;
    default_to(&mut m.toxp, toxe);
    default_to(&mut m.toxm, toxe);
    default_to(&mut m.dvtp2.base, 0.0);
    let drout = m.drout.base.value;
    default_to(&mut m.dsub.base, drout);
    default_to(&mut m.vth0.base, pick(0.7, -0.7));
    default_to(&mut m.eu.base, pick(1.67, 1.0));
    default_to(&mut m.ucs.base, pick(1.67, 1.0));

    let mobmod = m.mobmod.as_i32();
    default_to(&mut m.ua.base, if mobmod == 2 { 1.0e-15 } else { 1.0e-9 });
    default_to(&mut m.uc.base, if mobmod == 1 { -0.0465 } else { -0.0465e-9 });
    default_to(&mut m.uc1.base, if mobmod == 1 { -0.056 } else { -0.056e-9 });
    default_to(&mut m.u0.base, pick(0.067, 0.025));

    // ====================================================================
    // GIDL / GISL and gate tunnelling
    // ====================================================================

    default_to(&mut m.rgidl.base, 1.0);
    default_to(&mut m.kgidl.base, 0.0);
    default_to(&mut m.fgidl.base, 1.0);
    let gidl = [m.agidl, m.bgidl, m.cgidl, m.egidl, m.rgidl, m.kgidl, m.fgidl];
    for (dst, src) in [
        &mut m.agisl,
        &mut m.bgisl,
        &mut m.cgisl,
        &mut m.egisl,
        &mut m.rgisl,
        &mut m.kgisl,
        &mut m.fgisl,
    ]
    .into_iter()
    .zip(gidl.iter())
    {
        inherit_binned(dst, src);
    }

    default_to(&mut m.aigc.base, pick(1.36e-2, 9.80e-3));
    default_to(&mut m.bigc.base, pick(1.71e-3, 7.59e-4));
    default_to(&mut m.cigc.base, pick(0.075, 0.03));
    resolve_gate_tunnelling(
        &mut m.aigsd,
        &mut m.aigs,
        &mut m.aigd,
        pick(1.36e-2, 9.80e-3),
    );
    resolve_gate_tunnelling(
        &mut m.bigsd,
        &mut m.bigs,
        &mut m.bigd,
        pick(1.71e-3, 7.59e-4),
    );
    resolve_gate_tunnelling(&mut m.cigsd, &mut m.cigs, &mut m.cigd, pick(0.075, 0.03));

    // ====================================================================
    // Junction diodes: drain side inherits from the source side
    // ====================================================================

    default_to(&mut m.ijthdfwd, m.ijthsfwd.value);
    default_to(&mut m.ijthdrev, m.ijthsrev.value);
    default_to(&mut m.tnfactor.base, 0.0);
    default_to(&mut m.teta0.base, 0.0);
    default_to(&mut m.tvoffcv.base, 0.0);
    default_to(&mut m.xjbvd, m.xjbvs.value);
    default_to(&mut m.bvd, m.bvs.value);
    let ckappas = m.ckappas;
    inherit_binned(&mut m.ckappad, &ckappas);
    default_to(&mut m.dmci, m.dmcg.value);

    if !m.tnom.given {
        m.tnom.assign(nominal_temp);
    }

    // ====================================================================
    // Length and width offsets for C-V and gate current
    // ====================================================================

    default_to(&mut m.llc, m.ll.value);
    default_to(&mut m.lwc, m.lw.value);
    default_to(&mut m.lwlc, m.lwl.value);
    default_to(&mut m.wlc, m.wl.value);
    default_to(&mut m.wwc, m.ww.value);
    default_to(&mut m.wwlc, m.wwl.value);
    default_to(&mut m.dwc, m.wint.value);
    default_to(&mut m.dlc, m.lint.value);
    default_to(&mut m.dlcig, m.lint.value);
    let dlcigd = if m.dlcig.given { m.dlcig.value } else { m.lint.value };
    default_to(&mut m.dlcigd, dlcigd);
    default_to(&mut m.dwj, m.dwc.value);

    let cf = 2.0 * m.epsrox.value * EPS0 / std::f64::consts::PI
        * (1.0 + 0.4e-6 / m.toxe.value).ln();
    default_to(&mut m.cf.base, cf);

    default_to(&mut m.cjd, m.cjs.value);
    default_to(&mut m.cjswd, m.cjsws.value);
    default_to(&mut m.cjswgs, m.cjsws.value);
    default_to(&mut m.cjswgd, m.cjswgs.value);
    default_to(&mut m.jsd, m.jss.value);
    default_to(&mut m.jswd, m.jsws.value);
    default_to(&mut m.jswgd, m.jswgs.value);
    default_to(&mut m.pbd, m.pbs.value);
    default_to(&mut m.pbswd, m.pbsws.value);
    default_to(&mut m.pbswgs, m.pbsws.value);
    default_to(&mut m.pbswgd, m.pbswgs.value);
    default_to(&mut m.mjd, m.mjs.value);
    default_to(&mut m.mjswd, m.mjsws.value);
    default_to(&mut m.mjswgs, m.mjsws.value);
    default_to(&mut m.mjswgd, m.mjswgs.value);
    default_to(&mut m.njd, m.njs.value);
    default_to(&mut m.xtid, m.xtis.value);

    // trap-assisted tunnelling
    default_to(&mut m.jtsd, m.jtss.value);
    default_to(&mut m.jtsswd, m.jtssws.value);
    default_to(&mut m.jtsswgd, m.jtsswgs.value);
    let njtsd = if m.njts.given { m.njts.value } else { 20.0 };
    default_to(&mut m.njtsd, njtsd);
    let njtsswd = if m.njtssw.given { m.njtssw.value } else { 20.0 };
    default_to(&mut m.njtsswd, njtsswd);
    let njtsswgd = if m.njtsswg.given { m.njtsswg.value } else { 20.0 };
    default_to(&mut m.njtsswgd, njtsswgd);
    default_to(&mut m.xtsd, m.xtss.value);
    default_to(&mut m.xtsswd, m.xtssws.value);
    default_to(&mut m.xtsswgd, m.xtsswgs.value);
    let tnjtsd = if m.tnjts.given { m.tnjts.value } else { 0.0 };
    default_to(&mut m.tnjtsd, tnjtsd);
    let tnjtsswd = if m.tnjtssw.given { m.tnjtssw.value } else { 0.0 };
    default_to(&mut m.tnjtsswd, tnjtsswd);
    let tnjtsswgd = if m.tnjtsswg.given { m.tnjtsswg.value } else { 0.0 };
    default_to(&mut m.tnjtsswgd, tnjtsswgd);
    default_to(&mut m.vtsd, m.vtss.value);
    default_to(&mut m.vtsswd, m.vtssws.value);
    default_to(&mut m.vtsswgd, m.vtsswgs.value);

    // oxide trap density
    default_to(&mut m.noia, pick(6.25e41, 6.188e40));
    default_to(&mut m.noib, pick(3.125e26, 1.5e25));
}

impl ModelParams {
    /// Effective mid-contact to gate distance.
    pub fn dmcg_eff(&self) -> f64 {
        self.dmcg.value - self.dmcgt.value
    }

    /// Effective mid-contact to isolation distance.
    pub fn dmci_eff(&self) -> f64 {
        self.dmci.value
    }

    /// Effective mid-diffusion to gate distance.
    pub fn dmdg_eff(&self) -> f64 {
        self.dmdg.value - self.dmcgt.value
    }
}
