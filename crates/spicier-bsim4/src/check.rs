//! Instance parameter checking.
//!
//! Runs once per instance after derivation. Fatal conditions are collected
//! and returned together as [`Error::ParameterCheck`]; warnings are appended
//! to the instance diagnostics. The extended warning set only runs when the
//! model's `paramchk` is 1.

use crate::derive::{InstanceDerived, stress_active};
use crate::error::{Error, Result};

/// Fatal messages collected during a check.
#[derive(Debug, Default)]
struct Fatals(Vec<String>);

impl Fatals {
    fn push(&mut self, message: String) {
        log::error!("{message}");
        self.0.push(message);
    }
}

/// Check derived instance `d`, recording warnings in its diagnostics.
pub fn check_instance(d: &mut InstanceDerived) -> Result<()> {
    let mt = std::sync::Arc::clone(&d.model);
    let size = std::sync::Arc::clone(&d.size);
    let m = &mt.params;
    let p = &size.bin;
    let inst = &d.inst;
    let diag = &mut d.diagnostics;
    let mut fatal = Fatals::default();

    if (m.version.value - 4.80).abs() > 0.0001 {
        diag.warn("Warning: This model is BSIM4v80.8.0; you specified a wrong version number.");
    }
    let rgatemod = inst.rgatemod.as_i32();
    if (rgatemod == 2 || rgatemod == 3)
        && (inst.trnqsmod.as_i32() == 1 || inst.acnqsmod.as_i32() == 1)
    {
        diag.warn("Warning: You've selected both Rg and charge deficit NQS; select one only.");
    }

    for (label, value) in [("Toxe", m.toxe.value), ("Toxp", d.toxp), ("EOT", m.eot.value)] {
        if value <= 0.0 {
            fatal.push(format!("Fatal: {label} = {value} is not positive."));
        }
    }
    for (label, value) in [
        ("Epsrgate", m.epsrgate.value),
        ("Epsrsub", m.epsrsub.value),
        ("Easub", m.easub.value),
    ] {
        if value < 0.0 {
            fatal.push(format!("Fatal: {label} = {value} is not positive."));
        }
    }
    if m.ni0sub.value <= 0.0 {
        // reported under the Easub label, as BSIM4 does
        fatal.push(format!("Fatal: Easub = {} is not positive.", m.ni0sub.value));
    }
    for (label, value) in [("Toxm", m.toxm.value), ("Toxref", m.toxref.value)] {
        if value <= 0.0 {
            fatal.push(format!("Fatal: {label} = {value} is not positive."));
        }
    }

    if p.lpe0 < -size.leff {
        fatal.push(format!("Fatal: Lpe0 = {} is less than -Leff.", p.lpe0));
    }
    if m.lintnoi.value > size.leff / 2.0 {
        fatal.push(format!(
            "Fatal: Lintnoi = {} is too large - Leff for noise is negative.",
            m.lintnoi.value
        ));
    }
    if p.lpeb < -size.leff {
        fatal.push(format!("Fatal: Lpeb = {} is less than -Leff.", p.lpeb));
    }
    if p.ndep <= 0.0 {
        fatal.push(format!("Fatal: Ndep = {} is not positive.", p.ndep));
    }
    if size.phi <= 0.0 {
        fatal.push(format!(
            "Fatal: Phi = {} is not positive. Please check Phin and Ndep",
            size.phi
        ));
        log::error!("Phin = {}  Ndep = {} ", p.phin, p.ndep);
    }
    if p.nsub <= 0.0 {
        fatal.push(format!("Fatal: Nsub = {} is not positive.", p.nsub));
    }
    if p.ngate < 0.0 {
        fatal.push(format!("Fatal: Ngate = {} Ngate is not positive.", p.ngate));
    }
    if p.ngate > 1.0e25 {
        fatal.push(format!("Fatal: Ngate = {} Ngate is too high", p.ngate));
    }
    if p.xj <= 0.0 {
        fatal.push(format!("Fatal: Xj = {} is not positive.", p.xj));
    }
    if p.dvt1 < 0.0 {
        fatal.push(format!("Fatal: Dvt1 = {} is negative.", p.dvt1));
    }
    if p.dvt1w < 0.0 {
        fatal.push(format!("Fatal: Dvt1w = {} is negative.", p.dvt1w));
    }
    if p.w0 == -size.weff {
        fatal.push("Fatal: (W0 + Weff) = 0 causing divided-by-zero.".to_string());
    }
    if p.dsub < 0.0 {
        fatal.push(format!("Fatal: Dsub = {} is negative.", p.dsub));
    }
    if p.b1 == -size.weff {
        fatal.push("Fatal: (B1 + Weff) = 0 causing divided-by-zero.".to_string());
    }
    if d.u0temp <= 0.0 {
        fatal.push(format!(
            "Fatal: u0 at current temperature = {} is not positive.",
            d.u0temp
        ));
    }
    if p.delta < 0.0 {
        fatal.push(format!("Fatal: Delta = {} is less than zero.", p.delta));
    }
    if d.vsattemp <= 0.0 {
        fatal.push(format!(
            "Fatal: Vsat at current temperature = {} is not positive.",
            d.vsattemp
        ));
    }
    if p.pclm <= 0.0 {
        fatal.push(format!("Fatal: Pclm = {} is not positive.", p.pclm));
    }
    if p.drout < 0.0 {
        fatal.push(format!("Fatal: Drout = {} is negative.", p.drout));
    }
    if inst.nf.value < 1.0 {
        fatal.push(format!(
            "Fatal: Number of finger = {} is smaller than one.",
            inst.nf.value
        ));
    }
    let stress = stress_active(inst);
    if stress {
        if m.saref.value <= 0.0 {
            fatal.push(format!("Fatal: SAref = {} is not positive.", m.saref.value));
        }
        if m.sbref.value <= 0.0 {
            fatal.push(format!("Fatal: SBref = {} is not positive.", m.sbref.value));
        }
    }
    if inst.l.value + m.xl.value <= m.xgl.value {
        fatal.push("Fatal: The parameter xgl must be smaller than Ldrawn+XL.".to_string());
    }
    if inst.ngcon.value < 1.0 {
        fatal.push("Fatal: The parameter ngcon cannot be smaller than one.".to_string());
    }
    if m.gbmin.value < 1.0e-20 {
        diag.warn(format!("Warning: Gbmin = {} is too small.", m.gbmin.value));
    }

    if p.fprout < 0.0 {
        fatal.push(format!("Fatal: fprout = {} is negative.", p.fprout));
    }
    if p.pdits < 0.0 {
        fatal.push(format!("Fatal: pdits = {} is negative.", p.pdits));
    }
    if m.pditsl.value < 0.0 {
        fatal.push(format!("Fatal: pditsl = {} is negative.", m.pditsl.value));
    }

    if m.igbmod.as_i32() > 0 {
        for (label, value) in [("nigbinv", p.nigbinv), ("nigbacc", p.nigbacc)] {
            if value <= 0.0 {
                fatal.push(format!("Fatal: {label} = {value} is non-positive."));
            }
        }
    }
    if m.igcmod.as_i32() > 0 {
        for (label, value) in [("nigc", p.nigc), ("poxedge", p.poxedge), ("pigcd", p.pigcd)] {
            if value <= 0.0 {
                fatal.push(format!("Fatal: {label} = {value} is non-positive."));
            }
        }
    }

    if p.clc < 0.0 {
        fatal.push(format!("Fatal: Clc = {} is negative.", p.clc));
    }

    for (label, value) in [
        ("Vtss", m.vtss.value),
        ("Vtsd", m.vtsd.value),
        ("Vtssws", m.vtssws.value),
        ("Vtsswd", m.vtsswd.value),
        ("Vtsswgs", m.vtsswgs.value),
        ("Vtsswgd", m.vtsswgd.value),
    ] {
        if value < 0.0 {
            fatal.push(format!("Fatal: {label} = {value} is negative."));
        }
    }

    if m.paramchk.as_i32() == 1 {
        if size.leff <= 1.0e-9 {
            diag.warn(format!(
                "Warning: Leff = {} <= 1.0e-9. Recommended Leff >= 1e-8 ",
                size.leff
            ));
        }
        if size.leff_cv <= 1.0e-9 {
            diag.warn(format!(
                "Warning: Leff for CV = {} <= 1.0e-9. Recommended LeffCV >=1e-8 ",
                size.leff_cv
            ));
        }
        if size.weff <= 1.0e-9 {
            diag.warn(format!(
                "Warning: Weff = {} <= 1.0e-9. Recommended Weff >=1e-7 ",
                size.weff
            ));
        }
        if size.weff_cv <= 1.0e-9 {
            diag.warn(format!(
                "Warning: Weff for CV = {} <= 1.0e-9. Recommended WeffCV >= 1e-7 ",
                size.weff_cv
            ));
        }

        for (label, value) in [("Toxe", m.toxe.value), ("Toxp", d.toxp), ("Toxm", m.toxm.value)] {
            if value < 1.0e-10 {
                diag.warn(format!(
                    "Warning: {label} = {value} is less than 1A. Recommended {label} >= 5A"
                ));
            }
        }

        if p.ndep <= 1.0e12 {
            diag.warn(format!("Warning: Ndep = {} may be too small.", p.ndep));
        } else if p.ndep >= 1.0e21 {
            diag.warn(format!("Warning: Ndep = {} may be too large.", p.ndep));
        }
        if p.nsub <= 1.0e14 {
            diag.warn(format!("Warning: Nsub = {} may be too small.", p.nsub));
        } else if p.nsub >= 1.0e21 {
            diag.warn(format!("Warning: Nsub = {} may be too large.", p.nsub));
        }
        if p.ngate > 0.0 && p.ngate <= 1.0e18 {
            diag.warn(format!("Warning: Ngate = {} is less than 1.E18cm^-3.", p.ngate));
        }

        if p.dvt0 < 0.0 {
            diag.warn(format!("Warning: Dvt0 = {} is negative.", p.dvt0));
        }
        if (1.0e-8 / (p.w0 + size.weff)).abs() > 10.0 {
            diag.warn("Warning: (W0 + Weff) may be too small.");
        }

        for (label, value) in [("Nfactor", p.nfactor), ("Cdsc", p.cdsc), ("Cdscd", p.cdscd)] {
            if value < 0.0 {
                diag.warn(format!("Warning: {label} = {value} is negative."));
            }
        }
        if d.eta0 < 0.0 {
            diag.warn(format!("Warning: Eta0 = {} is negative.", d.eta0));
        }
        if (1.0e-8 / (p.b1 + size.weff)).abs() > 10.0 {
            diag.warn("Warning: (B1 + Weff) may be too small.");
        }

        if p.pscbe2 <= 0.0 {
            diag.warn(format!("Warning: Pscbe2 = {} is not positive.", p.pscbe2));
        }
        if size.vsattemp < 1.0e3 {
            diag.warn(format!(
                "Warning: Vsat at current temperature = {} may be too small.",
                size.vsattemp
            ));
        }
        if m.lambda.base.given && p.lambda > 0.0 && p.lambda > 1.0e-9 {
            diag.warn(format!("Warning: Lambda = {} may be too large.", p.lambda));
        }
        if m.vtl.base.given && p.vtl > 0.0 && p.vtl < 6.0e4 {
            diag.warn(format!(
                "Warning: Thermal velocity vtl = {} may be too small.",
                p.vtl
            ));
        }

        if p.pdiblc1 < 0.0 {
            diag.warn(format!("Warning: Pdibl1 = {} is negative.", p.pdiblc1));
        }
        if p.pdiblc2 < 0.0 {
            diag.warn(format!("Warning: Pdibl2 = {} is negative.", p.pdiblc2));
        }

        if stress {
            if m.lodk2.value <= 0.0 {
                diag.warn(format!("Warning: LODK2 = {} is not positive.", m.lodk2.value));
            }
            if m.lodeta0.value <= 0.0 {
                diag.warn(format!("Warning: LODETA0 = {} is not positive.", m.lodeta0.value));
            }
        }

        let rshg = m.rshg.value;
        match rgatemod {
            1 if rshg <= 0.0 => diag.warn("Warning: rshg should be positive for rgateMod = 1."),
            2 if rshg <= 0.0 => diag.warn("Warning: rshg <= 0.0 for rgateMod = 2."),
            2 if p.xrcrg1 <= 0.0 => diag.warn("Warning: xrcrg1 <= 0.0 for rgateMod = 2."),
            3 if rshg <= 0.0 => diag.warn("Warning: rshg should be positive for rgateMod = 3."),
            3 if p.xrcrg1 <= 0.0 => {
                diag.warn("Warning: xrcrg1 should be positive for rgateMod = 3.")
            }
            _ => {}
        }

        for (label, value) in [
            ("RBPS0", m.rbps0.value),
            ("RBPD0", m.rbpd0.value),
            ("RBPBX0", m.rbpbx0.value),
            ("RBPBY0", m.rbpby0.value),
            ("RBDBX0", m.rbdbx0.value),
            ("RBDBY0", m.rbdby0.value),
            ("RBSBX0", m.rbsbx0.value),
            ("RBSBY0", m.rbsby0.value),
        ] {
            if value <= 0.0 {
                fatal.push(format!("Fatal: {label} = {value} is not positive."));
            }
        }

        if p.noff < 0.1 {
            diag.warn(format!("Warning: Noff = {} is too small.", p.noff));
        }
        if p.voffcv < -0.5 {
            diag.warn(format!("Warning: Voffcv = {} is too small.", p.voffcv));
        }
        if p.moin < 5.0 {
            diag.warn(format!("Warning: Moin = {} is too small.", p.moin));
        }
        if p.moin > 25.0 {
            diag.warn(format!("Warning: Moin = {} is too large.", p.moin));
        }
        if m.capmod.as_i32() == 2 {
            if p.acde < 0.1 {
                diag.warn(format!("Warning: Acde = {} is too small.", p.acde));
            }
            if p.acde > 1.6 {
                diag.warn(format!("Warning: Acde = {} is too large.", p.acde));
            }
        }
    }

    if fatal.0.is_empty() {
        Ok(())
    } else {
        Err(Error::ParameterCheck {
            instance: diag.owner().to_string(),
            model: mt.name().to_string(),
            messages: fatal.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::derive::SeriesNodes;
    use crate::diagnostics::Diagnostics;
    use crate::instance::InstanceParams;
    use crate::model::{Bsim4Model, ModelTemp};

    fn model_with(configure: impl FnOnce(&mut Bsim4Model)) -> Arc<ModelTemp> {
        let mut m = Bsim4Model::nmos("nch");
        configure(&mut m);
        m.setup().unwrap();
        m.at_temperature(300.15).unwrap()
    }

    fn derive(mt: &Arc<ModelTemp>, configure: impl FnOnce(&mut InstanceParams)) -> Result<InstanceDerived> {
        let mut inst = InstanceParams::default();
        configure(&mut inst);
        let inst = inst.resolve(&mt.params, &mut Diagnostics::new("M1"));
        InstanceDerived::new("M1", mt, &inst, SeriesNodes::default())
    }

    fn fatal_messages(result: Result<InstanceDerived>) -> Vec<String> {
        match result {
            Err(Error::ParameterCheck { messages, .. }) => messages,
            other => panic!("expected a parameter check failure, got {other:?}"),
        }
    }

    #[test]
    fn test_default_device_passes() {
        let mt = model_with(|_| {});
        let d = derive(&mt, |_| {}).unwrap();
        assert!(
            !d.diagnostics.messages().iter().any(|m| m.starts_with("Fatal")),
            "{:?}",
            d.diagnostics.messages()
        );
    }

    #[test]
    fn test_fractional_fingers_are_fatal() {
        let mt = model_with(|_| {});
        let messages = fatal_messages(derive(&mt, |i| i.set("nf", 0.5).unwrap()));
        assert!(messages.contains(&"Fatal: Number of finger = 0.5 is smaller than one.".to_string()));
    }

    #[test]
    fn test_ngcon_below_one_is_fatal() {
        let mt = model_with(|_| {});
        let messages = fatal_messages(derive(&mt, |i| i.set("ngcon", 0.5).unwrap()));
        assert!(messages.iter().any(|m| m.contains("ngcon cannot be smaller than one")));
    }

    #[test]
    fn test_error_names_instance_and_model() {
        let mt = model_with(|m| m.set("xgl", 1e-5).unwrap());
        match derive(&mt, |_| {}) {
            Err(Error::ParameterCheck {
                instance,
                model,
                messages,
            }) => {
                assert_eq!(instance, "M1");
                assert_eq!(model, "nch");
                assert!(messages.contains(
                    &"Fatal: The parameter xgl must be smaller than Ldrawn+XL.".to_string()
                ));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_all_fatals_are_collected() {
        let mt = model_with(|m| {
            m.set("vtss", -1.0).unwrap();
            m.set("pditsl", -1.0).unwrap();
        });
        let messages = fatal_messages(derive(&mt, |_| {}));
        assert!(messages.contains(&"Fatal: Vtss = -1 is negative.".to_string()));
        assert!(messages.contains(&"Fatal: pditsl = -1 is negative.".to_string()));
    }

    #[test]
    fn test_wrong_version_warns() {
        let mt = model_with(|m| m.set("version", 4.7).unwrap());
        let d = derive(&mt, |_| {}).unwrap();
        assert!(d.diagnostics.contains("you specified a wrong version number"));
    }

    #[test]
    fn test_rg_with_nqs_warns() {
        let mt = model_with(|_| {});
        let d = derive(&mt, |i| {
            i.set("rgatemod", 2.0).unwrap();
            i.set("acnqsmod", 1.0).unwrap();
        })
        .unwrap();
        assert!(d.diagnostics.contains("select one only"));
    }

    #[test]
    fn test_extended_warnings_need_paramchk() {
        let mt = model_with(|m| m.set("nfactor", -0.5).unwrap());
        let d = derive(&mt, |_| {}).unwrap();
        assert!(d.diagnostics.contains("Warning: Nfactor = -0.5 is negative."));

        let quiet = model_with(|m| {
            m.set("nfactor", -0.5).unwrap();
            m.set("paramchk", 0.0).unwrap();
        });
        let d = derive(&quiet, |_| {}).unwrap();
        assert!(!d.diagnostics.contains("Nfactor"));
    }

    #[test]
    fn test_body_resistance_fatal_under_paramchk() {
        let mt = model_with(|m| m.set("rbps0", 0.0).unwrap());
        let messages = fatal_messages(derive(&mt, |_| {}));
        assert!(messages.contains(&"Fatal: RBPS0 = 0 is not positive.".to_string()));
    }

    #[test]
    fn test_gate_resistance_warnings() {
        let mt = model_with(|m| {
            m.set("rshg", 1.0).unwrap();
            m.set("xrcrg1", 0.0).unwrap();
        });
        let d = derive(&mt, |i| i.set("rgatemod", 3.0).unwrap()).unwrap();
        assert!(d.diagnostics.contains("xrcrg1 should be positive for rgateMod = 3."));
    }
}
