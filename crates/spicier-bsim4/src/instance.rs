//! Per-transistor instance parameters.
//!
//! Instance parameters override or complement the model card for one
//! device: drawn geometry, layout distances for the stress and well
//! proximity models, parasitic overrides and per-instance model selectors.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::model::ModelParams;
use crate::param::Param;

/// Declares the instance parameter struct and its name lookup.
macro_rules! instance_parameters {
    ($($f:ident : $n:literal = $d:expr => $doc:literal),* $(,)?) => {
        /// Parameters of one BSIM4 instance.
        #[derive(Debug, Clone, PartialEq)]
        pub struct InstanceParams {
            $(
                #[doc = $doc]
                pub $f: Param,
            )*
            /// Device is initially off
            pub off: bool,
            /// Initial drain-source voltage
            pub ic_vds: Param,
            /// Initial gate-source voltage
            pub ic_vgs: Param,
            /// Initial bulk-source voltage
            pub ic_vbs: Param,
        }

        impl Default for InstanceParams {
            fn default() -> Self {
                Self {
                    $($f: Param::new($d),)*
                    off: false,
                    ic_vds: Param::new(0.0),
                    ic_vgs: Param::new(0.0),
                    ic_vbs: Param::new(0.0),
                }
            }
        }

        impl InstanceParams {
            /// SPICE names of every numeric instance parameter.
            pub const NAMES: &'static [&'static str] = &[$($n),*];

            fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
                match name {
                    $($n => Some(&mut self.$f),)*
                    _ => None,
                }
            }
        }
    };
}

instance_parameters! {
    w: "w" = 5.0e-6 => "Width",
    l: "l" = 5.0e-6 => "Length",
    nf: "nf" = 1.0 => "Number of fingers",
    min: "min" = 0.0 => "Minimize either D or S",
    as_: "as" = 0.0 => "Source area",
    ad: "ad" = 0.0 => "Drain area",
    ps: "ps" = 0.0 => "Source perimeter",
    pd: "pd" = 0.0 => "Drain perimeter",
    nrs: "nrs" = 1.0 => "Number of squares in source",
    nrd: "nrd" = 1.0 => "Number of squares in drain",
    sa: "sa" = 0.0 => "Distance between OD edge to poly of one side",
    sb: "sb" = 0.0 => "Distance between OD edge to poly of the other side",
    sd: "sd" = 0.0 => "Distance between neighbour fingers",
    sca: "sca" = 0.0 => "Integral of the first distribution function for scattered well dopant",
    scb: "scb" = 0.0 => "Integral of the second distribution function for scattered well dopant",
    scc: "scc" = 0.0 => "Integral of the third distribution function for scattered well dopant",
    sc: "sc" = 0.0 => "Distance to a single well edge",
    rbsb: "rbsb" = 0.0 => "Body resistance",
    rbdb: "rbdb" = 0.0 => "Body resistance",
    rbpb: "rbpb" = 0.0 => "Body resistance",
    rbps: "rbps" = 0.0 => "Body resistance",
    rbpd: "rbpd" = 0.0 => "Body resistance",
    delvto: "delvto" = 0.0 => "Zero bias threshold voltage variation",
    xgw: "xgw" = 0.0 => "Distance from gate contact center to device edge",
    ngcon: "ngcon" = 0.0 => "Number of gate contacts",
    trnqsmod: "trnqsmod" = 0.0 => "Transient NQS model selector",
    acnqsmod: "acnqsmod" = 0.0 => "AC NQS model selector",
    rbodymod: "rbodymod" = 0.0 => "Distributed body R model selector",
    rgatemod: "rgatemod" = 0.0 => "Gate resistance model selector",
    geomod: "geomod" = 0.0 => "Geometry dependent parasitics model selector",
    rgeomod: "rgeomod" = 0.0 => "S/D resistance and contact model selector",
}

impl InstanceParams {
    /// Instance with the given drawn width and length.
    pub fn with_geometry(w: f64, l: f64) -> Self {
        let mut p = Self::default();
        p.w.set(w);
        p.l.set(l);
        p
    }

    /// Set a numeric parameter by SPICE name. `off` is a flag.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let key = name.to_ascii_lowercase();
        if key == "off" {
            self.off = value != 0.0;
            return Ok(());
        }
        self.param_mut(&key)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))?
            .set(value);
        Ok(())
    }

    /// Set a parameter from SPICE text such as `0.5u`.
    pub fn set_str(&mut self, name: &str, text: &str) -> Result<()> {
        let value = spicier_core::units::parse_value_strict(text)?;
        self.set(name, value)
    }

    /// Initial conditions: `vds`, optionally followed by `vgs` and `vbs`.
    pub fn set_ic(&mut self, values: &[f64]) -> Result<()> {
        match *values {
            [vds] => self.ic_vds.set(vds),
            [vds, vgs] => {
                self.ic_vds.set(vds);
                self.ic_vgs.set(vgs);
            }
            [vds, vgs, vbs] => {
                self.ic_vds.set(vds);
                self.ic_vgs.set(vgs);
                self.ic_vbs.set(vbs);
            }
            _ => {
                return Err(Error::InvalidValue {
                    name: "ic".to_string(),
                    reason: format!("expected 1 to 3 values, got {}", values.len()),
                });
            }
        }
        Ok(())
    }

    /// Whether the instance asks to minimise source diffusions.
    pub fn min_sd(&self) -> bool {
        self.min.as_i32() != 0
    }

    /// Fill unset values from the model and validate the selectors.
    ///
    /// Illegal instance selectors fall back to the model's value with a
    /// warning; unset ones fall back silently.
    pub fn resolve(&self, model: &ModelParams, diag: &mut Diagnostics) -> Self {
        let mut p = self.clone();
        for (inst, m) in [
            (&mut p.rbdb, model.rbdb.value),
            (&mut p.rbsb, model.rbsb.value),
            (&mut p.rbpb, model.rbpb.value),
            (&mut p.rbps, model.rbps.value),
            (&mut p.rbpd, model.rbpd.value),
            (&mut p.xgw, model.xgw.value),
            (&mut p.ngcon, model.ngcon.value),
            (&mut p.geomod, model.geomod.value),
        ] {
            if !inst.given {
                inst.assign(m);
            }
        }

        for (inst, m, max, name) in [
            (&mut p.rbodymod, model.rbodymod.value, 2, "rbodyMod"),
            (&mut p.rgatemod, model.rgatemod.value, 3, "rgateMod"),
            (&mut p.trnqsmod, model.trnqsmod.value, 1, "trnqsMod"),
            (&mut p.acnqsmod, model.acnqsmod.value, 1, "acnqsMod"),
        ] {
            if !inst.given {
                inst.assign(m);
            } else if !(0..=max).any(|legal| inst.value == legal as f64) {
                inst.assign(m);
                diag.warn(format!("Warning: {name} has been set to its global value {m}."));
            }
        }

        if !p.sd.given {
            p.sd.assign(2.0 * model.dmcg.value);
        }

        if p.ngcon.value >= 1.0 && p.ngcon.value != 1.0 && p.ngcon.value != 2.0 {
            p.ngcon.assign(1.0);
            diag.warn("Warning: Ngcon must be equal to one or two; reset to 1.0.");
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bsim4Model;

    fn model() -> ModelParams {
        let mut m = Bsim4Model::nmos("nch");
        m.set("rbodymod", 1.0).unwrap();
        m.set("rbdb", 75.0).unwrap();
        m.set("dmcg", 1e-7).unwrap();
        m.set("ngcon", 2.0).unwrap();
        m.setup().unwrap();
        m.resolved().unwrap().clone()
    }

    #[test]
    fn test_defaults() {
        let p = InstanceParams::default();
        assert_eq!(p.w.value, 5e-6);
        assert_eq!(p.l.value, 5e-6);
        assert_eq!(p.nf.value, 1.0);
        assert_eq!(p.nrs.value, 1.0);
        assert!(!p.w.given);
        assert!(!p.off);
    }

    #[test]
    fn test_set_by_name() {
        let mut p = InstanceParams::default();
        p.set("W", 2e-6).unwrap();
        p.set_str("as", "1p").unwrap();
        p.set("off", 1.0).unwrap();
        assert_eq!(p.w.value, 2e-6);
        assert!((p.as_.value - 1e-12).abs() < 1e-24);
        assert!(p.off);
        assert!(matches!(p.set("vth0", 0.3), Err(Error::UnknownParameter(_))));
    }

    #[test]
    fn test_initial_conditions() {
        let mut p = InstanceParams::default();
        p.set_ic(&[1.0, 0.8]).unwrap();
        assert_eq!(p.ic_vds.value, 1.0);
        assert_eq!(p.ic_vgs.value, 0.8);
        assert!(!p.ic_vbs.given);
        p.set_ic(&[1.0, 0.8, -0.2]).unwrap();
        assert_eq!(p.ic_vbs.value, -0.2);
        assert!(matches!(p.set_ic(&[]), Err(Error::InvalidValue { .. })));
        assert!(p.set_ic(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_model() {
        let m = model();
        let mut diag = Diagnostics::new("M1");
        let p = InstanceParams::default().resolve(&m, &mut diag);
        assert_eq!(p.rbodymod.value, 1.0);
        assert_eq!(p.rbdb.value, 75.0);
        assert_eq!(p.ngcon.value, 2.0);
        assert!((p.sd.value - 2e-7).abs() < 1e-20);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_illegal_selector_uses_global_value() {
        let m = model();
        let mut inst = InstanceParams::default();
        inst.set("rgatemod", 5.0).unwrap();
        inst.set("rbodymod", 2.0).unwrap();
        let mut diag = Diagnostics::new("M1");
        let p = inst.resolve(&m, &mut diag);
        assert_eq!(p.rgatemod.value, 0.0);
        assert_eq!(p.rbodymod.value, 2.0);
        assert_eq!(
            diag.messages(),
            &["Warning: rgateMod has been set to its global value 0.".to_string()]
        );
    }

    #[test]
    fn test_ngcon_reset() {
        let m = model();
        let mut inst = InstanceParams::default();
        inst.set("ngcon", 3.0).unwrap();
        let mut diag = Diagnostics::new("M1");
        let p = inst.resolve(&m, &mut diag);
        assert_eq!(p.ngcon.value, 1.0);
        assert!(diag.contains("Ngcon must be equal to one or two"));

        // below one is left for the parameter check to reject
        inst.set("ngcon", 0.5).unwrap();
        let p = inst.resolve(&m, &mut Diagnostics::new("M1"));
        assert_eq!(p.ngcon.value, 0.5);
    }
}
