//! Operating point handed over by the large-signal evaluation.
//!
//! The DC/transient load is performed by the host. After each converged
//! solve it hands the device one [`OperatingPoint`] holding the currents,
//! conductances and charge derivatives at the solution; the AC and noise
//! stages read nothing else from the bias point.

/// Conduction direction of the channel.
///
/// In reverse mode the roles of the drain and source are exchanged in every
/// small-signal and noise expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Vds >= 0
    #[default]
    Forward,
    /// Vds < 0
    Reverse,
}

impl Mode {
    /// Mode for the given drain-source voltage.
    pub fn from_vds(vds: f64) -> Self {
        if vds >= 0.0 {
            Mode::Forward
        } else {
            Mode::Reverse
        }
    }

    pub fn is_forward(self) -> bool {
        self == Mode::Forward
    }

    /// The opposite conduction direction.
    pub fn swapped(self) -> Self {
        match self {
            Mode::Forward => Mode::Reverse,
            Mode::Reverse => Mode::Forward,
        }
    }

    /// Pick the drain-side value in forward mode and the source-side one in
    /// reverse mode.
    pub fn select<T>(self, forward: T, reverse: T) -> T {
        match self {
            Mode::Forward => forward,
            Mode::Reverse => reverse,
        }
    }
}

/// Gate tunnelling current derivatives (S).
///
/// `igs*`/`igd*` are the gate-to-diffusion overlap currents, `igcs*`/`igcd*`
/// the gate-to-channel currents partitioned to source and drain and
/// `igb*` the gate-to-body current, each differentiated with respect to the
/// gate, drain, source and body voltages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GateTunneling {
    pub igsg: f64,
    pub igss: f64,
    pub igdg: f64,
    pub igdd: f64,
    pub igcsg: f64,
    pub igcsd: f64,
    pub igcss: f64,
    pub igcsb: f64,
    pub igcdg: f64,
    pub igcdd: f64,
    pub igcds: f64,
    pub igcdb: f64,
    pub igbg: f64,
    pub igbd: f64,
    pub igbs: f64,
    pub igbb: f64,
}

/// Bias-dependent gate resistance terms (rgateMod 2 and 3).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GateResistance {
    pub gcrg: f64,
    pub gcrgd: f64,
    pub gcrgg: f64,
    pub gcrgs: f64,
    pub gcrgb: f64,
}

/// Bias-dependent series resistance totals (rdsMod 1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesResistance {
    pub gstot: f64,
    pub gstotd: f64,
    pub gstotg: f64,
    pub gstots: f64,
    pub gstotb: f64,
    pub gdtot: f64,
    pub gdtotd: f64,
    pub gdtotg: f64,
    pub gdtots: f64,
    pub gdtotb: f64,
}

/// Gate-induced drain and source leakage derivatives (S).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GidlConductances {
    pub ggidld: f64,
    pub ggidlg: f64,
    pub ggidlb: f64,
    pub ggislg: f64,
    pub ggisls: f64,
    pub ggislb: f64,
}

/// Intrinsic charge derivatives `c<charge><voltage>b` (F).
///
/// Rows are the gate, drain, source and body charges; columns the gate,
/// drain, source and body voltages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeDerivatives {
    pub cggb: f64,
    pub cgdb: f64,
    pub cgsb: f64,
    pub cgbb: f64,
    pub cdgb: f64,
    pub cddb: f64,
    pub cdsb: f64,
    pub cdbb: f64,
    pub csgb: f64,
    pub csdb: f64,
    pub cssb: f64,
    pub csbb: f64,
    pub cbgb: f64,
    pub cbdb: f64,
    pub cbsb: f64,
    pub cbbb: f64,
}

/// Terminal charges (C).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Charges {
    pub qgate: f64,
    pub qbulk: f64,
    pub qdrn: f64,
    pub qsrc: f64,
}

/// Large-signal intermediates the noise models need.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseInputs {
    /// Effective gate overdrive (V)
    pub vgsteff: f64,
    /// Effective drain-source voltage (V)
    pub vdseff: f64,
    pub abulk: f64,
    /// Effective mobility (m²/V·s)
    pub ueff: f64,
    /// Saturation field times effective length (V)
    pub esat_l: f64,
    pub abov_vgst2_vtm: f64,
    /// Drain current over drain voltage (S)
    pub idov_vds: f64,
    /// Effective oxide capacitance (F/m²)
    pub coxeff: f64,
    /// Inversion charge (C)
    pub qinv: f64,
    /// Zero-bias drain conductance of the holistic noise model (S)
    pub noi_gd0: f64,
    /// Subthreshold trap occupancy term
    pub nstar: f64,
    /// Bias-dependent source/drain conductance (S)
    pub grdsw: f64,
}

/// Device state at one converged bias point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatingPoint {
    pub mode: Mode,

    /// Drain current (A)
    pub cd: f64,
    /// Body-source junction current (A)
    pub cbs: f64,
    /// Body-drain junction current (A)
    pub cbd: f64,
    /// Substrate current (A)
    pub csub: f64,
    pub igidl: f64,
    pub igisl: f64,
    pub igs: f64,
    pub igd: f64,
    pub igb: f64,
    pub igcs: f64,
    pub igcd: f64,

    /// Transconductance dId/dVgs (S)
    pub gm: f64,
    /// Output conductance dId/dVds (S)
    pub gds: f64,
    /// Body transconductance dId/dVbs (S)
    pub gmbs: f64,
    /// Body-drain junction conductance (S)
    pub gbd: f64,
    /// Body-source junction conductance (S)
    pub gbs: f64,
    /// Substrate current derivatives (S)
    pub gbds: f64,
    pub gbgs: f64,
    pub gbbs: f64,

    pub gate_tunneling: GateTunneling,
    pub gate_resistance: GateResistance,
    pub series: SeriesResistance,
    pub gidl: GidlConductances,

    pub caps: ChargeDerivatives,
    /// Body-drain junction capacitance (F)
    pub capbd: f64,
    /// Body-source junction capacitance (F)
    pub capbs: f64,
    pub charges: Charges,

    /// NQS channel charge relaxation time constant (s)
    pub taunet: f64,
    /// NQS channel charge conductance (S)
    pub gtau: f64,
    /// Threshold voltage (V)
    pub von: f64,
    /// Saturation voltage (V)
    pub vdsat: f64,

    pub noise: NoiseInputs,
}

impl OperatingPoint {
    /// Look up a quantity by its BSIM4 name (`id`, `gm`, `cgg`, ...).
    ///
    /// Terminal voltages and the NQS charge live in the state history and
    /// are answered by the device, not here.
    pub fn query(&self, name: &str) -> Option<f64> {
        let c = &self.caps;
        let value = match name.to_ascii_lowercase().as_str() {
            "id" => self.cd,
            "ibs" => self.cbs,
            "ibd" => self.cbd,
            "isub" => self.csub,
            "igidl" => self.igidl,
            "igisl" => self.igisl,
            "igs" => self.igs,
            "igd" => self.igd,
            "igb" => self.igb,
            "igcs" => self.igcs,
            "igcd" => self.igcd,
            "gm" => self.gm,
            "gds" => self.gds,
            "gmbs" => self.gmbs,
            "gbd" => self.gbd,
            "gbs" => self.gbs,
            "qb" => self.charges.qbulk,
            "qg" => self.charges.qgate,
            "qs" => self.charges.qsrc,
            "qd" => self.charges.qdrn,
            "gcrg" => self.gate_resistance.gcrg,
            "gtau" => self.gtau,
            "cgg" => c.cggb,
            "cgd" => c.cgdb,
            "cgs" => c.cgsb,
            "cgb" => c.cgbb,
            "cdg" => c.cdgb,
            "cdd" => c.cddb,
            "cds" => c.cdsb,
            "cdb" => c.cdbb,
            "csg" => c.csgb,
            "csd" => c.csdb,
            "css" => c.cssb,
            "csb" => c.csbb,
            "cbg" => c.cbgb,
            "cbd" => c.cbdb,
            "cbs" => c.cbsb,
            "cbb" => c.cbbb,
            "capbd" => self.capbd,
            "capbs" => self.capbs,
            "vth" | "von" => self.von,
            "vdsat" => self.vdsat,
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_vds() {
        assert_eq!(Mode::from_vds(0.0), Mode::Forward);
        assert_eq!(Mode::from_vds(0.3), Mode::Forward);
        assert_eq!(Mode::from_vds(-1e-12), Mode::Reverse);
    }

    #[test]
    fn test_mode_swap_is_involution() {
        for mode in [Mode::Forward, Mode::Reverse] {
            assert_ne!(mode.swapped(), mode);
            assert_eq!(mode.swapped().swapped(), mode);
        }
        assert_eq!(Mode::Forward.select("d", "s"), "d");
        assert_eq!(Mode::Reverse.select("d", "s"), "s");
    }

    #[test]
    fn test_query_by_name() {
        let op = OperatingPoint {
            cd: 1e-3,
            gm: 2e-3,
            caps: ChargeDerivatives {
                cggb: 1e-15,
                cbdb: -2e-16,
                ..Default::default()
            },
            charges: Charges {
                qgate: 3e-15,
                ..Default::default()
            },
            von: 0.42,
            ..Default::default()
        };
        assert_eq!(op.query("id"), Some(1e-3));
        assert_eq!(op.query("GM"), Some(2e-3));
        assert_eq!(op.query("cgg"), Some(1e-15));
        assert_eq!(op.query("cbd"), Some(-2e-16));
        assert_eq!(op.query("qg"), Some(3e-15));
        assert_eq!(op.query("vth"), Some(0.42));
        assert_eq!(op.query("vbs"), None);
    }
}
