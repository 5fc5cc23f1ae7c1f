//! Physical and numerical constants shared by the BSIM4 stages.

pub use spicier_solver::noise::{BOLTZMANN, ELECTRON_CHARGE as CHARGE};

/// Argument above which exponentials are linearised.
pub const EXP_THRESHOLD: f64 = 34.0;
/// exp(EXP_THRESHOLD)
pub const MAX_EXP: f64 = 5.834617425e14;
/// exp(-EXP_THRESHOLD)
pub const MIN_EXP: f64 = 1.713908431e-15;
/// Smoothing offset used in square-root limiters.
pub const DELTA: f64 = 1.0e-9;

/// Boltzmann constant over electron charge (V/K).
pub const KB_OVER_Q: f64 = 8.617087e-5;
/// Vacuum permittivity (F/m).
pub const EPS0: f64 = 8.85418e-12;
/// Silicon permittivity (F/m).
pub const EPS_SI: f64 = 1.03594e-10;

/// Nominal reference temperature (K).
pub const REFTEMP: f64 = 300.15;
/// Offset between Celsius and Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;
/// Thermal voltage at the reference temperature (V).
pub const VT_REF: f64 = BOLTZMANN * REFTEMP / CHARGE;

/// Floor for logarithms in the noise evaluation.
pub const N_MINLOG: f64 = 1.0e-38;
