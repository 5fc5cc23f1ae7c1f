//! Noise source primitives for small-signal noise analysis.
//!
//! # Noise Sources
//!
//! - **Thermal noise** (Johnson-Nyquist): a conductance g generates a
//!   current noise with spectral density Si = 4kTg (A²/Hz)
//! - **Shot noise**: a DC current I generates Si = 2q|I| (A²/Hz)
//! - **Gain sources**: the device supplies the density directly; flicker
//!   (1/f) noise is reported this way
//! - **Correlated sources**: two thermal-like generators at different ports
//!   with a fixed phase relation, used for induced gate noise
//!
//! # Analysis Method
//!
//! For each frequency point the host builds the AC admittance matrix,
//! solves the adjoint system once for the chosen output node, and sums the
//! squared contributions of every source (noise adds in power).

mod sources;

pub use sources::{
    BOLTZMANN, ELECTRON_CHARGE, NoiseKind, NoisePort, NoiseSource, shot_noise_current,
    thermal_noise_current,
};

use crate::ac::Transfer;

/// Total output noise density (V²/Hz) of a set of sources.
pub fn total_output_density<'a>(
    sources: impl IntoIterator<Item = &'a NoiseSource>,
    transfer: &Transfer,
    temperature: f64,
) -> f64 {
    sources
        .into_iter()
        .map(|s| s.output_density(transfer, temperature))
        .sum()
}
