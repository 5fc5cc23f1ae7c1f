//! Noise source definitions and spectral density calculations.

use num_complex::Complex;
use spicier_core::NodeId;

use crate::ac::Transfer;

/// Boltzmann constant (J/K)
pub const BOLTZMANN: f64 = 1.38064852e-23;

/// Elementary charge (C)
pub const ELECTRON_CHARGE: f64 = 1.6021766208e-19;

/// A pair of nodes a noise current is injected between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoisePort {
    /// Node the noise current flows into.
    pub pos: NodeId,
    /// Node the noise current returns from.
    pub neg: NodeId,
}

impl NoisePort {
    pub fn new(pos: NodeId, neg: NodeId) -> Self {
        Self { pos, neg }
    }

    fn transfer(&self, transfer: &Transfer) -> Complex<f64> {
        transfer.between(self.pos, self.neg)
    }
}

/// Type of noise source and the magnitude that drives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseKind {
    /// Thermal noise of a conductance: Si = 4kT·g
    Thermal { conductance: f64 },
    /// Shot noise of a DC current: Si = 2q·|I|
    Shot { current: f64 },
    /// A density computed by the device itself (A²/Hz), e.g. flicker noise.
    Gain { density: f64 },
    /// Two partially correlated thermal-like sources.
    ///
    /// The first is injected at the source's own port, the second at
    /// `second`, rotated by `phase`:
    /// Sout = 4kT·|√s1·H1 + √s2·e^{jφ}·H2|²
    Correlated {
        s1: f64,
        s2: f64,
        phase: f64,
        second: NoisePort,
    },
}

/// A named noise generator.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    /// Name/identifier of the noise source (e.g. "rd", "1overf").
    pub name: String,
    /// Where the (first) noise current is injected.
    pub port: NoisePort,
    pub kind: NoiseKind,
}

impl NoiseSource {
    /// Create a thermal noise source from a conductance in siemens.
    pub fn thermal(name: impl Into<String>, port: NoisePort, conductance: f64) -> Self {
        Self {
            name: name.into(),
            port,
            kind: NoiseKind::Thermal { conductance },
        }
    }

    /// Create a shot noise source from a DC current in amps.
    pub fn shot(name: impl Into<String>, port: NoisePort, current: f64) -> Self {
        Self {
            name: name.into(),
            port,
            kind: NoiseKind::Shot { current },
        }
    }

    /// Create a source with an explicit current density in A²/Hz.
    pub fn gain(name: impl Into<String>, port: NoisePort, density: f64) -> Self {
        Self {
            name: name.into(),
            port,
            kind: NoiseKind::Gain { density },
        }
    }

    /// Create a correlated pair of sources.
    pub fn correlated(
        name: impl Into<String>,
        first: NoisePort,
        second: NoisePort,
        s1: f64,
        s2: f64,
        phase: f64,
    ) -> Self {
        Self {
            name: name.into(),
            port: first,
            kind: NoiseKind::Correlated {
                s1,
                s2,
                phase,
                second,
            },
        }
    }

    /// Noise current spectral density Si (A²/Hz) seen with a unit transfer.
    ///
    /// For a correlated pair this is the uncorrelated sum of both halves.
    pub fn current_spectral_density(&self, temperature: f64) -> f64 {
        let four_kt = 4.0 * BOLTZMANN * temperature;
        match self.kind {
            NoiseKind::Thermal { conductance } => four_kt * conductance,
            NoiseKind::Shot { current } => 2.0 * ELECTRON_CHARGE * current.abs(),
            NoiseKind::Gain { density } => density,
            NoiseKind::Correlated { s1, s2, .. } => four_kt * (s1 + s2),
        }
    }

    /// Output noise density (V²/Hz) contributed through `transfer`.
    pub fn output_density(&self, transfer: &Transfer, temperature: f64) -> f64 {
        match self.kind {
            NoiseKind::Correlated {
                s1,
                s2,
                phase,
                second,
            } => {
                let h1 = self.port.transfer(transfer);
                let h2 = second.transfer(transfer);
                let out = h1 * s1.sqrt() + h2 * Complex::from_polar(s2.sqrt(), phase);
                4.0 * BOLTZMANN * temperature * out.norm_sqr()
            }
            _ => {
                self.current_spectral_density(temperature)
                    * self.port.transfer(transfer).norm_sqr()
            }
        }
    }
}

/// Compute thermal noise current density for a conductance.
///
/// # Returns
/// Noise current density in A/√Hz
pub fn thermal_noise_current(conductance: f64, temperature: f64) -> f64 {
    (4.0 * BOLTZMANN * temperature * conductance).sqrt()
}

/// Compute shot noise current density.
///
/// # Returns
/// Noise current density in A/√Hz
pub fn shot_noise_current(current: f64) -> f64 {
    (2.0 * ELECTRON_CHARGE * current.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ac::ComplexMna;
    use spicier_core::AcMatrix;

    fn port(a: u32, b: u32) -> NoisePort {
        NoisePort::new(NodeId::new(a), NodeId::new(b))
    }

    #[test]
    fn test_thermal_noise_1k_resistor() {
        // 1kΩ resistor at 300K should have ~4.07 pA/√Hz
        let i_n = thermal_noise_current(1e-3, 300.0);
        assert!((i_n - 4.07e-12).abs() < 0.1e-12, "got {}", i_n);
    }

    #[test]
    fn test_shot_noise_1ma() {
        // 1mA current should have ~17.9 pA/√Hz shot noise
        let i_n = shot_noise_current(-1e-3);
        assert!((i_n - 17.9e-12).abs() < 0.5e-12, "got {}", i_n);
    }

    #[test]
    fn test_shot_noise_source() {
        let source = NoiseSource::shot("igs", port(1, 0), 1e-3);
        let si = source.current_spectral_density(300.0);
        assert!((si - 3.2e-22).abs() < 0.1e-22);
    }

    #[test]
    fn test_resistor_output_density() {
        // A 1kΩ resistor to ground: its own noise current sees Z = R.
        let n1 = NodeId::new(1);
        let mut mna = ComplexMna::new(1);
        mna.add_admittance(n1, NodeId::GROUND, Complex::new(1e-3, 0.0));
        let transfer = mna.transfer_to(n1).unwrap();

        let source = NoiseSource::thermal("r", port(1, 0), 1e-3);
        let sv = source.output_density(&transfer, 300.0);
        // Sv = 4kTR
        let expected = 4.0 * BOLTZMANN * 300.0 * 1000.0;
        assert!((sv - expected).abs() < expected * 1e-9);
    }

    #[test]
    fn test_correlated_reduces_to_sum_when_orthogonal() {
        // Two separate nodes each with 1Ω to ground, output is node 1.
        // H2 = 0, so only the first half contributes.
        let mut mna = ComplexMna::new(2);
        mna.add_admittance(NodeId::new(1), NodeId::GROUND, Complex::new(1.0, 0.0));
        mna.add_admittance(NodeId::new(2), NodeId::GROUND, Complex::new(1.0, 0.0));
        let transfer = mna.transfer_to(NodeId::new(1)).unwrap();

        let source = NoiseSource::correlated("corl", port(1, 0), port(2, 0), 2.0, 3.0, 0.5);
        let sv = source.output_density(&transfer, 300.0);
        let expected = 4.0 * BOLTZMANN * 300.0 * 2.0;
        assert!((sv - expected).abs() < expected * 1e-9);
    }

    #[test]
    fn test_correlated_phase_quadrature() {
        // Both halves injected at the same port: |√s1 + j√s2|² = s1 + s2.
        let mut mna = ComplexMna::new(1);
        mna.add_admittance(NodeId::new(1), NodeId::GROUND, Complex::new(1.0, 0.0));
        let transfer = mna.transfer_to(NodeId::new(1)).unwrap();

        let source = NoiseSource::correlated(
            "corl",
            port(1, 0),
            port(1, 0),
            1.0,
            4.0,
            std::f64::consts::FRAC_PI_2,
        );
        let sv = source.output_density(&transfer, 300.0);
        let expected = 4.0 * BOLTZMANN * 300.0 * 5.0;
        assert!((sv - expected).abs() < expected * 1e-9);
    }
}
