//! Host-side numerical services for Spicier device models.
//!
//! This crate provides:
//! - Complex nodal matrices for AC small-signal analysis, with adjoint
//!   transfer functions for noise
//! - Noise source primitives (thermal, shot, gain, correlated)
//! - Charge-based local truncation error estimation for transient analysis

pub mod ac;
pub mod error;
pub mod linear;
pub mod noise;
pub mod transient;

pub use ac::{ComplexMna, Transfer};
pub use error::{Error, Result};
pub use linear::solve_complex;
pub use noise::{NoiseKind, NoisePort, NoiseSource};
pub use transient::{IntegrationMethod, LteEstimator, TruncationTolerances};
