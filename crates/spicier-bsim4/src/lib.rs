//! BSIM4 v4.8 MOSFET model for Spicier.
//!
//! This crate hosts the parameter-derivation side of the Berkeley BSIM4
//! compact model together with its small-signal and noise stages:
//!
//! - A declarative model parameter table with "given" tracking and
//!   length/width/cross-term binning
//! - Model setup (default resolution) and a per-temperature model stage
//! - A shared, memoised size-dependent parameter cache keyed by (W, L, NF)
//! - Instance derivation: stress and well-proximity corrections, parasitic
//!   geometry, junction diode limits and effective oxide extraction
//! - Parameter checking with fatal errors and corrected warnings
//! - AC admittance assembly (gate/body resistance networks, NQS)
//! - Noise generators (thermal, shot, flicker, correlated induced-gate)
//! - Truncation error hand-off for the integrated charges
//!
//! The large-signal (DC) evaluation is not part of this crate. Its results
//! arrive as an [`OperatingPoint`] that the AC and noise stages read.
//!
//! # Usage
//!
//! ```text
//! .MODEL NCH NMOS LEVEL=54 VERSION=4.8 TOXE=1.8n VTH0=0.4
//! M1 d g s b NCH W=1u L=90n NF=2
//! ```
//!
//! # References
//!
//! - BSIM4 Manual: https://bsim.berkeley.edu/models/bsim4/

#[macro_use]
pub mod param;

pub mod ac;
pub mod batch;
pub mod check;
pub mod consts;
pub mod derive;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod helpers;
pub mod instance;
pub mod model;
pub mod mosfet;
pub mod noise;
pub mod op;
pub mod size_dep;
pub mod states;
pub mod truncate;

#[cfg(test)]
mod testing;

pub use derive::InstanceDerived;
pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use instance::InstanceParams;
pub use model::{Bsim4Model, ModelParams, ModelTemp};
pub use mosfet::{Bsim4Mosfet, Bsim4Nodes};
pub use noise::{Bsim4Noise, NoiseGenerator};
pub use op::{Mode, OperatingPoint};
pub use param::{Binned, MosfetType, Param};
pub use size_dep::{SizeDependParams, SizeKey};
