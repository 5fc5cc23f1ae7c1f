//! Error types for spicier-bsim4.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("mosfet {instance}, model {model}: Effective channel {what} <= 0")]
    EffectiveGeometry {
        instance: String,
        model: String,
        what: &'static str,
    },

    #[error(
        "Fatal error(s) detected during BSIM4v8.0 parameter checking for {instance} in model {model}"
    )]
    ParameterCheck {
        instance: String,
        model: String,
        messages: Vec<String>,
    },

    #[error("model {0} used before setup")]
    NotSetUp(String),

    #[error("mosfet {0} used before setup")]
    DeviceNotSetUp(String),

    #[error("mosfet {0} has no derived parameters; run the temperature stage first")]
    NotDerived(String),

    #[error("mosfet {0} has no operating point; load one first")]
    NoOperatingPoint(String),

    #[error(transparent)]
    Core(#[from] spicier_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
