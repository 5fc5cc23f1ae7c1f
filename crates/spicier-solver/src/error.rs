//! Error types for spicier-solver.

use spicier_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("singular matrix")]
    SingularMatrix,

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("node {0} has no row in the matrix")]
    InvalidNode(NodeId),

    #[error("unsupported integration order {order} for {method:?}")]
    UnsupportedOrder {
        method: crate::transient::IntegrationMethod,
        order: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
