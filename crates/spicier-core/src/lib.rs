//! Host-side protocols for Spicier device models.
//!
//! A device model never owns the simulator. It sees the host through a
//! handful of narrow traits: a node allocator for wiring, a state allocator
//! and history view for integrated quantities, a complex matrix for AC
//! stamping, and a truncation estimator for timestep control.

pub mod circuit;
pub mod element;
pub mod error;
pub mod node;
pub mod stamp;
pub mod state;
pub mod units;

pub use circuit::{Circuit, NodeAllocator};
pub use element::Element;
pub use error::{Error, Result};
pub use node::{Node, NodeId, NodeKind};
pub use stamp::{AcMatrix, DenseAcMatrix};
pub use state::{StateAllocator, StateHistory, StateVector, Truncator};
