//! Device lifecycle protocol.

use crate::circuit::NodeAllocator;
use crate::stamp::AcMatrix;
use crate::state::{StateAllocator, StateHistory, Truncator};

/// A circuit element driven through the simulator's analysis lifecycle.
///
/// The host calls the hooks in order: `setup` once, `temperature` whenever the
/// circuit temperature changes, `load` after each converged large-signal
/// solve, then `ac_load`, `noise` and `truncate` as the running analysis needs.
pub trait Element: std::fmt::Debug {
    type Error: std::error::Error;
    /// Large-signal quantities handed over by the DC/transient load.
    type OperatingPoint;
    /// Output of one noise evaluation.
    type Noise;

    /// Get the element's name.
    fn name(&self) -> &str;

    /// Bind pins, create internal nodes and reserve state slots.
    fn setup(
        &mut self,
        nodes: &mut dyn NodeAllocator,
        states: &mut dyn StateAllocator,
    ) -> Result<(), Self::Error>;

    /// Recompute temperature- and geometry-dependent values at `temp` (kelvin).
    fn temperature(&mut self, temp: f64) -> Result<(), Self::Error>;

    /// Accept the operating point of the latest large-signal solve.
    fn load(&mut self, op: Self::OperatingPoint) -> Result<(), Self::Error>;

    /// Add the small-signal admittance at angular frequency `omega`.
    fn ac_load(
        &self,
        omega: f64,
        states: &dyn StateHistory,
        matrix: &mut dyn AcMatrix,
    ) -> Result<(), Self::Error>;

    /// Evaluate the noise generators at `freq` (hertz).
    fn noise(&self, freq: f64, states: &dyn StateHistory) -> Result<Self::Noise, Self::Error>;

    /// Tighten `timestep` according to the local truncation error of the
    /// element's integrated charges.
    fn truncate(&self, truncator: &dyn Truncator, timestep: &mut f64) -> Result<(), Self::Error>;
}
