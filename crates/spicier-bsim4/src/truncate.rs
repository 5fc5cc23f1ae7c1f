//! Truncation error hand-off.
//!
//! The device owns the integrated charges but not the integrator. For each
//! charge it integrates it asks the host's estimator to tighten the
//! timestep; the estimator reads the charge and its companion current from
//! the state history.

use spicier_core::Truncator;

use crate::instance::InstanceParams;
use crate::states;

/// Charge slots (offsets from the device's state base) the device
/// integrates under the given instance selectors, in estimation order.
pub fn charge_slots(inst: &InstanceParams) -> Vec<usize> {
    let mut slots = vec![states::QB, states::QG, states::QD];
    if inst.trnqsmod.as_i32() != 0 {
        slots.push(states::QCDUMP);
    }
    if inst.rbodymod.as_i32() != 0 {
        slots.push(states::QBS);
        slots.push(states::QBD);
    }
    if inst.rgatemod.as_i32() == 3 {
        slots.push(states::QGMID);
    }
    slots
}

/// Let `truncator` shrink `timestep` for every charge of the device whose
/// state block starts at `base`.
pub fn truncate(
    inst: &InstanceParams,
    base: usize,
    truncator: &dyn Truncator,
    timestep: &mut f64,
) {
    for offset in charge_slots(inst) {
        truncator.truncate(base + offset, timestep);
    }
}
