//! Local truncation error control for transient analysis.

use spicier_core::{StateHistory, Truncator};

use crate::error::{Error, Result};

/// Integration method for transient analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Backward Euler (first order, A-stable).
    BackwardEuler,
    /// Trapezoidal (order 1 or 2).
    Trapezoidal,
    /// Gear / backward differentiation (order 1 to 6).
    Gear,
}

/// Error constants of the trapezoidal rule, indexed by order - 1.
const TRAP_COEFF: [f64; 2] = [0.5, 0.08333333333];

/// Error constants of the Gear formulas, indexed by order - 1.
const GEAR_COEFF: [f64; 6] = [
    0.5,
    0.2222222222,
    0.1363636364,
    0.096,
    0.07299270073,
    0.05830903790,
];

impl IntegrationMethod {
    /// Highest order the method supports.
    pub fn max_order(self) -> usize {
        match self {
            IntegrationMethod::BackwardEuler => 1,
            IntegrationMethod::Trapezoidal => TRAP_COEFF.len(),
            IntegrationMethod::Gear => GEAR_COEFF.len(),
        }
    }

    /// Leading error constant for `order`.
    fn error_coefficient(self, order: usize) -> Option<f64> {
        let i = order.checked_sub(1)?;
        match self {
            IntegrationMethod::BackwardEuler | IntegrationMethod::Trapezoidal => {
                TRAP_COEFF.get(i).copied()
            }
            IntegrationMethod::Gear => GEAR_COEFF.get(i).copied(),
        }
    }
}

/// Tolerances used by the truncation error estimate.
#[derive(Debug, Clone, Copy)]
pub struct TruncationTolerances {
    /// Absolute current tolerance (A).
    pub abstol: f64,
    /// Relative tolerance.
    pub reltol: f64,
    /// Charge tolerance (C).
    pub chgtol: f64,
    /// Truncation error overestimation factor.
    pub trtol: f64,
}

impl Default for TruncationTolerances {
    fn default() -> Self {
        Self {
            abstol: 1e-12,
            reltol: 1e-3,
            chgtol: 1e-14,
            trtol: 7.0,
        }
    }
}

/// Charge-based local truncation error estimator.
///
/// Each truncated slot holds a charge; the slot right after it holds the
/// companion current. The estimate takes the (order+1)-th divided difference
/// of the charge history and turns it into the largest timestep that keeps
/// the error within tolerance.
pub struct LteEstimator<'a> {
    history: &'a dyn StateHistory,
    method: IntegrationMethod,
    order: usize,
    /// Past step sizes, newest first; `delta_old[0]` is the current step.
    delta_old: &'a [f64],
    tolerances: TruncationTolerances,
}

impl<'a> LteEstimator<'a> {
    /// Create an estimator over `history`.
    ///
    /// `delta_old` must hold at least `order + 1` step sizes.
    pub fn new(
        history: &'a dyn StateHistory,
        method: IntegrationMethod,
        order: usize,
        delta_old: &'a [f64],
    ) -> Result<Self> {
        if order == 0 || order > method.max_order() {
            return Err(Error::UnsupportedOrder { method, order });
        }
        if delta_old.len() < order + 1 {
            return Err(Error::DimensionMismatch {
                expected: order + 1,
                actual: delta_old.len(),
            });
        }
        Ok(Self {
            history,
            method,
            order,
            delta_old,
            tolerances: TruncationTolerances::default(),
        })
    }

    /// Replace the default tolerances.
    pub fn with_tolerances(mut self, tolerances: TruncationTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Largest timestep allowed by the charge in `qcap`.
    pub fn timestep_limit(&self, qcap: usize) -> f64 {
        let tol = &self.tolerances;
        let ccap = qcap + 1;
        let h = self.history;

        let volttol =
            tol.abstol + tol.reltol * h.state(0, ccap).abs().max(h.state(1, ccap).abs());
        let chargetol = h.state(0, qcap).abs().max(h.state(1, qcap).abs());
        let chargetol = tol.reltol * chargetol.max(tol.chgtol) / self.delta_old[0];
        let tolerance = volttol.max(chargetol);

        let order = self.order;
        let mut diff: Vec<f64> = (0..=order + 1).map(|age| h.state(age, qcap)).collect();
        let mut deltmp: Vec<f64> = self.delta_old[..=order].to_vec();

        let mut j = order;
        loop {
            for i in 0..=j {
                diff[i] = (diff[i] - diff[i + 1]) / deltmp[i];
            }
            if j == 0 {
                break;
            }
            j -= 1;
            for i in 0..=j {
                deltmp[i] = deltmp[i + 1] + self.delta_old[i];
            }
        }

        let factor = self.method.error_coefficient(order).unwrap_or(0.5);
        let del = tol.trtol * tolerance / tol.abstol.max(factor * diff[0].abs());
        match order {
            1 => del,
            2 => del.sqrt(),
            n => (del.ln() / n as f64).exp(),
        }
    }
}

impl Truncator for LteEstimator<'_> {
    fn truncate(&self, slot: usize, timestep: &mut f64) {
        let limit = self.timestep_limit(slot);
        if limit < *timestep {
            log::trace!("slot {slot} limits timestep {:.3e} -> {limit:.3e}", *timestep);
            *timestep = limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spicier_core::{StateAllocator, StateVector};

    /// History of a charge q(t) = f(t) sampled backwards from t0 with step h.
    fn history_of(f: impl Fn(f64) -> f64, t0: f64, h: f64, depth: usize) -> StateVector {
        let mut states = StateVector::new(depth);
        let q = states.reserve(2);
        for age in 0..depth {
            let t = t0 - age as f64 * h;
            states.set(age, q, f(t));
            // companion current dq/dt, only its magnitude enters the tolerance
            states.set(age, q + 1, 0.0);
        }
        states
    }

    #[test]
    fn test_linear_charge_never_limits() {
        // A linear charge has zero second difference: the limit is set by
        // abstol in the denominator and is enormous.
        let states = history_of(|t| 1e-12 * t, 1e-6, 1e-9, 4);
        let deltas = [1e-9, 1e-9, 1e-9];
        let est = LteEstimator::new(&states, IntegrationMethod::Trapezoidal, 1, &deltas).unwrap();

        let mut step = 1e-9;
        est.truncate(0, &mut step);
        assert_eq!(step, 1e-9);
    }

    #[test]
    fn test_curved_charge_limits_step() {
        // q = Q·sin(ωt) with a fast ω: the estimate must shrink a large step.
        let omega = 2.0 * std::f64::consts::PI * 1e9;
        let states = history_of(|t| 1e-12 * (omega * t).sin(), 3e-10, 1e-10, 4);
        let deltas = [1e-10, 1e-10, 1e-10];
        let est = LteEstimator::new(&states, IntegrationMethod::Trapezoidal, 2, &deltas).unwrap();

        let mut step = 1.0;
        est.truncate(0, &mut step);
        assert!(step < 1.0 && step > 0.0, "step = {step}");
    }

    #[test]
    fn test_order_one_matches_hand_formula() {
        // q = a t²: first-order second divided difference is exactly a.
        let a = 1e3;
        let h = 1e-9;
        let states = history_of(|t| a * t * t, 5e-9, h, 3);
        let deltas = [h, h];
        let est = LteEstimator::new(&states, IntegrationMethod::BackwardEuler, 1, &deltas).unwrap();

        let tol = TruncationTolerances::default();
        let q0 = a * 5e-9 * 5e-9;
        let q1 = a * 4e-9 * 4e-9;
        let volttol = tol.abstol;
        let chargetol = tol.reltol * q0.max(q1).max(tol.chgtol) / h;
        let expected = tol.trtol * volttol.max(chargetol) / tol.abstol.max(0.5 * a);

        let limit = est.timestep_limit(0);
        assert!((limit - expected).abs() < expected * 1e-6, "{limit} vs {expected}");
    }

    #[test]
    fn test_rejects_bad_order() {
        let states = StateVector::new(2);
        let deltas = [1e-9; 8];
        assert!(matches!(
            LteEstimator::new(&states, IntegrationMethod::Trapezoidal, 3, &deltas),
            Err(Error::UnsupportedOrder { order: 3, .. })
        ));
        assert!(matches!(
            LteEstimator::new(&states, IntegrationMethod::Gear, 4, &deltas[..2]),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
