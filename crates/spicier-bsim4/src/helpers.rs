//! Guarded numeric primitives used throughout the derivation.

use crate::consts::{CHARGE, EXP_THRESHOLD, MAX_EXP, MIN_EXP};

/// Exponential linearised above `EXP_THRESHOLD` and floored below its
/// negative.
#[inline]
pub fn dexp(a: f64) -> f64 {
    if a > EXP_THRESHOLD {
        MAX_EXP * (1.0 + a - EXP_THRESHOLD)
    } else if a < -EXP_THRESHOLD {
        MIN_EXP
    } else {
        a.exp()
    }
}

/// Short-channel smoothing factor `e^x / ((e^x - 1)² + 2·e^x·MIN_EXP)`.
///
/// Saturates to `1 / (MAX_EXP - 2)` once `x` reaches `EXP_THRESHOLD`.
/// The guard term keeps the denominator positive at `x = 0`.
#[inline]
pub fn theta(x: f64) -> f64 {
    if x < EXP_THRESHOLD {
        let t1 = x.exp();
        let t2 = t1 - 1.0;
        t1 / (t2 * t2 + 2.0 * t1 * MIN_EXP)
    } else {
        1.0 / (MAX_EXP - 2.0)
    }
}

/// Knee voltage of the current-limited junction diode.
///
/// Solves `Isb·(e^u - X/e^u + X - 1) = Ijth` for `u = V/Nvtm` and returns
/// `V`. With `X = 0` this is the pure exponential `Nvtm·ln(1 + Ijth/Isb)`.
pub fn dio_ijth_vjm_eval(nvtm: f64, ijth: f64, isb: f64, xexpbv: f64) -> f64 {
    let tc = xexpbv;
    let tb = 1.0 + ijth / isb - tc;
    let e = 0.5 * (tb + (tb * tb + 4.0 * tc).sqrt());
    nvtm * e.ln()
}

/// Poly-gate depletion: effective gate voltage and its derivative.
///
/// Active only for gate doping in (1e18, 1e25) cm⁻³ and `vgs > phi`.
pub fn poly_depletion(phi: f64, ngate: f64, epsgate: f64, coxe: f64, vgs: f64) -> (f64, f64) {
    if ngate > 1.0e18 && ngate < 1.0e25 && vgs > phi && epsgate != 0.0 {
        let t1 = 1.0e6 * CHARGE * epsgate * ngate / (coxe * coxe);
        let t8 = vgs - phi;
        let t4 = (1.0 + 2.0 * t8 / t1).sqrt();
        let t2 = 2.0 * t8 / (t4 + 1.0);
        let vpoly = 0.5 * t2 * t2 / t1;
        let t7 = 1.12 - vpoly - 0.05;
        let t6 = (t7 * t7 + 0.224).sqrt();
        let t5 = 1.12 - 0.5 * (t7 + t6);
        (vgs - t5, 1.0 - (0.5 - 0.5 / t4) * (1.0 + t7 / t6))
    } else {
        (vgs, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EPS0;

    #[test]
    fn test_dexp_branches() {
        assert_eq!(dexp(0.0), 1.0);
        assert_eq!(dexp(-40.0), MIN_EXP);
        assert!((dexp(35.0) - 2.0 * MAX_EXP).abs() < 1.0);
        // continuous at the upper threshold
        assert!((dexp(EXP_THRESHOLD) - MAX_EXP).abs() / MAX_EXP < 1e-9);
    }

    #[test]
    fn test_theta_positive_and_finite() {
        for i in -200..200 {
            let x = i as f64 * 0.25;
            let t = theta(x);
            assert!(t.is_finite() && t > 0.0, "theta({x}) = {t}");
        }
        assert!(theta(-1.0e3).is_finite());
    }

    #[test]
    fn test_theta_saturates() {
        assert_eq!(theta(EXP_THRESHOLD), 1.0 / (MAX_EXP - 2.0));
        assert_eq!(theta(100.0), 1.0 / (MAX_EXP - 2.0));
        // the two branches meet
        let below = theta(EXP_THRESHOLD - 1e-9);
        let above = theta(EXP_THRESHOLD);
        assert!((below - above).abs() / above < 1e-6);
    }

    #[test]
    fn test_theta_continuous() {
        let mut x = -5.0;
        while x < 30.0 {
            let a = theta(x);
            let b = theta(x + 1e-7);
            assert!((a - b).abs() <= 1e-5 * a.abs().max(b.abs()), "jump at {x}");
            x += 0.37;
        }
    }

    #[test]
    fn test_knee_voltage_satisfies_equation() {
        for &(nvt, ijth, isat, x) in &[
            (0.0259, 0.1, 1e-14, 0.0),
            (0.0259, 0.1, 1e-14, 1e-3),
            (0.03, 1e-3, 1e-12, 0.5),
            (0.05, 10.0, 1e-16, 2.0),
        ] {
            let vjm = dio_ijth_vjm_eval(nvt, ijth, isat, x);
            let e = (vjm / nvt).exp();
            let i = isat * (e - x / e + x - 1.0);
            assert!((i - ijth).abs() / ijth < 1e-9, "{i} vs {ijth}");
        }
    }

    #[test]
    fn test_knee_voltage_pure_exponential() {
        let v = dio_ijth_vjm_eval(0.0259, 0.1, 1e-14, 0.0);
        let expected = 0.0259 * (1.0 + 0.1 / 1e-14_f64).ln();
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn test_poly_depletion_inactive() {
        assert_eq!(poly_depletion(0.9, 0.0, 11.7 * EPS0, 0.01, 1.5), (1.5, 1.0));
        assert_eq!(poly_depletion(0.9, 1e20, 11.7 * EPS0, 0.01, 0.5), (0.5, 1.0));
    }

    #[test]
    fn test_poly_depletion_reduces_gate_voltage() {
        let coxe = 3.9 * EPS0 / 2e-9;
        let (veff, dv) = poly_depletion(0.9, 5e19, 11.7 * EPS0, coxe, 1.5);
        assert!(veff < 1.5 && veff > 0.9, "veff = {veff}");
        assert!(dv > 0.0 && dv <= 1.0);
    }
}
