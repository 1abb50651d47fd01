// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The prolate-spheroidal window function (alpha = 1, m = 6) used as the
//! gridding kernel, approximated by two rational polynomials.

use thiserror::Error;

use crate::math::horner;

// Rational-approximation coefficients, constant term first. The inner pair
// covers |eta| <= 0.75 (in the variable nn = eta^2 - 0.5625), the outer pair
// 0.75 < |eta| <= 1.0 (nn = eta^2 - 1.0).
const P_INNER: [f64; 5] = [8.203343e-2, -3.644705e-1, 6.278660e-1, -5.335581e-1, 2.312756e-1];
const Q_INNER: [f64; 3] = [1.0, 8.212018e-1, 2.078043e-1];
const P_OUTER: [f64; 5] = [4.028559e-3, -3.697768e-2, 1.021332e-1, -1.201436e-1, 6.412774e-2];
const Q_OUTER: [f64; 3] = [1.0, 9.599102e-1, 2.918724e-1];

/// How far past |eta| = 1.0 we still return 0.0 instead of erroring, to
/// absorb floating-point slop in callers' eta arithmetic.
const ETA_TOLERANCE: f64 = 1e-7;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("the spheroid is only defined on -1.0 <= eta <= 1.0, modulo machine precision (got {eta})")]
pub struct SpheroidDomainError {
    pub eta: f64,
}

/// Evaluate the prolate-spheroidal window function at `eta`.
///
/// The function is even, so only `|eta|` matters. `eta` beyond
/// `1.0 + 1e-7` is an error rather than an extrapolation; it means the
/// caller's normalization is broken.
pub fn spheroid(eta: f64) -> Result<f64, SpheroidDomainError> {
    let abs_eta = eta.abs();
    if abs_eta <= 0.75 {
        let nn = abs_eta * abs_eta - 0.75 * 0.75;
        Ok(horner(nn, &P_INNER) / horner(nn, &Q_INNER))
    } else if abs_eta <= 1.0 {
        let nn = abs_eta * abs_eta - 1.0;
        Ok(horner(nn, &P_OUTER) / horner(nn, &Q_OUTER))
    } else if abs_eta <= 1.0 + ETA_TOLERANCE {
        Ok(0.0)
    } else {
        Err(SpheroidDomainError { eta })
    }
}

/// The gridding *correction* function: the real-space pre-multiply factor
/// that compensates an image for the Fourier-side convolution.
#[inline]
pub fn corrfun(eta: f64) -> Result<f64, SpheroidDomainError> {
    spheroid(eta)
}

/// The gridding *convolution* function: the Fourier-space interpolation
/// weight, `|1 - eta^2| spheroid(eta)`. This is (approximately) the Fourier
/// transform of [`corrfun`].
#[inline]
pub fn gcffun(eta: f64) -> Result<f64, SpheroidDomainError> {
    Ok((1.0 - eta * eta).abs() * spheroid(eta)?)
}

/// Elementwise [`spheroid`]. Fails on the first out-of-domain element.
pub fn spheroid_slice(etas: &[f64]) -> Result<Vec<f64>, SpheroidDomainError> {
    etas.iter().map(|&eta| spheroid(eta)).collect()
}

/// Elementwise [`corrfun`].
pub fn corrfun_slice(etas: &[f64]) -> Result<Vec<f64>, SpheroidDomainError> {
    etas.iter().map(|&eta| corrfun(eta)).collect()
}

/// Elementwise [`gcffun`].
pub fn gcffun_slice(etas: &[f64]) -> Result<Vec<f64>, SpheroidDomainError> {
    etas.iter().map(|&eta| gcffun(eta)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn spheroid_is_even() {
        for &eta in &[0.0, 0.1, 0.3, 0.5, 0.75, 0.8, 0.9, 0.999, 1.0] {
            assert_abs_diff_eq!(spheroid(eta).unwrap(), spheroid(-eta).unwrap());
        }
    }

    #[test]
    fn spheroid_near_one_at_zero() {
        // The rational approximation isn't exactly 1 at eta = 0, but it's
        // close.
        assert_abs_diff_eq!(spheroid(0.0).unwrap(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn spheroid_nearly_vanishes_at_one() {
        // The outer fit leaves a small residual at the domain edge; the
        // |1 - eta^2| factor in gcffun kills it exactly.
        assert_abs_diff_eq!(spheroid(1.0).unwrap(), 0.0, epsilon = 5e-3);
        assert_abs_diff_eq!(spheroid(-1.0).unwrap(), 0.0, epsilon = 5e-3);
        assert_abs_diff_eq!(gcffun(1.0).unwrap(), 0.0);
        assert_abs_diff_eq!(gcffun(-1.0).unwrap(), 0.0);
    }

    #[test]
    fn spheroid_continuous_across_sub_domain_boundary() {
        let below = spheroid(0.75 - 1e-9).unwrap();
        let above = spheroid(0.75 + 1e-9).unwrap();
        // The two fits don't agree perfectly at 0.75; the step is a few
        // parts in 1e6.
        assert_abs_diff_eq!(below, above, epsilon = 1e-5);
    }

    #[test]
    fn spheroid_monotonically_decreasing_on_positive_domain() {
        let mut last = spheroid(0.0).unwrap();
        for i in 1..=100 {
            let next = spheroid(i as f64 / 100.0).unwrap();
            assert!(next < last, "spheroid not decreasing at eta = {}", i as f64 / 100.0);
            last = next;
        }
    }

    #[test]
    fn spheroid_tolerance_band_is_zero() {
        assert_abs_diff_eq!(spheroid(1.0 + 0.5e-7).unwrap(), 0.0);
        assert_abs_diff_eq!(spheroid(-(1.0 + 0.5e-7)).unwrap(), 0.0);
    }

    #[test]
    fn spheroid_errors_outside_domain() {
        for &eta in &[1.0 + 2e-7, 1.5, -1.5, 100.0, f64::INFINITY] {
            assert_eq!(spheroid(eta), Err(SpheroidDomainError { eta }));
        }
    }

    #[test]
    fn gcffun_tapers_harder_than_spheroid() {
        // The |1 - eta^2| factor only attenuates.
        for &eta in &[0.1, 0.5, 0.9] {
            assert!(gcffun(eta).unwrap() < spheroid(eta).unwrap());
        }
        assert_abs_diff_eq!(gcffun(0.0).unwrap(), spheroid(0.0).unwrap());
    }

    #[test]
    fn slice_wrappers_match_scalar_calls() {
        let etas = [-1.0, -0.6, 0.0, 0.3, 0.8, 1.0];
        let sph = spheroid_slice(&etas).unwrap();
        let gcf = gcffun_slice(&etas).unwrap();
        let corr = corrfun_slice(&etas).unwrap();
        for (i, &eta) in etas.iter().enumerate() {
            assert_abs_diff_eq!(sph[i], spheroid(eta).unwrap());
            assert_abs_diff_eq!(gcf[i], gcffun(eta).unwrap());
            assert_abs_diff_eq!(corr[i], corrfun(eta).unwrap());
        }

        assert!(spheroid_slice(&[0.0, 2.0]).is_err());
    }
}
