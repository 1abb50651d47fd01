// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.

#[cfg(test)]
mod tests;

/// Evaluate the polynomial
///
/// `coeffs[0] + coeffs[1] x + coeffs[2] x^2 + ... + coeffs[n-1] x^(n-1)`
///
/// at `x` by Horner's rule: O(n) multiply-adds, no explicit powers.
///
/// # Examples
///
/// `assert_abs_diff_eq!(horner(2.0, &[1.0, 3.0]), 7.0);`
#[inline]
pub fn horner(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |result, &c| c + x * result)
}
