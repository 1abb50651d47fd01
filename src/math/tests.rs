// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_horner_constant() {
    assert_abs_diff_eq!(horner(123.456, &[3.5]), 3.5);
    assert_abs_diff_eq!(horner(0.0, &[3.5]), 3.5);
}

#[test]
fn test_horner_linear() {
    // 1 + 3x at x = 2.
    assert_abs_diff_eq!(horner(2.0, &[1.0, 3.0]), 7.0);
}

#[test]
fn test_horner_quintic() {
    // 2 - x + 4x^2 - 3x^3 + 0.5x^4 + x^5 at a few points, against direct
    // evaluation.
    let coeffs = [2.0, -1.0, 4.0, -3.0, 0.5, 1.0];
    for &x in &[-2.5_f64, -1.0, 0.0, 0.3, 1.0, 7.25] {
        let direct: f64 = coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| c * x.powi(i as i32))
            .sum();
        assert_abs_diff_eq!(horner(x, &coeffs), direct, epsilon = 1e-10);
    }
}

#[test]
fn test_horner_at_zero_is_constant_term() {
    assert_abs_diff_eq!(horner(0.0, &[42.0, 1e30, -1e30]), 42.0);
}
