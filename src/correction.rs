// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tabulation of the real-space apodization correction.
//!
//! The image is multiplied by this matrix before its forward transform, to
//! compensate for the attenuation the Fourier-side convolution kernel will
//! impose.

use ndarray::Array2;
use thiserror::Error;

use crate::spheroidal::{corrfun, SpheroidDomainError};

#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("need at least 3 coordinates per pixel axis to determine the spacing (got {0})")]
    AxisTooShort(usize),

    #[error("{0}")]
    Domain(#[from] SpheroidDomainError),
}

/// Per-coordinate correction factors along one axis; `None` for coordinates
/// outside the validity disk (|eta| > 1).
fn axis_factors(
    coords: &[f64],
    half_extent: f64,
) -> Result<Vec<Option<f64>>, SpheroidDomainError> {
    coords
        .iter()
        .map(|&c| {
            let eta = c / half_extent;
            if eta.abs() > 1.0 {
                Ok(None)
            } else {
                corrfun(eta).map(Some)
            }
        })
        .collect()
}

/// Tabulate the pre-multiply correction over an image's pixel grid.
///
/// `alphas` (RA) and `deltas` (Dec) are the pixel coordinates in FFT-shifted
/// order. The returned matrix has shape `(deltas.len(), alphas.len())`.
/// Pixels outside the kernel's validity disk are set to exactly 0.0; callers
/// must mask these rather than divide by them.
pub fn build_image_correction(
    alphas: &[f64],
    deltas: &[f64],
) -> Result<Array2<f64>, CorrectionError> {
    let nx = alphas.len();
    let ny = deltas.len();
    if nx < 3 {
        return Err(CorrectionError::AxisTooShort(nx));
    }
    if ny < 3 {
        return Err(CorrectionError::AxisTooShort(ny));
    }

    // Half-extents of the image. The axes aren't always symmetric about 0,
    // and the 1st/2nd samples may straddle the FFT-shift discontinuity, so
    // use the 2nd/3rd.
    let maxra = (alphas[2] - alphas[1]).abs() * nx as f64 / 2.0;
    let maxdec = (deltas[2] - deltas[1]).abs() * ny as f64 / 2.0;

    // The correction is separable; evaluate the kernel nx + ny times rather
    // than nx * ny times.
    let ra_factors = axis_factors(alphas, maxra)?;
    let dec_factors = axis_factors(deltas, maxdec)?;

    let mut mat = Array2::zeros((ny, nx));
    for (j, dec_factor) in dec_factors.iter().enumerate() {
        for (i, ra_factor) in ra_factors.iter().enumerate() {
            if let (Some(fx), Some(fy)) = (ra_factor, dec_factor) {
                mat[[j, i]] = 1.0 / (fx * fy);
            }
        }
    }

    Ok(mat)
}
