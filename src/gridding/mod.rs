// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Construction of the sparse matrices that interpolate a gridded Fourier
//! transform to irregular (u,v) sample positions.
//!
//! The grid is the output of a real-input FFT of an image packed `[j, i]`
//! (i = RA/u index, j = Dec/v index): the u axis holds only non-negative
//! frequencies in ascending order, while the v axis is in FFT order with
//! the negative frequencies wrapped to the tail,
//!
//! `v = [0, 1, ..., n/2 - 1, -n/2, ..., -1] / (d n)`.
//!
//! Because only non-negative u is stored, a negative-u sample is serviced
//! by the mirrored +u grid column with its imaginary part conjugated
//! (Hermitian symmetry of a real image's transform).


use itertools::iproduct;
use log::warn;
use num_complex::Complex64;
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    sparse::CsrMatrix,
    spheroidal::{gcffun, SpheroidDomainError},
};

/// Number of grid points the gridding kernel spans along each axis.
pub const KERNEL_WIDTH: usize = 6;

/// The kernel reaches this many grid cells either side of a sample.
const KERNEL_HALF_WIDTH: i64 = KERNEL_WIDTH as i64 / 2;

/// A single (u,v) sample position, in the same units as the model grid axes
/// (lambda or klambda; keeping them consistent is the caller's
/// responsibility).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UV {
    pub u: f64,
    pub v: f64,
}

impl From<(f64, f64)> for UV {
    fn from((u, v): (f64, f64)) -> UV {
        UV { u, v }
    }
}

#[derive(Error, Debug)]
pub enum GriddingError {
    #[error("the u axis must contain at least {} points (got {0})", KERNEL_WIDTH)]
    UAxisTooShort(usize),

    #[error("the v axis must contain an even number of points, at least {} (got {0})", KERNEL_WIDTH)]
    BadVAxis(usize),

    #[error("data point u = {u} needs grid points past the edge of the u axis (largest u = {max})")]
    UOutOfGrid { u: f64, max: f64 },

    #[error("{0}")]
    Domain(#[from] SpheroidDomainError),
}

/// The interpolation operator for one dataset against one model grid: row
/// `r` of `real` and `imag` maps a flattened gridded Fourier transform to
/// the model visibility at data point `r`.
#[derive(Debug, Clone)]
pub struct InterpMatrices {
    pub real: CsrMatrix,
    pub imag: CsrMatrix,
    /// Rows whose sample fell within `3 du` of u = 0. The kernel footprint
    /// of such a sample folds across the u = 0 edge of the half-plane grid,
    /// and the folded weights are not implemented; these rows are left
    /// empty rather than filled with bogus weights.
    pub unresolved_rows: Vec<usize>,
}

impl InterpMatrices {
    /// Apply the operator to a flattened, complex, gridded Fourier
    /// transform, yielding the model visibility at every sample position.
    /// Unresolved rows yield zero.
    pub fn predict(&self, grid: &[Complex64]) -> Vec<Complex64> {
        let grid_re: Vec<f64> = grid.iter().map(|g| g.re).collect();
        let grid_im: Vec<f64> = grid.iter().map(|g| g.im).collect();
        let vis_re = self.real.dot(&grid_re);
        let vis_im = self.imag.dot(&grid_im);
        vis_re
            .iter()
            .zip(vis_im.iter())
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect()
    }
}

/// One row of weights before matrix assembly.
struct RowWeights {
    /// (flattened grid index, weight) pairs, one per kernel footprint
    /// point.
    entries: Vec<(usize, f64)>,
    /// Whether the imaginary weights are negated. True for u <= 0 samples,
    /// which are serviced by the mirrored +u grid column.
    conjugate: bool,
}

/// Insertion index that keeps `axis` sorted if `x` were inserted before any
/// equal elements, i.e. the count of elements strictly less than `x`
/// (numpy's `searchsorted`).
fn searchsorted(axis: &[f64], x: f64) -> usize {
    axis.partition_point(|&e| e < x)
}

/// The [`KERNEL_WIDTH`] grid indices around `v` on a circularly-stored FFT
/// axis. Only the half of the axis that can contain `v` is searched (the
/// two halves are not sorted relative to each other); window indices
/// falling off either end wrap around the 0/negative seam. Away from the
/// seam the wrap is a no-op.
fn circular_window(v_axis: &[f64], v: f64) -> [usize; KERNEL_WIDTH] {
    let npix = v_axis.len() as i64;
    let half = v_axis.len() / 2;
    let j0 = if v > 0.0 {
        searchsorted(&v_axis[..half], v)
    } else {
        searchsorted(&v_axis[half..], v) + half
    } as i64;

    let mut window = [0; KERNEL_WIDTH];
    for (slot, offset) in window.iter_mut().zip(-KERNEL_HALF_WIDTH..KERNEL_HALF_WIDTH) {
        *slot = (j0 + offset).rem_euclid(npix) as usize;
    }
    window
}

/// The [`KERNEL_WIDTH`] grid indices around `|u|` on the non-negative,
/// ascending u axis, or `None` if the sample lies close enough to u = 0
/// that the kernel footprint folds onto the conjugate half-plane. The u
/// axis has a hard edge, not a seam, so there is no wraparound; a window
/// that would run past the top of the axis is an error, mirroring how an
/// out-of-grid v surfaces a domain error.
fn u_window(
    u_axis: &[f64],
    u: f64,
    du: f64,
) -> Result<Option<[usize; KERNEL_WIDTH]>, GriddingError> {
    if u.abs() <= KERNEL_HALF_WIDTH as f64 * du {
        return Ok(None);
    }

    let i0 = searchsorted(u_axis, u.abs());
    if i0 + KERNEL_HALF_WIDTH as usize > u_axis.len() {
        return Err(GriddingError::UOutOfGrid {
            u,
            max: u_axis[u_axis.len() - 1],
        });
    }

    let i0 = i0 as i64;
    let mut window = [0; KERNEL_WIDTH];
    for (slot, offset) in window.iter_mut().zip(-KERNEL_HALF_WIDTH..KERNEL_HALF_WIDTH) {
        *slot = (i0 + offset) as usize;
    }
    Ok(Some(window))
}

/// Compute one row of interpolation weights, or `None` on the unresolved
/// u-overlap path.
fn interp_row(
    uv: UV,
    u_axis: &[f64],
    v_axis: &[f64],
    du: f64,
    dv: f64,
) -> Result<Option<RowWeights>, GriddingError> {
    let UV { u, v } = uv;

    let j_indices = circular_window(v_axis, v);
    let i_indices = match u_window(u_axis, u, du)? {
        Some(w) => w,
        None => return Ok(None),
    };

    // eta is the sample's offset from each grid point in units of the
    // kernel half-width. The wrapped v indices give the circular distance
    // across the seam.
    let mut uw = [0.0; KERNEL_WIDTH];
    for (w, &i) in uw.iter_mut().zip(i_indices.iter()) {
        *w = gcffun((u.abs() - u_axis[i]) / (KERNEL_HALF_WIDTH as f64 * du))?;
    }
    let mut vw = [0.0; KERNEL_WIDTH];
    for (w, &j) in vw.iter_mut().zip(j_indices.iter()) {
        *w = gcffun((v - v_axis[j]) / (KERNEL_HALF_WIDTH as f64 * dv))?;
    }

    // Joint normalization of the separable kernel product, so the 36
    // weights sum to 1.
    let norm = uw.iter().sum::<f64>() * vw.iter().sum::<f64>();

    let vstride = u_axis.len();
    let entries = iproduct!(
        i_indices.iter().zip(uw.iter()),
        j_indices.iter().zip(vw.iter())
    )
    .map(|((&i, &wi), (&j, &wj))| (i + j * vstride, wi * wj / norm))
    .collect();

    Ok(Some(RowWeights {
        entries,
        conjugate: u <= 0.0,
    }))
}

/// Build the real and imaginary interpolation matrices in one pass.
///
/// `u_axis` is the non-negative, ascending frequency axis of a real-input
/// FFT; `v_axis` is the full FFT axis in wrapped order (non-negative
/// ascending, then negative ascending). Both are assumed uniformly spaced.
/// A data point whose kernel window runs off the grid surfaces an error
/// ([`GriddingError::UOutOfGrid`] past the u edge, a domain error past the
/// v extent); finer preconditions (uniform spacing, adequate resolution)
/// remain the caller's responsibility.
///
/// Rows are computed in parallel; each data point only ever touches its own
/// row.
pub fn build_interpolation_matrices(
    data_points: &[UV],
    u_axis: &[f64],
    v_axis: &[f64],
) -> Result<InterpMatrices, GriddingError> {
    if u_axis.len() < KERNEL_WIDTH {
        return Err(GriddingError::UAxisTooShort(u_axis.len()));
    }
    if v_axis.len() < KERNEL_WIDTH || v_axis.len() % 2 != 0 {
        return Err(GriddingError::BadVAxis(v_axis.len()));
    }

    let du = (u_axis[1] - u_axis[0]).abs();
    let dv = (v_axis[1] - v_axis[0]).abs();
    // The stride to advance one v index in the flattened grid is the length
    // of a u row.
    let num_cols = u_axis.len() * v_axis.len();

    let rows = data_points
        .par_iter()
        .map(|&uv| interp_row(uv, u_axis, v_axis, du, dv))
        .collect::<Result<Vec<_>, _>>()?;

    let mut real_rows = Vec::with_capacity(rows.len());
    let mut imag_rows = Vec::with_capacity(rows.len());
    let mut unresolved_rows = vec![];
    for (row_index, row) in rows.into_iter().enumerate() {
        match row {
            Some(RowWeights { entries, conjugate }) => {
                let imag = if conjugate {
                    entries.iter().map(|&(l, w)| (l, -w)).collect()
                } else {
                    entries.clone()
                };
                real_rows.push(entries);
                imag_rows.push(imag);
            }
            None => {
                let UV { u, v } = data_points[row_index];
                warn!(
                    "u overlap at row {row_index} (u = {u}, v = {v}): the kernel footprint folds across u = 0; leaving the row empty"
                );
                unresolved_rows.push(row_index);
                real_rows.push(vec![]);
                imag_rows.push(vec![]);
            }
        }
    }

    Ok(InterpMatrices {
        real: CsrMatrix::from_rows(num_cols, real_rows),
        imag: CsrMatrix::from_rows(num_cols, imag_rows),
        unresolved_rows,
    })
}
