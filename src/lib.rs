// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Sparse gridding operators for radio interferometric imaging.

Builds the sparse matrices that interpolate a gridded Fourier transform of a
real-valued image to irregular (u,v) sample positions with a 6x6
prolate-spheroidal convolution kernel, and tabulates the real-space
apodization correction that undoes the kernel's effect on the image.
 */

pub mod correction;
pub mod error;
pub mod gridding;
pub mod math;
pub mod sparse;
pub mod spheroidal;

// Re-exports.
pub use correction::build_image_correction;
pub use error::GridError;
pub use gridding::{build_interpolation_matrices, InterpMatrices, UV};
pub use math::horner;
pub use sparse::CsrMatrix;
pub use spheroidal::{corrfun, gcffun, spheroid, SpheroidDomainError};
