// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all uvgrid-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("{0}")]
    Gridding(#[from] crate::gridding::GriddingError),

    #[error("{0}")]
    Correction(#[from] crate::correction::CorrectionError),

    #[error("{0}")]
    Domain(#[from] crate::spheroidal::SpheroidDomainError),
}
