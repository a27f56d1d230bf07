// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{num::ParseIntError, path::PathBuf};
use tacho_cal_utils::two_point_cal::FitError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid capture value {text:?}")]
    Parse {
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: cumulative capture time overflowed")]
    Overflow { line: usize },
    #[error("not enough samples after stripping warm-up: {needed} needed, {available} left")]
    NotEnoughSamples { needed: usize, available: usize },
    #[error("linear fit failed")]
    Fit(#[from] FitError),
    #[error("magnet distances sum to zero, cannot normalize")]
    ZeroTotal,
    #[error("normalized distance {index} is not finite")]
    NonFinite { index: usize },
}

/// Missing or malformed command line arguments
#[derive(Debug, thiserror::Error)]
#[error("Usage: {program} filename.log n_magnets [strip_amount]")]
pub struct UsageError {
    pub program: String,
}
