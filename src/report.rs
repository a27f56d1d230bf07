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

use crate::error::{Error, Result};
use core::fmt;
use tacho_cal_utils::to_q16_milli;

/// Per-magnet spacing relative to the average magnet
#[derive(Clone, Debug, PartialEq)]
pub struct Calibration {
    /// Averages to 1.0
    pub normalized: Vec<f64>,
    /// `normalized` in the firmware's Q16 format, in thousandths
    pub fixed_point: Vec<i64>,
}

impl Calibration {
    pub fn from_distances(distances: &[f64]) -> Result<Self> {
        let total: f64 = distances.iter().sum();
        if total == 0.0 {
            log::error!("Distances {:?} sum to zero", distances);
            return Err(Error::ZeroTotal);
        }
        let n = distances.len() as f64;
        let normalized = distances
            .iter()
            .enumerate()
            .map(|(index, d)| {
                let value = n * d / total;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(Error::NonFinite { index })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        let fixed_point = normalized.iter().copied().map(to_q16_milli).collect();
        Ok(Self {
            normalized,
            fixed_point,
        })
    }
}

/// Two lines: the normalized values, then the fixed-point values
impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.normalized)?;
        write!(f, "{:?}", self.fixed_point)
    }
}
