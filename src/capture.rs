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

//! Timer capture samples pulled out of the firmware's debug log
//!
//! The firmware prints `TIM1_CCR1 = <ticks>` every time the tacho input captures an edge. Each
//! capture is the length of one interval, so summing them gives a synthetic clock.

use crate::error::{Error, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tacho_cal_utils::two_point_cal::CalPoint;

pub const CCR_PREFIX: &str = "TIM1_CCR1 = ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimestepSample {
    /// Sum of every capture value before this one
    pub cumulative_time: i64,
    pub capture_value: i64,
}

impl From<TimestepSample> for CalPoint<i64> {
    fn from(sample: TimestepSample) -> Self {
        CalPoint {
            time: sample.cumulative_time,
            value: sample.capture_value,
        }
    }
}

/// Read every capture sample from the log at `path`
pub fn read_log(path: &Path) -> Result<Vec<TimestepSample>> {
    let io_error = |source| Error::Io {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    log::info!("Scanning {}", path.display());
    scan(BufReader::new(file)).map_err(|e| match e {
        Error::Io { source, .. } => io_error(source),
        e => e,
    })
}

/// Collect capture samples in log order, ignoring every line without [`CCR_PREFIX`]
pub fn scan(reader: impl BufRead) -> Result<Vec<TimestepSample>> {
    let (samples, t_sum) = reader.lines().enumerate().try_fold(
        (Vec::new(), 0_i64),
        |(mut samples, t_sum), (index, line)| -> Result<(Vec<TimestepSample>, i64)> {
            let line = line.map_err(|source| Error::Io {
                path: Default::default(),
                source,
            })?;
            let Some(text) = line.strip_prefix(CCR_PREFIX) else {
                return Ok((samples, t_sum));
            };
            let line_number = index + 1;
            let capture_value: i64 = text.trim().parse().map_err(|source| Error::Parse {
                line: line_number,
                text: text.to_owned(),
                source,
            })?;
            samples.push(TimestepSample {
                cumulative_time: t_sum,
                capture_value,
            });
            let t_sum = t_sum
                .checked_add(capture_value)
                .ok_or(Error::Overflow { line: line_number })?;
            Ok((samples, t_sum))
        },
    )?;
    log::info!("Found {} capture samples spanning {} ticks", samples.len(), t_sum);
    Ok(samples)
}

/// Drop the first `amount` samples, which are taken while the rotor is still spinning up
pub fn strip_warmup(samples: &[TimestepSample], amount: usize) -> &[TimestepSample] {
    let kept = samples.get(amount..).unwrap_or_default();
    log::info!("Stripped {} warm-up samples, {} left", samples.len() - kept.len(), kept.len());
    kept
}
