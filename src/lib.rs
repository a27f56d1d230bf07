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

#![forbid(unsafe_code)]

pub mod args;
pub mod capture;
pub mod distance;
pub mod error;
pub mod report;

pub use args::Settings;
use capture::TimestepSample;
pub use error::{Error, Result, UsageError};
pub use report::Calibration;
use tacho_cal_utils::frequency_millihertz;

/// Run the whole calibration on the log named in `settings`
pub fn analyze(settings: &Settings) -> Result<Calibration> {
    let samples = capture::read_log(&settings.filename)?;
    let samples = capture::strip_warmup(&samples, settings.strip_amount);
    let distances = distance::magnet_distances(samples, settings.n_magnets)?;
    log_rotation_speed(&samples[..settings.n_magnets]);
    Calibration::from_distances(&distances)
}

fn log_rotation_speed(revolution: &[TimestepSample]) {
    if revolution.is_empty() {
        return;
    }
    let total: i64 = revolution.iter().map(|s| s.capture_value).sum();
    let mean_period = total / revolution.len() as i64;
    match u32::try_from(mean_period).ok().and_then(frequency_millihertz) {
        Some(mhz) => log::info!("Mean capture period {} ticks ({} mHz)", mean_period, mhz),
        None => log::warn!("Mean capture period {} ticks is out of range", mean_period),
    }
}
