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

use crate::{
    capture::TimestepSample,
    error::{Error, Result},
};
use tacho_cal_utils::two_point_cal::TwoPoint;

/// Deviation of each magnet's capture from the linear trend over one revolution
///
/// The trend is the line through sample 0 and sample `n_magnets`, i.e. the same magnet one
/// revolution later. Needs at least `n_magnets + 1` samples.
pub fn magnet_distances(samples: &[TimestepSample], n_magnets: usize) -> Result<Vec<f64>> {
    if samples.len() <= n_magnets {
        return Err(Error::NotEnoughSamples {
            needed: n_magnets.saturating_add(1),
            available: samples.len(),
        });
    }

    let mut cal = TwoPoint::<i64>::default();
    cal.add_point(samples[0].into());
    cal.add_point(samples[n_magnets].into());
    let constants = cal.get_cal_constants()?;
    log::info!(
        "Capture drift: {} ticks per tick, anchored at t = {}",
        constants.m,
        constants.anchor.time
    );

    samples[..n_magnets]
        .iter()
        .enumerate()
        .map(|(i, &sample)| -> Result<f64> {
            let distance = constants.residual(sample.into())?;
            log::debug!("Magnet {}: distance {}", i, distance);
            Ok(distance)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use tacho_cal_utils::two_point_cal::FitError;

    fn samples(captures: &[i64]) -> Vec<TimestepSample> {
        let mut t_sum = 0;
        captures
            .iter()
            .map(|&capture_value| {
                let sample = TimestepSample {
                    cumulative_time: t_sum,
                    capture_value,
                };
                t_sum += capture_value;
                sample
            })
            .collect()
    }

    #[test]
    fn constant_speed() {
        let samples = samples(&[100; 5]);
        assert_eq!(magnet_distances(&samples, 2).unwrap(), [100.0, 100.0]);
    }

    #[test]
    fn linear_drift_removed() {
        // Same three magnets, each revolution 30 ticks slower than the last
        let samples = samples(&[90, 100, 110, 120, 130]);
        let distances = magnet_distances(&samples, 3).unwrap();
        // m = (120 - 90) / 300
        let m = 0.1;
        let expected = [90.0, 100.0 - m * 90.0, 110.0 - m * 190.0];
        for (d, e) in distances.iter().zip(expected) {
            assert!((d - e).abs() < 1e-9, "{d} != {e}");
        }
    }

    #[test]
    fn too_few_samples() {
        let samples = samples(&[100; 3]);
        assert!(matches!(
            magnet_distances(&samples, 3),
            Err(Error::NotEnoughSamples {
                needed: 4,
                available: 3,
            })
        ));
        assert!(magnet_distances(&samples, 2).is_ok());
    }

    #[test]
    fn huge_magnet_count() {
        let samples = samples(&[100; 2]);
        assert!(matches!(
            magnet_distances(&samples, usize::MAX),
            Err(Error::NotEnoughSamples {
                needed: usize::MAX,
                available: 2,
            })
        ));
    }

    #[test]
    fn zero_magnets() {
        let samples = samples(&[100; 3]);
        assert!(matches!(
            magnet_distances(&samples, 0),
            Err(Error::Fit(FitError::DivideByZero))
        ));
    }

    #[test]
    fn degenerate_timestamps() {
        let samples = samples(&[0, 0, 0, 50]);
        assert!(matches!(
            magnet_distances(&samples, 2),
            Err(Error::Fit(FitError::DivideByZero))
        ));
    }
}
