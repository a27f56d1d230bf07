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

use core::fmt::Debug;
use num_traits::PrimInt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CalPoint<Reading> {
    pub time: Reading,
    pub value: Reading,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    #[error("calibration needs an anchor and a second point")]
    MissingPoint,
    #[error("calibration points share the same timestamp")]
    DivideByZero,
    #[error("calibration point difference overflows")]
    Overflow,
}

/// Line through two points, anchored at the first one added
#[derive(Copy, Clone, Debug, Default)]
pub struct TwoPoint<Reading> {
    anchor: Option<CalPoint<Reading>>,
    other: Option<CalPoint<Reading>>,
}

/// Calibration constants
///
/// expected_value = anchor.value + m * (time - anchor.time)
#[derive(Copy, Clone, Debug)]
pub struct Constants<Reading> {
    pub m: f64,
    pub anchor: CalPoint<Reading>,
}

impl<Reading: PrimInt + Debug> TwoPoint<Reading> {
    /// The first point becomes the anchor. Later points replace the second point.
    pub fn add_point(&mut self, point: CalPoint<Reading>) {
        log::debug!("New calibration point: {:?}", point);
        if self.anchor.is_none() {
            self.anchor = Some(point);
        } else {
            self.other = Some(point);
        }
    }

    pub fn get_cal_constants(&self) -> Result<Constants<Reading>, FitError> {
        let (Some(anchor), Some(other)) = (self.anchor, self.other) else {
            return Err(FitError::MissingPoint);
        };
        if other.time == anchor.time {
            log::error!("Attempted divide by zero at t = {:?}", anchor.time);
            return Err(FitError::DivideByZero);
        }
        let (Some(dt), Some(dv)) = (
            other.time.checked_sub(&anchor.time),
            other.value.checked_sub(&anchor.value),
        ) else {
            log::error!("Underflow: {:?} - {:?}", other, anchor);
            return Err(FitError::Overflow);
        };
        let m = to_f64(dv)? / to_f64(dt)?;
        Ok(Constants { m, anchor })
    }
}

impl<Reading: PrimInt + Debug> Constants<Reading> {
    /// Deviation of `point` from the fitted line
    pub fn residual(&self, point: CalPoint<Reading>) -> Result<f64, FitError> {
        let elapsed = point
            .time
            .checked_sub(&self.anchor.time)
            .ok_or(FitError::Overflow)?;
        Ok(to_f64(point.value)? - self.m * to_f64(elapsed)?)
    }
}

fn to_f64<Reading: PrimInt>(value: Reading) -> Result<f64, FitError> {
    value.to_f64().ok_or(FitError::Overflow)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn calibrate() {
        let mut cal = TwoPoint::default();
        let anchor = CalPoint {
            time: 0x1234_i64,
            value: 100,
        };
        let other = CalPoint {
            time: 0x4567,
            value: 300,
        };
        cal.add_point(anchor);
        cal.add_point(other);
        let constants = cal.get_cal_constants().unwrap();
        assert_eq!(constants.m, 200.0 / (0x4567 - 0x1234) as f64);
        assert_eq!(constants.residual(anchor).unwrap(), 100.0);
        assert!((constants.residual(other).unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn flat_line() {
        let mut cal = TwoPoint::default();
        cal.add_point(CalPoint { time: 0, value: 100 });
        cal.add_point(CalPoint {
            time: 200_i64,
            value: 100,
        });
        let constants = cal.get_cal_constants().unwrap();
        assert_eq!(constants.m, 0.0);
        assert_eq!(constants.residual(CalPoint { time: 100, value: 80 }).unwrap(), 80.0);
    }

    #[test]
    fn later_point_replaces_other() {
        let mut cal = TwoPoint::default();
        cal.add_point(CalPoint { time: 0, value: 0 });
        cal.add_point(CalPoint { time: 10_i32, value: 10 });
        cal.add_point(CalPoint { time: 10, value: 20 });
        assert_eq!(cal.get_cal_constants().unwrap().m, 2.0);
    }

    #[test]
    fn missing_point() {
        let mut cal = TwoPoint::<i64>::default();
        assert_eq!(cal.get_cal_constants().unwrap_err(), FitError::MissingPoint);
        cal.add_point(CalPoint { time: 0, value: 0 });
        assert_eq!(cal.get_cal_constants().unwrap_err(), FitError::MissingPoint);
    }

    #[test]
    fn divide_by_zero() {
        let mut cal = TwoPoint::default();
        cal.add_point(CalPoint { time: 5_i64, value: 1 });
        cal.add_point(CalPoint { time: 5, value: 2 });
        assert_eq!(cal.get_cal_constants().unwrap_err(), FitError::DivideByZero);
    }

    #[test]
    fn overflow() {
        let mut cal = TwoPoint::default();
        cal.add_point(CalPoint {
            time: i64::MIN,
            value: 0,
        });
        cal.add_point(CalPoint {
            time: i64::MAX,
            value: 0,
        });
        assert_eq!(cal.get_cal_constants().unwrap_err(), FitError::Overflow);
    }
}
