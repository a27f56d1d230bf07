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

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_op_in_unsafe_fn)]

pub mod two_point_cal;

/// 1.0 in the firmware's Q16 fixed-point format
pub const Q16_ONE: i64 = 1 << 16;
/// Extra scale the firmware applies on top of Q16 (values are in thousandths)
pub const MILLI: i64 = 1000;

/// Encode a real value as a Q16 fixed-point number in thousandths
///
/// Truncates toward zero. Out-of-range values saturate at the `i64` limits.
pub fn to_q16_milli(value: f64) -> i64 {
    ((MILLI * Q16_ONE) as f64 * value) as i64
}

/// Rotation frequency in mHz for a capture period, as computed by the firmware's tacho ISR
pub const fn frequency_millihertz(period_ticks: u32) -> Option<u32> {
    if period_ticks == 0 {
        return None;
    }
    Some((MILLI * Q16_ONE) as u32 / period_ticks)
}
