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

use crate::error::UsageError;
use clap::{error::ErrorKind, Parser};
use std::{ffi::OsString, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Compute per-magnet calibration from a tacho capture log",
    allow_negative_numbers = true
)]
struct Args {
    /// Firmware debug log containing `TIM1_CCR1 = <ticks>` lines
    filename: PathBuf,

    /// Number of magnets on the rotor
    n_magnets: usize,

    /// Leading samples to discard [default: n_magnets + 1]
    #[arg(allow_hyphen_values = true)]
    strip_amount: Option<String>,

    /// Anything after the strip amount is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<OsString>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub filename: PathBuf,
    pub n_magnets: usize,
    pub strip_amount: usize,
}

impl Settings {
    /// Resolve settings from the process arguments
    ///
    /// `--help` and `--version` print and exit the process.
    pub fn from_env() -> Result<Self, UsageError> {
        Self::try_from_args(std::env::args_os())
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = args
            .first()
            .map(PathBuf::from)
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());

        let args = match Args::try_parse_from(args) {
            Ok(args) => args,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                log::debug!("Rejected arguments: {}", e);
                return Err(UsageError { program });
            }
        };

        let default_strip = args.n_magnets.saturating_add(1);
        let strip_amount = match args.strip_amount {
            None => default_strip,
            Some(text) => match text.parse::<i64>() {
                Ok(amount) => usize::try_from(amount).map_err(|_| UsageError { program })?,
                Err(_) => {
                    log::warn!("Ignoring strip amount {:?}, using {}", text, default_strip);
                    default_strip
                }
            },
        };

        Ok(Self {
            filename: args.filename,
            n_magnets: args.n_magnets,
            strip_amount,
        })
    }
}
