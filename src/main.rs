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

use anyhow::Context;
use std::process;
use tacho_cal::Settings;

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("tacho_cal", log::LevelFilter::Info)
        .filter_module("tacho_cal_utils", log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(usage) => {
            eprintln!("{usage}");
            process::exit(1);
        }
    };
    log::debug!("{:?}", settings);

    let calibration = tacho_cal::analyze(&settings)
        .with_context(|| format!("Calibration of {} failed", settings.filename.display()))?;
    println!("{calibration}");
    Ok(())
}
