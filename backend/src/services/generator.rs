//! Synthetic occupancy history.
//!
//! Produces one observation per `(day, hour)` slot using fixed load rules
//! (base load, evening peak, weekend boost) perturbed by uniform integer
//! noise, and optionally exports the table as CSV for inspection.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ErrorContext, ForecastError, ForecastResult};
use crate::models::{is_weekend_day, Dataset, Observation, DAYS_PER_WEEK, HOURS_PER_DAY};

pub const BASE_LOAD: i32 = 50;
pub const EVENING_PEAK_HOURS: std::ops::RangeInclusive<u8> = 17..=20;
pub const EVENING_PEAK_BOOST: i32 = 30;
pub const WEEKEND_BOOST: i32 = 10;
pub const NOISE_AMPLITUDE: i32 = 10;

/// Exported column names, in order.
pub const CSV_HEADER: [&str; 4] = ["Day_of_Week", "Hour", "Is_Weekend", "Occupancy"];

/// Horizon and daily window of the synthetic history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of consecutive days; day 0 is a Monday.
    pub days: u32,
    /// First simulated hour (inclusive).
    pub hour_start: u8,
    /// Last simulated hour (inclusive).
    pub hour_end: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: 90,
            hour_start: 6,
            hour_end: 23,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> ForecastResult<()> {
        let ctx = || ErrorContext::new("generate");
        if self.days == 0 {
            return Err(ForecastError::configuration_with_context(
                "horizon must cover at least one day",
                ctx().with_field("days"),
            ));
        }
        if self.hour_end >= HOURS_PER_DAY || self.hour_start > self.hour_end {
            return Err(ForecastError::configuration_with_context(
                format!(
                    "hour range {}..={} must lie within 0..=23 with start <= end",
                    self.hour_start, self.hour_end
                ),
                ctx().with_field("hour_start"),
            ));
        }
        Ok(())
    }

    /// Number of observations this configuration produces.
    pub fn slot_count(&self) -> usize {
        self.days as usize * (usize::from(self.hour_end) - usize::from(self.hour_start) + 1)
    }
}

/// Deterministic part of the load for a slot, before noise and clamping.
pub fn expected_load(day_of_week: u8, hour: u8) -> i32 {
    let mut load = BASE_LOAD;
    if EVENING_PEAK_HOURS.contains(&hour) {
        load += EVENING_PEAK_BOOST;
    }
    if is_weekend_day(day_of_week) {
        load += WEEKEND_BOOST;
    }
    load
}

/// Generate the history with the caller's RNG.
///
/// The configuration must already be valid; see [`GeneratorConfig::validate`].
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Dataset {
    debug_assert!(config.validate().is_ok(), "invalid generator config");

    let mut observations = Vec::with_capacity(config.slot_count());
    for day in 0..config.days {
        let day_of_week = (day % u32::from(DAYS_PER_WEEK)) as u8;
        for hour in config.hour_start..=config.hour_end {
            let noise = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
            let raw = expected_load(day_of_week, hour) + noise;
            observations.push(Observation::new(day_of_week, hour, f64::from(raw)));
        }
    }

    debug!(rows = observations.len(), days = config.days, "Generated synthetic history");
    Dataset::new(observations)
}

/// Generate the history from a fixed seed.
pub fn generate_seeded(config: &GeneratorConfig, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config, &mut rng)
}

/// Write the dataset as CSV with a header row.
pub fn export_csv(dataset: &Dataset, path: impl AsRef<Path>) -> ForecastResult<()> {
    let path = path.as_ref();
    let ctx = || ErrorContext::new("export_dataset").with_path(path);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| csv_error(e, ctx()))?;
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| csv_error(e, ctx()))?;
    for observation in dataset.iter() {
        writer
            .serialize(observation)
            .map_err(|e| csv_error(e, ctx()))?;
    }
    writer
        .flush()
        .map_err(|e| ForecastError::io(e, ctx()))?;

    info!(rows = dataset.len(), path = %path.display(), "Exported dataset");
    Ok(())
}

fn csv_error(err: csv::Error, context: ErrorContext) -> ForecastError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => ForecastError::io(io, context),
        other => ForecastError::io(
            std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", other)),
            context,
        ),
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod generator_tests;
