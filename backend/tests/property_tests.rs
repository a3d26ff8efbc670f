//! Property tests for the generator, request validation and score formatting.

use parking_forecast::models::{PredictionRequest, PredictionResponse};
use parking_forecast::services::generator::{expected_load, NOISE_AMPLITUDE};
use parking_forecast::services::{generate_seeded, GeneratorConfig};
use proptest::prelude::*;

fn generator_config() -> impl Strategy<Value = GeneratorConfig> {
    (1u32..=21, 0u8..=23)
        .prop_flat_map(|(days, start)| (Just(days), Just(start), start..=23u8))
        .prop_map(|(days, hour_start, hour_end)| GeneratorConfig {
            days,
            hour_start,
            hour_end,
        })
}

proptest! {
    #[test]
    fn generated_rows_respect_the_domain(config in generator_config(), seed in any::<u64>()) {
        let dataset = generate_seeded(&config, seed);
        prop_assert_eq!(dataset.len(), config.slot_count());

        for (i, obs) in dataset.iter().enumerate() {
            let hours = usize::from(config.hour_end - config.hour_start) + 1;
            prop_assert_eq!(u32::from(obs.day_of_week), (i / hours) as u32 % 7);
            prop_assert_eq!(obs.is_weekend == 1, obs.day_of_week >= 5);
            prop_assert!((config.hour_start..=config.hour_end).contains(&obs.hour));
            prop_assert!((0.0..=100.0).contains(&obs.occupancy));
            prop_assert_eq!(obs.occupancy.fract(), 0.0);

            let center = f64::from(expected_load(obs.day_of_week, obs.hour));
            prop_assert!((obs.occupancy - center).abs() <= f64::from(NOISE_AMPLITUDE));
        }
    }

    #[test]
    fn generation_is_reproducible(config in generator_config(), seed in any::<u64>()) {
        prop_assert_eq!(generate_seeded(&config, seed), generate_seeded(&config, seed));
    }

    #[test]
    fn validation_accepts_exactly_the_domain(
        day in -3i64..10,
        hour in -3i64..27,
        weekend in -2i64..4,
    ) {
        let in_domain =
            (0..=6).contains(&day) && (0..=23).contains(&hour) && (0..=1).contains(&weekend);
        let result = PredictionRequest::new(day, hour, weekend).validate();
        prop_assert_eq!(result.is_ok(), in_domain);
        if let Err(e) = result {
            prop_assert_eq!(e.kind(), "VALIDATION_ERROR");
        }
    }

    #[test]
    fn scores_are_clamped_and_rounded(raw in -50.0f64..150.0) {
        let response = PredictionResponse::from_raw(raw);
        prop_assert!((0.0..=100.0).contains(&response.occupancy_score));
        let cents = response.occupancy_score * 100.0;
        prop_assert!((cents - cents.round()).abs() < 1e-6);
        prop_assert!((response.occupancy_score - raw.clamp(0.0, 100.0)).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(
            response.prediction_text,
            format!("Predicted Occupancy: {:?}%", response.occupancy_score)
        );
    }
}
