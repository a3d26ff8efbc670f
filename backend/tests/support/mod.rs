#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

use parking_forecast::services::{
    generate_seeded, train_on_dataset, GeneratorConfig, TrainingConfig,
};
use parking_forecast::store::ModelArtifact;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Small forest trained once per test binary.
pub fn small_artifact() -> ModelArtifact {
    static ARTIFACT: OnceLock<ModelArtifact> = OnceLock::new();
    ARTIFACT
        .get_or_init(|| {
            let config = TrainingConfig {
                n_trees: 10,
                ..TrainingConfig::default()
            };
            let dataset = generate_seeded(
                &GeneratorConfig {
                    days: 28,
                    ..GeneratorConfig::default()
                },
                11,
            );
            let outcome = train_on_dataset(&dataset, &config).unwrap();
            ModelArtifact::from_training(outcome, &config)
        })
        .clone()
}
