// ABOUTME: Environment-driven loading of the nutrition reference tables
// ABOUTME: Applies PAWPLAN_* overrides on top of the canonical defaults, then validates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Environment configuration
//!
//! | Variable | Table field |
//! |----------|-------------|
//! | `PAWPLAN_NEUTERED_ADULT_FACTOR` | `activity_factors.neutered_adult` |
//! | `PAWPLAN_INTACT_ADULT_FACTOR` | `activity_factors.intact_adult` |
//! | `PAWPLAN_ACTIVE_ADULT_FACTOR` | `activity_factors.active_adult` |
//! | `PAWPLAN_WEIGHT_LOSS_FACTOR` | `activity_factors.weight_loss` |
//! | `PAWPLAN_WEIGHT_GAIN_FACTOR` | `activity_factors.weight_gain` |
//! | `PAWPLAN_PUPPY_FACTOR_MIN` | `activity_factors.puppy_min` |
//! | `PAWPLAN_PUPPY_FACTOR_MAX` | `activity_factors.puppy_max` |
//! | `PAWPLAN_CA_P_OPTIMAL_MIN` | `mineral_balance.optimal_min` |
//! | `PAWPLAN_CA_P_OPTIMAL_MAX` | `mineral_balance.optimal_max` |
//! | `PAWPLAN_CA_P_ACCEPTABLE_MIN` | `mineral_balance.acceptable_min` |
//! | `PAWPLAN_CA_P_ACCEPTABLE_MAX` | `mineral_balance.acceptable_max` |
//! | `PAWPLAN_KCAL_TOLERANCE` | `kcal_consistency_tolerance` |
//! | `PAWPLAN_AAFCO_PROFILE` | path to a JSON array of requirement rows |

use pawplan_core::models::AafcoRequirement;
use pawplan_nutrition::config::{ConfigError, NutritionConfig};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Parse environment variable as f64 and update target if set
///
/// # Errors
///
/// Returns `ConfigError::Parse` when the variable is set but not a number
fn parse_env_f64(env_var: &str, target: &mut f64) -> Result<(), ConfigError> {
    match env::var(env_var) {
        Ok(value) => {
            *target = value
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::Parse(format!("{env_var}={value}: {e}")))?;
            debug!(variable = env_var, value = *target, "Applied configuration override");
            Ok(())
        }
        Err(env::VarError::NotPresent) => Ok(()),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}

/// Read AAFCO requirement rows from a JSON file
///
/// # Errors
///
/// Returns `ConfigError::Parse` when the file cannot be read or is not a JSON
/// array of requirement rows
pub fn load_requirements_file(path: &Path) -> Result<Vec<AafcoRequirement>, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
}

fn apply_activity_factor_overrides(config: &mut NutritionConfig) -> Result<(), ConfigError> {
    let factors = &mut config.activity_factors;
    parse_env_f64("PAWPLAN_NEUTERED_ADULT_FACTOR", &mut factors.neutered_adult)?;
    parse_env_f64("PAWPLAN_INTACT_ADULT_FACTOR", &mut factors.intact_adult)?;
    parse_env_f64("PAWPLAN_ACTIVE_ADULT_FACTOR", &mut factors.active_adult)?;
    parse_env_f64("PAWPLAN_WEIGHT_LOSS_FACTOR", &mut factors.weight_loss)?;
    parse_env_f64("PAWPLAN_WEIGHT_GAIN_FACTOR", &mut factors.weight_gain)?;
    parse_env_f64("PAWPLAN_PUPPY_FACTOR_MIN", &mut factors.puppy_min)?;
    parse_env_f64("PAWPLAN_PUPPY_FACTOR_MAX", &mut factors.puppy_max)
}

fn apply_mineral_balance_overrides(config: &mut NutritionConfig) -> Result<(), ConfigError> {
    let bands = &mut config.mineral_balance;
    parse_env_f64("PAWPLAN_CA_P_OPTIMAL_MIN", &mut bands.optimal_min)?;
    parse_env_f64("PAWPLAN_CA_P_OPTIMAL_MAX", &mut bands.optimal_max)?;
    parse_env_f64("PAWPLAN_CA_P_ACCEPTABLE_MIN", &mut bands.acceptable_min)?;
    parse_env_f64("PAWPLAN_CA_P_ACCEPTABLE_MAX", &mut bands.acceptable_max)
}

/// Build the reference tables from defaults plus environment overrides
///
/// # Errors
///
/// Returns `ConfigError` when an override does not parse or the resulting
/// tables fail validation
pub fn load_from_env() -> Result<NutritionConfig, ConfigError> {
    let mut config = NutritionConfig::default();

    apply_activity_factor_overrides(&mut config)?;
    apply_mineral_balance_overrides(&mut config)?;
    parse_env_f64(
        "PAWPLAN_KCAL_TOLERANCE",
        &mut config.kcal_consistency_tolerance,
    )?;

    if let Ok(path) = env::var("PAWPLAN_AAFCO_PROFILE") {
        config.aafco_requirements = load_requirements_file(Path::new(&path))?;
        info!(
            path = %path,
            rows = config.aafco_requirements.len(),
            "Loaded AAFCO profile"
        );
    }

    config.validate()?;
    Ok(config)
}
