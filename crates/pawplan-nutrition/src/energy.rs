// ABOUTME: Resting and maintenance energy requirement calculations for dogs
// ABOUTME: RER from body weight, MER from an activity factor chosen by a policy table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Energy Requirement Calculator
//!
//! # Scientific References
//!
//! - National Research Council (2006). *Nutrient Requirements of Dogs and Cats*.
//!   National Academies Press, ch. 3 (energy).
//! - WSAVA Global Nutrition Committee (2011). Nutritional assessment guidelines.
//!   *Journal of Small Animal Practice*, 52(7), 385-396.

use crate::config::ActivityFactorsConfig;
use pawplan_core::constants::energy::{RER_COEFFICIENT, RER_EXPONENT};
use pawplan_core::errors::{AppError, AppResult};
use pawplan_core::models::{ActivityLevel, Dog, LifeStage, WeightGoal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Daily energy requirement for one dog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRequirement {
    /// Resting Energy Requirement (kcal/day)
    pub rer_kcal: f64,
    /// Activity factor applied to RER
    pub activity_factor: f64,
    /// Maintenance Energy Requirement (kcal/day)
    pub mer_kcal: f64,
}

/// Calculate Resting Energy Requirement
///
/// Formula: RER = 70 x `weight_kg`^0.75
///
/// # Errors
///
/// Returns `InvalidInput` if the weight is zero, negative, or not a number
pub fn compute_rer(weight_kg: f64) -> AppResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "Weight must be positive (got {weight_kg} kg)"
        )));
    }
    Ok(RER_COEFFICIENT * weight_kg.powf(RER_EXPONENT))
}

/// Calculate Maintenance Energy Requirement
///
/// Formula: MER = RER x activity factor
///
/// # Errors
///
/// Returns `InvalidInput` if either argument is non-positive or not a number
pub fn compute_mer(rer: f64, activity_factor: f64) -> AppResult<f64> {
    if !rer.is_finite() || rer <= 0.0 {
        return Err(AppError::invalid_input("RER must be positive"));
    }
    if !activity_factor.is_finite() || activity_factor <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "Activity factor must be positive (got {activity_factor})"
        )));
    }
    Ok(rer * activity_factor)
}

/// Select the MER activity factor for a dog
///
/// Policy, first match wins:
/// - Puppy: `puppy_factor` is required and must lie in the configured puppy band
/// - Weight-loss goal: `weight_loss`
/// - Weight-gain goal: `weight_gain`
/// - High activity: `active_adult`
/// - Otherwise `neutered_adult` or `intact_adult`
///
/// A puppy factor passed for an adult or senior dog is ignored.
///
/// # Errors
///
/// Returns `InvalidInput` if the dog is a puppy and `puppy_factor` is
/// missing or outside the puppy band
pub fn select_activity_factor(
    dog: &Dog,
    puppy_factor: Option<f64>,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if dog.life_stage == LifeStage::Puppy {
        let factor = puppy_factor.ok_or_else(|| {
            AppError::invalid_input(format!(
                "Puppy activity factor must be given explicitly ({}-{})",
                config.puppy_min, config.puppy_max
            ))
        })?;
        if !(config.puppy_min..=config.puppy_max).contains(&factor) {
            return Err(AppError::invalid_input(format!(
                "Puppy activity factor {factor} is outside {}-{}",
                config.puppy_min, config.puppy_max
            )));
        }
        return Ok(factor);
    }

    let factor = match (dog.weight_goal(), dog.activity_level) {
        (WeightGoal::Lose, _) => config.weight_loss,
        (WeightGoal::Gain, _) => config.weight_gain,
        (WeightGoal::Maintain, ActivityLevel::High) => config.active_adult,
        (WeightGoal::Maintain, ActivityLevel::Low | ActivityLevel::Moderate) => {
            if dog.neutered {
                config.neutered_adult
            } else {
                config.intact_adult
            }
        }
    };
    Ok(factor)
}

/// Suggest a puppy activity factor from age
///
/// Under four months: `puppy_young` (3.0); otherwise `puppy_older` (2.0).
/// Callers opt in to this explicitly; the selector never applies it.
#[must_use]
pub fn puppy_factor_for_age(age_years: f64, config: &ActivityFactorsConfig) -> f64 {
    if age_years < config.puppy_young_age_years {
        config.puppy_young
    } else {
        config.puppy_older
    }
}

/// Compute RER, the selected activity factor, and MER for a dog
///
/// # Errors
///
/// Returns `InvalidInput` for invalid dog attributes or a missing/out-of-band
/// puppy factor
pub fn compute_energy_requirement(
    dog: &Dog,
    puppy_factor: Option<f64>,
    config: &ActivityFactorsConfig,
) -> AppResult<EnergyRequirement> {
    dog.validate()?;
    let rer_kcal = compute_rer(dog.weight_kg)?;
    let activity_factor = select_activity_factor(dog, puppy_factor, config)?;
    let mer_kcal = compute_mer(rer_kcal, activity_factor)?;

    debug!(
        weight_kg = dog.weight_kg,
        rer_kcal, activity_factor, mer_kcal, "Computed energy requirement"
    );

    Ok(EnergyRequirement {
        rer_kcal,
        activity_factor,
        mer_kcal,
    })
}
