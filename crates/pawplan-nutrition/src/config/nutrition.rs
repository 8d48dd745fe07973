// ABOUTME: Reference tables for energy factors, mineral balance, safety limits, and grading
// ABOUTME: Canonical veterinary defaults live in Default impls; callers pass the tables in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Nutrition Reference Configuration
//!
//! # References
//!
//! - RER/MER factors: National Research Council (2006), *Nutrient Requirements
//!   of Dogs and Cats*, ch. 3.
//! - Nutrient minimums/maximums: AAFCO Dog Food Nutrient Profiles (2023),
//!   adult maintenance, per 1000 kcal ME.

use super::error::ConfigError;
use pawplan_core::constants::tolerances::KCAL_CONSISTENCY;
use pawplan_core::constants::units::{KG_PER_LB, ML_PER_TSP};
use pawplan_core::models::{adult_maintenance_profile, AafcoRequirement};
use serde::{Deserialize, Serialize};

/// Complete reference configuration for one engine invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    /// MER activity factor policy table
    pub activity_factors: ActivityFactorsConfig,
    /// AAFCO requirement rows, evaluated in this order
    pub aafco_requirements: Vec<AafcoRequirement>,
    /// Calcium:phosphorus ratio bands
    pub mineral_balance: MineralBalanceConfig,
    /// Per-ingredient safety rules
    pub safety_limits: SafetyLimitsConfig,
    /// Nutrient grading thresholds
    pub grading: GradingConfig,
    /// Relative drift allowed between aggregated and allocated kcal
    pub kcal_consistency_tolerance: f64,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            activity_factors: ActivityFactorsConfig::default(),
            aafco_requirements: adult_maintenance_profile(),
            mineral_balance: MineralBalanceConfig::default(),
            safety_limits: SafetyLimitsConfig::default(),
            grading: GradingConfig::default(),
            kcal_consistency_tolerance: KCAL_CONSISTENCY,
        }
    }
}

/// MER activity factors keyed by neuter status, life stage, activity, and weight goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Neutered adult or senior: 1.6
    pub neutered_adult: f64,
    /// Intact adult or senior: 1.8
    pub intact_adult: f64,
    /// Highly active adult or senior: 2.0
    pub active_adult: f64,
    /// Weight-loss goal: 1.1
    pub weight_loss: f64,
    /// Weight-gain goal: 1.8
    pub weight_gain: f64,
    /// Lowest accepted puppy factor: 2.0
    pub puppy_min: f64,
    /// Highest accepted puppy factor: 3.0
    pub puppy_max: f64,
    /// Suggested factor for puppies under `puppy_young_age_years`: 3.0
    pub puppy_young: f64,
    /// Suggested factor for older puppies: 2.0
    pub puppy_older: f64,
    /// Age boundary between young and older puppies (4 months)
    pub puppy_young_age_years: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            neutered_adult: 1.6,
            intact_adult: 1.8,
            active_adult: 2.0,
            weight_loss: 1.1,
            weight_gain: 1.8,
            puppy_min: 2.0,
            puppy_max: 3.0,
            puppy_young: 3.0,
            puppy_older: 2.0,
            puppy_young_age_years: 4.0 / 12.0,
        }
    }
}

impl ActivityFactorsConfig {
    /// Validate factors are positive and the puppy band is ordered
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a non-positive factor and
    /// `ConfigError::InvalidRange` for an inverted puppy band
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            self.neutered_adult,
            self.intact_adult,
            self.active_adult,
            self.weight_loss,
            self.weight_gain,
            self.puppy_min,
            self.puppy_max,
            self.puppy_young,
            self.puppy_older,
        ];
        if factors.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be positive",
            ));
        }
        if self.puppy_min > self.puppy_max {
            return Err(ConfigError::InvalidRange(
                "puppy_min must not exceed puppy_max",
            ));
        }
        let suggested = self.puppy_min..=self.puppy_max;
        if !suggested.contains(&self.puppy_young) || !suggested.contains(&self.puppy_older) {
            return Err(ConfigError::InvalidRange(
                "suggested puppy factors must lie within the puppy band",
            ));
        }
        if self.puppy_young_age_years <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "puppy_young_age_years must be positive",
            ));
        }
        Ok(())
    }
}

/// Calcium:phosphorus ratio bands and calcium supplementation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineralBalanceConfig {
    /// Lower bound of the optimal band: 1.2
    pub optimal_min: f64,
    /// Upper bound of the optimal band: 1.4
    pub optimal_max: f64,
    /// Lower bound of the acceptable band: 1.0
    pub acceptable_min: f64,
    /// Upper bound of the acceptable band: 2.0
    pub acceptable_max: f64,
    /// Calcium supplied by one gram of eggshell powder (mg)
    pub eggshell_calcium_mg_per_g: f64,
}

impl Default for MineralBalanceConfig {
    fn default() -> Self {
        Self {
            optimal_min: 1.2,
            optimal_max: 1.4,
            acceptable_min: 1.0,
            acceptable_max: 2.0,
            eggshell_calcium_mg_per_g: 380.0,
        }
    }
}

impl MineralBalanceConfig {
    /// Validate band ordering
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` unless
    /// `acceptable_min <= optimal_min <= optimal_max <= acceptable_max`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.acceptable_min <= self.optimal_min
            && self.optimal_min <= self.optimal_max
            && self.optimal_max <= self.acceptable_max;
        if !ordered || self.acceptable_min <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "Ca:P bands must be positive and nested",
            ));
        }
        if self.eggshell_calcium_mg_per_g <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "eggshell_calcium_mg_per_g must be positive",
            ));
        }
        Ok(())
    }
}

/// Safety rule matched against ingredient names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyRule {
    /// Case-insensitive substring of the ingredient name
    pub name_contains: String,
    /// Largest share of homemade energy (0.0-1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_energy_share: Option<f64>,
    /// Largest daily mass in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_grams_per_day: Option<f64>,
    /// Largest daily volume in ml per kg of body weight, for volume-measured ingredients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ml_per_kg_per_day: Option<f64>,
}

/// Per-ingredient safety rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyLimitsConfig {
    /// Rules, checked in order
    pub rules: Vec<SafetyRule>,
}

impl Default for SafetyLimitsConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                // Organ meat: vitamin A and copper load
                SafetyRule {
                    name_contains: "liver".to_owned(),
                    max_energy_share: Some(0.05),
                    max_grams_per_day: None,
                    max_ml_per_kg_per_day: None,
                },
                SafetyRule {
                    name_contains: "turmeric".to_owned(),
                    max_energy_share: None,
                    max_grams_per_day: Some(2.0),
                    max_ml_per_kg_per_day: None,
                },
                // 1 tsp per 30 lb of body weight
                SafetyRule {
                    name_contains: "coconut".to_owned(),
                    max_energy_share: None,
                    max_grams_per_day: None,
                    max_ml_per_kg_per_day: Some(ML_PER_TSP / (30.0 * KG_PER_LB)),
                },
            ],
        }
    }
}

/// Thresholds for grading nutrients beyond pass/fail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Below this fraction of the minimum a nutrient is graded bad: 0.5
    pub severe_deficiency_fraction: f64,
    /// Above this fraction of the maximum a nutrient is graded caution: 0.8
    pub approaching_max_fraction: f64,
    /// Up to this fraction of the minimum a nutrient is graded excellent: 1.5
    pub excellent_upper_fraction: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            severe_deficiency_fraction: 0.5,
            approaching_max_fraction: 0.8,
            excellent_upper_fraction: 1.5,
        }
    }
}

impl NutritionConfig {
    /// Validate every table
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.activity_factors.validate()?;
        self.mineral_balance.validate()?;

        for requirement in &self.aafco_requirements {
            let min = requirement.min_per_1000kcal;
            if !min.is_finite() || min < 0.0 {
                return Err(ConfigError::InvalidRequirement(format!(
                    "{}: minimum must be a non-negative number",
                    requirement.nutrient
                )));
            }
            if let Some(max) = requirement.max_per_1000kcal {
                if !max.is_finite() || max < min {
                    return Err(ConfigError::InvalidRequirement(format!(
                        "{}: maximum {max} is below minimum {min}",
                        requirement.nutrient
                    )));
                }
            }
        }

        for rule in &self.safety_limits.rules {
            if rule.name_contains.trim().is_empty() {
                return Err(ConfigError::ValueOutOfRange(
                    "safety rule name_contains must not be empty",
                ));
            }
            let limits = [
                rule.max_energy_share,
                rule.max_grams_per_day,
                rule.max_ml_per_kg_per_day,
            ];
            if limits
                .into_iter()
                .flatten()
                .any(|limit| !limit.is_finite() || limit <= 0.0)
            {
                return Err(ConfigError::ValueOutOfRange(
                    "safety rule limits must be positive",
                ));
            }
        }

        if !(0.0..1.0).contains(&self.kcal_consistency_tolerance) {
            return Err(ConfigError::ValueOutOfRange(
                "kcal_consistency_tolerance must be between 0.0 and 1.0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(NutritionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_puppy_band_rejected() {
        let mut config = NutritionConfig::default();
        config.activity_factors.puppy_min = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_coconut_rule_is_one_teaspoon_per_thirty_pounds() {
        let config = SafetyLimitsConfig::default();
        let coconut = config
            .rules
            .iter()
            .find(|rule| rule.name_contains == "coconut")
            .and_then(|rule| rule.max_ml_per_kg_per_day)
            .unwrap();
        assert!((coconut * 30.0 * KG_PER_LB - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_safety_limit_rejected() {
        let mut config = NutritionConfig::default();
        config.safety_limits.rules[0].max_energy_share = Some(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_requirement_max_below_min_rejected() {
        let mut config = NutritionConfig::default();
        config
            .aafco_requirements
            .push(AafcoRequirement::new("zinc", 20.0, Some(10.0)));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRequirement(_))
        ));
    }
}
