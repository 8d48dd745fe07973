// ABOUTME: Dog attribute record consumed by the energy requirement calculator
// ABOUTME: Sex, neuter status, life stage, activity level, and weight goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use crate::errors::{AppError, AppResult};
use crate::units::{to_kg, WeightUnit};
use serde::{Deserialize, Serialize};

/// Biological sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male dog
    Male,
    /// Female dog
    Female,
}

/// Day-to-day activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Mostly indoors, short walks
    Low,
    /// Daily walks and play
    #[default]
    Moderate,
    /// Working, sporting, or very active dogs
    High,
}

/// Life stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    /// Growing dog (under a year for most breeds)
    Puppy,
    /// Adult maintenance
    #[default]
    Adult,
    /// Senior maintenance
    Senior,
}

/// Direction of a weight-management goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    /// Target weight below current weight
    Lose,
    /// No target, or target equals current weight
    Maintain,
    /// Target weight above current weight
    Gain,
}

/// A dog's attributes for one computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    /// Age in years
    pub age_years: f64,
    /// Biological sex
    pub sex: Sex,
    /// Neutered or spayed
    pub neutered: bool,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Goal weight in kilograms, if managing weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    /// Activity level
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Life stage
    #[serde(default)]
    pub life_stage: LifeStage,
}

impl Dog {
    /// Build a dog whose weights were entered in `unit`
    #[must_use]
    pub fn with_weight_unit(mut self, unit: WeightUnit) -> Self {
        self.weight_kg = to_kg(self.weight_kg, unit);
        self.target_weight_kg = self.target_weight_kg.map(|w| to_kg(w, unit));
        self
    }

    /// Weight goal implied by `target_weight_kg`
    #[must_use]
    pub fn weight_goal(&self) -> WeightGoal {
        match self.target_weight_kg {
            Some(target) if target < self.weight_kg => WeightGoal::Lose,
            Some(target) if target > self.weight_kg => WeightGoal::Gain,
            _ => WeightGoal::Maintain,
        }
    }

    /// Check scalar attributes are in range
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative age, non-positive weight, or a
    /// non-positive target weight
    pub fn validate(&self) -> AppResult<()> {
        if !self.age_years.is_finite() || self.age_years < 0.0 {
            return Err(AppError::invalid_input("Age must be zero or more years"));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(AppError::invalid_input("Weight must be positive"));
        }
        if let Some(target) = self.target_weight_kg {
            if !target.is_finite() || target <= 0.0 {
                return Err(AppError::invalid_input("Target weight must be positive"));
            }
        }
        Ok(())
    }
}
