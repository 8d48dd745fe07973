// ABOUTME: AAFCO nutrient requirement rows expressed per 1000 kcal
// ABOUTME: Minimums with optional maximums, keyed by nutrient name as stored upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use super::nutrient::Nutrient;
use serde::{Deserialize, Serialize};

/// One AAFCO requirement row
///
/// Amounts use the nutrient's native unit (see [`Nutrient::unit`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AafcoRequirement {
    /// Nutrient key, e.g. `"calcium"`
    pub nutrient: String,
    /// Minimum per 1000 kcal
    pub min_per_1000kcal: f64,
    /// Maximum per 1000 kcal; absent means unbounded above
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_1000kcal: Option<f64>,
}

impl AafcoRequirement {
    /// Create a requirement row
    pub fn new(nutrient: impl Into<String>, min: f64, max: Option<f64>) -> Self {
        Self {
            nutrient: nutrient.into(),
            min_per_1000kcal: min,
            max_per_1000kcal: max,
        }
    }

    /// Tracked nutrient this row refers to, if any
    #[must_use]
    pub fn tracked_nutrient(&self) -> Option<Nutrient> {
        self.nutrient.parse().ok()
    }
}

/// AAFCO adult maintenance profile (2023), per 1000 kcal ME
#[must_use]
pub fn adult_maintenance_profile() -> Vec<AafcoRequirement> {
    vec![
        AafcoRequirement::new(Nutrient::Protein.key(), 45.0, None),
        AafcoRequirement::new(Nutrient::Fat.key(), 13.75, None),
        AafcoRequirement::new(Nutrient::Calcium.key(), 1250.0, Some(6250.0)),
        AafcoRequirement::new(Nutrient::Phosphorus.key(), 1000.0, Some(4000.0)),
        AafcoRequirement::new(Nutrient::Iron.key(), 10.0, None),
        AafcoRequirement::new(Nutrient::Zinc.key(), 20.0, None),
        AafcoRequirement::new(Nutrient::VitaminA.key(), 1250.0, Some(62500.0)),
        AafcoRequirement::new(Nutrient::VitaminD.key(), 3.125, Some(18.75)),
        AafcoRequirement::new(Nutrient::VitaminE.key(), 12.5, None),
    ]
}
