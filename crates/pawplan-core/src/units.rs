// ABOUTME: Body-weight unit handling for dog records entered in kilograms or pounds
// ABOUTME: Converts at full precision; display rounding is left to presentation code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use crate::constants::units::{KG_PER_LB, LBS_PER_KG};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Unit a body weight is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    /// Kilograms (engine base unit)
    #[default]
    Kg,
    /// Pounds
    Lbs,
}

impl WeightUnit {
    /// Get the abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

impl Display for WeightUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.abbreviation())
    }
}

/// Convert a weight between units
#[must_use]
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lbs) => value * LBS_PER_KG,
        (WeightUnit::Lbs, WeightUnit::Kg) => value * KG_PER_LB,
        (WeightUnit::Kg, WeightUnit::Kg) | (WeightUnit::Lbs, WeightUnit::Lbs) => value,
    }
}

/// Convert a weight in `unit` to kilograms
#[must_use]
pub fn to_kg(value: f64, unit: WeightUnit) -> f64 {
    convert_weight(value, unit, WeightUnit::Kg)
}

/// Format a weight with its unit suffix
#[must_use]
pub fn format_weight(value: f64, unit: WeightUnit) -> String {
    format!("{value:.1} {unit}")
}
