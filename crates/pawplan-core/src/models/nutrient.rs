// ABOUTME: Tracked nutrient keys and per-100g nutrient density records
// ABOUTME: Maps AAFCO requirement keys to the ten nutrients the engine aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// A nutrient the engine tracks through aggregation and AAFCO evaluation
///
/// Ordering follows the declaration order, so maps keyed by `Nutrient`
/// iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Crude protein (g)
    Protein,
    /// Crude fat (g)
    Fat,
    /// Carbohydrate (g)
    Carbs,
    /// Calcium (mg)
    Calcium,
    /// Phosphorus (mg)
    Phosphorus,
    /// Iron (mg)
    Iron,
    /// Zinc (mg)
    Zinc,
    /// Vitamin A (mcg RAE)
    VitaminA,
    /// Vitamin D (mcg)
    VitaminD,
    /// Vitamin E (mg)
    VitaminE,
}

impl Nutrient {
    /// All tracked nutrients in canonical order
    pub const ALL: [Self; 10] = [
        Self::Protein,
        Self::Fat,
        Self::Carbs,
        Self::Calcium,
        Self::Phosphorus,
        Self::Iron,
        Self::Zinc,
        Self::VitaminA,
        Self::VitaminD,
        Self::VitaminE,
    ];

    /// Requirement key as stored in AAFCO tables
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Fat => "fat",
            Self::Carbs => "carbs",
            Self::Calcium => "calcium",
            Self::Phosphorus => "phosphorus",
            Self::Iron => "iron",
            Self::Zinc => "zinc",
            Self::VitaminA => "vitamin_a",
            Self::VitaminD => "vitamin_d",
            Self::VitaminE => "vitamin_e",
        }
    }

    /// Unit amounts of this nutrient are expressed in
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Protein | Self::Fat | Self::Carbs => "g",
            Self::Calcium | Self::Phosphorus | Self::Iron | Self::Zinc | Self::VitaminE => "mg",
            Self::VitaminA | Self::VitaminD => "mcg",
        }
    }
}

impl Display for Nutrient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

/// Error returned when a requirement key names no tracked nutrient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNutrient(pub String);

impl Display for UnknownNutrient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Unknown nutrient key: {}", self.0)
    }
}

impl Error for UnknownNutrient {}

impl FromStr for Nutrient {
    type Err = UnknownNutrient;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|nutrient| nutrient.key() == normalized)
            .ok_or_else(|| UnknownNutrient(s.to_owned()))
    }
}

/// Nutrient densities per 100 g of an ingredient
///
/// Every field defaults to 0 when absent from input data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientProfile {
    /// Protein (g/100g)
    pub protein_g: f64,
    /// Fat (g/100g)
    pub fat_g: f64,
    /// Carbohydrate (g/100g)
    pub carbs_g: f64,
    /// Calcium (mg/100g)
    pub calcium_mg: f64,
    /// Phosphorus (mg/100g)
    pub phosphorus_mg: f64,
    /// Iron (mg/100g)
    pub iron_mg: f64,
    /// Zinc (mg/100g)
    pub zinc_mg: f64,
    /// Vitamin A (mcg/100g)
    pub vitamin_a_mcg: f64,
    /// Vitamin D (mcg/100g)
    pub vitamin_d_mcg: f64,
    /// Vitamin E (mg/100g)
    pub vitamin_e_mg: f64,
}

impl NutrientProfile {
    /// Density of one nutrient
    #[must_use]
    pub const fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein_g,
            Nutrient::Fat => self.fat_g,
            Nutrient::Carbs => self.carbs_g,
            Nutrient::Calcium => self.calcium_mg,
            Nutrient::Phosphorus => self.phosphorus_mg,
            Nutrient::Iron => self.iron_mg,
            Nutrient::Zinc => self.zinc_mg,
            Nutrient::VitaminA => self.vitamin_a_mcg,
            Nutrient::VitaminD => self.vitamin_d_mcg,
            Nutrient::VitaminE => self.vitamin_e_mg,
        }
    }

    /// Iterate `(nutrient, density)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.into_iter().map(|n| (n, self.get(n)))
    }

    /// First nutrient with a negative or non-finite density, if any
    #[must_use]
    pub fn first_invalid(&self) -> Option<Nutrient> {
        self.iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
            .map(|(nutrient, _)| nutrient)
    }
}
