// ABOUTME: Ingredient records with a single active energy-density basis
// ABOUTME: Mass, volume, and discrete-unit bases each carry their own conversion factor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use super::nutrient::NutrientProfile;
use crate::constants::density::REFERENCE_GRAMS;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Kind of quantity a portion is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// Weight in grams
    Grams,
    /// Volume in milliliters
    Milliliters,
    /// Count of discrete items (capsules, chews)
    Units,
}

impl QuantityKind {
    /// Get the abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Milliliters => "ml",
            Self::Units => "pc",
        }
    }
}

/// How an ingredient's energy density is stated
///
/// Exactly one basis is active per ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum DensityBasis {
    /// Solid food measured by weight
    Mass {
        /// Energy per 100 g
        kcal_per_100g: f64,
    },
    /// Liquid or oil measured by volume
    Volume {
        /// Energy per milliliter
        kcal_per_ml: f64,
        /// Optional mass density, enables nutrient aggregation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        grams_per_ml: Option<f64>,
    },
    /// Discrete item measured by count
    Unit {
        /// Energy per item
        kcal_per_unit: f64,
        /// Optional item mass, enables nutrient aggregation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        grams_per_unit: Option<f64>,
    },
}

impl DensityBasis {
    /// Quantity kind portions of this basis are returned in
    #[must_use]
    pub const fn quantity_kind(&self) -> QuantityKind {
        match self {
            Self::Mass { .. } => QuantityKind::Grams,
            Self::Volume { .. } => QuantityKind::Milliliters,
            Self::Unit { .. } => QuantityKind::Units,
        }
    }

    /// Energy per one unit of [`Self::quantity_kind`] (per gram, per ml, per item)
    #[must_use]
    pub fn kcal_per_quantity(&self) -> f64 {
        match *self {
            Self::Mass { kcal_per_100g } => kcal_per_100g / REFERENCE_GRAMS,
            Self::Volume { kcal_per_ml, .. } => kcal_per_ml,
            Self::Unit { kcal_per_unit, .. } => kcal_per_unit,
        }
    }

    /// Grams per one unit of [`Self::quantity_kind`], when known
    #[must_use]
    pub const fn grams_per_quantity(&self) -> Option<f64> {
        match *self {
            Self::Mass { .. } => Some(1.0),
            Self::Volume { grams_per_ml, .. } => grams_per_ml,
            Self::Unit { grams_per_unit, .. } => grams_per_unit,
        }
    }
}

/// An ingredient as the engine sees it, already normalised by the import layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Display name
    pub name: String,
    /// Active energy-density basis
    pub density: DensityBasis,
    /// Nutrient densities per 100 g
    #[serde(default)]
    pub nutrients: NutrientProfile,
}

impl Ingredient {
    /// Create a mass-based ingredient
    pub fn mass(name: impl Into<String>, kcal_per_100g: f64, nutrients: NutrientProfile) -> Self {
        Self {
            name: name.into(),
            density: DensityBasis::Mass { kcal_per_100g },
            nutrients,
        }
    }

    /// Create a volume-based ingredient
    pub fn volume(
        name: impl Into<String>,
        kcal_per_ml: f64,
        grams_per_ml: Option<f64>,
        nutrients: NutrientProfile,
    ) -> Self {
        Self {
            name: name.into(),
            density: DensityBasis::Volume {
                kcal_per_ml,
                grams_per_ml,
            },
            nutrients,
        }
    }

    /// Create a unit-based ingredient
    pub fn unit(
        name: impl Into<String>,
        kcal_per_unit: f64,
        grams_per_unit: Option<f64>,
        nutrients: NutrientProfile,
    ) -> Self {
        Self {
            name: name.into(),
            density: DensityBasis::Unit {
                kcal_per_unit,
                grams_per_unit,
            },
            nutrients,
        }
    }

    /// Energy per 100 g, when a mass equivalent is derivable
    #[must_use]
    pub fn kcal_per_100g(&self) -> Option<f64> {
        match self.density {
            DensityBasis::Mass { kcal_per_100g } => Some(kcal_per_100g),
            DensityBasis::Volume { .. } | DensityBasis::Unit { .. } => {
                let grams = self.density.grams_per_quantity()?;
                (grams > 0.0).then(|| self.density.kcal_per_quantity() / grams * REFERENCE_GRAMS)
            }
        }
    }

    /// Check densities are finite and non-negative
    ///
    /// # Errors
    ///
    /// Returns `InvalidIngredient` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        let energy = self.density.kcal_per_quantity();
        if !energy.is_finite() || energy < 0.0 {
            return Err(AppError::invalid_ingredient(
                &self.name,
                format!("{}: energy density must be a non-negative number", self.name),
            ));
        }
        if let Some(grams) = self.density.grams_per_quantity() {
            if !grams.is_finite() || grams < 0.0 {
                return Err(AppError::invalid_ingredient(
                    &self.name,
                    format!("{}: mass factor must be a non-negative number", self.name),
                ));
            }
        }
        if let Some(nutrient) = self.nutrients.first_invalid() {
            return Err(AppError::invalid_ingredient(
                &self.name,
                format!(
                    "{}: {} density must be a non-negative number",
                    self.name, nutrient
                ),
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
    fn test_density_basis_json_shape() {
        let ingredient: Ingredient = serde_json::from_str(
            r#"{"name": "Fish oil", "density": {"basis": "volume", "kcal_per_ml": 8.3, "grams_per_ml": 0.92}}"#,
        )
        .unwrap();
        assert_eq!(ingredient.density.quantity_kind(), QuantityKind::Milliliters);
        let per_100g = ingredient.kcal_per_100g().unwrap();
        assert!((per_100g - 8.3 / 0.92 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_without_mass_has_no_gram_density() {
        let capsule = Ingredient::unit("Vitamin E capsule", 9.0, None, NutrientProfile::default());
        assert_eq!(capsule.kcal_per_100g(), None);
    }

    #[test]
    fn test_validate_rejects_negative_nutrient() {
        let bad = Ingredient::mass(
            "Broken row",
            100.0,
            NutrientProfile {
                zinc_mg: -1.0,
                ..NutrientProfile::default()
            },
        );
        assert!(bad.validate().is_err());
    }
}
