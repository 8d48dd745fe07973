// ABOUTME: Recipe composition as ordered ingredient energy shares
// ABOUTME: Resolves percent-of-energy, percent-of-mass, and gram-weight recipes into proportions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use super::ingredient::Ingredient;
use crate::constants::density::REFERENCE_GRAMS;
use crate::constants::tolerances::PROPORTION_SUM;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// One ingredient and its share of the homemade energy budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeItem {
    /// The ingredient
    pub ingredient: Ingredient,
    /// Fraction of homemade kcal supplied by this ingredient (0.0-1.0)
    pub proportion: f64,
}

/// An ordered recipe; item order is preserved through every engine stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name
    pub name: String,
    /// Meals the daily ration is split into
    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: u32,
    /// Ingredients with energy shares
    pub items: Vec<RecipeItem>,
}

const fn default_meals_per_day() -> u32 {
    2
}

impl Recipe {
    /// Create a recipe from already-resolved energy proportions
    pub fn new(name: impl Into<String>, meals_per_day: u32, items: Vec<RecipeItem>) -> Self {
        Self {
            name: name.into(),
            meals_per_day,
            items,
        }
    }

    /// Create a recipe from percent-of-energy shares (`pct / 100`)
    pub fn from_energy_percentages(
        name: impl Into<String>,
        meals_per_day: u32,
        entries: Vec<(Ingredient, f64)>,
    ) -> Self {
        let items = entries
            .into_iter()
            .map(|(ingredient, percent)| RecipeItem {
                ingredient,
                proportion: percent / 100.0,
            })
            .collect();
        Self::new(name, meals_per_day, items)
    }

    /// Create a recipe from percent-of-mass shares
    ///
    /// Each ingredient's energy share is its mass share weighted by its
    /// energy density, normalised across the recipe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecipe` if a share is negative, or if the recipe has no
    /// energy; returns `InvalidIngredient` if an ingredient has no mass density
    pub fn from_mass_percentages(
        name: impl Into<String>,
        meals_per_day: u32,
        entries: Vec<(Ingredient, f64)>,
    ) -> AppResult<Self> {
        Self::from_mass_weights(name.into(), meals_per_day, entries, "mass percentage")
    }

    /// Create a recipe from absolute gram weights
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_mass_percentages`]
    pub fn from_gram_weights(
        name: impl Into<String>,
        meals_per_day: u32,
        entries: Vec<(Ingredient, f64)>,
    ) -> AppResult<Self> {
        Self::from_mass_weights(name.into(), meals_per_day, entries, "gram weight")
    }

    fn from_mass_weights(
        name: String,
        meals_per_day: u32,
        entries: Vec<(Ingredient, f64)>,
        label: &str,
    ) -> AppResult<Self> {
        let mut energies = Vec::with_capacity(entries.len());
        for (ingredient, weight) in &entries {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(AppError::invalid_recipe(format!(
                    "{}: {label} must be a non-negative number",
                    ingredient.name
                )));
            }
            let kcal_per_100g = ingredient.kcal_per_100g().ok_or_else(|| {
                AppError::invalid_ingredient(
                    &ingredient.name,
                    format!(
                        "{}: no mass equivalent, cannot derive an energy share from {label}",
                        ingredient.name
                    ),
                )
            })?;
            energies.push(weight * kcal_per_100g / REFERENCE_GRAMS);
        }

        let total: f64 = energies.iter().sum();
        if total <= 0.0 {
            return Err(AppError::invalid_recipe(format!(
                "Recipe supplies no energy from its {label}s"
            ))
            .with_details(json!({ "recipe": name })));
        }
        debug!(recipe = %name, total_kcal = total, "Resolved mass-based recipe into energy shares");

        let items = entries
            .into_iter()
            .zip(energies)
            .map(|((ingredient, _), kcal)| RecipeItem {
                ingredient,
                proportion: kcal / total,
            })
            .collect();
        Ok(Self::new(name, meals_per_day, items))
    }

    /// Sum of proportions
    #[must_use]
    pub fn proportion_sum(&self) -> f64 {
        self.items.iter().map(|item| item.proportion).sum()
    }

    /// Check the recipe is allocatable
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecipe` if the recipe is empty, a proportion is negative
    /// or not a number, or proportions do not sum to 1.0 within tolerance;
    /// returns `InvalidIngredient` for malformed ingredient densities
    pub fn validate(&self) -> AppResult<()> {
        if self.items.is_empty() {
            return Err(AppError::invalid_recipe(format!(
                "Recipe '{}' has no ingredients",
                self.name
            )));
        }
        for item in &self.items {
            if !item.proportion.is_finite() || item.proportion < 0.0 {
                return Err(AppError::invalid_recipe(format!(
                    "{}: proportion must be a non-negative number (got {})",
                    item.ingredient.name, item.proportion
                ))
                .with_details(json!({
                    "ingredient": item.ingredient.name,
                    "proportion": item.proportion,
                })));
            }
            item.ingredient.validate()?;
        }
        let sum = self.proportion_sum();
        if (sum - 1.0).abs() > PROPORTION_SUM {
            return Err(AppError::invalid_recipe(format!(
                "Recipe proportions must sum to 1.0 (currently {sum})"
            ))
            .with_details(json!({ "proportion_sum": sum })));
        }
        Ok(())
    }
}
