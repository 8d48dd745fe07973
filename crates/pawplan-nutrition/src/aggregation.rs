// ABOUTME: Sums weighted nutrient contributions across a set of ingredient gram amounts
// ABOUTME: Source-agnostic: grams may come from the portion allocator or from direct input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use pawplan_core::constants::density::REFERENCE_GRAMS;
use pawplan_core::errors::{AppError, AppResult};
use pawplan_core::models::{Ingredient, Nutrient};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// An ingredient paired with the mass of it eaten per day
#[derive(Debug, Clone, Copy)]
pub struct IngredientGrams<'a> {
    /// The ingredient
    pub ingredient: &'a Ingredient,
    /// Grams per day
    pub grams: f64,
}

impl<'a> IngredientGrams<'a> {
    /// Pair an ingredient with a gram amount
    #[must_use]
    pub const fn new(ingredient: &'a Ingredient, grams: f64) -> Self {
        Self { ingredient, grams }
    }
}

/// Aggregated energy and nutrient amounts
///
/// Amounts use each nutrient's native unit. Every tracked nutrient is
/// present, zero when nothing supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    /// Energy supplied by the aggregated ingredients
    pub kcal: f64,
    /// Nutrient amounts keyed by nutrient
    pub amounts: BTreeMap<Nutrient, f64>,
}

impl Default for NutrientTotals {
    fn default() -> Self {
        Self {
            kcal: 0.0,
            amounts: Nutrient::ALL.into_iter().map(|n| (n, 0.0)).collect(),
        }
    }
}

impl NutrientTotals {
    /// Amount of one nutrient
    #[must_use]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.amounts.get(&nutrient).copied().unwrap_or(0.0)
    }

    /// Every amount, including kcal, multiplied by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            kcal: self.kcal * factor,
            amounts: self
                .amounts
                .iter()
                .map(|(nutrient, amount)| (*nutrient, amount * factor))
                .collect(),
        }
    }

    /// Sum of two totals
    ///
    /// Lets a caller fold in kibble or treat profiles when those are known.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        let mut combined = self.clone();
        combined.kcal += other.kcal;
        for (nutrient, amount) in &other.amounts {
            *combined.amounts.entry(*nutrient).or_insert(0.0) += amount;
        }
        combined
    }
}

/// Aggregate nutrients over ingredient gram amounts
///
/// Formula: total(N) = sum of grams x N per 100 g / 100, in entry order
///
/// # Errors
///
/// - `InvalidInput`: a gram amount is negative or not a number
/// - `InvalidIngredient`: an ingredient has a negative or non-numeric density,
///   or no derivable energy per 100 g
pub fn aggregate(entries: &[IngredientGrams<'_>]) -> AppResult<NutrientTotals> {
    let mut totals = NutrientTotals::default();

    for entry in entries {
        let name = &entry.ingredient.name;
        if !entry.grams.is_finite() || entry.grams < 0.0 {
            return Err(AppError::invalid_input(format!(
                "{name}: grams must be zero or more (got {})",
                entry.grams
            )));
        }
        entry.ingredient.validate()?;
        let kcal_per_100g = entry.ingredient.kcal_per_100g().ok_or_else(|| {
            AppError::invalid_ingredient(
                name,
                format!("{name}: no mass equivalent, cannot aggregate by grams"),
            )
        })?;

        let scale = entry.grams / REFERENCE_GRAMS;
        totals.kcal = scale.mul_add(kcal_per_100g, totals.kcal);
        for (nutrient, density) in entry.ingredient.nutrients.iter() {
            let total = totals.amounts.entry(nutrient).or_insert(0.0);
            *total = scale.mul_add(density, *total);
        }
    }

    Ok(totals)
}

/// Compare aggregated energy with the energy the allocator handed out
///
/// Returns an advisory message when the relative drift exceeds `tolerance`.
#[must_use]
pub fn check_consistency(
    aggregated_kcal: f64,
    expected_kcal: f64,
    tolerance: f64,
) -> Option<String> {
    if expected_kcal <= 0.0 {
        return (aggregated_kcal > 0.0).then(|| {
            format!("Ingredient kcal ({aggregated_kcal:.2}) reported for an empty energy budget")
        });
    }
    let drift = (aggregated_kcal - expected_kcal).abs() / expected_kcal;
    if drift <= tolerance {
        return None;
    }
    warn!(
        aggregated_kcal,
        expected_kcal, drift, "Aggregated kcal drifted from allocation"
    );
    Some(format!(
        "Ingredient kcal ({aggregated_kcal:.2}) differs from allocated kcal ({expected_kcal:.2}) by {:.2}%",
        drift * 100.0
    ))
}
