// ABOUTME: What-if comparison of a recipe before and after changing ingredient shares
// ABOUTME: Both versions are allocated at the same reference energy, then graded against AAFCO
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use crate::aafco::{self, AafcoEvaluation, NutrientGrading};
use crate::aggregation::NutrientTotals;
use crate::config::NutritionConfig;
use crate::feeding_plan::aggregate_portions;
use crate::portions;
use pawplan_core::errors::{AppError, AppResult};
use pawplan_core::models::{Nutrient, Recipe};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

/// New energy share for one recipe ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionAdjustment {
    /// Ingredient name as it appears in the recipe
    pub ingredient_name: String,
    /// Replacement share of homemade energy
    pub proportion: f64,
}

/// Before/after comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSimulation {
    /// Energy both versions were allocated
    pub reference_kcal: f64,
    /// Totals for the recipe as stored
    pub before: NutrientTotals,
    /// Totals for the adjusted recipe
    pub after: NutrientTotals,
    /// `after - before` per nutrient
    pub deltas: BTreeMap<Nutrient, f64>,
    /// The adjusted recipe
    pub adjusted_recipe: Recipe,
    /// AAFCO evaluation of the adjusted recipe
    pub evaluation: AafcoEvaluation,
    /// Grades of the adjusted recipe
    pub grading: NutrientGrading,
}

fn apply_adjustments(recipe: &Recipe, adjustments: &[ProportionAdjustment]) -> AppResult<Recipe> {
    let mut adjusted = recipe.clone();
    for adjustment in adjustments {
        let item = adjusted
            .items
            .iter_mut()
            .find(|item| item.ingredient.name == adjustment.ingredient_name)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Recipe '{}' has no ingredient named '{}'",
                    recipe.name, adjustment.ingredient_name
                ))
                .with_details(json!({ "ingredient": adjustment.ingredient_name }))
            })?;
        item.proportion = adjustment.proportion;
    }
    Ok(adjusted)
}

fn totals_at(recipe: &Recipe, reference_kcal: f64) -> AppResult<NutrientTotals> {
    let allocation = portions::allocate(reference_kcal, 0.0, 0.0, recipe)?;
    let (totals, _, _) = aggregate_portions(recipe, &allocation.portions)?;
    Ok(totals)
}

/// Compare a recipe with a proportion-adjusted copy of itself
///
/// # Errors
///
/// - `InvalidInput`: an adjustment names an ingredient the recipe lacks, or
///   `reference_kcal` is not a positive number
/// - `InvalidRecipe`: either version fails proportion validation
/// - `DivisionByZero`: the adjusted recipe supplies no measurable energy
pub fn simulate_adjustment(
    recipe: &Recipe,
    adjustments: &[ProportionAdjustment],
    reference_kcal: f64,
    config: &NutritionConfig,
) -> AppResult<AdjustmentSimulation> {
    if !reference_kcal.is_finite() || reference_kcal <= 0.0 {
        return Err(AppError::invalid_input(
            "Reference kcal must be a positive number",
        ));
    }
    let adjusted_recipe = apply_adjustments(recipe, adjustments)?;

    let before = totals_at(recipe, reference_kcal)?;
    let after = totals_at(&adjusted_recipe, reference_kcal)?;
    let deltas = Nutrient::ALL
        .into_iter()
        .map(|nutrient| (nutrient, after.get(nutrient) - before.get(nutrient)))
        .collect();

    let evaluation = aafco::evaluate(&after, after.kcal, &config.aafco_requirements)?;
    let grading = aafco::grade(&evaluation, &config.grading);
    debug!(
        recipe = %recipe.name,
        adjustments = adjustments.len(),
        overall = ?grading.overall,
        "Simulated recipe adjustment"
    );

    Ok(AdjustmentSimulation {
        reference_kcal,
        before,
        after,
        deltas,
        adjusted_recipe,
        evaluation,
        grading,
    })
}
