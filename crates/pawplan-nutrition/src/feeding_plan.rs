// ABOUTME: Feeding-plan orchestration from dog and recipe to portions, nutrients, and checks
// ABOUTME: Fatal errors abort with no plan; advisory findings are collected into warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Feeding Plan
//!
//! Stages run in order: energy requirement, portion allocation, nutrient
//! aggregation, kcal consistency, AAFCO evaluation and grading, Ca:P balance,
//! ingredient safety limits, and an optional multi-day batch summary.
//!
//! Nutrient totals cover the homemade recipe only. Kibble and treats count
//! towards the energy budget but their nutrient content is not known here;
//! [`NutrientTotals::combine`] is the hook for callers that do know it.

use crate::aafco::{self, AafcoCheck, AafcoEvaluation, NutrientGrading};
use crate::aggregation::{self, IngredientGrams, NutrientTotals};
use crate::config::NutritionConfig;
use crate::energy::{self, EnergyRequirement};
use crate::mineral_balance::{self, MineralBalance};
use crate::portions::{self, Portion};
use crate::safety;
use pawplan_core::errors::{AppError, AppResult};
use pawplan_core::models::{Dog, Nutrient, QuantityKind, Recipe};
use pawplan_core::units::WeightUnit;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Everything needed to compute one feeding plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedingPlanRequest {
    /// The dog
    pub dog: Dog,
    /// Unit the dog's weights were entered in
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Homemade recipe
    pub recipe: Recipe,
    /// Daily energy from kibble
    #[serde(default)]
    pub kibble_kcal: f64,
    /// Daily energy from treats
    #[serde(default)]
    pub treats_kcal: f64,
    /// Activity factor for puppies, required for the puppy life stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppy_factor: Option<f64>,
    /// Daily target set by a veterinarian, replaces the computed MER
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_kcal_override: Option<f64>,
    /// Days to batch-cook for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_days: Option<u32>,
}

/// Per-ingredient totals for a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchIngredient {
    /// Ingredient display name
    pub ingredient_name: String,
    /// Unit of `total_amount`
    pub quantity_kind: QuantityKind,
    /// Quantity for the whole batch
    pub total_amount: f64,
    /// Mass for the whole batch, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_grams: Option<f64>,
}

/// Multi-day batch cooking summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Days covered
    pub num_days: u32,
    /// Meals (containers) in the batch
    pub total_meals: u32,
    /// Homemade energy for the whole batch
    pub total_kcal: f64,
    /// Mass of all ingredients with a mass equivalent
    pub total_grams: f64,
    /// Mass per meal container
    pub grams_per_container: f64,
    /// Per-ingredient totals in recipe order
    pub ingredients: Vec<BatchIngredient>,
}

/// Computed feeding plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingPlan {
    /// Daily energy target
    pub target_kcal: f64,
    /// Daily energy from kibble
    pub kibble_kcal: f64,
    /// Daily energy from treats
    pub treats_kcal: f64,
    /// Daily energy from the recipe
    pub homemade_kcal: f64,
    /// Recipe energy per meal
    pub per_meal_kcal: f64,
    /// Meals per day
    pub meals_per_day: u32,
    /// RER, factor, and MER; absent when the target was overridden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyRequirement>,
    /// Portions in recipe order
    pub ingredient_portions: Vec<Portion>,
    /// Nutrients supplied by the recipe
    pub nutrient_totals: NutrientTotals,
    /// AAFCO checks in requirement order
    pub aafco_checks: Vec<AafcoCheck>,
    /// Nutrient grades; absent when AAFCO evaluation was impossible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading: Option<NutrientGrading>,
    /// Calcium:phosphorus analysis
    pub mineral_balance: MineralBalance,
    /// Advisory findings
    pub warnings: Vec<String>,
    /// Suggested corrections
    pub recommendations: Vec<String>,
    /// Batch summary when `num_days` was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchSummary>,
}

fn resolve_target(
    request: &FeedingPlanRequest,
    dog: &Dog,
    config: &NutritionConfig,
) -> AppResult<(f64, Option<EnergyRequirement>)> {
    if let Some(target) = request.target_kcal_override {
        if !target.is_finite() || target <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "Target kcal override must be positive (got {target})"
            )));
        }
        dog.validate()?;
        debug!(target_kcal = target, "Using overridden daily target");
        return Ok((target, None));
    }
    let energy =
        energy::compute_energy_requirement(dog, request.puppy_factor, &config.activity_factors)?;
    Ok((energy.mer_kcal, Some(energy)))
}

/// Aggregate the portions that have a mass equivalent
///
/// Returns the totals, the kcal the included portions were allocated, and an
/// advisory per excluded portion.
pub(crate) fn aggregate_portions(
    recipe: &Recipe,
    portions: &[Portion],
) -> AppResult<(NutrientTotals, f64, Vec<String>)> {
    let mut entries = Vec::with_capacity(portions.len());
    let mut expected_kcal = 0.0;
    let mut excluded = Vec::new();

    for (item, portion) in recipe.items.iter().zip(portions) {
        match portion.grams_per_day {
            Some(grams) if item.ingredient.kcal_per_100g().is_some() => {
                entries.push(IngredientGrams::new(&item.ingredient, grams));
                expected_kcal += portion.kcal_per_day;
            }
            _ => excluded.push(format!(
                "{}: no mass equivalent, excluded from nutrient totals",
                portion.ingredient_name
            )),
        }
    }

    let totals = aggregation::aggregate(&entries)?;
    Ok((totals, expected_kcal, excluded))
}

fn evaluate_or_advise(
    totals: &NutrientTotals,
    config: &NutritionConfig,
    warnings: &mut Vec<String>,
) -> AppResult<Option<AafcoEvaluation>> {
    match aafco::evaluate(totals, totals.kcal, &config.aafco_requirements) {
        Ok(evaluation) => Ok(Some(evaluation)),
        Err(error) if !error.is_fatal() => {
            warnings.push(error.message);
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// Summarise `num_days` of batch cooking
///
/// # Errors
///
/// Returns `InvalidInput` when `num_days` is zero
pub fn batch_summary(
    portions: &[Portion],
    homemade_kcal: f64,
    meals_per_day: u32,
    num_days: u32,
) -> AppResult<BatchSummary> {
    if num_days == 0 {
        return Err(AppError::invalid_input("Batch must cover at least one day"));
    }
    let days = f64::from(num_days);
    let total_meals = meals_per_day.saturating_mul(num_days);

    let ingredients: Vec<BatchIngredient> = portions
        .iter()
        .map(|portion| BatchIngredient {
            ingredient_name: portion.ingredient_name.clone(),
            quantity_kind: portion.quantity_kind,
            total_amount: portion.amount_per_day * days,
            total_grams: portion.grams_per_day.map(|grams| grams * days),
        })
        .collect();
    let total_grams: f64 = ingredients.iter().filter_map(|i| i.total_grams).sum();
    let grams_per_container = if total_meals > 0 {
        total_grams / f64::from(total_meals)
    } else {
        0.0
    };

    Ok(BatchSummary {
        num_days,
        total_meals,
        total_kcal: homemade_kcal * days,
        total_grams,
        grams_per_container,
        ingredients,
    })
}

/// Compute a complete feeding plan
///
/// # Errors
///
/// Any fatal engine error: `InvalidInput`, `InvalidRecipe`,
/// `InvalidIngredient`, or `OverAllocated`. A zero-kcal recipe is not fatal;
/// it is reported in `warnings` and AAFCO checks are left empty.
pub fn compute_feeding_plan(
    request: &FeedingPlanRequest,
    config: &NutritionConfig,
) -> AppResult<FeedingPlan> {
    let dog = request.dog.clone().with_weight_unit(request.weight_unit);
    let recipe = &request.recipe;

    let (target_kcal, energy) = resolve_target(request, &dog, config)?;
    let allocation =
        portions::allocate(target_kcal, request.kibble_kcal, request.treats_kcal, recipe)?;

    let (nutrient_totals, expected_kcal, mut warnings) =
        aggregate_portions(recipe, &allocation.portions)?;
    if let Some(drift) = aggregation::check_consistency(
        nutrient_totals.kcal,
        expected_kcal,
        config.kcal_consistency_tolerance,
    ) {
        warnings.push(drift);
    }

    let mut recommendations = Vec::new();
    let evaluation = evaluate_or_advise(&nutrient_totals, config, &mut warnings)?;
    let grading = evaluation.as_ref().map(|evaluation| {
        warnings.extend(evaluation.warnings.iter().cloned());
        let grading = aafco::grade(evaluation, &config.grading);
        recommendations.extend(grading.recommendations.iter().cloned());
        grading
    });

    let mineral_balance = mineral_balance::analyze_calcium_phosphorus(
        nutrient_totals.get(Nutrient::Calcium),
        nutrient_totals.get(Nutrient::Phosphorus),
        &config.mineral_balance,
    );
    if mineral_balance.is_advisory() {
        warnings.push(mineral_balance.message.clone());
    }
    if let Some(grams) = mineral_balance.eggshell_powder_g {
        recommendations.push(format!(
            "Add {grams:.1} g eggshell powder to balance calcium"
        ));
    }

    warnings.extend(safety::check_safety_limits(
        &allocation.portions,
        dog.weight_kg,
        &config.safety_limits,
    ));

    let batch = request
        .num_days
        .map(|days| {
            batch_summary(
                &allocation.portions,
                allocation.homemade_kcal,
                recipe.meals_per_day,
                days,
            )
        })
        .transpose()?;

    if !warnings.is_empty() {
        warn!(recipe = %recipe.name, count = warnings.len(), "Feeding plan carries warnings");
    }
    info!(
        recipe = %recipe.name,
        target_kcal,
        homemade_kcal = allocation.homemade_kcal,
        "Feeding plan computed"
    );

    Ok(FeedingPlan {
        target_kcal,
        kibble_kcal: request.kibble_kcal,
        treats_kcal: request.treats_kcal,
        homemade_kcal: allocation.homemade_kcal,
        per_meal_kcal: allocation.per_meal_kcal,
        meals_per_day: recipe.meals_per_day,
        energy,
        ingredient_portions: allocation.portions,
        nutrient_totals,
        aafco_checks: evaluation.map_or_else(Vec::new, |e| e.checks),
        grading,
        mineral_balance,
        warnings,
        recommendations,
        batch,
    })
}
