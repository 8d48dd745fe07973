// ABOUTME: Splits the homemade energy budget across recipe ingredients
// ABOUTME: Converts allocated kcal into grams, milliliters, or unit counts per day and per meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use pawplan_core::constants::density::REFERENCE_GRAMS;
use pawplan_core::constants::units::ML_PER_TSP;
use pawplan_core::errors::{AppError, AppResult, ErrorCode};
use pawplan_core::models::{Ingredient, QuantityKind, Recipe};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Daily and per-meal quantity of one recipe ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    /// Ingredient display name
    pub ingredient_name: String,
    /// Unit `amount_per_day` and `amount_per_meal` are expressed in
    pub quantity_kind: QuantityKind,
    /// Share of homemade energy
    pub proportion: f64,
    /// Energy supplied per day
    pub kcal_per_day: f64,
    /// Quantity per day in `quantity_kind`
    pub amount_per_day: f64,
    /// Quantity per meal in `quantity_kind`
    pub amount_per_meal: f64,
    /// Mass per day, when the ingredient has a mass equivalent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams_per_day: Option<f64>,
    /// Mass per meal, when the ingredient has a mass equivalent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams_per_meal: Option<f64>,
    /// Teaspoons per meal for volume-measured ingredients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaspoons_per_meal: Option<f64>,
}

/// Result of splitting the daily target across kibble, treats, and recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Energy left for the homemade recipe
    pub homemade_kcal: f64,
    /// Homemade energy per meal
    pub per_meal_kcal: f64,
    /// One portion per recipe item, in recipe order
    pub portions: Vec<Portion>,
}

/// Convert energy to grams for a mass density
///
/// Formula: grams = kcal / `kcal_per_100g` x 100
///
/// # Errors
///
/// Returns `InvalidInput` if `kcal` is negative or not a number, and
/// `InvalidIngredient` if the density is negative, not a number, or zero
/// while `kcal` is positive
pub fn kcal_to_grams(kcal: f64, kcal_per_100g: f64) -> AppResult<f64> {
    if !kcal.is_finite() || kcal < 0.0 {
        return Err(AppError::invalid_input(format!(
            "kcal must be zero or more (got {kcal})"
        )));
    }
    let per_gram = kcal_per_100g / REFERENCE_GRAMS;
    quantity_for_kcal(kcal, per_gram).ok_or_else(|| {
        AppError::new(
            ErrorCode::InvalidIngredient,
            format!("Cannot supply {kcal} kcal at {kcal_per_100g} kcal/100g"),
        )
        .with_details(json!({ "kcal": kcal, "kcal_per_100g": kcal_per_100g }))
    })
}

/// Convert grams to energy for a mass density
#[must_use]
pub fn grams_to_kcal(grams: f64, kcal_per_100g: f64) -> f64 {
    grams * kcal_per_100g / REFERENCE_GRAMS
}

/// Homemade energy with kibble and treats removed, floored at zero
///
/// [`allocate`] never clamps; callers that prefer an empty homemade budget
/// over an `OverAllocated` error use this to pick the target they pass in.
#[must_use]
pub fn clamp_homemade_kcal(target_kcal: f64, kibble_kcal: f64, treats_kcal: f64) -> f64 {
    (target_kcal - kibble_kcal - treats_kcal).max(0.0)
}

/// Quantity needed to supply `kcal` at `kcal_per_quantity`; `None` when impossible
fn quantity_for_kcal(kcal: f64, kcal_per_quantity: f64) -> Option<f64> {
    if !kcal.is_finite()
        || kcal < 0.0
        || !kcal_per_quantity.is_finite()
        || kcal_per_quantity < 0.0
    {
        return None;
    }
    if kcal <= 0.0 {
        return Some(0.0);
    }
    (kcal_per_quantity > 0.0).then(|| kcal / kcal_per_quantity)
}

fn require_kcal(label: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_input(format!(
            "{label} must be zero or more kcal (got {value})"
        )));
    }
    Ok(())
}

fn portion_for(
    ingredient: &Ingredient,
    proportion: f64,
    homemade_kcal: f64,
    meals: f64,
) -> AppResult<Portion> {
    let kcal_per_day = homemade_kcal * proportion;
    let density = ingredient.density;
    let amount_per_day = quantity_for_kcal(kcal_per_day, density.kcal_per_quantity())
        .ok_or_else(|| {
            AppError::invalid_ingredient(
                &ingredient.name,
                format!(
                    "{}: zero energy density cannot supply {kcal_per_day:.2} kcal/day",
                    ingredient.name
                ),
            )
            .with_details(json!({
                "ingredient": ingredient.name,
                "kcal_per_day": kcal_per_day,
            }))
        })?;
    let amount_per_meal = amount_per_day / meals;
    let quantity_kind = density.quantity_kind();
    let grams_per_day = density.grams_per_quantity().map(|g| amount_per_day * g);
    let teaspoons_per_meal =
        (quantity_kind == QuantityKind::Milliliters).then(|| amount_per_meal / ML_PER_TSP);

    Ok(Portion {
        ingredient_name: ingredient.name.clone(),
        quantity_kind,
        proportion,
        kcal_per_day,
        amount_per_day,
        amount_per_meal,
        grams_per_day,
        grams_per_meal: grams_per_day.map(|g| g / meals),
        teaspoons_per_meal,
    })
}

/// Split the daily target into per-ingredient portions
///
/// `homemade_kcal = target_kcal - kibble_kcal - treats_kcal`; each item then
/// receives `homemade_kcal x proportion`, converted on the ingredient's own
/// density basis. Values are returned unrounded.
///
/// # Errors
///
/// - `InvalidInput`: a kcal input is negative or not a number, or the recipe
///   has zero meals per day
/// - `InvalidRecipe`: proportions are negative or do not sum to 1.0
/// - `OverAllocated`: kibble and treats exceed the target
/// - `InvalidIngredient`: a zero-density ingredient was allocated energy
pub fn allocate(
    target_kcal: f64,
    kibble_kcal: f64,
    treats_kcal: f64,
    recipe: &Recipe,
) -> AppResult<Allocation> {
    require_kcal("Target", target_kcal)?;
    require_kcal("Kibble", kibble_kcal)?;
    require_kcal("Treats", treats_kcal)?;
    if recipe.meals_per_day == 0 {
        return Err(AppError::invalid_input("Meals per day must be at least 1"));
    }
    recipe.validate()?;

    let homemade_kcal = target_kcal - kibble_kcal - treats_kcal;
    if homemade_kcal < 0.0 {
        return Err(AppError::over_allocated(
            target_kcal,
            kibble_kcal,
            treats_kcal,
        ));
    }

    let meals = f64::from(recipe.meals_per_day);
    let portions = recipe
        .items
        .iter()
        .map(|item| portion_for(&item.ingredient, item.proportion, homemade_kcal, meals))
        .collect::<AppResult<Vec<_>>>()?;

    debug!(
        recipe = %recipe.name,
        homemade_kcal,
        ingredients = portions.len(),
        "Allocated homemade energy"
    );

    Ok(Allocation {
        homemade_kcal,
        per_meal_kcal: homemade_kcal / meals,
        portions,
    })
}
