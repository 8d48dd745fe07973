// ABOUTME: Integration tests for splitting the homemade energy budget into portions
// ABOUTME: Covers budget clamping, per-meal splits, unit bases, and fatal allocation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    approx_eq, beef_liver, chicken_and_rice, chicken_breast, fish_oil, init_test_logging,
    vitamin_e_capsule, white_rice,
};
use pawplan::constants::units::ML_PER_TSP;
use pawplan::errors::ErrorCode;
use pawplan::models::{Ingredient, NutrientProfile, QuantityKind, Recipe};
use pawplan::portions::{allocate, clamp_homemade_kcal, grams_to_kcal, kcal_to_grams};

#[test]
fn test_portions_exhaust_homemade_budget() {
    init_test_logging();
    let allocation = allocate(853.663, 0.0, 50.0, &chicken_and_rice()).unwrap();
    assert!(approx_eq(allocation.homemade_kcal, 803.663, 1e-9));

    let allocated: f64 = allocation.portions.iter().map(|p| p.kcal_per_day).sum();
    assert!(approx_eq(allocated, allocation.homemade_kcal, 1e-6));
    assert!(approx_eq(
        allocation.per_meal_kcal * 2.0,
        allocation.homemade_kcal,
        1e-9
    ));
}

#[test]
fn test_gram_amounts_follow_energy_density() {
    let allocation = allocate(1000.0, 0.0, 0.0, &chicken_and_rice()).unwrap();
    let chicken = &allocation.portions[0];
    let rice = &allocation.portions[1];

    assert_eq!(chicken.ingredient_name, "Chicken breast, cooked");
    assert_eq!(chicken.quantity_kind, QuantityKind::Grams);
    assert!(approx_eq(chicken.kcal_per_day, 700.0, 1e-9));
    assert!(approx_eq(chicken.amount_per_day, 700.0 / 1.65, 1e-9));
    assert!(approx_eq(rice.amount_per_day, 300.0 / 1.3, 1e-9));
    assert!(approx_eq(
        chicken.grams_per_meal.unwrap(),
        chicken.amount_per_day / 2.0,
        1e-9
    ));
}

#[test]
fn test_grams_kcal_conversion_is_inverse() {
    for kcal in [12.5, 250.0, 803.663] {
        let grams = kcal_to_grams(kcal, 165.0).unwrap();
        assert!(approx_eq(grams_to_kcal(grams, 165.0), kcal, 1e-9));
    }
}

#[test]
fn test_zero_density_conversion_is_an_ingredient_error() {
    let err = kcal_to_grams(120.0, 0.0).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidIngredient);
    assert!(err.is_fatal());
    assert!(kcal_to_grams(0.0, 0.0).unwrap().abs() < f64::EPSILON);
    assert_eq!(
        kcal_to_grams(f64::NAN, 165.0).unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[test]
fn test_over_allocation_is_fatal() {
    let err = allocate(800.0, 700.0, 150.0, &chicken_and_rice()).unwrap_err();
    assert_eq!(err.code, ErrorCode::OverAllocated);
    assert!(err.is_fatal());
    assert!(clamp_homemade_kcal(800.0, 700.0, 150.0).abs() < f64::EPSILON);
}

#[test]
fn test_kibble_can_cover_the_whole_target() {
    let allocation = allocate(800.0, 800.0, 0.0, &chicken_and_rice()).unwrap();
    assert!(allocation.homemade_kcal.abs() < f64::EPSILON);
    assert!(allocation
        .portions
        .iter()
        .all(|portion| portion.amount_per_day.abs() < f64::EPSILON));
}

#[test]
fn test_proportions_must_sum_to_one() {
    let short = Recipe::from_energy_percentages(
        "Short",
        2,
        vec![(chicken_breast(), 67.0), (white_rice(), 30.0)],
    );
    let err = allocate(900.0, 0.0, 0.0, &short).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRecipe);

    let empty = Recipe::new("Empty", 2, Vec::new());
    assert_eq!(
        allocate(900.0, 0.0, 0.0, &empty).unwrap_err().code,
        ErrorCode::InvalidRecipe
    );
}

#[test]
fn test_zero_meals_rejected() {
    let mut recipe = chicken_and_rice();
    recipe.meals_per_day = 0;
    assert_eq!(
        allocate(900.0, 0.0, 0.0, &recipe).unwrap_err().code,
        ErrorCode::InvalidInput
    );
}

#[test]
fn test_negative_kcal_inputs_rejected() {
    assert_eq!(
        allocate(900.0, -10.0, 0.0, &chicken_and_rice())
            .unwrap_err()
            .code,
        ErrorCode::InvalidInput
    );
}

#[test]
fn test_zero_density_ingredient_with_energy_share_is_fatal() {
    let water = Ingredient::mass("Water", 0.0, NutrientProfile::default());
    let recipe = Recipe::from_energy_percentages(
        "Soup",
        2,
        vec![(chicken_breast(), 90.0), (water.clone(), 10.0)],
    );
    let err = allocate(900.0, 0.0, 0.0, &recipe).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidIngredient);

    let unshared = Recipe::from_energy_percentages(
        "Soup",
        2,
        vec![(chicken_breast(), 100.0), (water, 0.0)],
    );
    let allocation = allocate(900.0, 0.0, 0.0, &unshared).unwrap();
    assert!(allocation.portions[1].amount_per_day.abs() < f64::EPSILON);
}

#[test]
fn test_volume_and_unit_bases() {
    let recipe = Recipe::from_energy_percentages(
        "Supplemented",
        2,
        vec![
            (chicken_breast(), 90.0),
            (fish_oil(), 8.0),
            (vitamin_e_capsule(), 2.0),
        ],
    );
    let allocation = allocate(1000.0, 0.0, 0.0, &recipe).unwrap();

    let oil = &allocation.portions[1];
    assert_eq!(oil.quantity_kind, QuantityKind::Milliliters);
    assert!(approx_eq(oil.amount_per_day, 80.0 / 8.3, 1e-9));
    assert!(approx_eq(oil.grams_per_day.unwrap(), 80.0 / 8.3 * 0.92, 1e-9));
    assert!(approx_eq(
        oil.teaspoons_per_meal.unwrap(),
        oil.amount_per_meal / ML_PER_TSP,
        1e-12
    ));

    let capsule = &allocation.portions[2];
    assert_eq!(capsule.quantity_kind, QuantityKind::Units);
    assert!(approx_eq(capsule.amount_per_day, 20.0 / 9.0, 1e-9));
    assert_eq!(capsule.grams_per_day, None);
    assert_eq!(capsule.teaspoons_per_meal, None);
}

#[test]
fn test_recipe_order_is_preserved() {
    let recipe = Recipe::from_energy_percentages(
        "Three",
        3,
        vec![
            (white_rice(), 50.0),
            (beef_liver(), 5.0),
            (chicken_breast(), 45.0),
        ],
    );
    let allocation = allocate(1200.0, 0.0, 0.0, &recipe).unwrap();
    let names: Vec<&str> = allocation
        .portions
        .iter()
        .map(|p| p.ingredient_name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "White rice, cooked",
            "Beef liver, cooked",
            "Chicken breast, cooked"
        ]
    );
}
