// ABOUTME: Shared fixtures and setup functions for integration tests
// ABOUTME: Provides a quiet test logger, reference dogs, ingredients, and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `pawplan`
//!
//! Ingredient figures are USDA-style per-100 g values for cooked foods.

use pawplan::feeding_plan::FeedingPlanRequest;
use pawplan::models::{
    ActivityLevel, Dog, Ingredient, LifeStage, NutrientProfile, Recipe, Sex,
};
use pawplan::units::WeightUnit;
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Neutered, moderately active adult female
pub fn adult_dog(weight_kg: f64) -> Dog {
    Dog {
        age_years: 5.0,
        sex: Sex::Female,
        neutered: true,
        weight_kg,
        target_weight_kg: None,
        activity_level: ActivityLevel::Moderate,
        life_stage: LifeStage::Adult,
    }
}

/// Puppy of the given age in years
pub fn puppy(weight_kg: f64, age_years: f64) -> Dog {
    Dog {
        age_years,
        sex: Sex::Male,
        neutered: false,
        weight_kg,
        target_weight_kg: None,
        activity_level: ActivityLevel::High,
        life_stage: LifeStage::Puppy,
    }
}

pub fn chicken_breast() -> Ingredient {
    Ingredient::mass(
        "Chicken breast, cooked",
        165.0,
        NutrientProfile {
            protein_g: 31.0,
            fat_g: 3.6,
            carbs_g: 0.0,
            calcium_mg: 15.0,
            phosphorus_mg: 228.0,
            iron_mg: 1.0,
            zinc_mg: 1.0,
            vitamin_a_mcg: 6.0,
            vitamin_d_mcg: 0.1,
            vitamin_e_mg: 0.3,
        },
    )
}

pub fn white_rice() -> Ingredient {
    Ingredient::mass(
        "White rice, cooked",
        130.0,
        NutrientProfile {
            protein_g: 2.7,
            fat_g: 0.3,
            carbs_g: 28.0,
            calcium_mg: 10.0,
            phosphorus_mg: 43.0,
            iron_mg: 0.2,
            zinc_mg: 0.5,
            ..NutrientProfile::default()
        },
    )
}

pub fn beef_liver() -> Ingredient {
    Ingredient::mass(
        "Beef liver, cooked",
        135.0,
        NutrientProfile {
            protein_g: 20.4,
            fat_g: 3.6,
            carbs_g: 3.9,
            calcium_mg: 5.0,
            phosphorus_mg: 387.0,
            iron_mg: 6.5,
            zinc_mg: 4.0,
            vitamin_a_mcg: 4968.0,
            vitamin_d_mcg: 1.2,
            vitamin_e_mg: 0.4,
        },
    )
}

pub fn fish_oil() -> Ingredient {
    Ingredient::volume(
        "Fish oil",
        8.3,
        Some(0.92),
        NutrientProfile {
            fat_g: 100.0,
            vitamin_e_mg: 1.0,
            ..NutrientProfile::default()
        },
    )
}

/// Discrete supplement with no known mass
pub fn vitamin_e_capsule() -> Ingredient {
    Ingredient::unit("Vitamin E capsule", 9.0, None, NutrientProfile::default())
}

/// 70 % chicken / 30 % rice by energy, two meals
pub fn chicken_and_rice() -> Recipe {
    Recipe::from_energy_percentages(
        "Chicken & rice",
        2,
        vec![(chicken_breast(), 70.0), (white_rice(), 30.0)],
    )
}

/// Request for a neutered 15 kg adult eating `recipe`
pub fn plan_request(recipe: Recipe) -> FeedingPlanRequest {
    FeedingPlanRequest {
        dog: adult_dog(15.0),
        weight_unit: WeightUnit::Kg,
        recipe,
        kibble_kcal: 0.0,
        treats_kcal: 0.0,
        puppy_factor: None,
        target_kcal_override: None,
        num_days: None,
    }
}

/// Absolute closeness check for floating-point figures
pub fn approx_eq(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}
