// ABOUTME: Tests for reading feeding-plan requests from JSON files and rendering output
// ABOUTME: Covers the request file shape, read and parse failures, and the error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{approx_eq, init_test_logging};
use pawplan::errors::{AppError, ErrorCode};
use pawplan::feeding_plan::compute_feeding_plan;
use pawplan::models::{DensityBasis, QuantityKind};
use pawplan::request::{load_request, parse_request, render_error, render_json};
use pawplan::units::WeightUnit;
use pawplan_nutrition::config::NutritionConfig;
use serde_json::Value;
use std::fs;

const REQUEST_JSON: &str = r#"{
    "dog": {
        "age_years": 7,
        "sex": "male",
        "neutered": true,
        "weight_kg": 44.0,
        "target_weight_kg": 40.0,
        "activity_level": "low",
        "life_stage": "senior"
    },
    "weight_unit": "lbs",
    "recipe": {
        "name": "Turkey & oats",
        "meals_per_day": 2,
        "items": [
            {
                "ingredient": {
                    "name": "Ground turkey, cooked",
                    "density": {"basis": "mass", "kcal_per_100g": 203},
                    "nutrients": {"protein_g": 27.4, "fat_g": 10.4, "calcium_mg": 28, "phosphorus_mg": 220}
                },
                "proportion": 0.75
            },
            {
                "ingredient": {
                    "name": "Oatmeal, cooked",
                    "density": {"basis": "mass", "kcal_per_100g": 71},
                    "nutrients": {"protein_g": 2.5, "carbs_g": 12, "phosphorus_mg": 77}
                },
                "proportion": 0.2
            },
            {
                "ingredient": {
                    "name": "Salmon oil",
                    "density": {"basis": "volume", "kcal_per_ml": 8.4, "grams_per_ml": 0.92},
                    "nutrients": {"fat_g": 100}
                },
                "proportion": 0.05
            }
        ]
    },
    "kibble_kcal": 100,
    "num_days": 4
}"#;

#[test]
fn test_request_file_round_trip() {
    init_test_logging();
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("plan.json");
    fs::write(&path, REQUEST_JSON).unwrap();

    let request = load_request(&path).unwrap();
    assert_eq!(request.weight_unit, WeightUnit::Lbs);
    assert_eq!(request.recipe.items.len(), 3);
    assert!(matches!(
        request.recipe.items[2].ingredient.density,
        DensityBasis::Volume { .. }
    ));
    assert!(request.treats_kcal.abs() < f64::EPSILON);

    let plan = compute_feeding_plan(&request, &NutritionConfig::default()).unwrap();
    // 44 lb dog losing weight: factor 1.1
    let energy = plan.energy.unwrap();
    assert!(approx_eq(energy.activity_factor, 1.1, 1e-12));
    assert!(approx_eq(plan.homemade_kcal, plan.target_kcal - 100.0, 1e-9));
    assert_eq!(
        plan.ingredient_portions[2].quantity_kind,
        QuantityKind::Milliliters
    );
    assert_eq!(plan.batch.unwrap().total_meals, 8);
}

#[test]
fn test_missing_file_is_invalid_input() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = load_request(&temp_dir.path().join("nope.json")).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_malformed_request_is_serialization_error() {
    let err = parse_request(r#"{"dog": {"weight_kg": "heavy"}}"#).unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
}

#[test]
fn test_error_body_shape() {
    let body = render_error(AppError::over_allocated(800.0, 700.0, 150.0), false).unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["error"]["code"], "OVER_ALLOCATED");
    assert_eq!(json["error"]["fatal"], true);
    assert!(json["error"]["message"].as_str().is_some());
}

#[test]
fn test_compact_and_pretty_rendering() {
    let request = parse_request(REQUEST_JSON).unwrap();
    let compact = render_json(&request, false).unwrap();
    let pretty = render_json(&request, true).unwrap();

    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    let reparsed: Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(reparsed["recipe"]["name"], "Turkey & oats");
}
