// ABOUTME: Criterion benchmarks for the feeding-plan engine stages
// ABOUTME: Measures allocation, aggregation, AAFCO evaluation, and full plan computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Criterion benchmarks for the feeding-plan engine.
//!
//! Recipes of increasing size are generated so the per-ingredient cost of
//! each stage is visible.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pawplan::aafco::evaluate;
use pawplan::aggregation::{aggregate, IngredientGrams};
use pawplan::feeding_plan::{compute_feeding_plan, FeedingPlanRequest};
use pawplan::models::{
    adult_maintenance_profile, ActivityLevel, Dog, Ingredient, LifeStage, NutrientProfile, Recipe,
    RecipeItem, Sex,
};
use pawplan::portions::allocate;
use pawplan::units::WeightUnit;
use pawplan_nutrition::config::NutritionConfig;

const RECIPE_SIZES: [usize; 3] = [3, 12, 48];

#[allow(clippy::cast_precision_loss)]
fn generate_recipe(count: usize) -> Recipe {
    let share = 1.0 / count as f64;
    let items = (0..count)
        .map(|index| {
            let offset = (index % 7) as f64;
            RecipeItem {
                ingredient: Ingredient::mass(
                    format!("ingredient_{index}"),
                    offset.mul_add(35.0, 90.0),
                    NutrientProfile {
                        protein_g: offset.mul_add(3.0, 8.0),
                        fat_g: offset.mul_add(1.5, 2.0),
                        carbs_g: 10.0,
                        calcium_mg: offset.mul_add(40.0, 15.0),
                        phosphorus_mg: offset.mul_add(25.0, 120.0),
                        iron_mg: 1.2,
                        zinc_mg: 2.1,
                        vitamin_a_mcg: 45.0,
                        vitamin_d_mcg: 0.4,
                        vitamin_e_mg: 0.9,
                    },
                ),
                proportion: share,
            }
        })
        .collect();
    Recipe::new(format!("bench_recipe_{count}"), 2, items)
}

fn bench_dog() -> Dog {
    Dog {
        age_years: 5.0,
        sex: Sex::Male,
        neutered: true,
        weight_kg: 22.0,
        target_weight_kg: None,
        activity_level: ActivityLevel::Moderate,
        life_stage: LifeStage::Adult,
    }
}

fn bench_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation");

    for size in RECIPE_SIZES {
        let recipe = generate_recipe(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("allocate", size), &recipe, |b, recipe| {
            b.iter(|| allocate(black_box(1200.0), black_box(300.0), black_box(50.0), recipe));
        });
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in RECIPE_SIZES {
        let recipe = generate_recipe(size);
        let entries: Vec<IngredientGrams<'_>> = recipe
            .items
            .iter()
            .map(|item| IngredientGrams::new(&item.ingredient, 120.0))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("aggregate", size), &entries, |b, entries| {
            b.iter(|| aggregate(black_box(entries)));
        });
    }

    group.finish();
}

fn bench_aafco_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aafco");
    let recipe = generate_recipe(12);
    let entries: Vec<IngredientGrams<'_>> = recipe
        .items
        .iter()
        .map(|item| IngredientGrams::new(&item.ingredient, 150.0))
        .collect();
    let requirements = adult_maintenance_profile();

    if let Ok(totals) = aggregate(&entries) {
        group.bench_function("evaluate_adult_maintenance", |b| {
            b.iter(|| evaluate(black_box(&totals), black_box(totals.kcal), &requirements));
        });
    }

    group.finish();
}

fn bench_full_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("feeding_plan");
    group.sample_size(50);
    let config = NutritionConfig::default();

    for size in RECIPE_SIZES {
        let request = FeedingPlanRequest {
            dog: bench_dog(),
            weight_unit: WeightUnit::Kg,
            recipe: generate_recipe(size),
            kibble_kcal: 200.0,
            treats_kcal: 40.0,
            puppy_factor: None,
            target_kcal_override: None,
            num_days: Some(7),
        };
        group.bench_with_input(
            BenchmarkId::new("compute_feeding_plan", size),
            &request,
            |b, request| {
                b.iter(|| compute_feeding_plan(black_box(request), &config));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_allocation,
    bench_aggregation,
    bench_aafco_evaluation,
    bench_full_plan
);
criterion_main!(benches);
