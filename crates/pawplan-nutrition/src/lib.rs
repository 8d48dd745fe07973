// ABOUTME: Feeding-plan computation engine for the Pawplan dog nutrition planner
// ABOUTME: Energy requirements, portion allocation, nutrient aggregation, and AAFCO scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

#![deny(unsafe_code)]

//! # Pawplan Nutrition
//!
//! Pure, synchronous computation over plain records. No stage performs I/O or
//! reads process state; reference tables arrive through [`NutritionConfig`].
//!
//! ## Stages
//!
//! 1. **energy**: RER and MER from dog attributes
//! 2. **portions**: homemade kcal split into per-ingredient quantities
//! 3. **aggregation**: weighted nutrient sums over ingredient grams
//! 4. **aafco**: per-1000-kcal compliance checks and grading
//!
//! **`mineral_balance`**, **safety**, and **simulation** build on those outputs;
//! **`feeding_plan`** runs the whole pipeline.

/// AAFCO evaluation and nutrient grading
pub mod aafco;
/// Nutrient aggregation
pub mod aggregation;
/// Reference tables
pub mod config;
/// Energy requirement calculator
pub mod energy;
/// Feeding-plan orchestration
pub mod feeding_plan;
/// Calcium:phosphorus analysis
pub mod mineral_balance;
/// Portion allocator
pub mod portions;
/// Ingredient safety limits
pub mod safety;
/// Recipe adjustment simulation
pub mod simulation;

pub use aafco::{
    evaluate, grade, AafcoCheck, AafcoEvaluation, AafcoStatus, GradedNutrient, NutrientGrade,
    NutrientGrading,
};
pub use aggregation::{aggregate, check_consistency, IngredientGrams, NutrientTotals};
pub use config::{ConfigError, NutritionConfig};
pub use energy::{
    compute_energy_requirement, compute_mer, compute_rer, puppy_factor_for_age,
    select_activity_factor, EnergyRequirement,
};
pub use feeding_plan::{
    batch_summary, compute_feeding_plan, BatchIngredient, BatchSummary, FeedingPlan,
    FeedingPlanRequest,
};
pub use mineral_balance::{analyze_calcium_phosphorus, CalciumPhosphorusStatus, MineralBalance};
pub use portions::{
    allocate, clamp_homemade_kcal, grams_to_kcal, kcal_to_grams, Allocation, Portion,
};
pub use safety::check_safety_limits;
pub use simulation::{simulate_adjustment, AdjustmentSimulation, ProportionAdjustment};
