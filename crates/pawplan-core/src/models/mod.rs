// ABOUTME: Plain data models consumed and produced by the feeding engine
// ABOUTME: Dog, Ingredient, Recipe, nutrient keys, and AAFCO requirement rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Plain records supplied by the persistence layer. None of them perform I/O.

/// AAFCO requirement rows and the default adult profile
pub mod aafco;
/// Dog attributes
pub mod dog;
/// Ingredients and density bases
pub mod ingredient;
/// Tracked nutrients and per-100g profiles
pub mod nutrient;
/// Recipe composition
pub mod recipe;

pub use aafco::{adult_maintenance_profile, AafcoRequirement};
pub use dog::{ActivityLevel, Dog, LifeStage, Sex, WeightGoal};
pub use ingredient::{DensityBasis, Ingredient, QuantityKind};
pub use nutrient::{Nutrient, NutrientProfile, UnknownNutrient};
pub use recipe::{Recipe, RecipeItem};
