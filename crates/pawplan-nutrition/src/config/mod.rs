// ABOUTME: Configuration module for the pawplan-nutrition crate
// ABOUTME: Re-exports reference tables and the configuration error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

/// Configuration error types
pub mod error;
/// Reference tables (activity factors, AAFCO rows, mineral bands, safety rules, grading)
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, GradingConfig, MineralBalanceConfig, NutritionConfig,
    SafetyLimitsConfig, SafetyRule,
};
