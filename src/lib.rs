// ABOUTME: Main library entry point for the Pawplan dog feeding-plan engine
// ABOUTME: Re-exports the engine crates and adds logging, environment config, and request loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

#![deny(unsafe_code)]

//! # Pawplan
//!
//! Computes a dog's daily energy needs, turns a recipe into gram-level feeding
//! instructions, and checks the resulting nutrients against AAFCO profiles.
//!
//! ## Architecture
//!
//! - **`pawplan-core`**: error taxonomy, constants, data models, units
//! - **`pawplan-nutrition`**: the pure computation engine
//! - this crate: logging, environment configuration, request files, and the
//!   `pawplan` command-line driver
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pawplan::feeding_plan::compute_feeding_plan;
//! use pawplan::request::load_request;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = pawplan::config::load_from_env()?;
//!     let request = load_request(Path::new("plan.json"))?;
//!     let plan = compute_feeding_plan(&request, &config)?;
//!     println!("{:.0} kcal/day from the recipe", plan.homemade_kcal);
//!     Ok(())
//! }
//! ```

/// Environment-driven reference table loading
pub mod config;

/// Structured logging setup
pub mod logging;

/// Feeding-plan request files and plan rendering
pub mod request;

pub use pawplan_core::{constants, errors, models, units};
pub use pawplan_nutrition::{
    aafco, aggregation, energy, feeding_plan, mineral_balance, portions, safety, simulation,
};
