// ABOUTME: Core types and constants for the Pawplan dog nutrition engine
// ABOUTME: Foundation crate with error handling, constants, units, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

#![deny(unsafe_code)]

//! # Pawplan Core
//!
//! Foundation crate providing shared types for the Pawplan feeding engine.
//! It changes rarely, so the engine crate above it recompiles independently.
//!
//! ## Modules
//!
//! - **errors**: `AppError` and the `ErrorCode` taxonomy
//! - **constants**: formula coefficients, tolerances, and unit factors
//! - **models**: Dog, Ingredient, Recipe, and AAFCO requirement records
//! - **units**: kilogram/pound conversion

/// Unified error handling with standard error codes
pub mod errors;

/// Formula coefficients and tolerances
pub mod constants;

/// Plain data models
pub mod models;

/// Body-weight unit conversion
pub mod units;
