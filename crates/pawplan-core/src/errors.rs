// ABOUTME: Unified error type and error codes for the feeding-plan engine
// ABOUTME: Separates fatal computation failures from advisory warnings and formats error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! # Unified Error Handling
//!
//! Every engine stage reports failures through [`AppError`], tagged with an
//! [`ErrorCode`] from a small fixed taxonomy. Callers match on the code, never
//! on the message text.
//!
//! Advisory conditions (AAFCO deficiency, kcal drift, mineral imbalance) are not
//! errors: they travel inside the computed plan as warning strings.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Computation (3000-3999)
    /// Malformed or out-of-range scalar (e.g. non-positive weight)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Recipe proportions don't sum to one, or a proportion is negative
    #[serde(rename = "INVALID_RECIPE")]
    InvalidRecipe = 3001,
    /// Ingredient has zero energy density but was allocated energy
    #[serde(rename = "INVALID_INGREDIENT")]
    InvalidIngredient = 3002,
    /// Kibble plus treats exceed the daily energy target
    #[serde(rename = "OVER_ALLOCATED")]
    OverAllocated = 3003,
    /// Normalisation against a zero-kcal recipe was requested
    #[serde(rename = "DIVISION_BY_ZERO")]
    DivisionByZero = 3004,

    // Configuration (6000-6999)
    /// Configuration values failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Serialization (9000-9999)
    /// Request or plan (de)serialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// HTTP status an outer web layer should use for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::InvalidRecipe | Self::InvalidIngredient => 400,
            Self::OverAllocated | Self::DivisionByZero => 422,
            Self::ConfigInvalid | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidRecipe => "The recipe composition is invalid",
            Self::InvalidIngredient => "An ingredient cannot supply the energy allocated to it",
            Self::OverAllocated => "Kibble and treats exceed the daily energy target",
            Self::DivisionByZero => "Cannot evaluate a zero-kcal recipe",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this condition prevents a feeding plan from being produced
    ///
    /// `DivisionByZero` is the only computation code that the plan stage
    /// downgrades to an advisory warning.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::DivisionByZero)
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details (offending values, ingredient names)
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Object(Map::new()),
            source: None,
        }
    }

    /// Add details to the error
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Whether this error is fatal for plan computation
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid scalar input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Invalid recipe composition
    pub fn invalid_recipe(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRecipe, message)
    }

    /// Ingredient cannot carry its allocation
    pub fn invalid_ingredient(ingredient: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidIngredient, message)
            .with_details(json!({ "ingredient": ingredient }))
    }

    /// Kibble and treats exceed the target
    #[must_use]
    pub fn over_allocated(target_kcal: f64, kibble_kcal: f64, treats_kcal: f64) -> Self {
        Self::new(
            ErrorCode::OverAllocated,
            format!(
                "kibble ({kibble_kcal:.2} kcal) and treats ({treats_kcal:.2} kcal) exceed the daily target of {target_kcal:.2} kcal"
            ),
        )
        .with_details(json!({
            "target_kcal": target_kcal,
            "kibble_kcal": kibble_kcal,
            "treats_kcal": treats_kcal,
            "excess_kcal": kibble_kcal + treats_kcal - target_kcal,
        }))
    }

    /// Zero-kcal normalisation guard
    #[must_use]
    pub fn zero_kcal() -> Self {
        Self::new(ErrorCode::DivisionByZero, "cannot evaluate: zero-kcal recipe")
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Error response body an outer layer can return
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Error payload inside [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Whether a plan was withheld because of this error
    pub fatal: bool,
    /// Structured details
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                fatal: error.is_fatal(),
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}
