// ABOUTME: Formula coefficients, tolerances, and unit factors for the feeding engine
// ABOUTME: Central home for numbers that are fixed by physiology or by convention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Application-wide constants organized by domain

/// Resting energy requirement formula: `RER = 70 × weight_kg^0.75`
pub mod energy {
    /// Multiplier in the RER formula
    pub const RER_COEFFICIENT: f64 = 70.0;
    /// Metabolic body weight exponent
    pub const RER_EXPONENT: f64 = 0.75;
}

/// Nutrient density conventions
pub mod density {
    /// Nutrient and energy densities are stated per this many grams
    pub const REFERENCE_GRAMS: f64 = 100.0;
    /// AAFCO profiles are stated per this many kcal
    pub const AAFCO_REFERENCE_KCAL: f64 = 1000.0;
}

/// Numeric tolerances
pub mod tolerances {
    /// Allowed deviation of recipe proportions from 1.0
    pub const PROPORTION_SUM: f64 = 1e-6;
    /// Relative drift between aggregated and allocated kcal before warning (0.5%)
    pub const KCAL_CONSISTENCY: f64 = 0.005;
}

/// Weight unit conversion factors
pub mod units {
    /// Kilograms per pound
    pub const KG_PER_LB: f64 = 0.453_592;
    /// Pounds per kilogram
    pub const LBS_PER_KG: f64 = 2.204_62;
    /// Milliliters per US teaspoon
    pub const ML_PER_TSP: f64 = 5.0;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Binary / service name
    pub const PAWPLAN: &str = "pawplan";
}
