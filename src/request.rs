// ABOUTME: Reads feeding-plan requests from JSON files and renders computed plans
// ABOUTME: File and parse failures surface as AppError so callers get one error shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use pawplan_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
use pawplan_nutrition::feeding_plan::FeedingPlanRequest;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a feeding-plan request from a JSON file
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read and
/// `SerializationError` when it is not a valid request
pub fn load_request(path: &Path) -> AppResult<FeedingPlanRequest> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCode::InvalidInput,
            format!("Cannot read request file {}", path.display()),
        )
        .with_source(e)
    })?;
    parse_request(&raw)
}

/// Parse a feeding-plan request from JSON text
///
/// # Errors
///
/// Returns `SerializationError` when the text is not a valid request
pub fn parse_request(raw: &str) -> AppResult<FeedingPlanRequest> {
    let request: FeedingPlanRequest = serde_json::from_str(raw)?;
    debug!(
        recipe = %request.recipe.name,
        ingredients = request.recipe.items.len(),
        "Parsed feeding-plan request"
    );
    Ok(request)
}

/// Render any engine output as JSON
///
/// # Errors
///
/// Returns `SerializationError` if the value cannot be serialized
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

/// Render an engine error as the JSON error body
///
/// # Errors
///
/// Returns `SerializationError` if the body cannot be serialized
pub fn render_error(error: AppError, pretty: bool) -> AppResult<String> {
    render_json(&ErrorResponse::from(error), pretty)
}
