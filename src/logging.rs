// ABOUTME: Tracing subscriber setup for the pawplan CLI and library users
// ABOUTME: Diagnostics go to stderr in compact, pretty, or JSON form; stdout carries plan JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! Structured logging
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `RUST_LOG` | filter directive, default `warn` |
//! | `LOG_FORMAT` | `compact` (default), `pretty`, or `json` |
//! | `LOG_INCLUDE_LOCATION` | add source file and line |
//! | `LOG_INCLUDE_SPANS` | emit span open/close events |

use anyhow::Result;
use pawplan_core::constants::service_names;
use pawplan_core::errors::AppError;
use std::env;
use std::io;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Crates whose events follow the configured level even under a broader filter
const ENGINE_TARGETS: [&str; 3] = ["pawplan", "pawplan_core", "pawplan_nutrition"];

/// Rendering of log events on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no targets
    #[default]
    Compact,
    /// Multi-line human-readable events
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, falling back to compact
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive (`warn`, `debug`, `pawplan_nutrition=trace`, ...)
    pub level: String,
    /// Event rendering
    pub format: LogFormat,
    /// Add source file and line to events
    pub include_location: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Name reported in the startup event
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::Compact,
            include_location: false,
            include_spans: false,
            service_name: service_names::PAWPLAN.to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read settings from the environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT").map_or(LogFormat::Compact, |value| {
                LogFormat::from_str_or_default(&value)
            }),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: defaults.service_name,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        ENGINE_TARGETS
            .iter()
            .fold(EnvFilter::new(&self.level), |filter, target| {
                let directive = format!("{target}={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| Level::WARN.into());
                filter.add_directive(directive)
            })
    }

    const fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_span_events(self.span_events());

        match self.format {
            LogFormat::Compact => registry
                .with(layer.compact().with_target(false))
                .try_init()?,
            LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
            LogFormat::Json => registry
                .with(layer.json().flatten_event(true))
                .try_init()?,
        }

        debug!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            log.level = %self.level,
            log.format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Plan-level logging helpers
pub struct PlanLogger;

impl PlanLogger {
    /// Log a computed feeding plan
    pub fn log_plan_computed(recipe: &str, target_kcal: f64, warnings: usize, duration_ms: u128) {
        info!(
            plan.recipe = %recipe,
            plan.target_kcal = target_kcal,
            plan.warnings = warnings,
            plan.duration_ms = %duration_ms,
            "Feeding plan"
        );
    }

    /// Log an engine error that withheld a plan
    pub fn log_engine_error(error: &AppError) {
        warn!(
            error.code = ?error.code,
            error.fatal = error.is_fatal(),
            error.details = %error.details,
            "{}",
            error.message
        );
    }
}
