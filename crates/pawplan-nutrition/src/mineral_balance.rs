// ABOUTME: Calcium to phosphorus ratio analysis for homemade recipes
// ABOUTME: Classifies the ratio into bands and sizes an eggshell-powder calcium top-up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use crate::config::MineralBalanceConfig;
use serde::{Deserialize, Serialize};

/// Band a Ca:P ratio falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalciumPhosphorusStatus {
    /// Inside the optimal band
    Optimal,
    /// Inside the acceptable band but outside the optimal one
    Acceptable,
    /// Below the acceptable band
    Low,
    /// Above the acceptable band
    High,
    /// No phosphorus, ratio undefined
    Unknown,
}

/// Ca:P analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralBalance {
    /// Total calcium (mg)
    pub calcium_mg: f64,
    /// Total phosphorus (mg)
    pub phosphorus_mg: f64,
    /// Calcium divided by phosphorus
    pub ratio: Option<f64>,
    /// Band
    pub status: CalciumPhosphorusStatus,
    /// Calcium needed to reach the bottom of the optimal band (mg)
    pub calcium_gap_mg: Option<f64>,
    /// Eggshell powder that closes the gap (g)
    pub eggshell_powder_g: Option<f64>,
    /// Human-readable summary
    pub message: String,
}

impl MineralBalance {
    /// Whether the plan should carry `message` as a warning
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        matches!(
            self.status,
            CalciumPhosphorusStatus::Low | CalciumPhosphorusStatus::High
        )
    }
}

/// Classify the calcium:phosphorus ratio
#[must_use]
pub fn analyze_calcium_phosphorus(
    calcium_mg: f64,
    phosphorus_mg: f64,
    config: &MineralBalanceConfig,
) -> MineralBalance {
    let mut balance = MineralBalance {
        calcium_mg,
        phosphorus_mg,
        ratio: None,
        status: CalciumPhosphorusStatus::Unknown,
        calcium_gap_mg: None,
        eggshell_powder_g: None,
        message: "Ca:P ratio unknown: recipe supplies no phosphorus".to_owned(),
    };
    if phosphorus_mg <= 0.0 {
        return balance;
    }

    let ratio = calcium_mg / phosphorus_mg;
    let target = format!("target {}-{}:1", config.optimal_min, config.optimal_max);
    balance.ratio = Some(ratio);

    if ratio < config.acceptable_min {
        let gap = phosphorus_mg.mul_add(config.optimal_min, -calcium_mg);
        balance.status = CalciumPhosphorusStatus::Low;
        balance.calcium_gap_mg = Some(gap);
        balance.eggshell_powder_g = Some(gap / config.eggshell_calcium_mg_per_g);
        balance.message = format!("Ca:P ratio {ratio:.2}:1 is too low ({target})");
    } else if ratio > config.acceptable_max {
        balance.status = CalciumPhosphorusStatus::High;
        balance.message = format!("Ca:P ratio {ratio:.2}:1 is too high ({target})");
    } else if (config.optimal_min..=config.optimal_max).contains(&ratio) {
        balance.status = CalciumPhosphorusStatus::Optimal;
        balance.message = format!("Ca:P ratio {ratio:.2}:1 is optimal");
    } else {
        balance.status = CalciumPhosphorusStatus::Acceptable;
        balance.message = format!("Ca:P ratio {ratio:.2}:1 is acceptable ({target})");
    }
    balance
}
