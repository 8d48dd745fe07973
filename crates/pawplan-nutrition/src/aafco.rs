// ABOUTME: AAFCO compliance scoring of aggregated nutrients on a per-1000-kcal basis
// ABOUTME: Flags deficiencies and excesses, keeps untracked rows as not-evaluated, grades severity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

//! AAFCO Evaluator
//!
//! Requirements are expressed per 1000 kcal of metabolizable energy, so
//! aggregated amounts are normalised by the energy they came with before
//! comparison. Strict inequality defines a violation: a value exactly on a
//! bound is adequate.

use crate::aggregation::NutrientTotals;
use crate::config::GradingConfig;
use pawplan_core::constants::density::AAFCO_REFERENCE_KCAL;
use pawplan_core::errors::{AppError, AppResult};
use pawplan_core::models::AafcoRequirement;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Outcome of one requirement check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AafcoStatus {
    /// Within bounds (bounds inclusive)
    Adequate,
    /// Below the minimum
    Deficient,
    /// Above the maximum
    Excessive,
    /// No tracking data for this nutrient
    NotEvaluated,
}

/// One requirement row evaluated against the diet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AafcoCheck {
    /// Requirement key as supplied
    pub nutrient: String,
    /// Check outcome
    pub status: AafcoStatus,
    /// Measured amount per 1000 kcal; absent when not evaluated
    pub measured_per_1000kcal: Option<f64>,
    /// Required minimum per 1000 kcal
    pub min_per_1000kcal: f64,
    /// Allowed maximum per 1000 kcal
    pub max_per_1000kcal: Option<f64>,
}

/// Checks in requirement order, plus advisory messages
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AafcoEvaluation {
    /// One check per requirement, same order as supplied
    pub checks: Vec<AafcoCheck>,
    /// Deficiency, excess, and insufficient-data messages
    pub warnings: Vec<String>,
}

impl AafcoEvaluation {
    /// Checks with a given status
    pub fn with_status(&self, status: AafcoStatus) -> impl Iterator<Item = &AafcoCheck> {
        self.checks.iter().filter(move |check| check.status == status)
    }

    /// True when every evaluated check is adequate
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.checks.iter().all(|check| {
            matches!(
                check.status,
                AafcoStatus::Adequate | AafcoStatus::NotEvaluated
            )
        })
    }
}

/// Normalise an amount to the AAFCO per-1000-kcal basis
///
/// # Errors
///
/// Returns `DivisionByZero` when `total_kcal` is zero, negative, or not a number
pub fn per_1000kcal(amount: f64, total_kcal: f64) -> AppResult<f64> {
    if !total_kcal.is_finite() || total_kcal <= 0.0 {
        return Err(AppError::zero_kcal());
    }
    Ok(amount / total_kcal * AAFCO_REFERENCE_KCAL)
}

fn check_requirement(
    requirement: &AafcoRequirement,
    totals: &NutrientTotals,
    total_kcal: f64,
    warnings: &mut Vec<String>,
) -> AppResult<AafcoCheck> {
    let key = &requirement.nutrient;
    let min = requirement.min_per_1000kcal;
    let max = requirement.max_per_1000kcal;

    let amount = requirement
        .tracked_nutrient()
        .and_then(|nutrient| totals.amounts.get(&nutrient).copied());
    let Some(amount) = amount else {
        warnings.push(format!("{key}: insufficient data, not evaluated"));
        return Ok(AafcoCheck {
            nutrient: key.clone(),
            status: AafcoStatus::NotEvaluated,
            measured_per_1000kcal: None,
            min_per_1000kcal: min,
            max_per_1000kcal: max,
        });
    };
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::invalid_input(format!(
            "{key}: measured amount must be a non-negative number (got {amount})"
        ))
        .with_details(json!({ "nutrient": key, "amount": amount })));
    }

    let measured = per_1000kcal(amount, total_kcal)?;
    let status = match max {
        _ if measured < min => {
            warnings.push(format!("{key} is below minimum ({measured:.2} < {min})"));
            AafcoStatus::Deficient
        }
        Some(max) if measured > max => {
            warnings.push(format!("{key} is above maximum ({measured:.2} > {max})"));
            AafcoStatus::Excessive
        }
        _ => AafcoStatus::Adequate,
    };

    Ok(AafcoCheck {
        nutrient: key.clone(),
        status,
        measured_per_1000kcal: Some(measured),
        min_per_1000kcal: min,
        max_per_1000kcal: max,
    })
}

/// Evaluate nutrient totals against AAFCO requirement rows
///
/// # Errors
///
/// Returns `DivisionByZero` ("cannot evaluate: zero-kcal recipe") when
/// `total_kcal` is zero, negative, or not a number, and `InvalidInput` when a
/// supplied nutrient amount is negative or not a number.
///
/// A requirement whose nutrient is untracked, or absent from `totals`, is
/// reported as not evaluated rather than deficient.
pub fn evaluate(
    totals: &NutrientTotals,
    total_kcal: f64,
    requirements: &[AafcoRequirement],
) -> AppResult<AafcoEvaluation> {
    if !total_kcal.is_finite() || total_kcal <= 0.0 {
        return Err(AppError::zero_kcal());
    }

    let mut warnings = Vec::new();
    let checks = requirements
        .iter()
        .map(|requirement| check_requirement(requirement, totals, total_kcal, &mut warnings))
        .collect::<AppResult<Vec<_>>>()?;

    debug!(
        total_kcal,
        checks = checks.len(),
        warnings = warnings.len(),
        "Evaluated AAFCO requirements"
    );

    Ok(AafcoEvaluation { checks, warnings })
}

/// Severity grade beyond pass/fail, ordered best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientGrade {
    /// Between 100% and 150% of the minimum
    Excellent,
    /// Adequate
    Good,
    /// Mildly deficient, or close to the maximum
    Caution,
    /// Under half the minimum
    Bad,
    /// Over the maximum
    Dangerous,
}

/// Grade for one evaluated nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedNutrient {
    /// Requirement key
    pub nutrient: String,
    /// Grade
    pub grade: NutrientGrade,
    /// Measured amount as a percentage of the minimum
    pub percent_of_min: f64,
    /// Measured amount as a percentage of the maximum, when bounded
    pub percent_of_max: Option<f64>,
}

/// Per-nutrient grades and the worst of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientGrading {
    /// Grades in requirement order; not-evaluated rows are omitted
    pub nutrients: Vec<GradedNutrient>,
    /// Worst grade across nutrients
    pub overall: NutrientGrade,
    /// Feeding suggestions for bad or dangerous nutrients
    pub recommendations: Vec<String>,
}

fn grade_check(check: &AafcoCheck, measured: f64, config: &GradingConfig) -> GradedNutrient {
    let min = check.min_per_1000kcal;
    let percent_of_min = if min > 0.0 { measured / min * 100.0 } else { 100.0 };
    let percent_of_max = check
        .max_per_1000kcal
        .filter(|max| *max > 0.0)
        .map(|max| measured / max * 100.0);
    let excellent_upper = config.excellent_upper_fraction * 100.0;

    let grade = match check.max_per_1000kcal {
        _ if measured < min * config.severe_deficiency_fraction => NutrientGrade::Bad,
        _ if measured < min => NutrientGrade::Caution,
        Some(max) if measured > max => NutrientGrade::Dangerous,
        Some(max) if measured > max * config.approaching_max_fraction => NutrientGrade::Caution,
        _ if (100.0..=excellent_upper).contains(&percent_of_min) => NutrientGrade::Excellent,
        _ => NutrientGrade::Good,
    };

    GradedNutrient {
        nutrient: check.nutrient.clone(),
        grade,
        percent_of_min,
        percent_of_max,
    }
}

/// Grade every evaluated nutrient
#[must_use]
pub fn grade(evaluation: &AafcoEvaluation, config: &GradingConfig) -> NutrientGrading {
    let nutrients: Vec<GradedNutrient> = evaluation
        .checks
        .iter()
        .filter_map(|check| {
            check
                .measured_per_1000kcal
                .map(|measured| grade_check(check, measured, config))
        })
        .collect();

    let overall = nutrients
        .iter()
        .map(|graded| graded.grade)
        .max()
        .unwrap_or(NutrientGrade::Good);

    let recommendations = nutrients
        .iter()
        .filter_map(|graded| {
            let name = graded.nutrient.replace('_', " ");
            match graded.grade {
                NutrientGrade::Bad => Some(format!("Add more foods rich in {name}")),
                NutrientGrade::Dangerous => {
                    Some(format!("Reduce foods high in {name} immediately"))
                }
                NutrientGrade::Excellent | NutrientGrade::Good | NutrientGrade::Caution => None,
            }
        })
        .collect();

    NutrientGrading {
        nutrients,
        overall,
        recommendations,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pawplan_core::errors::ErrorCode;
    use pawplan_core::models::Nutrient;

    fn totals_with(nutrient: Nutrient, amount: f64) -> NutrientTotals {
        let mut totals = NutrientTotals::default();
        totals.amounts.insert(nutrient, amount);
        totals
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let requirements = [AafcoRequirement::new("calcium", 1250.0, Some(6250.0))];
        let at_min =
            evaluate(&totals_with(Nutrient::Calcium, 1250.0), 1000.0, &requirements).unwrap();
        assert_eq!(at_min.checks[0].status, AafcoStatus::Adequate);
        let at_max =
            evaluate(&totals_with(Nutrient::Calcium, 6250.0), 1000.0, &requirements).unwrap();
        assert_eq!(at_max.checks[0].status, AafcoStatus::Adequate);
        assert!(at_max.warnings.is_empty());
    }

    #[test]
    fn test_warning_format() {
        let requirements = [
            AafcoRequirement::new("protein", 45.0, None),
            AafcoRequirement::new("vitamin_d", 3.125, Some(18.75)),
        ];
        let mut totals = totals_with(Nutrient::Protein, 20.0);
        totals.amounts.insert(Nutrient::VitaminD, 10.0);
        let evaluation = evaluate(&totals, 500.0, &requirements).unwrap();
        assert_eq!(evaluation.warnings[0], "protein is below minimum (40.00 < 45)");
        assert_eq!(evaluation.warnings[1], "vitamin_d is above maximum (20.00 > 18.75)");
        assert_eq!(evaluation.checks[1].status, AafcoStatus::Excessive);
    }

    #[test]
    fn test_untracked_nutrient_is_not_evaluated() {
        let requirements = [
            AafcoRequirement::new("selenium", 0.08, Some(0.5)),
            AafcoRequirement::new("zinc", 20.0, None),
        ];
        let evaluation =
            evaluate(&totals_with(Nutrient::Zinc, 25.0), 1000.0, &requirements).unwrap();
        assert_eq!(evaluation.checks[0].nutrient, "selenium");
        assert_eq!(evaluation.checks[0].status, AafcoStatus::NotEvaluated);
        assert_eq!(evaluation.checks[0].measured_per_1000kcal, None);
        assert_eq!(evaluation.checks[1].status, AafcoStatus::Adequate);
        assert!(evaluation.warnings[0].contains("insufficient data"));
        assert!(evaluation.is_compliant());
    }

    #[test]
    fn test_missing_total_is_not_deficient() {
        let totals = NutrientTotals {
            kcal: 1000.0,
            amounts: [(Nutrient::Protein, 60.0)].into_iter().collect(),
        };
        let requirements = [
            AafcoRequirement::new("protein", 45.0, None),
            AafcoRequirement::new("calcium", 1250.0, Some(6250.0)),
        ];
        let evaluation = evaluate(&totals, 1000.0, &requirements).unwrap();
        assert_eq!(evaluation.checks[0].status, AafcoStatus::Adequate);
        assert_eq!(evaluation.checks[1].status, AafcoStatus::NotEvaluated);
        assert_eq!(evaluation.checks[1].measured_per_1000kcal, None);
        assert_eq!(
            evaluation.warnings,
            ["calcium: insufficient data, not evaluated"]
        );
    }

    #[test]
    fn test_nan_amount_rejected() {
        let requirements = [AafcoRequirement::new("calcium", 1250.0, Some(6250.0))];
        let err = evaluate(
            &totals_with(Nutrient::Calcium, f64::NAN),
            1000.0,
            &requirements,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.starts_with("calcium:"));
    }

    #[test]
    fn test_zero_kcal_guard() {
        let err = evaluate(&NutrientTotals::default(), 0.0, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DivisionByZero);
        assert_eq!(err.message, "cannot evaluate: zero-kcal recipe");
    }

    #[test]
    fn test_grades() {
        let requirements = [
            AafcoRequirement::new("protein", 45.0, None),
            AafcoRequirement::new("fat", 13.75, None),
            AafcoRequirement::new("calcium", 1250.0, Some(6250.0)),
            AafcoRequirement::new("zinc", 20.0, None),
        ];
        let mut totals = totals_with(Nutrient::Protein, 60.0);
        totals.amounts.insert(Nutrient::Fat, 5.0);
        totals.amounts.insert(Nutrient::Calcium, 5500.0);
        totals.amounts.insert(Nutrient::Zinc, 40.0);
        let evaluation = evaluate(&totals, 1000.0, &requirements).unwrap();
        let grading = grade(&evaluation, &GradingConfig::default());

        let grades: Vec<_> = grading.nutrients.iter().map(|g| g.grade).collect();
        assert_eq!(
            grades,
            [
                NutrientGrade::Excellent,
                NutrientGrade::Bad,
                NutrientGrade::Caution,
                NutrientGrade::Good,
            ]
        );
        assert_eq!(grading.overall, NutrientGrade::Bad);
        assert_eq!(grading.recommendations, ["Add more foods rich in fat"]);
    }
}
