// ABOUTME: Per-ingredient safety limits matched by ingredient name
// ABOUTME: Caps on energy share, daily mass, and weight-scaled daily volume, reported as advisories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors

use crate::config::{SafetyLimitsConfig, SafetyRule};
use crate::portions::Portion;
use pawplan_core::models::QuantityKind;
use pawplan_core::units::{convert_weight, format_weight, WeightUnit};
use tracing::warn;

fn matches_rule(rule: &SafetyRule, ingredient_name: &str) -> bool {
    ingredient_name
        .to_lowercase()
        .contains(&rule.name_contains.to_lowercase())
}

fn violations_for(rule: &SafetyRule, portion: &Portion, weight_kg: f64) -> Vec<String> {
    let mut messages = Vec::new();
    let name = &portion.ingredient_name;

    if let Some(limit) = rule.max_energy_share {
        if portion.proportion > limit {
            messages.push(format!(
                "{name} exceeds safe limit: {:.1}% of homemade energy (max {:.1}%)",
                portion.proportion * 100.0,
                limit * 100.0
            ));
        }
    }
    if let (Some(limit), Some(grams)) = (rule.max_grams_per_day, portion.grams_per_day) {
        if grams > limit {
            messages.push(format!(
                "{name} exceeds safe limit: {grams:.1} g/day (max {limit} g)"
            ));
        }
    }
    if let Some(per_kg) = rule.max_ml_per_kg_per_day {
        let volume = portion.quantity_kind == QuantityKind::Milliliters;
        let limit = per_kg * weight_kg;
        if volume && portion.amount_per_day > limit {
            let lbs = convert_weight(weight_kg, WeightUnit::Kg, WeightUnit::Lbs);
            let unit = portion.quantity_kind.abbreviation();
            messages.push(format!(
                "{name} may exceed safe limit for a {} dog: {:.1} {unit}/day (max {limit:.1} {unit})",
                format_weight(lbs, WeightUnit::Lbs),
                portion.amount_per_day
            ));
        }
    }
    messages
}

/// Check allocated portions against the configured safety rules
///
/// Returns one advisory message per broken limit, in portion order.
/// Volume limits scale with `weight_kg`.
#[must_use]
pub fn check_safety_limits(
    portions: &[Portion],
    weight_kg: f64,
    config: &SafetyLimitsConfig,
) -> Vec<String> {
    let messages: Vec<String> = portions
        .iter()
        .flat_map(|portion| {
            config
                .rules
                .iter()
                .filter(|rule| matches_rule(rule, &portion.ingredient_name))
                .flat_map(|rule| violations_for(rule, portion, weight_kg))
        })
        .collect();

    if !messages.is_empty() {
        warn!(violations = messages.len(), "Ingredient safety limits exceeded");
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portion(name: &str, proportion: f64, grams: f64) -> Portion {
        Portion {
            ingredient_name: name.to_owned(),
            quantity_kind: QuantityKind::Grams,
            proportion,
            kcal_per_day: 0.0,
            amount_per_day: grams,
            amount_per_meal: grams / 2.0,
            grams_per_day: Some(grams),
            grams_per_meal: Some(grams / 2.0),
            teaspoons_per_meal: None,
        }
    }

    #[test]
    fn test_liver_share_limit() {
        let config = SafetyLimitsConfig::default();
        let ok = [portion("Beef Liver, cooked", 0.05, 30.0)];
        assert!(check_safety_limits(&ok, 15.0, &config).is_empty());

        let heavy = [portion("Beef Liver, cooked", 0.08, 50.0)];
        assert_eq!(
            check_safety_limits(&heavy, 15.0, &config),
            ["Beef Liver, cooked exceeds safe limit: 8.0% of homemade energy (max 5.0%)"]
        );
    }

    #[test]
    fn test_turmeric_mass_limit() {
        let config = SafetyLimitsConfig::default();
        let warnings = check_safety_limits(&[portion("Ground Turmeric", 0.01, 3.0)], 15.0, &config);
        assert_eq!(warnings, ["Ground Turmeric exceeds safe limit: 3.0 g/day (max 2 g)"]);
    }

    fn oil(name: &str, ml_per_day: f64) -> Portion {
        Portion {
            ingredient_name: name.to_owned(),
            quantity_kind: QuantityKind::Milliliters,
            proportion: 0.1,
            kcal_per_day: ml_per_day * 8.6,
            amount_per_day: ml_per_day,
            amount_per_meal: ml_per_day / 2.0,
            grams_per_day: None,
            grams_per_meal: None,
            teaspoons_per_meal: Some(ml_per_day / 10.0),
        }
    }

    #[test]
    fn test_coconut_oil_scales_with_body_weight() {
        let config = SafetyLimitsConfig::default();
        // 30 lb dog: 5 ml per day
        let weight_kg = convert_weight(30.0, WeightUnit::Lbs, WeightUnit::Kg);
        assert!(check_safety_limits(&[oil("Coconut Oil", 4.9)], weight_kg, &config).is_empty());

        let warnings = check_safety_limits(&[oil("Coconut Oil", 7.5)], weight_kg, &config);
        assert_eq!(
            warnings,
            ["Coconut Oil may exceed safe limit for a 30.0 lbs dog: 7.5 ml/day (max 5.0 ml)"]
        );

        // 60 lb dog takes the same volume safely
        let heavier = convert_weight(60.0, WeightUnit::Lbs, WeightUnit::Kg);
        assert!(check_safety_limits(&[oil("Coconut Oil", 7.5)], heavier, &config).is_empty());
    }

    #[test]
    fn test_volume_limit_ignores_mass_portions() {
        let config = SafetyLimitsConfig::default();
        let flakes = [portion("Coconut flakes", 0.02, 20.0)];
        assert!(check_safety_limits(&flakes, 5.0, &config).is_empty());
    }
}
