// ABOUTME: Pawplan CLI - runs the feeding-plan engine over JSON request files
// ABOUTME: Computes plans, energy requirements, and prints the active AAFCO table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pawplan Contributors
//!
//! Usage:
//! ```bash
//! # Compute a feeding plan from a request file
//! pawplan plan request.json
//!
//! # Energy requirement for a 33 lb neutered adult
//! pawplan energy --weight 33 --unit lbs
//!
//! # Energy requirement for a 3-month-old puppy, factor chosen from age
//! pawplan energy --weight 6 --life-stage puppy --age 0.25 --suggest-puppy-factor
//!
//! # Print the AAFCO requirement table in effect
//! pawplan aafco-defaults
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pawplan::config::load_from_env;
use pawplan::energy::{compute_energy_requirement, puppy_factor_for_age};
use pawplan::errors::AppError;
use pawplan::feeding_plan::compute_feeding_plan;
use pawplan::logging::{LoggingConfig, PlanLogger};
use pawplan::models::{ActivityLevel, Dog, LifeStage, Sex};
use pawplan::request::{load_request, render_error, render_json};
use pawplan::units::WeightUnit;
use pawplan_nutrition::config::NutritionConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "pawplan",
    version,
    about = "Dog feeding-plan nutrition engine",
    long_about = "Computes daily energy needs, per-ingredient portions, and AAFCO nutrient checks for homemade dog food recipes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print compact single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a feeding plan from a JSON request file
    Plan {
        /// Path to the request file
        request: PathBuf,
    },

    /// Compute RER and MER for a dog
    Energy {
        /// Current body weight
        #[arg(long)]
        weight: f64,

        /// Unit of --weight and --target-weight
        #[arg(long, value_enum, default_value = "kg")]
        unit: UnitArg,

        /// Goal body weight
        #[arg(long)]
        target_weight: Option<f64>,

        /// Age in years
        #[arg(long, default_value = "3")]
        age: f64,

        /// Biological sex
        #[arg(long, value_enum, default_value = "female")]
        sex: SexArg,

        /// Dog is not neutered or spayed
        #[arg(long)]
        intact: bool,

        /// Activity level
        #[arg(long, value_enum, default_value = "moderate")]
        activity: ActivityArg,

        /// Life stage
        #[arg(long, value_enum, default_value = "adult")]
        life_stage: LifeStageArg,

        /// Explicit puppy activity factor
        #[arg(long, conflicts_with = "suggest_puppy_factor")]
        puppy_factor: Option<f64>,

        /// Choose the puppy factor from --age
        #[arg(long)]
        suggest_puppy_factor: bool,
    },

    /// Print the AAFCO requirement table in effect
    AafcoDefaults,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Kg,
    Lbs,
}

impl From<UnitArg> for WeightUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Kg => Self::Kg,
            UnitArg::Lbs => Self::Lbs,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Self::Male,
            SexArg::Female => Self::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActivityArg {
    Low,
    Moderate,
    High,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Low => Self::Low,
            ActivityArg::Moderate => Self::Moderate,
            ActivityArg::High => Self::High,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LifeStageArg {
    Puppy,
    Adult,
    Senior,
}

impl From<LifeStageArg> for LifeStage {
    fn from(arg: LifeStageArg) -> Self {
        match arg {
            LifeStageArg::Puppy => Self::Puppy,
            LifeStageArg::Adult => Self::Adult,
            LifeStageArg::Senior => Self::Senior,
        }
    }
}

/// Outcome of a command: JSON for stdout, and whether the engine refused
enum Output {
    Success(String),
    EngineError(String),
}

fn engine_error(error: AppError, pretty: bool) -> Result<Output> {
    PlanLogger::log_engine_error(&error);
    Ok(Output::EngineError(render_error(error, pretty)?))
}

fn run_plan(request: &Path, config: &NutritionConfig, pretty: bool) -> Result<Output> {
    let started = Instant::now();
    let request = match load_request(request) {
        Ok(request) => request,
        Err(error) => return engine_error(error, pretty),
    };
    match compute_feeding_plan(&request, config) {
        Ok(plan) => {
            PlanLogger::log_plan_computed(
                &request.recipe.name,
                plan.target_kcal,
                plan.warnings.len(),
                started.elapsed().as_millis(),
            );
            Ok(Output::Success(render_json(&plan, pretty)?))
        }
        Err(error) => engine_error(error, pretty),
    }
}

fn run(cli: Cli) -> Result<Output> {
    let pretty = !cli.compact;
    let config = match load_from_env() {
        Ok(config) => config,
        Err(error) => return engine_error(error.into(), pretty),
    };

    match cli.command {
        Command::Plan { request } => run_plan(&request, &config, pretty),
        Command::Energy {
            weight,
            unit,
            target_weight,
            age,
            sex,
            intact,
            activity,
            life_stage,
            puppy_factor,
            suggest_puppy_factor,
        } => {
            let dog = Dog {
                age_years: age,
                sex: sex.into(),
                neutered: !intact,
                weight_kg: weight,
                target_weight_kg: target_weight,
                activity_level: activity.into(),
                life_stage: life_stage.into(),
            }
            .with_weight_unit(unit.into());
            let puppy_factor = if suggest_puppy_factor {
                Some(puppy_factor_for_age(age, &config.activity_factors))
            } else {
                puppy_factor
            };
            match compute_energy_requirement(&dog, puppy_factor, &config.activity_factors) {
                Ok(energy) => Ok(Output::Success(render_json(&energy, pretty)?)),
                Err(error) => engine_error(error, pretty),
            }
        }
        Command::AafcoDefaults => Ok(Output::Success(render_json(
            &config.aafco_requirements,
            pretty,
        )?)),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    match run(cli)? {
        Output::Success(json) => {
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Output::EngineError(json) => {
            println!("{json}");
            Ok(ExitCode::from(2))
        }
    }
}
