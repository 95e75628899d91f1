//! # Gravity Dam CLI
//!
//! Terminal front end for `dam_core`: loads a project file or prompts for
//! the design inputs, runs the stability analysis, and prints a text or
//! JSON report.
//!
//! ```text
//! dam_cli analyze main_dam.toml
//! dam_cli analyze main_dam.json --json --safety-limit 3500
//! dam_cli prompt
//! dam_cli init main_dam.toml
//! ```
//!
//! Set `RUST_LOG=debug` to see every derived quantity.

mod report;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::info;

use dam_core::input::DesignInput;
use dam_core::project::{AnalysisSettings, DamProject};
use dam_core::units::{Kilometers, KmPerHour, Kpa};
use dam_core::{analyze, load_project, save_project, CalcError};

#[derive(Parser)]
#[command(
    name = "dam_cli",
    version,
    about = "Concrete gravity dam stability analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a project file (.toml, or JSON for any other extension)
    Analyze {
        file: PathBuf,

        /// Override the bearing capacity limit from the file (kPa)
        #[arg(long)]
        safety_limit: Option<f64>,

        /// Print the result graph as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Prompt for each design input (blank keeps the default) and analyze
    Prompt {
        /// Bearing capacity limit (kPa)
        #[arg(long, default_value_t = dam_core::stability::DEFAULT_SAFETY_LIMIT_KPA)]
        safety_limit: f64,

        /// Print the result graph as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Write a template project file with default inputs
    Init {
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{} [{}]: ", prompt, default);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_design_input() -> DesignInput {
    let d = DesignInput::default();

    println!("Please enter the following design parameters:");
    DesignInput {
        h_max_m: prompt_f64("Max depth of headwater (m)", d.h_max_m),
        he_m: prompt_f64("Distance from spillway crest to MWL (m)", d.he_m),
        top_width_m: prompt_f64("Width of dam crest (m)", d.top_width_m),
        gamma_c_knm3: prompt_f64("Unit weight of concrete (kN/m³)", d.gamma_c_knm3),
        gamma_w_knm3: prompt_f64("Unit weight of water (kN/m³)", d.gamma_w_knm3),
        friction_coefficient: prompt_f64(
            "Friction coefficient for sliding checks",
            d.friction_coefficient,
        ),
        fetch_length_km: Kilometers(prompt_f64("Fetch length (km)", d.fetch_length_km.0)),
        uplift_factor: prompt_f64("Uplift factor", d.uplift_factor),
        wind_velocity_kmh: KmPerHour(prompt_f64(
            "Wind velocity (km/h)",
            d.wind_velocity_kmh.0,
        )),
        hw_amplification_factor: prompt_f64(
            "Wave height amplification factor",
            d.hw_amplification_factor,
        ),
        freeboard_allowance_m: prompt_f64(
            "Safety freeboard allowance (m)",
            d.freeboard_allowance_m,
        ),
    }
}

fn print_analysis(
    input: &DesignInput,
    settings: &AnalysisSettings,
    title: &str,
    json: bool,
) -> anyhow::Result<()> {
    let analysis = analyze(input, settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!();
        print!("{}", report::render(&analysis, title));
    }
    Ok(())
}

fn run_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    save_project(&DamProject::new("", "", label), path)?;
    println!("Wrote template project to {}", path.display());
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Analyze {
            file,
            safety_limit,
            json,
        } => {
            let mut project = load_project(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            if let Some(limit) = safety_limit {
                project.settings.safety_limit_kpa = Kpa(limit);
            }
            info!("analyzing '{}' from {}", project.meta.label, file.display());

            let title = if project.meta.label.is_empty() {
                "GRAVITY DAM STABILITY ANALYSIS".to_string()
            } else {
                format!("GRAVITY DAM STABILITY ANALYSIS - {}", project.meta.label)
            };
            print_analysis(&project.design, &project.settings, &title, json)
        }
        Command::Prompt { safety_limit, json } => {
            let input = prompt_design_input();
            let settings = AnalysisSettings {
                safety_limit_kpa: Kpa(safety_limit),
            };
            print_analysis(&input, &settings, "GRAVITY DAM STABILITY ANALYSIS", json)
        }
        Command::Init { file, force } => run_init(&file, force),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}
