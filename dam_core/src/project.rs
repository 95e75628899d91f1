//! # Project Data Structures
//!
//! The `DamProject` struct is the root container for one dam configuration:
//! who it is for, which limits apply, and the design inputs. Projects are
//! stored as JSON or TOML (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! DamProject
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: AnalysisSettings (bearing capacity limit)
//! └── design: DesignInput (hydraulic and material inputs)
//! ```
//!
//! ## TOML Example
//!
//! Only `[design]` is required; missing `meta` and `settings` take defaults.
//!
//! ```toml
//! [settings]
//! safety_limit_kpa = 4000.0
//!
//! [design]
//! h_max_m = 45.0
//! he_m = 3.0
//! top_width_m = 7.5
//! gamma_c_knm3 = 22.0
//! gamma_w_knm3 = 10.0
//! friction_coefficient = 0.75
//! fetch_length_km = 5.0
//! uplift_factor = 0.5
//! wind_velocity_kmh = 128.0
//! hw_amplification_factor = 1.33
//! freeboard_allowance_m = 0.14
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze, DamAnalysis};
use crate::errors::{CalcError, CalcResult};
use crate::input::DesignInput;
use crate::stability::{StabilityEvaluator, DEFAULT_SAFETY_LIMIT_KPA};
use crate::units::Kpa;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamProject {
    /// Project metadata (version, engineer, job info)
    #[serde(default)]
    pub meta: ProjectMetadata,

    /// Analysis limits
    #[serde(default)]
    pub settings: AnalysisSettings,

    /// Dam design inputs
    pub design: DesignInput,
}

impl DamProject {
    /// Create a new project with default design inputs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dam_core::project::DamProject;
    ///
    /// let project = DamProject::new("Jane Engineer", "26-014", "Upper Weir");
    /// assert_eq!(project.meta.engineer, "Jane Engineer");
    /// assert_eq!(project.design.h_max_m, 45.0);
    /// ```
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        DamProject {
            meta: ProjectMetadata {
                engineer: engineer.into(),
                job_id: job_id.into(),
                label: label.into(),
                ..ProjectMetadata::default()
            },
            settings: AnalysisSettings::default(),
            design: DesignInput::default(),
        }
    }

    /// Replace the design inputs
    pub fn with_design(mut self, design: DesignInput) -> Self {
        self.design = design;
        self.touch();
        self
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run the full stability analysis for this project.
    pub fn analyze(&self) -> CalcResult<DamAnalysis> {
        analyze(&self.design, &self.settings)
    }
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    /// Schema version for compatibility checking
    pub version: String,

    /// Responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Dam or section name
    pub label: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ProjectMetadata {
            version: SCHEMA_VERSION.to_string(),
            engineer: String::new(),
            job_id: String::new(),
            label: String::new(),
            created: now,
            modified: now,
        }
    }
}

/// Limits applied by the stability checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Bearing capacity of the foundation (kPa)
    pub safety_limit_kpa: Kpa,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            safety_limit_kpa: Kpa(DEFAULT_SAFETY_LIMIT_KPA),
        }
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> CalcResult<()> {
        let limit = self.safety_limit_kpa.0;
        if !limit.is_finite() || limit <= 0.0 {
            return Err(CalcError::invalid_input(
                "safety_limit_kpa",
                limit.to_string(),
                "Bearing capacity must be a positive number",
            ));
        }
        Ok(())
    }

    /// Stress evaluator configured with these limits
    pub fn evaluator(&self) -> StabilityEvaluator {
        StabilityEvaluator::new(self.safety_limit_kpa)
    }
}
