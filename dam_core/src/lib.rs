//! # dam_core - Concrete Gravity Dam Stability Engine
//!
//! `dam_core` sizes a concrete gravity dam cross-section from a handful of
//! hydraulic and material inputs, computes the forces acting on it, and
//! checks it against sliding and foundation bearing stress. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Each analysis is a pure function from input to results
//! - **Immutable results**: Every stage is computed once and never mutated
//! - **Rich Errors**: Structured error types, not just strings
//! - **Numbers, not text**: Results are plain records; rendering is the caller's job
//!
//! ## Quick Start
//!
//! ```rust
//! use dam_core::analysis::analyze;
//! use dam_core::input::DesignInput;
//! use dam_core::project::AnalysisSettings;
//!
//! let result = analyze(&DesignInput::default(), &AnalysisSettings::default()).unwrap();
//! assert_eq!(result.geometry.effective_height_m, 42.0);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Raw design inputs and validation
//! - [`geometry`] - Section sizing and wave characteristics
//! - [`forces`] - Forces, lever arms, condition sums, sliding check
//! - [`stability`] - Eccentricity, base stresses, stability verdicts
//! - [`analysis`] - The full pipeline
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON/TOML project files with atomic saves

pub mod analysis;
pub mod errors;
pub mod file_io;
pub mod forces;
pub mod geometry;
pub mod input;
pub mod project;
pub mod stability;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{analyze, DamAnalysis};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use input::DesignInput;
pub use project::{AnalysisSettings, DamProject, ProjectMetadata};
