//! # Analysis Pipeline
//!
//! Runs the whole stability analysis for one dam configuration:
//!
//! ```text
//! DesignInput ─► Geometry + WaveState ─► ForceModel ─► ConditionSums
//!                                                        │
//!                          StabilityVerdict ◄─ SlidingCheck + StressChecks
//! ```
//!
//! Every stage is computed once from the previous one and returned as a
//! single immutable [`DamAnalysis`]. Nothing here prints; rendering is the
//! caller's job.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::analysis::analyze;
//! use dam_core::input::DesignInput;
//! use dam_core::project::AnalysisSettings;
//!
//! let result = analyze(&DesignInput::default(), &AnalysisSettings::default()).unwrap();
//! println!("Sliding: {}", result.verdict.sliding);
//! println!("Safe: {}", result.verdict.is_safe());
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::forces::{ConditionSums, ForceKind, ForceModel, SlidingCheck};
use crate::geometry::{Geometry, WaveState};
use crate::input::DesignInput;
use crate::project::AnalysisSettings;
use crate::stability::StabilityVerdict;

/// Complete result graph for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamAnalysis {
    pub geometry: Geometry,
    pub wave: WaveState,
    pub force_model: ForceModel,
    pub conditions: ConditionSums,
    pub verdict: StabilityVerdict,
}

impl DamAnalysis {
    /// Moment of one force about the toe (kN·m)
    pub fn moment(&self, kind: ForceKind) -> f64 {
        self.force_model.moment(kind)
    }
}

/// Run the analysis.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - an input or setting fails validation, or the
///   base width comes out negative
/// * `CalcError::DivisionError` - a derived denominator is zero
/// * `CalcError::DomainError` - wave or slope formula argument out of range
pub fn analyze(input: &DesignInput, settings: &AnalysisSettings) -> CalcResult<DamAnalysis> {
    input.validate()?;
    settings.validate()?;

    let geometry = Geometry::from_input(input)?;
    let wave = WaveState::from_input(input)?;
    let force_model = ForceModel::new(&geometry, &wave, &input.into());
    let conditions = force_model.condition_sums()?;

    let sliding = SlidingCheck::evaluate(&conditions.reservoir_full, input.friction_coefficient)?;
    let verdict = settings.evaluator().evaluate(&conditions, &geometry, sliding)?;

    info!(
        "analysis complete: h = {:.2} m, B = {:.2} m, sliding {}, stresses {}/{}",
        geometry.effective_height_m,
        geometry.dam_base_width_m,
        if verdict.sliding.safe { "ok" } else { "FAIL" },
        if verdict.reservoir_empty.safe { "ok" } else { "FAIL" },
        if verdict.reservoir_full.safe { "ok" } else { "FAIL" },
    );

    Ok(DamAnalysis {
        geometry,
        wave,
        force_model,
        conditions,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::units::{Kilometers, Kpa};

    const TOL: f64 = 1e-6;

    #[test]
    fn test_end_to_end_reference() {
        let input = DesignInput {
            h_max_m: 45.0,
            he_m: 3.0,
            fetch_length_km: Kilometers(5.0),
            wind_velocity_kmh: crate::units::KmPerHour(128.0),
            ..DesignInput::default()
        };
        let result = analyze(&input, &AnalysisSettings::default()).unwrap();

        let g = result.geometry;
        assert_eq!(g.effective_height_m, 42.0);
        assert!((g.downstream_base_width_m - 31.5).abs() < TOL);
        assert!((g.upstream_base_width_m - 42.0 / 57.0).abs() < TOL);
        assert!((g.dam_base_width_m - 32.236842105).abs() < TOL);
        assert!((g.crest_elevation_m - 2.0 * 42.0 / 9.0).abs() < TOL);
        assert!((result.wave.wave_height_m - 1.167303561).abs() < TOL);

        let full = result.conditions.reservoir_full;
        assert!((full.vertical_sum_kn - 12850.712134947).abs() < TOL);
        assert!((full.horizontal_sum_kn.unwrap() - 8847.251952084).abs() < TOL);

        assert!((result.verdict.sliding.ratio - 0.688463943).abs() < TOL);
        assert!(result.verdict.sliding.safe);
        assert!(result.verdict.reservoir_empty.safe);
        assert!(result.verdict.reservoir_full.safe);
        assert!(!result.verdict.reservoir_full.eccentricity.within_middle_third);
    }

    #[test]
    fn test_moment_matches_force_model() {
        let result = analyze(&DesignInput::default(), &AnalysisSettings::default()).unwrap();
        let expected = result.force_model.forces.fh_kn * result.force_model.lever_arms.fh_m;
        assert_eq!(result.moment(ForceKind::Fh), expected);
    }

    #[test]
    fn test_low_friction_fails_sliding() {
        let input = DesignInput {
            friction_coefficient: 0.5,
            ..DesignInput::default()
        };
        let result = analyze(&input, &AnalysisSettings::default()).unwrap();
        assert!(!result.verdict.sliding.safe);
        assert!(!result.verdict.is_safe());
    }

    #[test]
    fn test_configurable_safety_limit() {
        let settings = AnalysisSettings {
            safety_limit_kpa: Kpa(900.0),
        };
        let result = analyze(&DesignInput::default(), &settings).unwrap();
        // Empty: ~994 kPa effective, full: ~798 kPa
        assert!(!result.verdict.reservoir_empty.safe);
        assert!(result.verdict.reservoir_full.safe);
        assert_eq!(result.verdict.reservoir_full.safety_limit, Kpa(900.0));
    }

    #[test]
    fn test_invalid_input_stops_pipeline() {
        let input = DesignInput {
            gamma_w_knm3: -10.0,
            ..DesignInput::default()
        };
        assert!(matches!(
            analyze(&input, &AnalysisSettings::default()),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_floating_section_is_rejected() {
        // Heavy water and full uplift push the reservoir-full ΣV negative
        let input = DesignInput {
            gamma_w_knm3: 60.0,
            uplift_factor: 1.0,
            ..DesignInput::default()
        };
        match analyze(&input, &AnalysisSettings::default()) {
            Err(CalcError::InvalidInput { field, reason, .. }) => {
                assert_eq!(field, "vertical_sum");
                assert!(reason.starts_with("Reservoir Full"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_height_is_division_error() {
        let input = DesignInput {
            h_max_m: 3.0,
            he_m: 3.0,
            ..DesignInput::default()
        };
        let err = analyze(&input, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_ERROR");
    }

    #[test]
    fn test_result_serializes() {
        let result = analyze(&DesignInput::default(), &AnalysisSettings::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["conditions"]["partial_empty"]["condition"], "partial_empty");
        assert!(json["conditions"]["partial_empty"]["horizontal_sum_kn"].is_null());
        assert_eq!(json["verdict"]["sliding"]["safe"], true);
    }
}
