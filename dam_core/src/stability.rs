//! # Stability Evaluator
//!
//! Eccentricity and base-pressure checks for the reservoir-empty and
//! reservoir-full conditions.
//!
//! ## Formulas
//!
//! ```text
//! e      = ΣM / ΣV, clamped to B/6 (middle third)
//! p_heel = (ΣV/B)(1 − 6e/B)
//! p_toe  = (ΣV/B)(1 + 6e/B)
//! φ      = 90° − upstream slope angle
//! p_eff  = p_toe · (1 + tan²φ)
//! ```
//!
//! A condition is safe when both `p_heel` and `p_eff` are strictly below the
//! bearing capacity limit.
//!
//! The clamp hides resultants that fall outside the middle third. The raw
//! eccentricity and a `within_middle_third` flag are kept in [`Eccentricity`]
//! so the caller can see it.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{checked_div, CalcError, CalcResult};
use crate::forces::{ConditionStatus, ConditionSums, LoadCondition, SlidingCheck};
use crate::geometry::Geometry;
use crate::units::{Degrees, Kpa};

/// Default bearing capacity of the foundation rock (kPa)
pub const DEFAULT_SAFETY_LIMIT_KPA: f64 = 4000.0;

/// Eccentricity of the resultant from the base reference (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eccentricity {
    /// ΣM / ΣV before clamping
    pub raw_m: f64,
    /// min(raw, B/6), used for the stresses
    pub clamped_m: f64,
    /// B/6
    pub middle_third_limit_m: f64,
    /// |raw| ≤ B/6
    pub within_middle_third: bool,
}

impl Eccentricity {
    /// Compute e = ΣM / ΣV and apply the middle-third clamp.
    pub fn compute(status: &ConditionStatus, dam_base_width_m: f64) -> CalcResult<Self> {
        let raw_m = checked_div(
            status.moment_sum_knm,
            status.vertical_sum_kn,
            "vertical_sum",
            "eccentricity",
        )?;
        let middle_third_limit_m = dam_base_width_m / 6.0;
        let within_middle_third = raw_m.abs() <= middle_third_limit_m;
        if !within_middle_third {
            warn!(
                "{}: eccentricity {:.3} m outside middle third (B/6 = {:.3} m)",
                status.condition, raw_m, middle_third_limit_m
            );
        }

        Ok(Eccentricity {
            raw_m,
            clamped_m: raw_m.min(middle_third_limit_m),
            middle_third_limit_m,
            within_middle_third,
        })
    }
}

/// Base pressures and verdict for one loading condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressCheck {
    pub condition: LoadCondition,
    pub eccentricity: Eccentricity,
    /// (ΣV/B)(1 − 6e/B)
    pub heel_stress: Kpa,
    /// (ΣV/B)(1 + 6e/B)
    pub toe_stress: Kpa,
    /// p_toe · (1 + tan²φ)
    pub effective_vertical_stress: Kpa,
    /// φ = 90° − upstream slope angle
    pub phi: Degrees,
    /// Limit the stresses were checked against
    pub safety_limit: Kpa,
    /// Both heel and effective stress strictly below the limit
    pub safe: bool,
}

impl fmt::Display for StressCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Heel Stress = {:.2} kPa, Effective Vertical Stress = {:.2} kPa",
            if self.safe { "Safe" } else { "Unsafe" },
            self.heel_stress.0,
            self.effective_vertical_stress.0
        )
    }
}

/// Sliding and bearing verdicts for a full analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityVerdict {
    pub sliding: SlidingCheck,
    pub reservoir_empty: StressCheck,
    pub reservoir_full: StressCheck,
}

impl StabilityVerdict {
    /// True when sliding and both stress checks pass
    pub fn is_safe(&self) -> bool {
        self.sliding.safe && self.reservoir_empty.safe && self.reservoir_full.safe
    }

    /// Stress checks in reporting order
    pub fn stress_checks(&self) -> [&StressCheck; 2] {
        [&self.reservoir_empty, &self.reservoir_full]
    }
}

/// Evaluates base stresses against a bearing capacity limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityEvaluator {
    safety_limit: Kpa,
}

impl Default for StabilityEvaluator {
    fn default() -> Self {
        StabilityEvaluator::new(Kpa(DEFAULT_SAFETY_LIMIT_KPA))
    }
}

impl StabilityEvaluator {
    pub fn new(safety_limit: Kpa) -> Self {
        StabilityEvaluator { safety_limit }
    }

    pub fn safety_limit(&self) -> Kpa {
        self.safety_limit
    }

    /// Stress check for a single condition.
    ///
    /// # Errors
    ///
    /// * `CalcError::DivisionError` - ΣV or the base width is zero
    /// * `CalcError::InvalidInput` - the base width or ΣV is negative
    pub fn check_condition(
        &self,
        status: &ConditionStatus,
        geometry: &Geometry,
    ) -> CalcResult<StressCheck> {
        let b = geometry.dam_base_width_m;
        if b < 0.0 {
            return Err(CalcError::invalid_input(
                "dam_base_width",
                b.to_string(),
                "Base width is negative; effective height must be positive",
            ));
        }
        status.require_downward()?;
        let mean_pressure =
            checked_div(status.vertical_sum_kn, b, "dam_base_width", "base pressure")?;
        let eccentricity = Eccentricity::compute(status, b)?;
        let e = eccentricity.clamped_m;

        let heel_stress = Kpa(mean_pressure * (1.0 - 6.0 * e / b));
        let toe_stress = Kpa(mean_pressure * (1.0 + 6.0 * e / b));

        let phi = geometry.upstream_slope_angle.complement();
        let effective_vertical_stress = toe_stress * (1.0 + phi.tan().powi(2));

        let safe = heel_stress < self.safety_limit && effective_vertical_stress < self.safety_limit;
        let check = StressCheck {
            condition: status.condition,
            eccentricity,
            heel_stress,
            toe_stress,
            effective_vertical_stress,
            phi,
            safety_limit: self.safety_limit,
            safe,
        };
        if safe {
            debug!("{}", check);
        } else {
            warn!("{} - {}", status.condition, check);
        }
        Ok(check)
    }

    /// Stress checks for reservoir-empty and reservoir-full, combined with
    /// the sliding check into a [`StabilityVerdict`].
    pub fn evaluate(
        &self,
        sums: &ConditionSums,
        geometry: &Geometry,
        sliding: SlidingCheck,
    ) -> CalcResult<StabilityVerdict> {
        Ok(StabilityVerdict {
            sliding,
            reservoir_empty: self.check_condition(&sums.reservoir_empty, geometry)?,
            reservoir_full: self.check_condition(&sums.reservoir_full, geometry)?,
        })
    }
}
