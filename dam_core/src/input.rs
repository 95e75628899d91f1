//! # Design Input
//!
//! Raw hydraulic and material inputs for one dam cross-section. Everything
//! downstream (geometry, forces, stresses) is derived from this value.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::input::DesignInput;
//!
//! let input = DesignInput {
//!     h_max_m: 60.0,
//!     ..DesignInput::default()
//! };
//! assert!(input.validate().is_ok());
//! assert_eq!(input.effective_height_m(), 57.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilometers, KmPerHour};

/// Design parameters and utility factors for a concrete gravity dam.
///
/// All values are metric: lengths in m, unit weights in kN/m³, fetch in km,
/// wind in km/h.
///
/// ## JSON Example
///
/// ```json
/// {
///   "h_max_m": 45.0,
///   "he_m": 3.0,
///   "top_width_m": 7.5,
///   "gamma_c_knm3": 22.0,
///   "gamma_w_knm3": 10.0,
///   "friction_coefficient": 0.75,
///   "fetch_length_km": 5.0,
///   "uplift_factor": 0.5,
///   "wind_velocity_kmh": 128.0,
///   "hw_amplification_factor": 1.33,
///   "freeboard_allowance_m": 0.14
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// Maximum depth of headwater (m)
    pub h_max_m: f64,

    /// Distance from spillway crest to mean water level (m)
    pub he_m: f64,

    /// Width of the dam crest (m)
    pub top_width_m: f64,

    /// Unit weight of concrete (kN/m³)
    pub gamma_c_knm3: f64,

    /// Unit weight of water (kN/m³)
    pub gamma_w_knm3: f64,

    /// Friction coefficient for the sliding check
    pub friction_coefficient: f64,

    /// Fetch length of the reservoir (km)
    pub fetch_length_km: Kilometers,

    /// Uplift reduction factor (0 = drained, 1 = full uplift)
    pub uplift_factor: f64,

    /// Wind velocity (km/h)
    pub wind_velocity_kmh: KmPerHour,

    /// Factor applied to wave height to get the rise of wave at the face
    pub hw_amplification_factor: f64,

    /// Safety freeboard allowance added on top of the wave rise (m)
    pub freeboard_allowance_m: f64,
}

impl Default for DesignInput {
    fn default() -> Self {
        DesignInput {
            h_max_m: 45.0,
            he_m: 3.0,
            top_width_m: 7.5,
            gamma_c_knm3: 22.0,
            gamma_w_knm3: 10.0,
            friction_coefficient: 0.75,
            fetch_length_km: Kilometers(5.0),
            uplift_factor: 0.5,
            wind_velocity_kmh: KmPerHour(128.0),
            hw_amplification_factor: 1.33,
            freeboard_allowance_m: 0.14,
        }
    }
}

impl DesignInput {
    /// Validate input parameters.
    ///
    /// Only sign and finiteness are checked here. `h_max_m <= he_m` is
    /// accepted; a degenerate effective height shows up later as a
    /// division or base-width error.
    pub fn validate(&self) -> CalcResult<()> {
        let non_negative = [
            ("h_max_m", self.h_max_m),
            ("he_m", self.he_m),
            ("top_width_m", self.top_width_m),
            ("friction_coefficient", self.friction_coefficient),
            ("fetch_length_km", self.fetch_length_km.0),
            ("uplift_factor", self.uplift_factor),
            ("wind_velocity_kmh", self.wind_velocity_kmh.0),
            ("hw_amplification_factor", self.hw_amplification_factor),
            ("freeboard_allowance_m", self.freeboard_allowance_m),
        ];
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Value cannot be negative",
                ));
            }
        }

        if self.uplift_factor > 1.0 {
            return Err(CalcError::invalid_input(
                "uplift_factor",
                self.uplift_factor.to_string(),
                "Uplift factor must be between 0 and 1",
            ));
        }

        let unit_weights = [
            ("gamma_c_knm3", self.gamma_c_knm3),
            ("gamma_w_knm3", self.gamma_w_knm3),
        ];
        for (field, value) in unit_weights {
            check_finite(field, value)?;
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Unit weight must be positive",
                ));
            }
        }

        Ok(())
    }

    /// Effective height h = h_max − he (m)
    pub fn effective_height_m(&self) -> f64 {
        self.h_max_m - self.he_m
    }
}

fn check_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(())
}
