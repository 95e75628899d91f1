//! # Dam Geometry and Wave Characteristics
//!
//! Sizes a concrete gravity dam cross-section from its [`DesignInput`] and
//! derives the wind-wave state at the upstream face.
//!
//! ## Section Sizing
//!
//! With effective height `h = h_max − he`:
//!
//! ```text
//! downstream base width   = 3h/4
//! upstream base width     = h / (h + 15)
//! upstream slope height   = h/2
//! dam base width          = downstream + upstream base width
//! crest elevation         = (4/3)(h/6) = 2h/9
//! upstream slope length   = crest elevation − upstream base width
//! upstream slope angle    = atan(slope height / upstream base width)
//! ```
//!
//! The upstream slope length can go negative for extreme inputs; it is
//! carried through as-is.
//!
//! ## Wave Height
//!
//! Empirical two-branch formula on fetch `F` (km) and wind `V` (km/h):
//!
//! ```text
//! F >= 32:  hw = 0.032·√(V·F)
//! F <  32:  hw = 0.763 + 0.032·√(V·F) − 0.271·F^¼
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dam_core::geometry::{Geometry, WaveState};
//! use dam_core::input::DesignInput;
//!
//! let input = DesignInput::default();
//! let geometry = Geometry::from_input(&input).unwrap();
//! let wave = WaveState::from_input(&input).unwrap();
//!
//! assert_eq!(geometry.effective_height_m, 42.0);
//! assert!((wave.wave_height_m - 1.1673).abs() < 1e-4);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{checked_div, CalcError, CalcResult};
use crate::input::DesignInput;
use crate::units::{Degrees, Kilometers, KmPerHour, Radians};

/// Fetch length (km) at and above which the long-fetch wave formula applies
pub const LONG_FETCH_THRESHOLD_KM: f64 = 32.0;

/// Offset in the empirical upstream base width rule `h / (h + 15)`
const UPSTREAM_WIDTH_OFFSET_M: f64 = 15.0;

/// Derived cross-section dimensions. All lengths in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Crest width, echoed from the input
    pub top_width_m: f64,

    /// h = h_max − he
    pub effective_height_m: f64,

    /// Base width under the downstream slope
    pub downstream_base_width_m: f64,

    /// Base width under the upstream slope
    pub upstream_base_width_m: f64,

    /// Height of the sloped part of the upstream face
    pub upstream_slope_height_m: f64,

    /// Total base width B = downstream + upstream base width
    pub dam_base_width_m: f64,

    /// Elevation of the crest break
    pub crest_elevation_m: f64,

    /// Crest elevation − upstream base width (may be negative)
    pub upstream_slope_length_m: f64,

    /// Angle of the upstream slope from horizontal
    pub upstream_slope_angle: Degrees,
}

impl Geometry {
    /// Size the dam cross-section.
    ///
    /// # Errors
    ///
    /// * `CalcError::DivisionError` - `h + 15` or the upstream base width is zero
    /// * `CalcError::DomainError` - the slope ratio is not a finite number
    pub fn from_input(input: &DesignInput) -> CalcResult<Self> {
        let h = input.effective_height_m();

        let downstream_base_width_m = 3.0 * h / 4.0;
        let upstream_base_width_m = checked_div(
            h,
            h + UPSTREAM_WIDTH_OFFSET_M,
            "effective_height + 15",
            "upstream base width rule h / (h + 15)",
        )?;
        let upstream_slope_height_m = h / 2.0;
        let dam_base_width_m = downstream_base_width_m + upstream_base_width_m;
        let crest_elevation_m = (4.0 * (h / 6.0)) / 3.0;
        let upstream_slope_length_m = crest_elevation_m - upstream_base_width_m;

        let slope_ratio = checked_div(
            upstream_slope_height_m,
            upstream_base_width_m,
            "upstream_base_width",
            "upstream slope angle",
        )?;
        if !slope_ratio.is_finite() {
            return Err(CalcError::domain(
                "atan",
                slope_ratio,
                "Slope ratio must be a finite real number",
            ));
        }
        let upstream_slope_angle: Degrees = Radians(slope_ratio.atan()).into();

        let geometry = Geometry {
            top_width_m: input.top_width_m,
            effective_height_m: h,
            downstream_base_width_m,
            upstream_base_width_m,
            upstream_slope_height_m,
            dam_base_width_m,
            crest_elevation_m,
            upstream_slope_length_m,
            upstream_slope_angle,
        };
        debug!("sized dam geometry: {:?}", geometry);
        Ok(geometry)
    }
}

/// Which empirical wave-height branch was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchBranch {
    /// F >= 32 km
    LongFetch,
    /// F < 32 km
    ShortFetch,
}

impl FetchBranch {
    /// Select the branch for a fetch length
    pub fn for_fetch(fetch: Kilometers) -> Self {
        if fetch.0 >= LONG_FETCH_THRESHOLD_KM {
            FetchBranch::LongFetch
        } else {
            FetchBranch::ShortFetch
        }
    }
}

/// Wind-wave characteristics at the upstream face. Lengths in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    /// Formula branch used for the wave height
    pub branch: FetchBranch,

    /// Wave height hw
    pub wave_height_m: f64,

    /// Rise of wave at the face = amplification × hw
    pub rise_of_wave_m: f64,

    /// Freeboard = allowance + rise of wave
    pub freeboard_m: f64,

    /// Wave force application point above still water = (3/8)·hw
    pub wave_force_application_point_m: f64,
}

impl WaveState {
    /// Derive the wave state from fetch, wind and the utility factors.
    pub fn from_input(input: &DesignInput) -> CalcResult<Self> {
        let branch = FetchBranch::for_fetch(input.fetch_length_km);
        let wave_height_m = wave_height(input.fetch_length_km, input.wind_velocity_kmh)?;
        let rise_of_wave_m = input.hw_amplification_factor * wave_height_m;
        let freeboard_m = input.freeboard_allowance_m + rise_of_wave_m;
        let wave_force_application_point_m = (3.0 / 8.0) * wave_height_m;

        let wave = WaveState {
            branch,
            wave_height_m,
            rise_of_wave_m,
            freeboard_m,
            wave_force_application_point_m,
        };
        debug!("wave state: {:?}", wave);
        Ok(wave)
    }
}

/// Wave height hw (m), picking the branch by fetch length.
pub fn wave_height(fetch: Kilometers, wind: KmPerHour) -> CalcResult<f64> {
    match FetchBranch::for_fetch(fetch) {
        FetchBranch::LongFetch => long_fetch_wave_height(fetch, wind),
        FetchBranch::ShortFetch => short_fetch_wave_height(fetch, wind),
    }
}

/// `hw = 0.032·√(V·F)`, regardless of fetch.
pub fn long_fetch_wave_height(fetch: Kilometers, wind: KmPerHour) -> CalcResult<f64> {
    Ok(0.032 * sqrt_wind_fetch(fetch, wind)?)
}

/// `hw = 0.763 + 0.032·√(V·F) − 0.271·F^¼`, regardless of fetch.
pub fn short_fetch_wave_height(fetch: Kilometers, wind: KmPerHour) -> CalcResult<f64> {
    if fetch.0 < 0.0 {
        return Err(CalcError::domain(
            "fetch_length^0.25",
            fetch.0,
            "Fetch length must be non-negative",
        ));
    }
    Ok(0.763 + 0.032 * sqrt_wind_fetch(fetch, wind)? - 0.271 * fetch.0.powf(0.25))
}

fn sqrt_wind_fetch(fetch: Kilometers, wind: KmPerHour) -> CalcResult<f64> {
    let product = wind.0 * fetch.0;
    if product < 0.0 {
        return Err(CalcError::domain(
            "sqrt(wind_velocity * fetch_length)",
            product,
            "Wind velocity and fetch length must be non-negative",
        ));
    }
    Ok(product.sqrt())
}
