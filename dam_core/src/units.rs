//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in dam analysis. These are
//! plain f64 newtypes so JSON serialization stays clean (just numbers).
//!
//! ## Metric Units
//!
//! Lengths (m), unit weights (kN/m³), forces (kN per meter run) and
//! moments (kN·m per meter run) stay plain `f64` with a unit suffix in the
//! field name. Newtypes are reserved for the places where a mix-up is easy:
//!
//! - Wave inputs: fetch in kilometers (not meters), wind in km/h
//! - Stress: kilopascals (kPa)
//! - Angle: degrees, radians
//!
//! ## Example
//!
//! ```rust
//! use dam_core::units::{Degrees, Radians, Kpa};
//!
//! let angle = Degrees(45.0);
//! let rad: Radians = angle.into();
//! assert!((rad.0 - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
//!
//! let limit = Kpa(4000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Wave Input Units
// ============================================================================

/// Fetch length in kilometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilometers(pub f64);

/// Wind velocity in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KmPerHour(pub f64);

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kpa(pub f64);

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Degrees {
    /// Complementary angle (90° − self)
    pub fn complement(self) -> Self {
        Degrees(90.0 - self.0)
    }

    /// Tangent of the angle
    pub fn tan(self) -> f64 {
        Radians::from(self).0.tan()
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Kilometers);
impl_arithmetic!(KmPerHour);
impl_arithmetic!(Kpa);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
