use serde::{Deserialize, Serialize};
use std::fmt;

pub const FULL_CIRCLE: f64 = 360.0;
pub const SIGN_WIDTH: f64 = 30.0;

/// Maps any real longitude into `[0, 360)`. Negative inputs wrap forward.
pub fn normalize_degrees(x: f64) -> f64 {
    let r = x.rem_euclid(FULL_CIRCLE);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= FULL_CIRCLE {
        0.0
    } else {
        r
    }
}

/// Degree/minute/second position inside a 30° sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}°{:02}′{:02}″",
            self.degree, self.minute, self.second
        )
    }
}

/// Splits the in-sign remainder of a longitude into degree/minute/second.
///
/// Seconds are rounded to the nearest integer and carries propagate upward in order
/// (second → minute → degree). A degree carry to 30 wraps to 0: the sign itself comes from the
/// chart service and is never recomputed here.
pub fn decompose_in_sign(total_degrees: f64) -> Dms {
    let within = normalize_degrees(total_degrees) % SIGN_WIDTH;

    let mut degree = within.floor() as u32;
    let minute_float = (within - degree as f64) * 60.0;
    let mut minute = minute_float.floor() as u32;
    let mut second = ((minute_float - minute as f64) * 60.0).round() as u32;

    if second == 60 {
        second = 0;
        minute += 1;
    }
    if minute == 60 {
        minute = 0;
        degree += 1;
    }
    if degree == 30 {
        degree = 0;
    }

    Dms {
        degree,
        minute,
        second,
    }
}

/// A normalized longitude together with its in-sign decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignedAngle {
    pub degrees: f64,
    pub in_sign: Dms,
}

impl SignedAngle {
    pub fn from_longitude(longitude: f64) -> Self {
        Self {
            degrees: normalize_degrees(longitude),
            in_sign: decompose_in_sign(longitude),
        }
    }
}
