//! Pure threshold mapping from resolved metric values to severity bands.
//!
//! All cut points are half-open exactly as the operating limits define them.
//! For ceiling, `High` is the safest band (the sky is far away); for wind
//! and gust, `High` is the riskiest.

use crate::error::WxError;
use crate::observations::{CeilingObservation, MAX_CEILING_FT, VisibilityObservation};

/// Ceiling severity. Ordered from unsafe to safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CeilingBand {
    /// Below the 500 ft clearance.
    Low,
    /// 500–899 ft.
    Medium,
    /// 900 ft or more, or no ceiling at all.
    High,
}

/// Two-valued visibility band around the 3 sm limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityBand {
    Poor,
    Good,
}

/// Wind or gust severity. Ordered from calm to dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WindBand {
    Low,
    Medium,
    High,
}

/// The four bands feeding one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSet {
    pub ceiling: CeilingBand,
    pub visibility: VisibilityBand,
    pub wind: WindBand,
    pub gust: WindBand,
}

/// Bands a ceiling observation. Unlimited is always the safest band; the
/// invalid sentinel has no safe interpretation and aborts the cycle.
pub fn classify_ceiling(obs: CeilingObservation) -> Result<CeilingBand, WxError> {
    match obs {
        CeilingObservation::Unlimited => Ok(CeilingBand::High),
        CeilingObservation::Feet(ft) if ft >= 900 => Ok(CeilingBand::High),
        CeilingObservation::Feet(ft) if ft >= 500 => Ok(CeilingBand::Medium),
        CeilingObservation::Feet(_) => Ok(CeilingBand::Low),
        CeilingObservation::Invalid => Err(WxError::OutOfRange {
            field: "ceiling",
            value: f64::NAN,
            min: 0.0,
            max: MAX_CEILING_FT as f64,
        }),
    }
}

/// Bands a visibility observation around the 3 sm cut.
pub fn classify_visibility(obs: VisibilityObservation) -> VisibilityBand {
    if obs.statute_miles >= 3.0 {
        VisibilityBand::Good
    } else {
        VisibilityBand::Poor
    }
}

/// Bands a sustained wind speed in knots.
pub fn classify_wind(knots: f64) -> WindBand {
    match knots {
        k if k < 9.6 => WindBand::Low,
        k if k < 15.6 => WindBand::Medium,
        _ => WindBand::High,
    }
}

/// Bands a gust speed in knots.
pub fn classify_gust(knots: f64) -> WindBand {
    match knots {
        k if k < 15.6 => WindBand::Low,
        k if k < 21.7 => WindBand::Medium,
        _ => WindBand::High,
    }
}
