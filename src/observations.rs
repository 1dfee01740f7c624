//! Typed observations for one classification cycle.
//!
//! All string sanitization happens here, before any numeric parsing. Nothing
//! downstream of this module ever sees raw source text, and every value is
//! tagged with its unit and source so the resolver can normalize correctly.

use crate::acquire::{MetarRecord, StationRecord};
use crate::error::WxError;

/// Upper bound on a plausible cloud-base height, in feet.
pub const MAX_CEILING_FT: u32 = 100_000;

/// Upper bound on a plausible visibility, in statute miles.
pub const MAX_VISIBILITY_SM: f64 = 100.0;

/// Which of the two observation sources a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The official aerodrome METAR report.
    Aerodrome,
    /// The secondary local weather station.
    Station,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Aerodrome => write!(f, "aerodrome"),
            Source::Station => write!(f, "station"),
        }
    }
}

/// Unit a wind or gust speed was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    Knots,
    Mph,
}

/// Cloud-base height, or one of the two sentinels.
///
/// A missing ceiling is not an error: it means no restricting cloud layer was
/// reported and classifies as the best possible ceiling. `Invalid` marks a
/// reported-but-unreadable value, which the band classifier surfaces as a
/// hard validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeilingObservation {
    Feet(u32),
    Unlimited,
    Invalid,
}

/// Horizontal visibility in statute miles, already validated to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityObservation {
    pub statute_miles: f64,
}

/// One source's wind or gust reading, in the unit that source reports.
///
/// A source that reported nothing (or an unparseable placeholder such as
/// "Not Reported") is an explicit `Unavailable`, never a silent zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindObservation {
    Available {
        speed: f64,
        unit: SpeedUnit,
        source: Source,
    },
    Unavailable {
        source: Source,
    },
}

impl WindObservation {
    pub fn available(speed: f64, unit: SpeedUnit, source: Source) -> Self {
        WindObservation::Available {
            speed,
            unit,
            source,
        }
    }

    pub fn unavailable(source: Source) -> Self {
        WindObservation::Unavailable { source }
    }
}

/// Strips letters, whitespace, and any trailing '+' from a raw numeric field.
///
/// A leading minus sign is deliberately kept: a negative reading must reach
/// the range check and fail there, not be sign-stripped into validity. The
/// trailing '+' covers the METAR "10+" visibility form.
fn sanitize(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| !c.is_ascii_alphabetic() && !c.is_whitespace())
        .collect();
    kept.trim_matches('+').to_string()
}

/// Parses a raw ceiling field into a [`CeilingObservation`].
///
/// A missing or empty field is the "unlimited" sentinel, never an error. A
/// value that sanitizes to something non-numeric is the `Invalid` sentinel;
/// a numeric value outside [0, 100000] ft is a hard `OutOfRange` failure.
pub fn parse_ceiling(raw: Option<&str>) -> Result<CeilingObservation, WxError> {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return Ok(CeilingObservation::Unlimited),
    };

    let cleaned = sanitize(raw);
    let Ok(feet) = cleaned.parse::<i64>() else {
        return Ok(CeilingObservation::Invalid);
    };

    if feet < 0 || feet > MAX_CEILING_FT as i64 {
        return Err(WxError::OutOfRange {
            field: "ceiling",
            value: feet as f64,
            min: 0.0,
            max: MAX_CEILING_FT as f64,
        });
    }

    Ok(CeilingObservation::Feet(feet as u32))
}

/// Parses a raw visibility field into a [`VisibilityObservation`].
///
/// Absent visibility is a `MissingField` failure: the aerodrome always
/// reports it, so there is no safe sentinel to substitute. Values outside
/// [0, 100] sm (including unreadable text) are `OutOfRange`.
pub fn parse_visibility(raw: Option<&str>) -> Result<VisibilityObservation, WxError> {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => {
            return Err(WxError::MissingField {
                field: "visibility",
            });
        }
    };

    let cleaned = sanitize(raw);
    let miles = cleaned.parse::<f64>().unwrap_or(f64::NAN);

    if !(0.0..=MAX_VISIBILITY_SM).contains(&miles) {
        return Err(WxError::OutOfRange {
            field: "visibility",
            value: miles,
            min: 0.0,
            max: MAX_VISIBILITY_SM,
        });
    }

    Ok(VisibilityObservation {
        statute_miles: miles,
    })
}

/// Parses a raw wind or gust field into a [`WindObservation`].
///
/// Anything that does not sanitize to a non-negative number, including the
/// aerodrome's "Not Reported" placeholder, becomes the explicit unavailable
/// variant for that source.
pub fn parse_wind(raw: Option<&str>, unit: SpeedUnit, source: Source) -> WindObservation {
    let Some(raw) = raw else {
        return WindObservation::unavailable(source);
    };

    match sanitize(raw).parse::<f64>() {
        Ok(speed) if speed >= 0.0 => WindObservation::available(speed, unit, source),
        _ => WindObservation::unavailable(source),
    }
}

/// All typed observations feeding one classification cycle.
///
/// Constructed fresh each cycle and passed by value through the pipeline;
/// nothing here survives the cycle that produced it.
#[derive(Debug, Clone)]
pub struct CycleInput {
    pub ceiling: CeilingObservation,
    pub visibility: VisibilityObservation,
    pub wind_primary: WindObservation,
    pub wind_secondary: WindObservation,
    pub gust_primary: WindObservation,
    pub gust_secondary: WindObservation,
    pub raw_metar: Option<String>,
}

impl CycleInput {
    /// Builds the cycle's observations from the two acquisition records.
    ///
    /// Hard parse failures (missing or out-of-range visibility, out-of-range
    /// ceiling) abort the cycle here; per-metric gaps become unavailable
    /// observations and flow through to the resolver's fail-safe path.
    pub fn from_records(metar: &MetarRecord, station: &StationRecord) -> Result<Self, WxError> {
        let ceiling = parse_ceiling(metar.ceiling_ft.as_deref())?;
        let visibility = parse_visibility(metar.visibility_sm.as_deref())?;

        let wind_primary = match metar.wind_speed_kt {
            Some(kt) if kt >= 0.0 => {
                WindObservation::available(kt, SpeedUnit::Knots, Source::Aerodrome)
            }
            _ => WindObservation::unavailable(Source::Aerodrome),
        };
        let gust_primary = match metar.gust_speed_kt {
            Some(kt) if kt >= 0.0 => {
                WindObservation::available(kt, SpeedUnit::Knots, Source::Aerodrome)
            }
            _ => WindObservation::unavailable(Source::Aerodrome),
        };

        let wind_secondary =
            parse_wind(station.wind_speed.as_deref(), SpeedUnit::Mph, Source::Station);
        let gust_secondary =
            parse_wind(station.gust_speed.as_deref(), SpeedUnit::Mph, Source::Station);

        Ok(CycleInput {
            ceiling,
            visibility,
            wind_primary,
            wind_secondary,
            gust_primary,
            gust_secondary,
            raw_metar: metar.raw_text.clone(),
        })
    }
}
