//! Merging of the two sources' wind readings into one canonical value.
//!
//! Knots are the canonical unit everywhere past this point. The secondary
//! station reports miles per hour and is converted here, and only here.

use crate::error::WxError;
use crate::observations::{Source, SpeedUnit, WindObservation};

/// Fixed conversion factor: knots = mph / 1.151.
pub const MPH_PER_KNOT: f64 = 1.151;

/// The outcome of merging two sources for one metric: the chosen speed in
/// knots and which source it came from. The source tag is informational
/// only, for display attribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMetric {
    pub knots: f64,
    pub source: Source,
}

/// Converts a speed into knots.
pub fn to_knots(speed: f64, unit: SpeedUnit) -> f64 {
    match unit {
        SpeedUnit::Knots => speed,
        SpeedUnit::Mph => speed / MPH_PER_KNOT,
    }
}

/// Picks the higher-risk of the two sources' readings for one metric.
///
/// Both readings are compared in knots. An exact tie favors the primary so
/// no conversion error is taken on for nothing. With one source down the
/// other stands alone; with both down the caller must fail safe.
pub fn resolve(
    metric: &'static str,
    primary: WindObservation,
    secondary: WindObservation,
) -> Result<ResolvedMetric, WxError> {
    let primary = in_knots(primary);
    let secondary = in_knots(secondary);

    match (primary, secondary) {
        (Some(p), Some(s)) => {
            if s.knots > p.knots {
                Ok(s)
            } else {
                Ok(p)
            }
        }
        (Some(p), None) => Ok(p),
        (None, Some(s)) => Ok(s),
        (None, None) => Err(WxError::NoMetricAvailable { metric }),
    }
}

fn in_knots(obs: WindObservation) -> Option<ResolvedMetric> {
    match obs {
        WindObservation::Available {
            speed,
            unit,
            source,
        } => Some(ResolvedMetric {
            knots: to_knots(speed, unit),
            source,
        }),
        WindObservation::Unavailable { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kt(speed: f64) -> WindObservation {
        WindObservation::available(speed, SpeedUnit::Knots, Source::Aerodrome)
    }

    fn mph(speed: f64) -> WindObservation {
        WindObservation::available(speed, SpeedUnit::Mph, Source::Station)
    }

    fn unavailable(source: Source) -> WindObservation {
        WindObservation::unavailable(source)
    }

    #[test]
    fn test_mph_conversion() {
        // 11.51 mph is exactly 10 knots at the fixed factor.
        assert!((to_knots(11.51, SpeedUnit::Mph) - 10.0).abs() < 1e-9);
        assert_eq!(to_knots(7.0, SpeedUnit::Knots), 7.0);
    }

    #[test]
    fn test_converted_secondary_beats_lower_primary() {
        let resolved = resolve("wind", kt(9.0), mph(11.51)).unwrap();
        assert_eq!(resolved.source, Source::Station);
        assert!((resolved.knots - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_higher_primary_wins() {
        // 6 mph is ~5.21 kt, below the 9 kt aerodrome reading.
        let resolved = resolve("wind", kt(9.0), mph(6.0)).unwrap();
        assert_eq!(resolved.source, Source::Aerodrome);
        assert_eq!(resolved.knots, 9.0);
    }

    #[test]
    fn test_tie_favors_primary() {
        let resolved = resolve("wind", kt(10.0), mph(11.51)).unwrap();
        assert_eq!(resolved.source, Source::Aerodrome);
        assert_eq!(resolved.knots, 10.0);
    }

    #[test]
    fn test_single_source_stands_alone() {
        let resolved = resolve("gust", unavailable(Source::Aerodrome), mph(8.0)).unwrap();
        assert_eq!(resolved.source, Source::Station);
        assert!((resolved.knots - 8.0 / MPH_PER_KNOT).abs() < 1e-9);

        let resolved = resolve("gust", kt(12.0), unavailable(Source::Station)).unwrap();
        assert_eq!(resolved.source, Source::Aerodrome);
    }

    #[test]
    fn test_both_unavailable() {
        let err = resolve(
            "wind",
            unavailable(Source::Aerodrome),
            unavailable(Source::Station),
        )
        .unwrap_err();
        assert_eq!(err, WxError::NoMetricAvailable { metric: "wind" });
    }
}
