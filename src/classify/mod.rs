//! The risk classification pipeline.
//!
//! Runs the fixed stage order for one cycle: resolve each wind metric across
//! the two sources, band every metric, then aggregate the bands into an
//! overall flight rating with per-field highlights. Every stage is pure and
//! nothing is retained between cycles.

pub mod bands;
pub mod rating;
pub mod resolve;

use crate::classify::bands::{BandSet, WindBand, classify_ceiling, classify_gust, classify_visibility, classify_wind};
use crate::classify::rating::{FlightAssessment, aggregate};
use crate::classify::resolve::{ResolvedMetric, resolve};
use crate::error::WxError;
use crate::observations::CycleInput;

/// Classifies one cycle's observations into a [`FlightAssessment`].
///
/// A metric with no source at all is substituted as the highest severity
/// band (fail-safe toward no-fly) rather than raised; an invalid ceiling is
/// a hard failure and the cycle produces no assessment.
pub fn assess(input: &CycleInput) -> Result<FlightAssessment, WxError> {
    let (wind, wind_band) = resolve_band(
        resolve("wind", input.wind_primary, input.wind_secondary),
        classify_wind,
    );
    let (gust, gust_band) = resolve_band(
        resolve("gust", input.gust_primary, input.gust_secondary),
        classify_gust,
    );

    let bands = BandSet {
        ceiling: classify_ceiling(input.ceiling)?,
        visibility: classify_visibility(input.visibility),
        wind: wind_band,
        gust: gust_band,
    };

    let (rating, highlights) = aggregate(&bands);

    Ok(FlightAssessment {
        rating,
        highlights,
        ceiling: input.ceiling,
        visibility: input.visibility,
        wind,
        gust,
        raw_metar: input.raw_metar.clone(),
    })
}

fn resolve_band(
    resolved: Result<ResolvedMetric, WxError>,
    classify: fn(f64) -> WindBand,
) -> (Option<ResolvedMetric>, WindBand) {
    match resolved {
        Ok(metric) => (Some(metric), classify(metric.knots)),
        // Both sources down: no value to display, maximum severity.
        Err(_) => (None, WindBand::High),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::rating::FlightRating;
    use crate::observations::{
        CeilingObservation, Source, SpeedUnit, VisibilityObservation, WindObservation,
    };

    fn calm_input() -> CycleInput {
        CycleInput {
            ceiling: CeilingObservation::Feet(1500),
            visibility: VisibilityObservation { statute_miles: 10.0 },
            wind_primary: WindObservation::available(5.0, SpeedUnit::Knots, Source::Aerodrome),
            wind_secondary: WindObservation::available(4.0, SpeedUnit::Mph, Source::Station),
            gust_primary: WindObservation::unavailable(Source::Aerodrome),
            gust_secondary: WindObservation::available(8.0, SpeedUnit::Mph, Source::Station),
            raw_metar: None,
        }
    }

    #[test]
    fn test_calm_cycle_is_good() {
        let assessment = assess(&calm_input()).unwrap();
        assert_eq!(assessment.rating, FlightRating::Good);
        assert_eq!(assessment.wind.unwrap().source, Source::Aerodrome);
        assert_eq!(assessment.gust.unwrap().source, Source::Station);
    }

    #[test]
    fn test_assess_is_pure() {
        let input = calm_input();
        assert_eq!(assess(&input).unwrap(), assess(&input).unwrap());
    }

    #[test]
    fn test_no_wind_source_fails_safe() {
        let mut input = calm_input();
        input.wind_primary = WindObservation::unavailable(Source::Aerodrome);
        input.wind_secondary = WindObservation::unavailable(Source::Station);

        let assessment = assess(&input).unwrap();
        assert!(assessment.wind.is_none());
        // High wind band forces the rating at least as bad as Caution.
        assert_ne!(assessment.rating, FlightRating::Good);
        assert_eq!(assessment.rating, FlightRating::NoFly);
    }

    #[test]
    fn test_invalid_ceiling_aborts_cycle() {
        let mut input = calm_input();
        input.ceiling = CeilingObservation::Invalid;

        assert!(matches!(
            assess(&input),
            Err(WxError::OutOfRange { field: "ceiling", .. })
        ));
    }
}
