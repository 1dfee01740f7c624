//! Aggregation of the four severity bands into one flight assessment.
//!
//! Ceiling and visibility are gating factors: they can make conditions
//! worse than what wind and gust alone would indicate, never better. The
//! aggregation is therefore gate-then-degrade rather than a combination
//! table over all eighty-one band products.

use crate::classify::bands::{BandSet, CeilingBand, VisibilityBand, WindBand};
use crate::classify::resolve::ResolvedMetric;
use crate::observations::{CeilingObservation, VisibilityObservation};

/// Overall tri-state flight rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlightRating {
    /// Conditions are within all limits.
    Good,
    /// Flyable with restrictions.
    Caution,
    /// Do not fly.
    NoFly,
}

impl FlightRating {
    /// Stable token for the display collaborator.
    pub fn token(self) -> &'static str {
        match self {
            FlightRating::Good => "GOOD",
            FlightRating::Caution => "CAUTION",
            FlightRating::NoFly => "NO_FLY",
        }
    }

    /// Background color shown behind the whole assessment.
    pub fn background_color(self) -> &'static str {
        match self {
            FlightRating::Good => "green",
            FlightRating::Caution => "yellow",
            FlightRating::NoFly => "red",
        }
    }

    /// Human-readable status line.
    pub fn status_text(self) -> &'static str {
        match self {
            FlightRating::Good => "Good to Fly \u{2191}",
            FlightRating::Caution => "Okay to Fly with Restrictions \u{2194}",
            FlightRating::NoFly => "Do Not Fly \u{2193}",
        }
    }

    /// Worsens the rating by one step, saturating at [`FlightRating::NoFly`].
    fn degrade(self) -> Self {
        match self {
            FlightRating::Good => FlightRating::Caution,
            FlightRating::Caution | FlightRating::NoFly => FlightRating::NoFly,
        }
    }
}

/// Per-field highlight severity for the display collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Caution,
    Warning,
}

impl Highlight {
    pub fn token(self) -> &'static str {
        match self {
            Highlight::None => "NONE",
            Highlight::Caution => "CAUTION",
            Highlight::Warning => "WARNING",
        }
    }

    /// Word color for the highlighted field, if any.
    pub fn color(self) -> Option<&'static str> {
        match self {
            Highlight::None => None,
            Highlight::Caution => Some("orange"),
            Highlight::Warning => Some("pink"),
        }
    }
}

/// Highlight per displayed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldHighlights {
    pub ceiling: Highlight,
    pub visibility: Highlight,
    pub wind: Highlight,
    pub gust: Highlight,
}

/// The aggregator's output for one cycle: the overall rating, the per-field
/// highlights, and the resolved values for display text. Immutable; built
/// once per cycle and discarded after publication.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightAssessment {
    pub rating: FlightRating,
    pub highlights: FieldHighlights,
    pub ceiling: CeilingObservation,
    pub visibility: VisibilityObservation,
    /// Resolved sustained wind; `None` when no source reported it.
    pub wind: Option<ResolvedMetric>,
    /// Resolved gust; `None` when no source reported it.
    pub gust: Option<ResolvedMetric>,
    pub raw_metar: Option<String>,
}

/// Combines the four bands into an overall rating and per-field highlights.
///
/// | wind \ gust | Low     | Medium  | High  |
/// |-------------|---------|---------|-------|
/// | Low         | Good    | Caution | NoFly |
/// | Medium      | Caution | Caution | NoFly |
/// | High        | NoFly   | NoFly   | NoFly |
///
/// The provisional rating above is then degraded one step per unfavorable
/// gating factor: a ceiling below its High band, and Poor visibility.
pub fn aggregate(bands: &BandSet) -> (FlightRating, FieldHighlights) {
    let provisional = match (bands.wind, bands.gust) {
        (WindBand::High, _) | (_, WindBand::High) => FlightRating::NoFly,
        (WindBand::Low, WindBand::Low) => FlightRating::Good,
        _ => FlightRating::Caution,
    };

    let mut rating = provisional;
    if bands.ceiling != CeilingBand::High {
        rating = rating.degrade();
    }
    if bands.visibility == VisibilityBand::Poor {
        rating = rating.degrade();
    }

    let highlights = FieldHighlights {
        ceiling: match bands.ceiling {
            CeilingBand::High => Highlight::None,
            CeilingBand::Medium => Highlight::Caution,
            CeilingBand::Low => Highlight::Warning,
        },
        visibility: match bands.visibility {
            VisibilityBand::Good => Highlight::None,
            VisibilityBand::Poor => Highlight::Warning,
        },
        wind: wind_highlight(bands.wind),
        gust: wind_highlight(bands.gust),
    };

    (rating, highlights)
}

fn wind_highlight(band: WindBand) -> Highlight {
    match band {
        WindBand::Low => Highlight::None,
        WindBand::Medium => Highlight::Caution,
        WindBand::High => Highlight::Warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(
        ceiling: CeilingBand,
        visibility: VisibilityBand,
        wind: WindBand,
        gust: WindBand,
    ) -> BandSet {
        BandSet {
            ceiling,
            visibility,
            wind,
            gust,
        }
    }

    fn rating_of(b: BandSet) -> FlightRating {
        aggregate(&b).0
    }

    #[test]
    fn test_all_favorable_is_good_with_no_highlights() {
        let (rating, highlights) = aggregate(&bands(
            CeilingBand::High,
            VisibilityBand::Good,
            WindBand::Low,
            WindBand::Low,
        ));
        assert_eq!(rating, FlightRating::Good);
        assert_eq!(highlights, FieldHighlights::default());
    }

    #[test]
    fn test_medium_wind_is_caution() {
        let (rating, highlights) = aggregate(&bands(
            CeilingBand::High,
            VisibilityBand::Good,
            WindBand::Medium,
            WindBand::Low,
        ));
        assert_eq!(rating, FlightRating::Caution);
        assert_eq!(highlights.wind, Highlight::Caution);
        assert_eq!(highlights.gust, Highlight::None);
    }

    #[test]
    fn test_high_gust_is_no_fly() {
        let (rating, highlights) = aggregate(&bands(
            CeilingBand::High,
            VisibilityBand::Good,
            WindBand::Low,
            WindBand::High,
        ));
        assert_eq!(rating, FlightRating::NoFly);
        assert_eq!(highlights.gust, Highlight::Warning);
    }

    #[test]
    fn test_ceiling_gate_degrades_one_step() {
        // Calm winds under a medium ceiling: good degrades to caution.
        assert_eq!(
            rating_of(bands(
                CeilingBand::Medium,
                VisibilityBand::Good,
                WindBand::Low,
                WindBand::Low,
            )),
            FlightRating::Caution
        );
        // Medium wind under a medium ceiling: caution degrades to no-fly.
        assert_eq!(
            rating_of(bands(
                CeilingBand::Medium,
                VisibilityBand::Good,
                WindBand::Medium,
                WindBand::Low,
            )),
            FlightRating::NoFly
        );
    }

    #[test]
    fn test_both_gates_degrade_twice() {
        // Calm winds, medium ceiling and poor visibility: two steps down.
        assert_eq!(
            rating_of(bands(
                CeilingBand::Medium,
                VisibilityBand::Poor,
                WindBand::Low,
                WindBand::Low,
            )),
            FlightRating::NoFly
        );
    }

    #[test]
    fn test_gates_never_improve() {
        // A no-fly from winds stays no-fly whatever the gates say.
        assert_eq!(
            rating_of(bands(
                CeilingBand::High,
                VisibilityBand::Good,
                WindBand::High,
                WindBand::High,
            )),
            FlightRating::NoFly
        );
        assert_eq!(
            rating_of(bands(
                CeilingBand::Low,
                VisibilityBand::Poor,
                WindBand::High,
                WindBand::High,
            )),
            FlightRating::NoFly
        );
    }

    #[test]
    fn test_monotonic_in_wind_band() {
        for ceiling in [CeilingBand::Low, CeilingBand::Medium, CeilingBand::High] {
            for visibility in [VisibilityBand::Poor, VisibilityBand::Good] {
                for gust in [WindBand::Low, WindBand::Medium, WindBand::High] {
                    let mut previous = FlightRating::Good;
                    for wind in [WindBand::Low, WindBand::Medium, WindBand::High] {
                        let rating = rating_of(bands(ceiling, visibility, wind, gust));
                        assert!(rating >= previous, "rating improved as wind worsened");
                        previous = rating;
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotonic_in_ceiling_band() {
        for visibility in [VisibilityBand::Poor, VisibilityBand::Good] {
            for wind in [WindBand::Low, WindBand::Medium, WindBand::High] {
                for gust in [WindBand::Low, WindBand::Medium, WindBand::High] {
                    let mut previous = FlightRating::Good;
                    // Walk ceiling from safest to least safe.
                    for ceiling in [CeilingBand::High, CeilingBand::Medium, CeilingBand::Low] {
                        let rating = rating_of(bands(ceiling, visibility, wind, gust));
                        assert!(rating >= previous, "rating improved as ceiling dropped");
                        previous = rating;
                    }
                }
            }
        }
    }

    #[test]
    fn test_highlight_tokens_and_colors() {
        assert_eq!(Highlight::None.token(), "NONE");
        assert_eq!(Highlight::Caution.color(), Some("orange"));
        assert_eq!(Highlight::Warning.color(), Some("pink"));

        assert_eq!(FlightRating::Good.background_color(), "green");
        assert_eq!(FlightRating::Caution.background_color(), "yellow");
        assert_eq!(FlightRating::NoFly.background_color(), "red");
        assert_eq!(FlightRating::NoFly.token(), "NO_FLY");
    }

    #[test]
    fn test_low_ceiling_highlight_is_warning() {
        let (_, highlights) = aggregate(&bands(
            CeilingBand::Low,
            VisibilityBand::Poor,
            WindBand::Low,
            WindBand::Low,
        ));
        assert_eq!(highlights.ceiling, Highlight::Warning);
        assert_eq!(highlights.visibility, Highlight::Warning);
    }
}
