//! Error taxonomy for the classification pipeline.
//!
//! Parsing and resolution failures are typed so that callers can tell a
//! recoverable gap (a source that simply has no data) from a hard validation
//! failure that must abort the cycle.

use thiserror::Error;

use crate::observations::Source;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WxError {
    /// A metric that the source should report is absent entirely.
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },

    /// A value parsed but lies outside its physical bounds, or did not parse
    /// at all (`value` is NaN in that case).
    #[error("{field} value {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An entire source failed upstream of the classification core.
    #[error("{0} source is unavailable")]
    SourceUnavailable(Source),

    /// Both sources failed for one metric; the aggregator substitutes the
    /// highest severity band instead of propagating this.
    #[error("no source reported {metric}")]
    NoMetricAvailable { metric: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = WxError::MissingField {
            field: "visibility",
        };
        assert_eq!(e.to_string(), "required field 'visibility' is missing");

        let e = WxError::OutOfRange {
            field: "visibility",
            value: -5.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(e.to_string(), "visibility value -5 is outside [0, 100]");

        let e = WxError::SourceUnavailable(Source::Station);
        assert_eq!(e.to_string(), "station source is unavailable");

        let e = WxError::NoMetricAvailable { metric: "gust" };
        assert_eq!(e.to_string(), "no source reported gust");
    }
}
