//! Publishing of per-cycle assessments.
//!
//! [`AssessmentRecord`] is the flat, read-only contract the display side
//! consumes: rating and color tokens, per-field highlights, and the resolved
//! display values. Records are logged as JSON and appended to a CSV history.
//! No classification happens here, only formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::classify::rating::FlightAssessment;
use crate::observations::CeilingObservation;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    pub timestamp: DateTime<Utc>,

    pub rating: &'static str,
    pub status: &'static str,
    pub background_color: &'static str,

    pub ceiling: String,
    pub ceiling_highlight: &'static str,
    pub ceiling_color: Option<&'static str>,

    pub visibility_sm: f64,
    pub visibility_highlight: &'static str,
    pub visibility_color: Option<&'static str>,

    pub wind_kt: Option<f64>,
    pub wind_source: Option<String>,
    pub wind_highlight: &'static str,
    pub wind_color: Option<&'static str>,

    pub gust_kt: Option<f64>,
    pub gust_source: Option<String>,
    pub gust_highlight: &'static str,
    pub gust_color: Option<&'static str>,

    pub raw_metar: Option<String>,
}

impl AssessmentRecord {
    /// Flattens a [`FlightAssessment`] into the published record.
    pub fn from_assessment(assessment: &FlightAssessment) -> Self {
        let highlights = assessment.highlights;

        AssessmentRecord {
            timestamp: Utc::now(),
            rating: assessment.rating.token(),
            status: assessment.rating.status_text(),
            background_color: assessment.rating.background_color(),
            ceiling: ceiling_text(assessment.ceiling),
            ceiling_highlight: highlights.ceiling.token(),
            ceiling_color: highlights.ceiling.color(),
            visibility_sm: assessment.visibility.statute_miles,
            visibility_highlight: highlights.visibility.token(),
            visibility_color: highlights.visibility.color(),
            wind_kt: assessment.wind.map(|m| round_tenth(m.knots)),
            wind_source: assessment.wind.map(|m| m.source.to_string()),
            wind_highlight: highlights.wind.token(),
            wind_color: highlights.wind.color(),
            gust_kt: assessment.gust.map(|m| round_tenth(m.knots)),
            gust_source: assessment.gust.map(|m| m.source.to_string()),
            gust_highlight: highlights.gust.token(),
            gust_color: highlights.gust.color(),
            raw_metar: assessment.raw_metar.clone(),
        }
    }
}

fn ceiling_text(ceiling: CeilingObservation) -> String {
    match ceiling {
        CeilingObservation::Feet(ft) => format!("{ft} ft"),
        CeilingObservation::Unlimited => "unlimited".to_string(),
        CeilingObservation::Invalid => "unreadable".to_string(),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Logs an assessment using Rust's debug pretty-print format.
pub fn print_pretty(record: &AssessmentRecord) {
    debug!("{:#?}", record);
}

/// Logs an assessment as pretty-printed JSON.
pub fn print_json(record: &AssessmentRecord) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Appends an [`AssessmentRecord`] as a row to a CSV history file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &AssessmentRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
