//! Acquisition collaborators: the aerodrome METAR API and the local station.
//!
//! Both sit behind narrow async traits so the classification core depends
//! only on the records they hand over, never on transport or scraping
//! mechanics. A source that fails after its retry budget yields an explicit
//! unavailable record, not a hang and not a zero.

pub mod aviationweather;
pub mod station;

pub use aviationweather::AviationWeatherClient;
pub use station::HttpStation;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Latest aerodrome report, as raw as the core's parsers need it.
///
/// `ceiling_ft` and `visibility_sm` stay textual because the upstream API
/// mixes numbers with sentinel strings ("10+" visibility, unreadable
/// ceilings); the observation model owns their sanitization. An entirely
/// failed retrieval is the all-`None` default record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetarRecord {
    pub ceiling_ft: Option<String>,
    pub visibility_sm: Option<String>,
    pub wind_speed_kt: Option<f64>,
    pub gust_speed_kt: Option<f64>,
    pub wind_dir_deg: Option<f64>,
    pub temperature_c: Option<f64>,
    pub dew_point_c: Option<f64>,
    pub raw_text: Option<String>,
}

impl MetarRecord {
    /// The explicit empty record handed over when retrieval failed
    /// terminally.
    pub fn unavailable() -> Self {
        MetarRecord::default()
    }
}

/// Latest reading from the secondary local station.
///
/// Values arrive as display text with unit suffixes ("6 mph"); the
/// observation model strips and parses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub wind_speed: Option<String>,
    pub gust_speed: Option<String>,
    pub temperature: Option<String>,
    pub wind_direction: Option<String>,
    pub dew_point: Option<String>,
}

impl StationRecord {
    /// The explicit marker record for a failed scrape or fetch.
    pub fn unavailable() -> Self {
        StationRecord::default()
    }
}

/// Provider of the official aerodrome report.
#[async_trait::async_trait]
pub trait AerodromeSource: Send + Sync {
    /// Returns the latest report, or an error once the internal retry
    /// budget is exhausted.
    async fn latest(&self) -> Result<MetarRecord>;
}

/// Provider of the secondary station reading.
#[async_trait::async_trait]
pub trait StationSource: Send + Sync {
    async fn latest(&self) -> Result<StationRecord>;
}
