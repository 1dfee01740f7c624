//! Client for the aviationweather.gov METAR data API.

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use super::{AerodromeSource, MetarRecord};
use crate::fetch::{BasicClient, fetch_with_retry};

const DEFAULT_BASE_URL: &str = "https://aviationweather.gov";
const DEFAULT_ATTEMPTS: u32 = 5;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Fetches the latest METAR for one aerodrome as geojson.
///
/// The `source` may also be a local file path, which is handy for replaying
/// captured responses.
pub struct AviationWeatherClient {
    source: String,
    attempts: u32,
    retry_delay: Duration,
    http: BasicClient,
}

impl AviationWeatherClient {
    /// Builds a client for the official API, querying the given station id
    /// (e.g. "KSLC").
    pub fn for_airport(station_id: &str) -> Self {
        let source = format!(
            "{DEFAULT_BASE_URL}/api/data/metar?ids={station_id}&format=geojson&taf=false"
        );
        Self::from_source(source)
    }

    /// Builds a client reading from an explicit URL or file path.
    pub fn from_source(source: String) -> Self {
        Self {
            source,
            attempts: DEFAULT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            http: BasicClient::new(),
        }
    }
}

#[async_trait::async_trait]
impl AerodromeSource for AviationWeatherClient {
    #[tracing::instrument(skip(self), fields(source = %self.source))]
    async fn latest(&self) -> Result<MetarRecord> {
        let bytes = if self.source.starts_with("http") {
            fetch_with_retry(&self.http, &self.source, self.attempts, self.retry_delay).await?
        } else {
            std::fs::read(&self.source)?
        };
        debug!(bytes = bytes.len(), "METAR response received");
        parse_metar_geojson(&bytes)
    }
}

/// Extracts a [`MetarRecord`] from a geojson METAR response.
///
/// Walks `features[].properties`, keeping only the fields the pipeline
/// consumes. The API reports ceiling in hundreds of feet; a `ceil` value
/// that is present but not numeric keeps its raw text so the observation
/// model can flag it as unreadable. A response with no features yields the
/// empty record.
pub fn parse_metar_geojson(bytes: &[u8]) -> Result<MetarRecord> {
    let json: serde_json::Value = serde_json::from_slice(bytes)?;
    let mut record = MetarRecord::default();

    let Some(features) = json["features"].as_array() else {
        return Ok(record);
    };

    for feature in features {
        let Some(props) = feature["properties"].as_object() else {
            continue;
        };

        for (key, value) in props {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "ceil" => {
                    record.ceiling_ft = Some(match value.as_f64() {
                        Some(hundreds) => format!("{}", (hundreds * 100.0).round() as i64),
                        None => value.as_str().unwrap_or("unreadable").to_string(),
                    });
                }
                "visib" => record.visibility_sm = Some(json_text(value)),
                "wspd" => record.wind_speed_kt = value.as_f64(),
                "wgst" => record.gust_speed_kt = value.as_f64(),
                "wdir" => record.wind_dir_deg = value.as_f64(),
                "temp" => record.temperature_c = value.as_f64(),
                "dewp" => record.dew_point_c = value.as_f64(),
                "rawOb" => record.raw_text = value.as_str().map(str::to_string),
                _ => {}
            }
        }
    }

    Ok(record)
}

fn json_text(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
