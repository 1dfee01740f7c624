//! Client for the secondary local station.
//!
//! The station publishes a small JSON summary of its latest reading. How
//! that summary is produced (scraper, export endpoint, cron job) is the
//! station's business; this client only fetches and deserializes it.

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use super::{StationRecord, StationSource};
use crate::fetch::{BasicClient, fetch_with_retry};

const DEFAULT_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Fetches the station's JSON summary from a URL or local file path.
pub struct HttpStation {
    source: String,
    attempts: u32,
    retry_delay: Duration,
    http: BasicClient,
}

impl HttpStation {
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
impl StationSource for HttpStation {
    #[tracing::instrument(skip(self), fields(source = %self.source))]
    async fn latest(&self) -> Result<StationRecord> {
        let bytes = if self.source.starts_with("http") {
            fetch_with_retry(&self.http, &self.source, self.attempts, self.retry_delay).await?
        } else {
            std::fs::read(&self.source)?
        };
        debug!(bytes = bytes.len(), "Station summary received");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_station_summary() {
        let body = r#"{
            "wind_speed": "6 mph",
            "gust_speed": "8 mph",
            "temperature": "82.4 F",
            "wind_direction": "NNE",
            "dew_point": "48.2 F"
        }"#;
        let record: StationRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.wind_speed.as_deref(), Some("6 mph"));
        assert_eq!(record.gust_speed.as_deref(), Some("8 mph"));
        assert_eq!(record.wind_direction.as_deref(), Some("NNE"));
    }

    #[test]
    fn test_deserialize_partial_summary() {
        let record: StationRecord = serde_json::from_str(r#"{"wind_speed": "4 mph"}"#).unwrap();
        assert_eq!(record.wind_speed.as_deref(), Some("4 mph"));
        assert_eq!(record.gust_speed, None);
    }

    #[test]
    fn test_unavailable_marker_is_empty() {
        assert_eq!(StationRecord::unavailable(), StationRecord::default());
    }
}
