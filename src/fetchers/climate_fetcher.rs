use crate::error::Result;
use crate::models::YearFetch;
use crate::readers::ObservationReader;
use crate::utils::constants::{DAILY_TIMEFRAME, YEARS_IN_WINDOW};
use crate::utils::progress::ProgressReporter;
use reqwest::{Client, Request, StatusCode};
use std::ops::RangeInclusive;
use tracing::{debug, error, info};

/// Downloads daily observations, one calendar year per request
pub struct ClimateFetcher {
    client: Client,
    base_url: String,
    reader: ObservationReader,
}

impl ClimateFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            reader: ObservationReader::new(),
        }
    }

    /// Years fetched for a target year, oldest first
    pub fn window(target_year: i32) -> RangeInclusive<i32> {
        target_year.saturating_sub(YEARS_IN_WINDOW - 1)..=target_year
    }

    pub fn build_request(&self, station_id: u32, year: i32) -> Result<Request> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "csv".to_string()),
                ("stationID", station_id.to_string()),
                ("Year", year.to_string()),
                ("timeframe", DAILY_TIMEFRAME.to_string()),
                ("submit", "Download Data".to_string()),
            ])
            .build()?;
        Ok(request)
    }

    /// Fetch one year. A non-200 response is reported as a skipped year;
    /// transport failures are returned as errors.
    pub async fn fetch_year(&self, station_id: u32, year: i32) -> Result<YearFetch> {
        let request = self.build_request(station_id, year)?;
        debug!(url = %request.url(), "Requesting climate data");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(self.interpret_response(year, status, &body))
    }

    /// Turn a response into a per-year outcome
    pub fn interpret_response(&self, year: i32, status: StatusCode, body: &[u8]) -> YearFetch {
        if status != StatusCode::OK {
            error!(year, %status, "Error downloading data");
            return YearFetch::skipped(year, format!("HTTP {}", status));
        }

        match self.reader.read_bytes(body) {
            Ok(rows) => {
                info!(year, rows = rows.len(), "Downloaded climate data");
                YearFetch::fetched(year, rows)
            }
            Err(e) => {
                error!(year, error = %e, "Unreadable climate data");
                YearFetch::skipped(year, e.to_string())
            }
        }
    }

    /// Fetch the target year and the two before it, one request at a time
    pub async fn fetch_window(
        &self,
        station_id: u32,
        target_year: i32,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<YearFetch>> {
        let mut fetches = Vec::with_capacity(YEARS_IN_WINDOW as usize);

        for year in Self::window(target_year) {
            if let Some(p) = progress {
                p.set_message(&format!("Downloading {}...", year));
            }

            fetches.push(self.fetch_year(station_id, year).await?);

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(fetches)
    }
}
