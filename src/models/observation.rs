use crate::error::{ProcessingError, Result};
use crate::models::PartitionKey;
use crate::utils::constants::{DATE_FORMAT, DATE_TIME_FORMAT};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One daily row as published by the climate endpoint, restricted to the
/// columns this tool keeps. Unparseable or empty temperature cells are `None`;
/// `NaN` and infinite cells parse as numbers and are treated as missing by
/// [`ObservationRow::temperatures`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    #[serde(rename = "Station Name")]
    pub station_name: String,

    #[serde(rename = "Date/Time")]
    pub date_time: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Month")]
    pub month: u32,

    #[serde(rename = "Day")]
    pub day: u32,

    #[serde(rename = "Max Temp (°C)", deserialize_with = "csv::invalid_option")]
    pub max_temp: Option<f64>,

    #[serde(rename = "Min Temp (°C)", deserialize_with = "csv::invalid_option")]
    pub min_temp: Option<f64>,

    #[serde(rename = "Mean Temp (°C)", deserialize_with = "csv::invalid_option")]
    pub mean_temp: Option<f64>,
}

impl ObservationRow {
    /// Max, min and mean temperature, if all three are present and finite
    pub fn temperatures(&self) -> Option<(f64, f64, f64)> {
        Some((
            finite(self.max_temp)?,
            finite(self.min_temp)?,
            finite(self.mean_temp)?,
        ))
    }

    pub fn has_all_temperatures(&self) -> bool {
        self.temperatures().is_some()
    }

    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.date_time)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD` (midnight)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
        return Ok(timestamp);
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)?;
    Ok(date.and_time(NaiveTime::MIN))
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CleanObservation {
    #[validate(length(min = 1))]
    pub station_name: String,

    pub timestamp: NaiveDateTime,

    pub year: i32,

    #[validate(range(min = 1, max = 12))]
    pub month: u32,

    #[validate(range(min = 1, max = 31))]
    pub day: u32,

    pub max_temp: f64,
    pub min_temp: f64,
    pub mean_temp: f64,
}

impl CleanObservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        station_name: String,
        timestamp: NaiveDateTime,
        year: i32,
        month: u32,
        day: u32,
        max_temp: f64,
        min_temp: f64,
        mean_temp: f64,
    ) -> Self {
        Self {
            station_name,
            timestamp,
            year,
            month,
            day,
            max_temp,
            min_temp,
            mean_temp,
        }
    }

    /// Build from a raw row, failing if a temperature is missing, the
    /// timestamp does not parse or a field is out of range
    pub fn from_row(row: &ObservationRow) -> Result<Self> {
        let Some((max_temp, min_temp, mean_temp)) = row.temperatures() else {
            return Err(ProcessingError::MissingData(format!(
                "Temperature missing for {} on {}",
                row.station_name, row.date_time
            )));
        };

        let observation = Self::new(
            row.station_name.clone(),
            row.timestamp()?,
            row.year,
            row.month,
            row.day,
            max_temp,
            min_temp,
            mean_temp,
        );
        observation.validate()?;
        Ok(observation)
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn date_time_string(&self) -> String {
        self.timestamp.format(DATE_TIME_FORMAT).to_string()
    }

    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(self.date())
    }
}
