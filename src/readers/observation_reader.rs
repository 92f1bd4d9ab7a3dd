use crate::error::{ProcessingError, Result};
use crate::models::ObservationRow;
use crate::readers::decode_text;
use crate::utils::constants::SELECTED_COLUMNS;

/// Parses the daily CSV payload returned by the climate endpoint
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<ObservationRow>> {
        let text = decode_text(bytes);
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Vec<ObservationRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = SELECTED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h.trim() == *column))
            .collect();
        if !missing.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Climate data is missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut rows = Vec::new();
        for row in reader.deserialize::<ObservationRow>() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAYLOAD: &str = "\u{feff}\"Longitude (x)\",\"Latitude (y)\",\"Station Name\",\"Climate ID\",\"Date/Time\",\"Year\",\"Month\",\"Day\",\"Data Quality\",\"Max Temp (°C)\",\"Max Temp Flag\",\"Min Temp (°C)\",\"Min Temp Flag\",\"Mean Temp (°C)\",\"Mean Temp Flag\"
\"-114.01\",\"51.12\",\"CALGARY INTL A\",\"3031094\",\"2023-01-01\",\"2023\",\"01\",\"01\",\"\",\"2.1\",\"\",\"-9.4\",\"\",\"-3.7\",\"\"
\"-114.01\",\"51.12\",\"CALGARY INTL A\",\"3031094\",\"2023-01-02\",\"2023\",\"01\",\"02\",\"\",\"\",\"M\",\"-12.0\",\"\",\"\",\"M\"
";

    #[test]
    fn test_read_payload() {
        let rows = ObservationReader::new().read_bytes(PAYLOAD.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].station_name, "CALGARY INTL A");
        assert_eq!(rows[0].date_time, "2023-01-01");
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows[0].max_temp, Some(2.1));
        assert_eq!(rows[0].min_temp, Some(-9.4));
        assert_eq!(rows[0].mean_temp, Some(-3.7));

        assert_eq!(rows[1].max_temp, None);
        assert_eq!(rows[1].min_temp, Some(-12.0));
        assert_eq!(rows[1].mean_temp, None);
    }

    #[test]
    fn test_html_error_page_is_rejected() {
        let err = ObservationReader::new()
            .read_str("<html><body>Service unavailable</body></html>\n")
            .unwrap_err();
        assert!(err.to_string().contains("Station Name"));
    }
}
