use crate::error::{ProcessingError, Result};
use crate::models::StationRecord;
use crate::readers::decode_text;
use crate::utils::constants::{
    DEFAULT_INVENTORY_HEADER_LINES, INVENTORY_NAME_COLUMN, INVENTORY_STATION_ID_COLUMN,
};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Reads the station inventory: a few lines of preamble followed by a CSV
/// table with at least `Name` and `Station ID` columns.
pub struct StationReader {
    header_lines: usize,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            header_lines: DEFAULT_INVENTORY_HEADER_LINES,
        }
    }

    pub fn with_header_lines(header_lines: usize) -> Self {
        Self { header_lines }
    }

    /// Read station records from the inventory file
    pub fn read_inventory(&self, path: &Path) -> Result<Vec<StationRecord>> {
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes);
        self.parse_inventory(&text)
    }

    /// Read the inventory as a name -> station ID map. Later rows win on
    /// duplicate names.
    pub fn read_inventory_map(&self, path: &Path) -> Result<HashMap<String, u32>> {
        let stations = self.read_inventory(path)?;
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            map.insert(station.name, station.station_id);
        }

        Ok(map)
    }

    pub fn parse_inventory(&self, text: &str) -> Result<Vec<StationRecord>> {
        let table = self.skip_preamble(text)?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(table.as_bytes());

        let headers = reader.headers()?.clone();
        let name_idx = column_index(&headers, INVENTORY_NAME_COLUMN)?;
        let id_idx = column_index(&headers, INVENTORY_STATION_ID_COLUMN)?;

        let mut stations = Vec::new();
        for record in reader.records() {
            let record = record?;

            let (Some(name), Some(id)) = (record.get(name_idx), record.get(id_idx)) else {
                continue; // Short row
            };
            if name.is_empty() || id.is_empty() {
                continue;
            }

            let station_id = id.parse::<u32>().map_err(|_| {
                ProcessingError::InvalidFormat(format!(
                    "Invalid station ID '{}' for station '{}'",
                    id, name
                ))
            })?;

            let station = StationRecord::new(name.to_string(), station_id);
            station.validate()?;
            stations.push(station);
        }

        debug!(stations = stations.len(), "Read station inventory");
        Ok(stations)
    }

    fn skip_preamble<'a>(&self, text: &'a str) -> Result<&'a str> {
        let mut rest = text;
        for line in 0..self.header_lines {
            match rest.find('\n') {
                Some(pos) => rest = &rest[pos + 1..],
                None => {
                    return Err(ProcessingError::InvalidFormat(format!(
                        "Station inventory ends after {} lines, expected {} preamble lines and a header",
                        line, self.header_lines
                    )))
                }
            }
        }
        Ok(rest)
    }
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers.iter().position(|h| h == column).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!(
            "Station inventory header is missing the '{}' column (found: {})",
            column,
            headers.iter().collect::<Vec<_>>().join(", ")
        ))
    })
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
