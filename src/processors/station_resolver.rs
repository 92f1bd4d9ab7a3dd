use crate::error::{ProcessingError, Result};
use crate::models::StationRecord;
use crate::readers::StationReader;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// Airport stations used for each supported city
const CANADIAN_AIRPORTS: [(&str, &str); 19] = [
    ("Victoria", "VICTORIA INTL A"),
    ("Vancouver", "VANCOUVER INTL A"),
    ("Edmonton", "EDMONTON INTL A"),
    ("Calgary", "CALGARY INTL A"),
    ("Regina", "REGINA INTL A"),
    ("Saskatoon", "SASKATOON INTL A"),
    ("Winnipeg", "WINNIPEG INTL A"),
    ("Ottawa", "OTTAWA INTL A"),
    ("Toronto", "TORONTO INTL A"),
    ("Quebec", "QUEBEC INTL A"),
    ("Quebec/Jean Lesage", "QUEBEC/JEAN LESAGE INTL A"),
    (
        "Montreal/Pierre Elliott Trudeau",
        "MONTREAL/PIERRE ELLIOTT TRUDEAU INTL A",
    ),
    ("Montreal", "MONTREAL INTL A"),
    ("Montreal Mirabel", "MONTREAL MIRABEL INTL A"),
    ("Fredericton", "FREDERICTON INTL A"),
    (
        "Moncton/Greater Moncton Romeo Leblanc",
        "MONCTON/GREATER MONCTON ROMEO LEBLANC INTL A",
    ),
    (
        "Moncton / Greater Moncton Romeo Leblanc",
        "MONCTON / GREATER MONCTON ROMEO LEBLANC INTL A",
    ),
    ("Gander", "GANDER INTL A"),
    ("St. John's", "ST. JOHN'S INTL A"),
];

/// Immutable city -> station name table
#[derive(Debug, Clone, Default)]
pub struct CityTable {
    stations: BTreeMap<String, String>,
}

impl CityTable {
    pub fn new<I, C, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: Into<String>,
    {
        Self {
            stations: entries
                .into_iter()
                .map(|(city, station)| (city.into(), station.into()))
                .collect(),
        }
    }

    pub fn canadian_airports() -> Self {
        Self::new(CANADIAN_AIRPORTS)
    }

    pub fn station_name(&self, city: &str) -> Option<&str> {
        self.stations.get(city).map(String::as_str)
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Maps a city to the station code used by the climate endpoint
pub struct StationResolver {
    cities: CityTable,
    inventory: HashMap<String, u32>,
}

impl StationResolver {
    pub fn new(cities: CityTable, inventory: HashMap<String, u32>) -> Self {
        Self { cities, inventory }
    }

    pub fn from_inventory_file(cities: CityTable, path: &Path, header_lines: usize) -> Result<Self> {
        let inventory = StationReader::with_header_lines(header_lines).read_inventory_map(path)?;
        info!(
            path = %path.display(),
            stations = inventory.len(),
            "Loaded station inventory"
        );
        Ok(Self::new(cities, inventory))
    }

    pub fn resolve(&self, city: &str) -> Result<StationRecord> {
        let station_name =
            self.cities
                .station_name(city)
                .ok_or_else(|| ProcessingError::UnknownCity {
                    city: city.to_string(),
                })?;

        let station_id =
            self.inventory
                .get(station_name)
                .ok_or_else(|| ProcessingError::StationNotFound {
                    station_name: station_name.to_string(),
                })?;

        Ok(StationRecord::new(station_name.to_string(), *station_id))
    }
}
