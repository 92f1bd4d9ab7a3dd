/// Climate data endpoint
pub const DEFAULT_CLIMATE_BASE_URL: &str =
    "https://climate.weather.gc.ca/climate_data/bulk_data_e.html";

/// Daily observations
pub const DAILY_TIMEFRAME: &str = "2";

/// Station inventory
pub const DEFAULT_STATION_INVENTORY: &str = "Station Inventory EN.csv";
pub const DEFAULT_INVENTORY_HEADER_LINES: usize = 3;
pub const INVENTORY_NAME_COLUMN: &str = "Name";
pub const INVENTORY_STATION_ID_COLUMN: &str = "Station ID";

/// Columns kept from the downloaded CSV
pub const SELECTED_COLUMNS: [&str; 8] = [
    "Station Name",
    "Date/Time",
    "Year",
    "Month",
    "Day",
    "Max Temp (°C)",
    "Min Temp (°C)",
    "Mean Temp (°C)",
];

/// Timestamp formats
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of years fetched, ending at the target year
pub const YEARS_IN_WINDOW: i32 = 3;

/// Storage layout
pub const STORAGE_PREFIX_ROOT: &str = "weather_data";
pub const PARTITION_FILE_NAME: &str = "part-00000.parquet";
pub const PARQUET_EXTENSION: &str = "parquet";
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_COMPRESSION: &str = "snappy";

/// Local outputs
pub const ENVIRONMENT_FILE: &str = ".environment";
pub const SPREADSHEET_PREFIX: &str = "weather_data_";
pub const SHEET_PREFIX: &str = "Data_";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[(month - 1) as usize]),
        _ => None,
    }
}
