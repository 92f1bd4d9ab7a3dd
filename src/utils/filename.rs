use crate::utils::constants::{SPREADSHEET_PREFIX, STORAGE_PREFIX_ROOT};
use std::path::{Path, PathBuf};

/// City names such as "Quebec/Jean Lesage" contain path separators
fn sanitize_city(city: &str) -> String {
    city.replace(['/', '\\'], "_")
}

/// Generate spreadsheet path with format: {dir}/weather_data_{city}.xlsx
pub fn spreadsheet_path(output_dir: &Path, city: &str) -> PathBuf {
    output_dir.join(format!("{}{}.xlsx", SPREADSHEET_PREFIX, sanitize_city(city)))
}

/// Object storage prefix for a city: weather_data/{city}
pub fn storage_prefix(city: &str) -> String {
    format!("{}/{}", STORAGE_PREFIX_ROOT, sanitize_city(city))
}
