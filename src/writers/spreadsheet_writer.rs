use crate::error::Result;
use crate::models::{ObservationRow, YearFetch};
use crate::utils::constants::{SELECTED_COLUMNS, SHEET_PREFIX};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Writes the downloaded rows to a workbook with one sheet per year
pub struct SpreadsheetWriter;

impl SpreadsheetWriter {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of sheets written. Nothing is written when no
    /// year produced any rows.
    pub fn write(&self, fetches: &[YearFetch], path: &Path) -> Result<usize> {
        let mut by_year: BTreeMap<i32, Vec<&ObservationRow>> = BTreeMap::new();
        for row in fetches.iter().flat_map(|f| f.rows()) {
            by_year.entry(row.year).or_default().push(row);
        }

        if by_year.is_empty() {
            warn!(path = %path.display(), "No rows downloaded, spreadsheet not written");
            return Ok(0);
        }

        let header_format = Format::new().set_bold();
        let mut workbook = Workbook::new();

        for (year, rows) in &by_year {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(format!("{}{}", SHEET_PREFIX, year))?;
            Self::write_sheet(worksheet, rows, &header_format)?;
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        workbook.save(path)?;

        info!(path = %path.display(), sheets = by_year.len(), "Wrote spreadsheet");
        Ok(by_year.len())
    }

    fn write_sheet(worksheet: &mut Worksheet, rows: &[&ObservationRow], header: &Format) -> Result<()> {
        for (col, name) in SELECTED_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, header)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, row.station_name.as_str())?;
            worksheet.write_string(r, 1, row.date_time.as_str())?;
            worksheet.write_number(r, 2, row.year)?;
            worksheet.write_number(r, 3, row.month)?;
            worksheet.write_number(r, 4, row.day)?;

            let temperatures = [row.max_temp, row.min_temp, row.mean_temp];
            for (offset, value) in temperatures.iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(r, 5 + offset as u16, *value)?;
                }
            }
        }

        Ok(())
    }
}

impl Default for SpreadsheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(year: i32, mean: Option<f64>) -> ObservationRow {
        ObservationRow {
            station_name: "WINNIPEG INTL A".to_string(),
            date_time: format!("{}-02-01", year),
            year,
            month: 2,
            day: 1,
            max_temp: Some(-10.0),
            min_temp: Some(-25.5),
            mean_temp: mean,
        }
    }

    #[test]
    fn test_one_sheet_per_year() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("out").join("weather_data_Winnipeg.xlsx");

        let fetches = vec![
            YearFetch::fetched(2021, vec![row(2021, Some(-17.0))]),
            YearFetch::skipped(2022, "HTTP 404 Not Found"),
            YearFetch::fetched(2023, vec![row(2023, None), row(2023, Some(-18.2))]),
        ];

        let sheets = SpreadsheetWriter::new().write(&fetches, &path)?;

        assert_eq!(sheets, 2);
        assert!(path.exists());
        assert!(std::fs::metadata(&path)?.len() > 0);
        Ok(())
    }

    #[test]
    fn test_nothing_written_without_rows() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("empty.xlsx");

        let fetches = vec![YearFetch::skipped(2023, "HTTP 500 Internal Server Error")];
        let sheets = SpreadsheetWriter::new().write(&fetches, &path)?;

        assert_eq!(sheets, 0);
        assert!(!path.exists());
        Ok(())
    }
}
