use city_weather::cli::process_fetches;
use city_weather::models::{ObservationRow, YearFetch};
use city_weather::processors::{CityTable, StationResolver};
use city_weather::storage::PartitionedStore;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn row(date: &str, max: Option<f64>, min: Option<f64>, mean: Option<f64>) -> ObservationRow {
    let parts: Vec<u32> = date.split('-').map(|p| p.parse().unwrap()).collect();
    ObservationRow {
        station_name: "CALGARY INTL A".to_string(),
        date_time: date.to_string(),
        year: parts[0] as i32,
        month: parts[1],
        day: parts[2],
        max_temp: max,
        min_temp: min,
        mean_temp: mean,
    }
}

fn complete(date: &str, max: f64, min: f64, mean: f64) -> ObservationRow {
    row(date, Some(max), Some(min), Some(mean))
}

#[tokio::test]
async fn test_pipeline_after_download() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let spreadsheet = temp_dir.path().join("weather_data_Calgary.xlsx");

    let fetches = vec![
        YearFetch::skipped(2021, "HTTP 503 Service Unavailable"),
        YearFetch::fetched(
            2022,
            vec![
                complete("2022-01-10", 1.0, -10.0, 4.0),
                row("2022-01-11", None, Some(-9.0), Some(-3.0)),
            ],
        ),
        YearFetch::fetched(
            2023,
            vec![
                complete("2023-01-05", 10.2, 1.0, 2.0),
                complete("2023-02-05", 15.5, -5.0, 5.0),
                complete("2023-03-05", -3.0, -12.0, 4.0),
                row("2023-03-06", Some(3.0), Some(1.0), None),
                complete("2024-01-01", 40.0, -40.0, 99.0),
            ],
        ),
    ];

    let store = PartitionedStore::in_memory("weather_data/Calgary");
    let summary = process_fetches(&fetches, 2023, &store, Some(&spreadsheet))
        .await
        .unwrap();

    assert!(spreadsheet.exists());

    // Only complete rows dated in 2022 and 2023 were stored
    let stored = store.read_all().await.unwrap();
    assert_eq!(stored.len(), 4);

    let extremes = summary.extremes.unwrap();
    assert_eq!(extremes.max_temp, 15.5);
    assert_eq!(extremes.min_temp, -12.0);

    // 2023 mean = (2 + 5 + 4) / 3, 2022 mean = 4
    let expected = (((11.0 / 3.0) - 4.0) / 4.0 * 100.0_f64 * 100.0).round() / 100.0;
    assert_eq!(summary.percentage_difference, Some(expected));

    let deltas: Vec<(u32, f64)> = summary.monthly_deltas.iter().map(|d| (d.month, d.delta)).collect();
    assert_eq!(deltas, vec![(2, 3.0), (3, -1.0)]);

    let report = summary.report();
    assert!(report.contains("Difference in February: 3.00 °C"));
    assert!(report.contains("Difference in March: -1.00 °C"));
}

#[tokio::test]
async fn test_pipeline_with_every_year_skipped() {
    let fetches = vec![
        YearFetch::skipped(2021, "HTTP 500 Internal Server Error"),
        YearFetch::skipped(2022, "HTTP 500 Internal Server Error"),
        YearFetch::skipped(2023, "HTTP 500 Internal Server Error"),
    ];

    let store = PartitionedStore::in_memory("weather_data/Gander");
    let summary = process_fetches(&fetches, 2023, &store, None).await.unwrap();

    assert!(summary.extremes.is_none());
    assert!(summary.percentage_difference.is_none());
    assert!(summary.monthly_deltas.is_empty());
}

#[test]
fn test_resolver_from_inventory_file() {
    let mut inventory = NamedTempFile::new().unwrap();
    write!(
        inventory,
        "Modified Date: 2023-01-10\nDisclaimer\n\n\"Name\",\"Province\",\"Station ID\"\n\"GANDER INTL A\",\"NEWFOUNDLAND\",\"51817\"\n"
    )
    .unwrap();

    let resolver =
        StationResolver::from_inventory_file(CityTable::canadian_airports(), inventory.path(), 3)
            .unwrap();

    assert_eq!(resolver.resolve("Gander").unwrap().station_id, 51817);
    assert!(resolver.resolve("Calgary").unwrap_err().is_unresolved_city());
}
