use crate::analyzers::{WeatherAnalyzer, WeatherSummary};
use crate::cli::args::Cli;
use crate::error::Result;
use crate::fetchers::ClimateFetcher;
use crate::models::YearFetch;
use crate::processors::{CityTable, Cleaner, StationResolver};
use crate::settings::Settings;
use crate::storage::PartitionedStore;
use crate::utils::constants::YEARS_IN_WINDOW;
use crate::utils::filename::{spreadsheet_path, storage_prefix};
use crate::utils::progress::ProgressReporter;
use crate::writers::{ParquetWriter, SpreadsheetWriter};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn, Level};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let cities = CityTable::canadian_airports();

    if cli.list_cities {
        for city in cities.cities() {
            println!("{}", city);
        }
        return Ok(());
    }

    let Some(city) = cli.city else {
        println!("Please provide a city using the --city argument.");
        return Ok(());
    };

    let Some(year) = cli.year else {
        println!("Please provide a year using the --year argument.");
        return Ok(());
    };

    let settings = Settings::load(cli.env_file.as_deref())?;

    let inventory = cli
        .stations_file
        .clone()
        .unwrap_or_else(|| settings.station_inventory.clone());
    let resolver =
        StationResolver::from_inventory_file(cities, &inventory, settings.inventory_header_lines)?;

    let station = match resolver.resolve(&city) {
        Ok(station) => station,
        Err(e) if e.is_unresolved_city() => {
            warn!(error = %e, "Could not resolve city");
            println!(
                "Station id is not matching for City '{}'. Please check for exact City name in given list of Cities.",
                city
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    info!(
        city = %city,
        station = %station.name,
        station_id = station.station_id,
        "Resolved station"
    );

    let target = settings.storage_target()?;
    let writer = ParquetWriter::new().with_compression(&cli.compression)?;

    // Download
    let fetcher = ClimateFetcher::new(settings.climate_base_url.clone());
    let progress = ProgressReporter::new(
        YEARS_IN_WINDOW as u64,
        "Downloading climate data...",
        cli.quiet,
    );
    let fetches = fetcher
        .fetch_window(station.station_id, year, Some(&progress))
        .await?;
    let skipped = fetches.iter().filter(|f| f.is_skipped()).count();
    progress.finish_with_message(&format!(
        "Downloaded {} of {} years",
        fetches.len() - skipped,
        fetches.len()
    ));

    let spreadsheet = (!cli.skip_spreadsheet).then(|| spreadsheet_path(&cli.output_dir, &city));

    info!(storage = %target, prefix = %storage_prefix(&city), "Using storage");
    let store = PartitionedStore::new(target.build()?, &storage_prefix(&city)).with_writer(writer);

    let summary = process_fetches(&fetches, year, &store, spreadsheet.as_deref()).await?;
    println!("{}", summary.report());

    Ok(())
}

/// Everything after the download: spreadsheet snapshot, cleaning, the
/// partitioned write, the reload and the statistics
pub async fn process_fetches(
    fetches: &[YearFetch],
    year: i32,
    store: &PartitionedStore,
    spreadsheet: Option<&Path>,
) -> Result<WeatherSummary> {
    if let Some(path) = spreadsheet {
        SpreadsheetWriter::new().write(fetches, path)?;
    }

    let (rows, report) = Cleaner::new(year).clean(fetches);
    debug!("\n{}", report);
    if rows.is_empty() {
        warn!("No complete observations to store");
    }

    store.write_partitions(&rows).await?;
    let reloaded = store.read_all().await?;

    Ok(WeatherAnalyzer::new().analyze(&reloaded, year))
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
