use crate::utils::constants::DEFAULT_COMPRESSION;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "city-weather")]
#[command(about = "Download, store and summarise three years of daily weather for a Canadian city")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Name of the city")]
    pub city: Option<String>,

    #[arg(
        long,
        value_parser = clap::value_parser!(i32).range(1840..=9999),
        help = "Target year; the two years before it are fetched as well"
    )]
    pub year: Option<i32>,

    #[arg(
        short,
        long,
        default_value = ".",
        help = "Directory for the spreadsheet [file: weather_data_{city}.xlsx]"
    )]
    pub output_dir: PathBuf,

    #[arg(long, help = "Station inventory CSV [default: STATION_INVENTORY setting]")]
    pub stations_file: Option<PathBuf>,

    #[arg(long, help = "Environment file to load [default: .environment]")]
    pub env_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value = DEFAULT_COMPRESSION,
        help = "Parquet compression: snappy, gzip, lz4, zstd or none"
    )]
    pub compression: String,

    #[arg(long, help = "Do not write the per-year spreadsheet")]
    pub skip_spreadsheet: bool,

    #[arg(long, help = "Print the supported city names and exit")]
    pub list_cities: bool,

    #[arg(short, long, help = "Hide the download progress bar")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "city-weather",
            "--city",
            "St. John's",
            "--year",
            "2023",
            "-o",
            "out",
            "--skip-spreadsheet",
        ])
        .unwrap();

        assert_eq!(cli.city.as_deref(), Some("St. John's"));
        assert_eq!(cli.year, Some(2023));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.compression, "snappy");
        assert!(cli.skip_spreadsheet);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_city_and_year_are_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["city-weather"]).unwrap();
        assert!(cli.city.is_none());
        assert!(cli.year.is_none());
    }

    #[test]
    fn test_rejects_non_numeric_year() {
        assert!(Cli::try_parse_from(["city-weather", "--city", "Gander", "--year", "last"]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_year() {
        assert!(Cli::try_parse_from(["city-weather", "--year", "2147483647"]).is_err());
        assert!(Cli::try_parse_from(["city-weather", "--year", "-5"]).is_err());
        assert!(Cli::try_parse_from(["city-weather", "--year", "1840"]).is_ok());
    }

    #[test]
    fn test_compression_flag() {
        let cli = Cli::try_parse_from(["city-weather", "-c", "zstd"]).unwrap();
        assert_eq!(cli.compression, "zstd");
    }
}
