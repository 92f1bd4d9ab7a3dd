pub mod climate_fetcher;

pub use climate_fetcher::ClimateFetcher;
