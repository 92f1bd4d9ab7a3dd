pub mod cleaner;
pub mod station_resolver;

pub use cleaner::{group_by_partition, Cleaner, CleaningReport};
pub use station_resolver::{CityTable, StationResolver};
