pub mod observation;
pub mod partition;
pub mod station;
pub mod year_fetch;

pub use observation::{CleanObservation, ObservationRow};
pub use partition::PartitionKey;
pub use station::StationRecord;
pub use year_fetch::{FetchOutcome, YearFetch};
