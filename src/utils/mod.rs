pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{spreadsheet_path, storage_prefix};
pub use progress::ProgressReporter;
