pub mod analyzers;
pub mod cli;
pub mod error;
pub mod fetchers;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod storage;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
