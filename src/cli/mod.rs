pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::{process_fetches, run};
