pub mod parquet_writer;
pub mod spreadsheet_writer;

pub use parquet_writer::ParquetWriter;
pub use spreadsheet_writer::SpreadsheetWriter;
