use crate::error::{ProcessingError, Result};
use crate::models::observation::parse_timestamp;
use crate::models::CleanObservation;
use crate::utils::constants::DEFAULT_ROW_GROUP_SIZE;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::ChunkReader;
use std::sync::Arc;

/// Encodes observations as Parquet and decodes them back
pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    /// Encode observations into an in-memory Parquet file
    pub fn encode(&self, records: &[&CleanObservation]) -> Result<Vec<u8>> {
        let schema = Self::create_schema();
        let batch = Self::records_to_batch(records, schema.clone())?;

        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut buffer = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(buffer)
    }

    /// Decode every row of a Parquet file produced by `encode`
    pub fn decode<R: ChunkReader + 'static>(&self, reader: R) -> Result<Vec<CleanObservation>> {
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(reader)?.build()?;

        let mut records = Vec::new();
        for batch_result in parquet_reader {
            let batch = batch_result?;
            Self::batch_to_records(&batch, &mut records)?;
        }

        Ok(records)
    }

    /// Arrow schema for daily observations
    pub fn create_schema() -> Arc<Schema> {
        let fields = vec![
            Field::new("station_name", DataType::Utf8, false),
            Field::new("date_time", DataType::Utf8, false),
            Field::new("year", DataType::Int32, false),
            Field::new("month", DataType::UInt32, false),
            Field::new("day", DataType::UInt32, false),
            Field::new("max_temp", DataType::Float64, false),
            Field::new("min_temp", DataType::Float64, false),
            Field::new("mean_temp", DataType::Float64, false),
            Field::new("year_month_day", DataType::Utf8, false),
        ];

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(records: &[&CleanObservation], schema: Arc<Schema>) -> Result<RecordBatch> {
        let station_names: Vec<&str> = records.iter().map(|r| r.station_name.as_str()).collect();
        let date_times: Vec<String> = records.iter().map(|r| r.date_time_string()).collect();
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        let months: Vec<u32> = records.iter().map(|r| r.month).collect();
        let days: Vec<u32> = records.iter().map(|r| r.day).collect();
        let max_temps: Vec<f64> = records.iter().map(|r| r.max_temp).collect();
        let min_temps: Vec<f64> = records.iter().map(|r| r.min_temp).collect();
        let mean_temps: Vec<f64> = records.iter().map(|r| r.mean_temp).collect();
        let partition_keys: Vec<String> =
            records.iter().map(|r| r.partition_key().to_string()).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(station_names)),
                Arc::new(StringArray::from(date_times)),
                Arc::new(Int32Array::from(years)),
                Arc::new(UInt32Array::from(months)),
                Arc::new(UInt32Array::from(days)),
                Arc::new(Float64Array::from(max_temps)),
                Arc::new(Float64Array::from(min_temps)),
                Arc::new(Float64Array::from(mean_temps)),
                Arc::new(StringArray::from(partition_keys)),
            ],
        )?;

        Ok(batch)
    }

    fn batch_to_records(batch: &RecordBatch, records: &mut Vec<CleanObservation>) -> Result<()> {
        let station_names = column::<StringArray>(batch, "station_name")?;
        let date_times = column::<StringArray>(batch, "date_time")?;
        let years = column::<Int32Array>(batch, "year")?;
        let months = column::<UInt32Array>(batch, "month")?;
        let days = column::<UInt32Array>(batch, "day")?;
        let max_temps = column::<Float64Array>(batch, "max_temp")?;
        let min_temps = column::<Float64Array>(batch, "min_temp")?;
        let mean_temps = column::<Float64Array>(batch, "mean_temp")?;

        records.reserve(batch.num_rows());
        for i in 0..batch.num_rows() {
            records.push(CleanObservation::new(
                station_names.value(i).to_string(),
                parse_timestamp(date_times.value(i))?,
                years.value(i),
                months.value(i),
                days.value(i),
                max_temps.value(i),
                min_temps.value(i),
                mean_temps.value(i),
            ));
        }

        Ok(())
    }
}

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid {} column type", name)))
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}
