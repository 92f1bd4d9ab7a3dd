use crate::error::Result;
use crate::models::{CleanObservation, PartitionKey};
use crate::processors::group_by_partition;
use crate::utils::constants::{PARQUET_EXTENSION, PARTITION_FILE_NAME};
use crate::writers::ParquetWriter;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore, PutPayload};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Where the partitioned dataset lives
#[derive(Debug, Clone, PartialEq)]
pub enum StorageTarget {
    S3 {
        bucket: String,
        region: Option<String>,
    },
    Local(PathBuf),
}

impl StorageTarget {
    pub fn build(&self) -> Result<Arc<dyn ObjectStore>> {
        match self {
            StorageTarget::S3 { bucket, region } => {
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
                if let Some(region) = region {
                    builder = builder.with_region(region);
                }
                Ok(Arc::new(builder.build()?))
            }
            StorageTarget::Local(root) => {
                std::fs::create_dir_all(root)?;
                Ok(Arc::new(LocalFileSystem::new_with_prefix(root)?))
            }
        }
    }
}

impl fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageTarget::S3 { bucket, .. } => write!(f, "s3://{}", bucket),
            StorageTarget::Local(root) => write!(f, "file://{}", root.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub partitions: usize,
    pub rows: usize,
}

/// Daily observations stored as `<prefix>/<YYYY>/<MM>/<DD>/part-00000.parquet`
pub struct PartitionedStore {
    store: Arc<dyn ObjectStore>,
    prefix: Path,
    writer: ParquetWriter,
}

impl PartitionedStore {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: &str) -> Self {
        Self {
            store,
            prefix: Path::from(prefix),
            writer: ParquetWriter::new(),
        }
    }

    pub fn in_memory(prefix: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), prefix)
    }

    pub fn with_writer(mut self, writer: ParquetWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn partition_path(&self, key: &PartitionKey) -> Path {
        let [year, month, day] = key.segments();
        self.prefix
            .child(year)
            .child(month)
            .child(day)
            .child(PARTITION_FILE_NAME)
    }

    /// Write one Parquet object per partition key, in key order. A failure
    /// leaves the partitions already written in place.
    pub async fn write_partitions(&self, rows: &[CleanObservation]) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();

        for (key, group) in group_by_partition(rows) {
            let location = self.partition_path(&key);
            let bytes = self.writer.encode(&group)?;

            debug!(%location, rows = group.len(), "Writing partition");
            self.store.put(&location, PutPayload::from(bytes)).await?;

            summary.partitions += 1;
            summary.rows += group.len();
        }

        info!(
            prefix = %self.prefix,
            partitions = summary.partitions,
            rows = summary.rows,
            "Wrote partitioned dataset"
        );
        Ok(summary)
    }

    /// Read every Parquet object under the prefix back into memory
    pub async fn read_all(&self) -> Result<Vec<CleanObservation>> {
        let mut objects: Vec<ObjectMeta> = self.store.list(Some(&self.prefix)).try_collect().await?;
        objects.retain(|meta| meta.location.extension() == Some(PARQUET_EXTENSION));
        objects.sort_by(|a, b| a.location.cmp(&b.location));

        let mut rows = Vec::new();
        for meta in &objects {
            let bytes = self.store.get(&meta.location).await?.bytes().await?;
            rows.extend(self.writer.decode(bytes)?);
        }

        info!(
            prefix = %self.prefix,
            objects = objects.len(),
            rows = rows.len(),
            "Read partitioned dataset"
        );
        Ok(rows)
    }
}
