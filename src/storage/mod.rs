pub mod partitioned_store;

pub use partitioned_store::{PartitionedStore, StorageTarget, WriteSummary};
