pub mod partition_map;

pub use partition_map::PartitionMapWidget;
