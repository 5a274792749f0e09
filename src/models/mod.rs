pub mod disk;
pub mod partition;
pub mod script;

pub use disk::{PartitionScan, LISTED_DISK};
pub use partition::{PartitionRecord, SizeUnit};
pub use script::DiskScript;
