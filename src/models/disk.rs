use super::partition::PartitionRecord;

/// Index of the only disk the listing inspects.
pub const LISTED_DISK: u32 = 0;

/// Result of scanning a `list partition` output.
///
/// `Empty` is a valid state (a blank disk, or output with no partition rows),
/// not a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PartitionScan {
    Found(Vec<PartitionRecord>),
    #[default]
    Empty,
}

impl PartitionScan {
    pub fn from_records(records: Vec<PartitionRecord>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Found(records)
        }
    }

    pub fn records(&self) -> &[PartitionRecord] {
        match self {
            Self::Found(records) => records,
            Self::Empty => &[],
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// `(number, size_mb)` pairs in listing order, as consumed by the layout.
    pub fn sizes(&self) -> Vec<(u32, u64)> {
        self.records()
            .iter()
            .map(|p| (p.number, p.size_mb))
            .collect()
    }

    /// Lines for the disk info listing.
    pub fn info_lines(&self) -> Vec<String> {
        match self {
            Self::Found(records) => records.iter().map(PartitionRecord::info_line).collect(),
            Self::Empty => vec![format!("No partitions found on Disk {}.", LISTED_DISK)],
        }
    }
}
