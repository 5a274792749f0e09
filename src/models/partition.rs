use std::fmt;

/// Size unit as printed in the `Size` column of `list partition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Kb,
    Mb,
    Gb,
}

impl SizeUnit {
    /// Case-insensitive match on the unit token. Anything other than
    /// KB/MB/GB yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "KB" => Some(Self::Kb),
            "MB" => Some(Self::Mb),
            "GB" => Some(Self::Gb),
            _ => None,
        }
    }

    /// Converts a magnitude in this unit to whole megabytes (KB truncates).
    pub fn to_mb(self, size: u64) -> u64 {
        match self {
            Self::Kb => size / 1024,
            Self::Mb => size,
            Self::Gb => size.saturating_mul(1024),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Kb => "KB",
            Self::Mb => "MB",
            Self::Gb => "GB",
        };
        f.write_str(s)
    }
}

/// One row of the utility's partition listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionRecord {
    pub number: u32,
    pub size: u64,
    pub unit: SizeUnit,
    pub size_mb: u64,
}

impl PartitionRecord {
    pub fn new(number: u32, size: u64, unit: SizeUnit) -> Self {
        Self {
            number,
            size,
            unit,
            size_mb: unit.to_mb(size),
        }
    }

    /// Line shown in the disk info listing.
    pub fn info_line(&self) -> String {
        format!(
            "Partition {}: {} {} ({} MB)",
            self.number, self.size, self.unit, self.size_mb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_normalization() {
        assert_eq!(PartitionRecord::new(1, 1024, SizeUnit::Kb).size_mb, 1);
        assert_eq!(PartitionRecord::new(1, 1, SizeUnit::Mb).size_mb, 1);
        assert_eq!(PartitionRecord::new(1, 1, SizeUnit::Gb).size_mb, 1024);
        // truncation, not rounding
        assert_eq!(PartitionRecord::new(1, 2047, SizeUnit::Kb).size_mb, 1);
        assert_eq!(PartitionRecord::new(1, 1023, SizeUnit::Kb).size_mb, 0);
    }

    #[test]
    fn test_unit_token() {
        assert_eq!(SizeUnit::from_token("gb"), Some(SizeUnit::Gb));
        assert_eq!(SizeUnit::from_token("Mb"), Some(SizeUnit::Mb));
        assert_eq!(SizeUnit::from_token("KB"), Some(SizeUnit::Kb));
        assert_eq!(SizeUnit::from_token("TB"), None);
    }

    #[test]
    fn test_info_line() {
        let record = PartitionRecord::new(2, 16, SizeUnit::Gb);
        assert_eq!(record.info_line(), "Partition 2: 16 GB (16384 MB)");
    }
}
