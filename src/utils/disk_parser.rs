use crate::error::{Operation, Result, VdiskError};
use crate::models::{DiskScript, LISTED_DISK, PartitionRecord, PartitionScan, SizeUnit};
use crate::utils::diskpart::ScriptRunner;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

/// `Partition <n>  <type>  <size> <unit>`; the type column is a single token
/// and ignored.
static PARTITION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Partition\s+(\d+)\s+\S+\s+(\d+)\s*(KB|MB|GB)\b")
        .expect("partition line pattern is valid")
});

/// Parse the output of `list partition` into records, in listing order.
/// Headers, separators and any other chatter are skipped.
pub fn parse_partition_list(output: &str) -> PartitionScan {
    let records = output
        .lines()
        .filter_map(|line| {
            let caps = PARTITION_LINE.captures(line)?;
            let number = caps
                .get(1)?
                .as_str()
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)?;
            let size = caps.get(2)?.as_str().parse::<u64>().ok()?;
            let unit = SizeUnit::from_token(caps.get(3)?.as_str())?;
            Some(PartitionRecord::new(number, size, unit))
        })
        .collect();

    PartitionScan::from_records(records)
}

/// Select disk 0, list its partitions and parse the result.
pub fn load_disk_info(runner: &impl ScriptRunner) -> Result<PartitionScan> {
    info!("Loading physical disk info...");
    let output = runner.run(&DiskScript::list_partitions(LISTED_DISK))?;

    // A failed run must not be mistaken for a disk without partitions.
    if !output.success {
        warn!(exit_code = ?output.exit_code, "DiskPart exited with failure while listing partitions");
        return Err(VdiskError::Rejected {
            operation: Operation::ListPartitions,
            exit_code: output.exit_code,
            output: output.text,
        });
    }

    let scan = parse_partition_list(&output.text);
    match &scan {
        PartitionScan::Found(records) => {
            info!("Found {} partitions on Disk {}.", records.len(), LISTED_DISK)
        }
        PartitionScan::Empty => info!("No partitions found on Disk {}.", LISTED_DISK),
    }
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::diskpart::tests::StubRunner;

    const LISTING: &str = "
Microsoft DiskPart version 10.0.19041.3636

Disk 0 is now the selected disk.

  Partition ###  Type              Size     Offset
  -------------  ----------------  -------  -------
  Partition 1    System             100 MB  1024 KB
  Partition 2    Reserved            16 MB   101 MB
  Partition 3    Primary            237 GB   117 MB
  Partition 4    Recovery           509 KB   238 GB
";

    #[test]
    fn test_parse_diskpart_listing() {
        let scan = parse_partition_list(LISTING);
        let records = scan.records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], PartitionRecord::new(1, 100, SizeUnit::Mb));
        assert_eq!(records[2].size_mb, 237 * 1024);
        assert_eq!(records[3].unit, SizeUnit::Kb);
        assert_eq!(records[3].size_mb, 0);
    }

    #[test]
    fn test_ignores_non_matching_lines() {
        let text = "header line\nPartition 1 Primary 2048KB\n-----\nPARTITION 2 Logical 3 gb\n\n";
        let scan = parse_partition_list(text);
        assert_eq!(
            scan.records(),
            &[
                PartitionRecord::new(1, 2048, SizeUnit::Kb),
                PartitionRecord::new(2, 3, SizeUnit::Gb),
            ]
        );
        assert_eq!(scan.sizes(), vec![(1, 2), (2, 3072)]);
    }

    #[test]
    fn test_no_partitions_is_empty_scan() {
        let text = "Disk 0 is now the selected disk.\n\nThere are no partitions on this disk to show.\n";
        assert_eq!(parse_partition_list(text), PartitionScan::Empty);
        assert_eq!(parse_partition_list(""), PartitionScan::Empty);
    }

    #[test]
    fn test_rejects_unknown_units() {
        assert!(parse_partition_list("Partition 1 Primary 2 TB").is_empty());
    }

    #[test]
    fn test_load_disk_info_lists_disk_zero() {
        let runner = StubRunner::new(true, LISTING);
        let scan = load_disk_info(&runner).unwrap();
        assert_eq!(scan.records().len(), 4);

        let scripts = runner.scripts.borrow();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0], DiskScript::list_partitions(0));
    }

    #[test]
    fn test_failed_listing_is_an_error_not_an_empty_disk() {
        let runner = StubRunner::new(false, "Access is denied.\n");
        match load_disk_info(&runner) {
            Err(VdiskError::Rejected { operation, output, .. }) => {
                assert_eq!(operation, Operation::ListPartitions);
                assert_eq!(output, "Access is denied.\n");
            }
            other => panic!("expected rejected listing, got {other:?}"),
        }
    }

    #[test]
    fn test_partition_zero_is_skipped() {
        let text = "  Partition 0    Primary   100 MB  1024 KB\n  Partition 1    Primary   200 MB   101 MB\n";
        assert_eq!(
            parse_partition_list(text).records(),
            &[PartitionRecord::new(1, 200, SizeUnit::Mb)]
        );
        assert!(parse_partition_list("Partition 0 Primary 5 GB").is_empty());
    }
}
