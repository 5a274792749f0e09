use crate::error::{Operation, Result, ValidationError, VdiskError};
use crate::models::DiskScript;
use crate::models::script::MB_PER_GB;
use crate::utils::diskpart::{ScriptRunner, UtilityOutput};
use std::path::Path;
use tracing::{info, warn};

const CREATE_MARKER: &str = "DiskPart successfully";
const ATTACH_MARKER: &str = "DiskPart successfully attached";
const DETACH_MARKER: &str = "DiskPart successfully detached";

/// Validated input for creating a partitioned VHD. Every size converts to
/// MB without overflow and the partitions fit in the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    total_gb: u64,
    partitions_gb: Vec<u64>,
}

impl CreateRequest {
    pub fn new(total_gb: u64, partitions_gb: Vec<u64>) -> std::result::Result<Self, ValidationError> {
        if total_gb == 0 {
            return Err(ValidationError::Zero("total size"));
        }
        if partitions_gb.is_empty() {
            return Err(ValidationError::MissingField("partition sizes"));
        }
        if partitions_gb.contains(&0) {
            return Err(ValidationError::Zero("partition size"));
        }
        if total_gb.checked_mul(MB_PER_GB).is_none() {
            return Err(ValidationError::TooLarge("total size"));
        }
        if partitions_gb.iter().any(|size| size.checked_mul(MB_PER_GB).is_none()) {
            return Err(ValidationError::TooLarge("partition size"));
        }
        let requested = partitions_gb
            .iter()
            .try_fold(0u64, |acc, size| acc.checked_add(*size))
            .ok_or(ValidationError::TooLarge("partition sizes"))?;
        if requested > total_gb {
            return Err(ValidationError::SizeConflict {
                requested,
                total: total_gb,
            });
        }
        Ok(Self {
            total_gb,
            partitions_gb,
        })
    }

    pub fn total_mb(&self) -> u64 {
        self.total_gb * MB_PER_GB
    }

    pub fn partitions_mb(&self) -> Vec<u64> {
        self.partitions_gb.iter().map(|size| size * MB_PER_GB).collect()
    }

    /// Parse the raw form fields: a total in GB and a comma-separated list of
    /// partition sizes in GB. Blank list entries are skipped.
    pub fn parse(total: &str, partitions: &str) -> std::result::Result<Self, ValidationError> {
        let total = total.trim();
        let partitions = partitions.trim();
        if total.is_empty() {
            return Err(ValidationError::MissingField("total size"));
        }
        if partitions.is_empty() {
            return Err(ValidationError::MissingField("partition sizes"));
        }

        let total_gb = parse_gb("total size", total)?;
        let partitions_gb = partitions
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| parse_gb("partition sizes", p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(total_gb, partitions_gb)
    }
}

fn parse_gb(field: &'static str, value: &str) -> std::result::Result<u64, ValidationError> {
    value.parse::<u64>().map_err(|_| ValidationError::NotANumber {
        field,
        value: value.to_string(),
    })
}

/// Create an expandable VHD at `path`, attach it, and create, format and
/// assign one NTFS partition per requested size.
pub fn create_with_partitions(
    runner: &impl ScriptRunner,
    path: &Path,
    request: &CreateRequest,
) -> Result<UtilityOutput> {
    info!("Creating VHD: {}", path.display());
    let script = DiskScript::create_with_partitions(path, request.total_mb(), &request.partitions_mb());
    run_checked(runner, Operation::Create, &script, CREATE_MARKER)
}

pub fn attach(runner: &impl ScriptRunner, path: &Path) -> Result<UtilityOutput> {
    info!("Attaching VHD: {}", path.display());
    run_checked(runner, Operation::Attach, &DiskScript::attach(path), ATTACH_MARKER)
}

pub fn detach(runner: &impl ScriptRunner, path: &Path) -> Result<UtilityOutput> {
    info!("Detaching VHD: {}", path.display());
    run_checked(runner, Operation::Detach, &DiskScript::detach(path), DETACH_MARKER)
}

/// Exit status decides first; the marker must also be present.
fn run_checked(
    runner: &impl ScriptRunner,
    operation: Operation,
    script: &DiskScript,
    marker: &str,
) -> Result<UtilityOutput> {
    let output = runner.run(script)?;

    if output.success && output.contains(marker) {
        info!("✅ {} succeeded", operation);
        return Ok(output);
    }

    if output.success {
        warn!("DiskPart exited cleanly but did not report {:?}", marker);
    }
    warn!(exit_code = ?output.exit_code, "❌ {} failed", operation);

    Err(VdiskError::Rejected {
        operation,
        exit_code: output.exit_code,
        output: output.text,
    })
}
