use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which DiskPart-driven action failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Attach,
    Detach,
    ListPartitions,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "VHD creation",
            Self::Attach => "VHD attach",
            Self::Detach => "VHD detach",
            Self::ListPartitions => "partition listing",
        };
        f.write_str(s)
    }
}

/// Bad user input, caught before DiskPart is started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please fill in all fields ({0} is empty)")]
    MissingField(&'static str),
    #[error("please enter only numbers ({field}: {value:?})")]
    NotANumber { field: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("partition sizes ({requested} GB) exceed total disk size ({total} GB)")]
    SizeConflict { requested: u64, total: u64 },
    #[error("{0} is too large")]
    TooLarge(&'static str),
}

#[derive(Debug, Error)]
pub enum VdiskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to write DiskPart script: {0}")]
    Script(#[source] io::Error),

    #[error("failed to launch {}: {source}", .bin.display())]
    Launch {
        bin: PathBuf,
        #[source]
        source: io::Error,
    },

    /// DiskPart ran but did not report success. `output` is its raw text.
    #[error("{operation} failed ({}):\n{output}", exit_label(.exit_code))]
    Rejected {
        operation: Operation,
        exit_code: Option<i32>,
        output: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, VdiskError>;
