use crate::error::{Result, VdiskError};
use crate::models::DiskScript;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::Builder as TempFileBuilder;
use tracing::debug;

/// What the utility printed and how it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// stdout followed by stderr, uninterpreted.
    pub text: String,
}

impl UtilityOutput {
    pub fn contains(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }
}

/// Runs a DiskPart script and hands back the combined output.
pub trait ScriptRunner {
    fn run(&self, script: &DiskScript) -> Result<UtilityOutput>;
}

/// Runs the real utility as `<bin> /s <script-file>`.
#[derive(Debug, Clone)]
pub struct DiskPart {
    bin: PathBuf,
}

impl DiskPart {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

impl ScriptRunner for DiskPart {
    fn run(&self, script: &DiskScript) -> Result<UtilityOutput> {
        // Unique per call; removed when `script_path` drops, on every path out.
        let mut file = TempFileBuilder::new()
            .prefix("vdpm-")
            .suffix(".txt")
            .tempfile()
            .map_err(VdiskError::Script)?;
        file.write_all(script.to_string().as_bytes())
            .and_then(|_| file.flush())
            .map_err(VdiskError::Script)?;
        let script_path = file.into_temp_path();

        debug!(
            bin = %self.bin.display(),
            script = %script_path.display(),
            lines = script.len(),
            "running DiskPart script"
        );

        let output = Command::new(&self.bin)
            .arg("/s")
            .arg(&script_path)
            .output()
            .map_err(|source| VdiskError::Launch {
                bin: self.bin.clone(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(exit_code = ?output.status.code(), "DiskPart finished");

        Ok(UtilityOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            text,
        })
    }
}
