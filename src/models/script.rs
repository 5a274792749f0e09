use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Sizes handed to DiskPart are in MB; the front-end speaks GB.
pub const MB_PER_GB: u64 = 1024;

/// An ordered list of DiskPart commands, one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskScript {
    lines: Vec<String>,
}

impl DiskScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[allow(dead_code)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `create vdisk` + select + attach, then one create/format/assign
    /// triple per partition, in order. Sizes are already in MB.
    pub fn create_with_partitions(path: &Path, total_mb: u64, partitions_mb: &[u64]) -> Self {
        let file = quoted_path(path);
        let mut script = Self::new();
        script
            .push(format!(
                "create vdisk file={} maximum={} type=expandable",
                file, total_mb
            ))
            .push(format!("select vdisk file={}", file))
            .push("attach vdisk");

        for size in partitions_mb {
            script
                .push(format!("create partition primary size={}", size))
                .push("format fs=ntfs quick")
                .push("assign");
        }

        script
    }

    pub fn attach(path: &Path) -> Self {
        let mut script = Self::new();
        script
            .push(format!("select vdisk file={}", quoted_path(path)))
            .push("attach vdisk");
        script
    }

    pub fn detach(path: &Path) -> Self {
        let mut script = Self::new();
        script
            .push(format!("select vdisk file={}", quoted_path(path)))
            .push("detach vdisk");
        script
    }

    pub fn list_partitions(disk: u32) -> Self {
        let mut script = Self::new();
        script
            .push(format!("select disk {}", disk))
            .push("list partition");
        script
    }
}

impl fmt::Display for DiskScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component. The file does not have to exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !matches!(
                    out.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Normalized path wrapped in double quotes so embedded spaces stay one token.
pub fn quoted_path(path: &Path) -> String {
    format!("\"{}\"", normalize_path(path).display())
}
