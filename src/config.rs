use std::env;
use std::path::PathBuf;

/// Environment variable overriding the DiskPart executable.
pub const DISKPART_BIN_ENV: &str = "DISKPART_BIN";
const DEFAULT_DISKPART_BIN: &str = "diskpart";

pub const DEFAULT_MAP_WIDTH: u32 = 80;
pub const DEFAULT_MAP_HEIGHT: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub diskpart_bin: PathBuf,
    /// Partition map size, in terminal cells.
    pub map_width: u32,
    pub map_height: u32,
}

impl Config {
    /// `--diskpart` wins over `DISKPART_BIN`, which wins over `diskpart` on PATH.
    pub fn resolve(diskpart_flag: Option<PathBuf>, env_bin: Option<String>) -> Self {
        let diskpart_bin = diskpart_flag
            .or_else(|| env_bin.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DISKPART_BIN));

        Self {
            diskpart_bin,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
        }
    }

    pub fn from_env(diskpart_flag: Option<PathBuf>) -> Self {
        Self::resolve(diskpart_flag, env::var(DISKPART_BIN_ENV).ok())
    }

    pub fn with_map_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(width) = width {
            self.map_width = width;
        }
        if let Some(height) = height {
            self.map_height = height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_env() {
        let config = Config::resolve(Some(PathBuf::from("C:\\dp.exe")), Some("other".into()));
        assert_eq!(config.diskpart_bin, PathBuf::from("C:\\dp.exe"));
    }

    #[test]
    fn test_env_then_default() {
        assert_eq!(
            Config::resolve(None, Some("/opt/diskpart".into())).diskpart_bin,
            PathBuf::from("/opt/diskpart")
        );
        assert_eq!(Config::resolve(None, Some("  ".into())).diskpart_bin, PathBuf::from("diskpart"));
        assert_eq!(Config::resolve(None, None).diskpart_bin, PathBuf::from("diskpart"));
    }

    #[test]
    fn test_map_size_overrides() {
        let config = Config::resolve(None, None).with_map_size(Some(120), None);
        assert_eq!((config.map_width, config.map_height), (120, DEFAULT_MAP_HEIGHT));
    }
}
