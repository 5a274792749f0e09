use crate::config::Config;
use crate::error::{Result, VdiskError};
use crate::models::PartitionScan;
use crate::ui::widgets::PartitionMapWidget;
use crate::utils::vhd;
use crate::utils::{CreateRequest, ScriptRunner, load_disk_info};
use std::path::Path;
use tracing::warn;

/// Front-end state: the runner and the last partition snapshot of disk 0,
/// if any listing has succeeded yet.
pub struct VdiskManagerApp<R: ScriptRunner> {
    runner: R,
    partitions: Option<PartitionScan>,
    disk_map: PartitionMapWidget,
}

impl<R: ScriptRunner> VdiskManagerApp<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            partitions: None,
            disk_map: PartitionMapWidget::new(config.map_width, config.map_height),
        }
    }

    /// Validate the raw size fields, then create and partition the VHD.
    pub fn create_custom_vhd(&mut self, path: &Path, total_size: &str, partition_sizes: &str) -> Result<()> {
        let request = CreateRequest::parse(total_size, partition_sizes)?;
        vhd::create_with_partitions(&self.runner, path, &request)?;
        self.refresh_after_change();
        Ok(())
    }

    pub fn attach_vhd(&mut self, path: &Path) -> Result<()> {
        vhd::attach(&self.runner, path)?;
        self.refresh_after_change();
        Ok(())
    }

    pub fn detach_vhd(&mut self, path: &Path) -> Result<()> {
        vhd::detach(&self.runner, path)?;
        self.refresh_after_change();
        Ok(())
    }

    /// Re-read disk 0 and replace the snapshot.
    pub fn load_disk_info(&mut self) -> Result<&PartitionScan> {
        let scan = load_disk_info(&self.runner)?;
        self.disk_map.update_partitions(&scan);
        Ok(self.partitions.insert(scan))
    }

    #[allow(dead_code)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    #[allow(dead_code)]
    pub fn partitions(&self) -> Option<&PartitionScan> {
        self.partitions.as_ref()
    }

    /// Info lines followed by the partition map, or `None` when disk 0 has
    /// not been listed successfully.
    pub fn disk_info_text(&self) -> Option<String> {
        let partitions = self.partitions.as_ref()?;
        let mut text = partitions.info_lines().join("\n");
        text.push_str("\n\n");
        text.push_str(&self.disk_map.render());
        Some(text)
    }

    // The change already went through; a failed refresh only drops the
    // now-stale snapshot.
    fn refresh_after_change(&mut self) {
        if let Err(e) = self.load_disk_info() {
            warn!("Failed to refresh disk info: {}", e);
            self.partitions = None;
        }
    }
}

/// Whether an error came from user input rather than DiskPart.
pub fn is_input_error(err: &VdiskError) -> bool {
    matches!(err, VdiskError::Validation(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiskScript;
    use crate::utils::diskpart::tests::StubRunner;

    const ATTACHED: &str = "DiskPart successfully attached the virtual disk file.\n\
  Partition 1    Primary           2047 MB  1024 KB\n";

    fn app(runner: StubRunner) -> VdiskManagerApp<StubRunner> {
        VdiskManagerApp::new(runner, &Config::resolve(None, None))
    }

    #[test]
    fn test_attach_refreshes_snapshot() {
        let mut app = app(StubRunner::new(true, ATTACHED));
        app.attach_vhd(Path::new("/vm/a.vhd")).unwrap();

        let scripts = app.runner().scripts.borrow();
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[1], DiskScript::list_partitions(0));
        assert_eq!(app.partitions().unwrap().records().len(), 1);
        assert!(app.disk_info_text().unwrap().starts_with("Partition 1: 2047 MB (2047 MB)"));
    }

    #[test]
    fn test_failed_detach_skips_refresh() {
        let mut app = app(StubRunner::new(false, "DiskPart has encountered an error"));
        let err = app.detach_vhd(Path::new("/vm/a.vhd")).unwrap_err();
        assert!(!is_input_error(&err));
        assert_eq!(app.runner().calls(), 1);
        assert!(app.partitions().is_none());
        assert!(app.disk_info_text().is_none());
    }

    #[test]
    fn test_failed_refresh_shows_no_snapshot() {
        let mut app = app(StubRunner::with_replies(&[
            (true, ATTACHED),
            (false, "Access is denied.\n"),
        ]));
        app.attach_vhd(Path::new("/vm/a.vhd")).unwrap();
        assert_eq!(app.runner().calls(), 2);
        assert!(app.partitions().is_none());
        assert!(app.disk_info_text().is_none());
    }

    #[test]
    fn test_failed_refresh_drops_stale_snapshot() {
        let mut app = app(StubRunner::with_replies(&[
            (true, ATTACHED),
            (true, ATTACHED),
            (true, "DiskPart successfully detached the virtual disk file.\n"),
            (false, "Access is denied.\n"),
        ]));
        app.attach_vhd(Path::new("/vm/a.vhd")).unwrap();
        assert!(app.disk_info_text().is_some());

        app.detach_vhd(Path::new("/vm/a.vhd")).unwrap();
        assert_eq!(app.runner().calls(), 4);
        assert!(app.disk_info_text().is_none());
    }

    #[test]
    fn test_failed_listing_is_not_reported_as_empty() {
        let mut app = app(StubRunner::new(false, "Access is denied.\n"));
        assert!(matches!(app.load_disk_info(), Err(VdiskError::Rejected { .. })));
        assert!(app.disk_info_text().is_none());
    }

    #[test]
    fn test_invalid_sizes_never_reach_diskpart() {
        let mut app = app(StubRunner::new(true, ATTACHED));
        let err = app
            .create_custom_vhd(Path::new("/vm/a.vhd"), "4", "3,2")
            .unwrap_err();
        assert!(is_input_error(&err));
        assert_eq!(app.runner().calls(), 0);
    }

    #[test]
    fn test_empty_disk_info() {
        let mut app = app(StubRunner::new(true, "There are no partitions on this disk to show.\n"));
        assert!(app.load_disk_info().unwrap().is_empty());
        let text = app.disk_info_text().unwrap();
        assert!(text.starts_with("No partitions found on Disk 0."));
        assert!(text.contains("No Partitions Found"));
    }
}
