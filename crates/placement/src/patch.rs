use crate::error::{PlacementError, Result};
use crate::types::PatchTransaction;
use std::fs::{self, File, FileTimes};
use std::io::Write;
use std::path::PathBuf;

/// Backup-then-overwrite file writer.
///
/// The backup is a byte-identical sibling copy carrying the original's
/// permissions and timestamps, flushed to disk before the target is touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchWriter;

impl PatchWriter {
    pub fn new() -> Self {
        Self
    }

    /// Back up the target, overwrite it, and return the backup path.
    ///
    /// A failed overwrite is rolled back from the backup before the error is
    /// returned.
    pub fn commit(&self, tx: &PatchTransaction) -> Result<PathBuf> {
        self.backup(tx)?;
        if let Err(e) = self.overwrite(tx) {
            log::warn!("Patch of {} failed, restoring: {e}", tx.target_path.display());
            self.restore(tx)?;
            return Err(e);
        }
        Ok(tx.backup_path.clone())
    }

    /// Durably copy the target to its backup path
    pub fn backup(&self, tx: &PatchTransaction) -> Result<()> {
        if !tx.target_path.is_file() {
            return Err(PlacementError::FileNotFound(
                tx.target_path.display().to_string(),
            ));
        }
        if tx.backup_path == tx.target_path {
            return Err(PlacementError::invalid_input(format!(
                "backup of {} would overwrite the file itself",
                tx.target_path.display()
            )));
        }

        let original = fs::read(&tx.target_path)?;
        let metadata = fs::metadata(&tx.target_path)?;

        let mut backup = File::create(&tx.backup_path)?;
        backup.write_all(&original)?;

        let mut times = FileTimes::new();
        if let Ok(modified) = metadata.modified() {
            times = times.set_modified(modified);
        }
        if let Ok(accessed) = metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        if let Err(e) = backup.set_times(times) {
            log::debug!(
                "Could not carry timestamps to {}: {e}",
                tx.backup_path.display()
            );
        }

        backup.sync_all()?;
        backup.set_permissions(metadata.permissions())?;

        log::debug!(
            "Backed up {} to {}",
            tx.target_path.display(),
            tx.backup_path.display()
        );
        Ok(())
    }

    /// Replace the target's content with the transaction's new content
    pub fn overwrite(&self, tx: &PatchTransaction) -> Result<()> {
        if !tx.target_path.is_file() {
            return Err(PlacementError::FileNotFound(
                tx.target_path.display().to_string(),
            ));
        }

        let mut file = File::create(&tx.target_path)?;
        file.write_all(tx.new_content.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Copy the backup back over the target
    pub fn restore(&self, tx: &PatchTransaction) -> Result<()> {
        if !tx.backup_path.is_file() {
            return Err(PlacementError::FileNotFound(
                tx.backup_path.display().to_string(),
            ));
        }

        let original = fs::read(&tx.backup_path)?;
        let mut file = File::create(&tx.target_path)?;
        file.write_all(&original)?;
        file.sync_all()?;

        log::info!(
            "Restored {} from {}",
            tx.target_path.display(),
            tx.backup_path.display()
        );
        Ok(())
    }
}
