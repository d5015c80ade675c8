use crate::config::RankerConfig;
use crate::error::{PlacementError, Result};
use crate::indent::IndentationAdapter;
use crate::patch::PatchWriter;
use crate::ranker::SnippetRanker;
use crate::types::{PatchTransaction, Placement};
use std::path::Path;

/// Full snippet flow: rank placements, then patch the chosen one in place.
pub struct SnippetIntegrator {
    ranker: SnippetRanker,
    adapter: IndentationAdapter,
    writer: PatchWriter,
}

impl SnippetIntegrator {
    pub fn new(config: RankerConfig) -> Result<Self> {
        Ok(Self {
            ranker: SnippetRanker::new(config)?,
            adapter: IndentationAdapter::new(),
            writer: PatchWriter::new(),
        })
    }

    pub fn locate(&self, snippet: &str, dir: impl AsRef<Path>) -> Result<Vec<Placement>> {
        self.ranker.rank(snippet, dir)
    }

    /// Compute the patch for `placement` without touching the disk
    pub fn preview(&self, snippet: &str, placement: &Placement) -> Result<PatchTransaction> {
        let target = &placement.file_path;
        if !target.is_file() {
            return Err(PlacementError::FileNotFound(target.display().to_string()));
        }

        let existing = std::fs::read_to_string(target)?;
        let updated = self.adapter.splice(&existing, snippet, placement.span());
        Ok(PatchTransaction::new(target, updated))
    }

    /// Rewrite the placement's line range with `snippet`.
    ///
    /// The original file is backed up first; if the overwrite fails it is
    /// restored from the backup before the error is returned.
    pub fn apply(&self, snippet: &str, placement: &Placement) -> Result<PatchTransaction> {
        let tx = self.preview(snippet, placement)?;
        self.writer.commit(&tx)?;

        log::info!(
            "Patched {} lines {}-{} (backup at {})",
            tx.target_path.display(),
            placement.start_line,
            placement.end_line,
            tx.backup_path.display()
        );
        Ok(tx)
    }

    /// The `pick`-th best placement (0-based).
    ///
    /// Returns `Ok(None)` when no file clears the confidence threshold.
    pub fn select(
        &self,
        snippet: &str,
        dir: impl AsRef<Path>,
        pick: usize,
    ) -> Result<Option<Placement>> {
        let mut placements = self.locate(snippet, dir)?;
        if placements.is_empty() {
            return Ok(None);
        }
        if pick >= placements.len() {
            return Err(PlacementError::invalid_input(format!(
                "placement {pick} requested but only {} found",
                placements.len()
            )));
        }
        Ok(Some(placements.swap_remove(pick)))
    }

    /// Locate and apply the `pick`-th best placement (0-based).
    ///
    /// Returns `Ok(None)` when no file clears the confidence threshold.
    pub fn integrate(
        &self,
        snippet: &str,
        dir: impl AsRef<Path>,
        pick: usize,
    ) -> Result<Option<(Placement, PatchTransaction)>> {
        let Some(placement) = self.select(snippet, dir, pick)? else {
            return Ok(None);
        };
        let tx = self.apply(snippet, &placement)?;
        Ok(Some((placement, tx)))
    }
}
