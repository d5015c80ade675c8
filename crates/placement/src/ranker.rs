use crate::config::RankerConfig;
use crate::error::{PlacementError, Result};
use crate::locator::PlacementLocator;
use crate::scanner::FileScanner;
use crate::scorer::MatchScorer;
use crate::types::Placement;
use snippet_syntax::SourceTree;
use std::path::Path;

/// Scores a snippet against every candidate file in a directory and returns
/// the best placements.
pub struct SnippetRanker {
    config: RankerConfig,
    scorer: MatchScorer,
    locator: PlacementLocator,
}

impl SnippetRanker {
    pub fn new(config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer: MatchScorer::new(),
            locator: PlacementLocator::new(),
        })
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank placements for `snippet` under `dir`.
    ///
    /// Files are visited in path order; unreadable, undecodable and empty
    /// files are skipped. Survivors are sorted by descending confidence with
    /// ties kept in visiting order. An empty result means no file cleared the
    /// threshold.
    pub fn rank(&self, snippet: &str, dir: impl AsRef<Path>) -> Result<Vec<Placement>> {
        let dir = dir.as_ref();
        if snippet.trim().is_empty() {
            return Err(PlacementError::invalid_input("snippet cannot be empty"));
        }
        if let Err(e) = SourceTree::parse(snippet) {
            return Err(PlacementError::invalid_input(format!(
                "invalid Python syntax in snippet: {e}"
            )));
        }
        if !dir.is_dir() {
            return Err(PlacementError::DirectoryNotFound(dir.display().to_string()));
        }

        let files = FileScanner::new(dir)
            .recursive(self.config.recursive)
            .scan();

        let mut placements = Vec::new();
        for path in files {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Error reading {}: {e}", path.display());
                    continue;
                }
            };
            let target = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Skipping {}: not valid UTF-8 ({e})", path.display());
                    continue;
                }
            };
            if target.trim().is_empty() {
                log::debug!("Skipping empty file {}", path.display());
                continue;
            }

            if let Some(placement) = self.place(&path, &target, snippet) {
                placements.push(placement);
            }
        }

        placements.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        placements.truncate(self.config.max_results);
        Ok(placements)
    }

    /// Score and locate `snippet` within one file's text
    pub fn place(&self, path: &Path, target: &str, snippet: &str) -> Option<Placement> {
        let signals = self.scorer.score(target, snippet);
        let confidence = signals.confidence();
        if confidence <= self.config.threshold {
            log::debug!(
                "Discarding {} (confidence {confidence:.3} <= {})",
                path.display(),
                self.config.threshold
            );
            return None;
        }

        let Some(span) = self.locator.locate(target, snippet) else {
            log::debug!("No anchor for snippet in {}", path.display());
            return None;
        };

        let lines: Vec<&str> = target.lines().collect();
        Some(Placement {
            file_path: path.to_path_buf(),
            confidence,
            matched_text: span.slice(&lines),
            start_line: span.start_line,
            end_line: span.end_line,
            signals,
        })
    }
}
