use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed signal weights; they sum to 1.0
pub const WEIGHT_FIRST_LINE: f64 = 0.3;
pub const WEIGHT_STRING_SIMILARITY: f64 = 0.2;
pub const WEIGHT_AST_SIMILARITY: f64 = 0.2;
pub const WEIGHT_KEYWORD_OVERLAP: f64 = 0.1;
pub const WEIGHT_END_LINE: f64 = 0.2;

/// Similarity signals between a snippet and one target file, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSignals {
    pub first_line: f64,
    pub string_similarity: f64,
    pub ast_similarity: f64,
    pub keyword_overlap: f64,
    pub end_line: f64,
}

impl MatchSignals {
    /// Weighted sum of the signals, in [0, 1]
    pub fn confidence(&self) -> f64 {
        WEIGHT_FIRST_LINE * self.first_line
            + WEIGHT_STRING_SIMILARITY * self.string_similarity
            + WEIGHT_AST_SIMILARITY * self.ast_similarity
            + WEIGHT_KEYWORD_OVERLAP * self.keyword_overlap
            + WEIGHT_END_LINE * self.end_line
    }
}

/// 1-based inclusive line range; `start_line <= end_line` always holds.
///
/// "No match" is expressed as `None` wherever a span is optional, never as a
/// sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineSpan {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        debug_assert!(start_line >= 1 && start_line <= end_line);
        Self {
            start_line,
            end_line,
        }
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Text of the spanned lines in `lines`, joined with `\n`
    pub fn slice(&self, lines: &[&str]) -> String {
        let start = (self.start_line - 1).min(lines.len());
        let end = self.end_line.min(lines.len());
        lines[start..end].join("\n")
    }
}

/// A candidate location for a snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub file_path: PathBuf,
    pub confidence: f64,
    pub matched_text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub signals: MatchSignals,
}

impl Placement {
    pub fn span(&self) -> LineSpan {
        LineSpan::new(self.start_line, self.end_line)
    }
}

/// One backup-then-overwrite of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTransaction {
    pub target_path: PathBuf,
    pub backup_path: PathBuf,
    pub new_content: String,
}

impl PatchTransaction {
    /// Suffix replacing the target's extension for its backup
    pub const BACKUP_EXTENSION: &'static str = "old";

    pub fn new(target_path: impl AsRef<Path>, new_content: impl Into<String>) -> Self {
        let target_path = target_path.as_ref().to_path_buf();
        let backup_path = Self::backup_path_for(&target_path);
        Self {
            target_path,
            backup_path,
            new_content: new_content.into(),
        }
    }

    /// Sibling backup path: `src/app.py` -> `src/app.old`
    pub fn backup_path_for(target: &Path) -> PathBuf {
        target.with_extension(Self::BACKUP_EXTENSION)
    }
}
