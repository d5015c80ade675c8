//! # Snippet Placement
//!
//! Finds where a code snippet belongs in an existing codebase and rewrites
//! that range in place.
//!
//! ## Pipeline
//!
//! ```text
//! Snippet + directory
//!     │
//!     ├──> FileScanner (Python files, path order)
//!     │
//!     ├──> per file
//!     │      ├─> MatchScorer       five signals -> confidence
//!     │      └─> PlacementLocator  first-line anchor + tail probe -> line span
//!     │
//!     ├──> SnippetRanker (threshold, stable sort, top N)
//!     │
//!     └──> chosen placement
//!            ├─> IndentationAdapter  re-root snippet depth
//!            └─> PatchWriter         backup, overwrite, restore on failure
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use snippet_placement::{RankerConfig, SnippetIntegrator};
//!
//! let integrator = SnippetIntegrator::new(RankerConfig::default())?;
//! let snippet = "def foo():\n    return 2";
//! if let Some((placement, tx)) = integrator.integrate(snippet, "src", 0)? {
//!     println!(
//!         "patched {} lines {}-{}, backup at {}",
//!         placement.file_path.display(),
//!         placement.start_line,
//!         placement.end_line,
//!         tx.backup_path.display()
//!     );
//! }
//! # Ok::<(), snippet_placement::PlacementError>(())
//! ```

mod config;
mod error;
mod indent;
mod integrator;
mod locator;
mod patch;
mod ranker;
mod scanner;
mod scorer;
mod types;

pub use config::RankerConfig;
pub use error::{PlacementError, Result};
pub use indent::{leading_whitespace, IndentationAdapter};
pub use integrator::SnippetIntegrator;
pub use locator::{PlacementLocator, TAIL_PROBE};
pub use patch::PatchWriter;
pub use ranker::SnippetRanker;
pub use scanner::FileScanner;
pub use scorer::{
    ast_similarity, end_line_signal, first_line_signal, keyword_overlap, string_similarity,
    MatchScorer, END_LINE_PROBE,
};
pub use types::{
    LineSpan, MatchSignals, PatchTransaction, Placement, WEIGHT_AST_SIMILARITY, WEIGHT_END_LINE,
    WEIGHT_FIRST_LINE, WEIGHT_KEYWORD_OVERLAP, WEIGHT_STRING_SIMILARITY,
};
