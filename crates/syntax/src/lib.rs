//! # Snippet Syntax
//!
//! Tree-sitter parsing for code units handled by the snippet tools.
//!
//! ```text
//! Source text
//!     │
//!     ├──> Language detection (from extension)
//!     │
//!     ├──> Tree-sitter parse ──> rejected on any ERROR/MISSING node
//!     │
//!     └──> SourceTree
//!          ├─> walk()            pre-order over all nodes
//!          ├─> node_count()      named nodes, comments excluded
//!          └─> name_references() identifiers used as names
//! ```
//!
//! ## Example
//!
//! ```rust
//! use snippet_syntax::SourceTree;
//!
//! let tree = SourceTree::parse("total = price * count\n").unwrap();
//! let names: Vec<_> = tree.name_references().into_iter().collect();
//! assert_eq!(names, vec!["count", "price", "total"]);
//! ```

mod error;
mod language;
mod tree;

pub use error::{Result, SyntaxError};
pub use language::Language;
pub use tree::{is_name_reference, NodeWalk, SourceTree};
pub use tree_sitter::Node;
