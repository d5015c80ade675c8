use ignore::WalkBuilder;
use snippet_syntax::Language;
use std::path::{Path, PathBuf};

/// Files larger than this are never considered as placement targets
const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

/// Finds candidate source files under a directory.
///
/// Results are sorted by path so that ranking ties resolve the same way on
/// every platform.
pub struct FileScanner {
    root: PathBuf,
    recursive: bool,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            recursive: false,
        }
    }

    /// Builder: descend into subdirectories
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Scan for Python files (.gitignore aware, hidden entries skipped)
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .max_depth(if self.recursive { None } else { Some(1) });

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if Language::from_path(path) != Language::Python {
                        continue;
                    }

                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > MAX_FILE_SIZE_BYTES {
                            log::warn!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                MAX_FILE_SIZE_BYTES
                            );
                            continue;
                        }
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} candidate files in {}", files.len(), self.root.display());
        files
    }
}
