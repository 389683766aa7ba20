//! Statement file discovery.
//!
//! Statements live as `.txt` files directly inside the source folder;
//! anything nested deeper belongs to other tooling and is ignored.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::constants::STATEMENT_EXTENSION;
use crate::error::{BillError, Result};

/// File discovery component for statement batches
#[derive(Debug)]
pub struct FileDiscovery {
    source_path: PathBuf,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(source_path: PathBuf) -> Self {
        Self { source_path }
    }

    /// Discover all statement files in the source folder, sorted by name
    pub fn discover_statement_files(&self) -> Result<Vec<PathBuf>> {
        if !self.source_path.is_dir() {
            return Err(BillError::SourceNotFound {
                path: self.source_path.clone(),
            });
        }

        debug!(
            "Searching for statement files in: {}",
            self.source_path.display()
        );

        let mut files: Vec<PathBuf> = WalkDir::new(&self.source_path)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_statement_file(path))
            .collect();
        files.sort();

        debug!("Found {} statement files", files.len());
        Ok(files)
    }
}

/// Check if a path is a statement text file
fn is_statement_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == STATEMENT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_statement_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "bill").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "bill").unwrap();
        fs::write(temp_dir.path().join("notes.csv"), "ignored").unwrap();

        // Nested files are not picked up.
        let nested = temp_dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("c.txt"), "ignored").unwrap();

        let discovery = FileDiscovery::new(temp_dir.path().to_path_buf());
        let files = discovery.discover_statement_files().unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
    }

    #[test]
    fn test_missing_source_folder() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let discovery = FileDiscovery::new(missing.clone());
        let result = discovery.discover_statement_files();

        assert!(matches!(
            result,
            Err(BillError::SourceNotFound { path }) if path == missing
        ));
    }

    #[test]
    fn test_is_statement_file() {
        assert!(is_statement_file(Path::new("bill.txt")));
        assert!(!is_statement_file(Path::new("bill.csv")));
        assert!(!is_statement_file(Path::new("bill")));
        assert!(!is_statement_file(Path::new("bill.TXT")));
    }
}
