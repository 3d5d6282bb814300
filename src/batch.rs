//! Parallel Multi-File Driver
//!
//! The single-file pipeline has no cross-file state, so batches fan out
//! over rayon with one parser per worker. Per-file failures stay attached
//! to their path instead of aborting the batch.
//!
//! @module batch

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::index::types::{detect_language, SemanticIndex};
use crate::index::index_source;

/// Index one file from disk, detecting its language from the extension
pub fn index_path(path: &Path) -> Result<SemanticIndex> {
    let language = detect_language(path).ok_or_else(|| Error::UnsupportedLanguage {
        language: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("<none>")
            .to_string(),
    })?;
    let source = std::fs::read_to_string(path)?;
    index_source(&path.to_string_lossy(), &source, language)
}

/// Index many files in parallel. Results keep their input order.
pub fn index_files(paths: &[PathBuf]) -> Vec<(PathBuf, Result<SemanticIndex>)> {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let result = index_path(path);
            if let Err(e) = &result {
                warn!(file = %path.display(), error = %e, "indexing failed");
            }
            (path.clone(), result)
        })
        .collect();
    debug!(
        total = results.len(),
        ok = results.iter().filter(|(_, r)| r.is_ok()).count(),
        "batch finished"
    );
    results
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_index_files_mixed_batch() {
        let dir = tempfile::tempdir().unwrap();
        let py = dir.path().join("a.py");
        let rs = dir.path().join("b.rs");
        let txt = dir.path().join("c.txt");
        fs::write(&py, "def f(): pass\n").unwrap();
        fs::write(&rs, "pub fn g() {}\n").unwrap();
        fs::write(&txt, "not code\n").unwrap();

        let results = index_files(&[py.clone(), rs.clone(), txt.clone()]);
        assert_eq!(results.len(), 3);

        let by_path = |p: &PathBuf| &results.iter().find(|(path, _)| path == p).unwrap().1;
        let py_index = by_path(&py).as_ref().unwrap();
        assert_eq!(py_index.definitions.functions.len(), 1);
        assert!(by_path(&rs).is_ok());
        assert!(matches!(
            by_path(&txt),
            Err(Error::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_index_path_missing_file() {
        let missing = PathBuf::from("/nonexistent/x.py");
        assert!(matches!(index_path(&missing), Err(Error::Io(_))));
    }
}
