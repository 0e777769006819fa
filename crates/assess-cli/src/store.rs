//! # File Answer Store
//!
//! The persistence collaborator the CLI injects into the engine: one JSON
//! file per framework, `<dir>/<framework>.json`, holding an array of
//! answers. A missing file means the framework was never assessed and reads
//! as an empty list.

use std::path::PathBuf;

use thiserror::Error;

use assess_core::{Answer, FrameworkId};
use assess_engine::AnswerSource;

/// Failures reading or writing the answer store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read answers from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse answers in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode answers for {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write answers to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Answers stored as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileAnswerStore {
    dir: PathBuf,
}

impl FileAnswerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the answer file for `framework`.
    pub fn path_for(&self, framework: &FrameworkId) -> PathBuf {
        self.dir.join(format!("{framework}.json"))
    }

    /// Replace the stored answers for `framework`, creating the directory
    /// if needed.
    pub fn save_answers(&self, framework: &FrameworkId, answers: &[Answer]) -> Result<(), StoreError> {
        let path = self.path_for(framework);
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        let json = serde_json::to_vec_pretty(answers).map_err(|source| StoreError::Encode {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| StoreError::Write { path, source })
    }
}

impl AnswerSource for FileAnswerStore {
    type Error = StoreError;

    fn load_answers(&self, framework: &FrameworkId) -> Result<Vec<Answer>, StoreError> {
        let path = self.path_for(framework);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(framework = %framework, "no stored answers");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fw(id: &str) -> FrameworkId {
        FrameworkId::new(id).unwrap()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileAnswerStore::new(dir.path());
        assert!(store.load_answers(&fw("nis2")).unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileAnswerStore::new(dir.path().join("answers"));
        let answers = vec![Answer::new("nis2-gov-1", "governance", 2).unwrap()];
        store.save_answers(&fw("nis2"), &answers).unwrap();
        assert_eq!(store.load_answers(&fw("nis2")).unwrap(), answers);
        assert!(store.path_for(&fw("nis2")).ends_with("answers/nis2.json"));
    }

    #[test]
    fn out_of_range_level_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("nis2.json"),
            r#"[{"question_id":"nis2-gov-1","category_id":"governance","level":5}]"#,
        )
        .unwrap();
        let store = FileAnswerStore::new(dir.path());
        assert!(matches!(
            store.load_answers(&fw("nis2")).unwrap_err(),
            StoreError::Parse { .. }
        ));
    }
}
