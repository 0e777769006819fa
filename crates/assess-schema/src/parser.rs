//! Shared YAML/JSON loading.
//!
//! All configuration files go through these functions so that every parse
//! failure reports the file it came from. The format is picked by
//! extension: `.yaml`/`.yml` via serde_yaml, `.json` via serde_json.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{SchemaError, SchemaResult};

fn read_file(path: &Path) -> SchemaResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SchemaError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SchemaError::Io(e)
        }
    })
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: DeserializeOwned>(path: &Path) -> SchemaResult<T> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| SchemaError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a JSON file into a strongly-typed struct.
pub fn load_json_typed<T: DeserializeOwned>(path: &Path) -> SchemaResult<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| SchemaError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a YAML or JSON file, choosing the parser by extension.
pub fn load_typed<T: DeserializeOwned>(path: &Path) -> SchemaResult<T> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => load_yaml_typed(path),
        Some("json") => load_json_typed(path),
        _ => Err(SchemaError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Whether a path has one of the supported configuration extensions.
pub fn is_config_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml") | Some("json")
    )
}

/// List configuration files directly inside `dir`, sorted by file name so
/// that load order (and therefore declaration order) is deterministic.
pub fn config_files_in(dir: &Path) -> SchemaResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SchemaError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_config_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Locate the first existing `<stem>.yaml`, `<stem>.yml` or `<stem>.json`
/// in `dir`.
pub fn find_config_file(dir: &Path, stem: &str) -> Option<PathBuf> {
    ["yaml", "yml", "json"]
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}
