//! Shared RON loading helpers.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;

/// Root directory holding the game's data files.
#[derive(Resource, Clone, Debug)]
pub struct DataDirectory(pub PathBuf);

impl Default for DataDirectory {
    fn default() -> Self {
        Self(PathBuf::from("assets/data"))
    }
}

impl DataDirectory {
    /// Path of a file relative to the data directory.
    pub fn file(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Load a RON config file, falling back to `T::default()` on any error.
///
/// A missing file only warns; a broken one is an error but never fatal.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_ron(path) {
        Ok(value) => {
            info!("Loaded {}", path.display());
            value
        }
        Err(e @ DataLoadError::FileNotFound(_)) => {
            warn!("{}. Using defaults.", e);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default, Debug, PartialEq)]
    struct Sample {
        value: f32,
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "swarm-survivor-{}-{}.ron",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_reported() {
        let result = load_ron::<Sample>(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }

    #[test]
    fn parse_error_carries_path() {
        let path = temp_file("broken", "(value: )");
        let result = load_ron::<Sample>(&path);
        match result {
            Err(DataLoadError::ParseError { path: p, .. }) => {
                assert!(p.contains("swarm-survivor-broken"))
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        fs::remove_file(path).ok();
    }

    #[test]
    fn load_or_default_recovers() {
        let path = temp_file("good", "(value: 2.5)");
        assert_eq!(load_or_default::<Sample>(&path), Sample { value: 2.5 });
        fs::remove_file(path).ok();

        assert_eq!(
            load_or_default::<Sample>(Path::new("does/not/exist.ron")),
            Sample::default()
        );
    }
}
