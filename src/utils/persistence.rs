//! JSON persistence helpers for files under ~/.skyhop/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.skyhop/ directory path, creating it if needed.
pub fn skyhop_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".skyhop");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.skyhop/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(skyhop_dir()?.join(filename))
}

/// Read and parse a JSON file. `Ok(None)` if the file does not exist.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("skyhop-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_load_missing_returns_none() {
        let loaded: Option<Vec<String>> =
            load_json(&temp_path("nonexistent_12345.json")).expect("missing file is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("persistence_roundtrip.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        save_json(&path, &data).expect("save should succeed");

        let loaded: Option<Vec<String>> = load_json(&path).expect("load should succeed");
        assert_eq!(loaded, Some(data));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_invalid_json_is_invalid_data() {
        let path = temp_path("persistence_invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = load_json::<Vec<String>>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        fs::remove_file(path).ok();
    }
}
