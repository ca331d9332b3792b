use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use nd_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

/// A whole-file JSON document. Every load reads the file from disk and every
/// save replaces it; nothing is cached in between and nothing is locked.
pub struct JsonDocument<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, or `T::default()` if the file does not exist yet.
    pub fn load(&self) -> Result<T> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, using empty document", self.path.display());
                Ok(T::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the document indented by four spaces. The bytes land in a
    /// temporary sibling first and are renamed over the target, so a crash
    /// mid-write leaves the previous version intact.
    pub fn save(&self, value: &T) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&buf)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            Error::Storage(format!("Failed to replace {}: {}", self.path.display(), e.error))
        })?;

        debug!("Wrote {} ({} bytes)", self.path.display(), buf.len());
        Ok(())
    }
}

impl<T> Clone for JsonDocument<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonDocument<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDocument")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let doc: JsonDocument<Vec<String>> = JsonDocument::new(dir.path().join("nothing.json"));
        assert!(doc.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_is_indented_and_keeps_umlauts() {
        let dir = tempfile::tempdir().unwrap();
        let doc: JsonDocument<BTreeMap<String, String>> =
            JsonDocument::new(dir.path().join("doc.json"));

        let mut value = BTreeMap::new();
        value.insert("thema".to_string(), "Überblick".to_string());
        doc.save(&value).unwrap();

        let text = fs::read_to_string(doc.path()).unwrap();
        assert_eq!(text, "{\n    \"thema\": \"Überblick\"\n}");
        assert_eq!(doc.load().unwrap(), value);
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let doc: JsonDocument<Vec<u32>> = JsonDocument::new(dir.path().join("nums.json"));

        doc.save(&vec![1, 2, 3]).unwrap();
        doc.save(&vec![4]).unwrap();

        assert_eq!(doc.load().unwrap(), vec![4]);
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let doc: JsonDocument<Vec<u32>> = JsonDocument::new(path);
        assert!(matches!(doc.load(), Err(nd_core::Error::Serialization(_))));
    }
}
