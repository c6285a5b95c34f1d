use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;

/// On-disk encoding of a data file, chosen from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_filename(name: &str) -> Self {
        if name.ends_with(".json") {
            FileFormat::Json
        } else {
            FileFormat::Yaml
        }
    }

    fn decode<T: DeserializeOwned>(self, contents: &str, path: &Path) -> Result<T> {
        match self {
            FileFormat::Json => serde_json::from_str(contents)
                .with_context(|| format!("failed to parse JSON from {}", path.display())),
            FileFormat::Yaml => serde_norway::from_str(contents)
                .with_context(|| format!("failed to parse YAML from {}", path.display())),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            FileFormat::Json => {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            }
            FileFormat::Yaml => serde_norway::to_string(value).context("failed to serialize YAML"),
        }
    }
}

/// A data file living in the data directory. Missing files load as `Default`.
pub trait Persistable: Sized + Default + Serialize + DeserializeOwned {
    fn filename() -> &'static str;

    fn format() -> FileFormat {
        FileFormat::from_filename(Self::filename())
    }

    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            tracing::debug!(file = %path.display(), "data file missing, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::format().decode(&contents, &path)
    }

    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create dir {}", dir.display()))?;
        let path = dir.join(Self::filename());
        let contents = Self::format().encode(self)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
