// src/catalog.rs

use std::{
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;

use crate::{config::Config, error::AppError, models::file::FileEntry};

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("file name pattern is valid")
});

/// A document read from the data directory.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub json: Value,
    pub modified_at: Option<DateTime<Utc>>,
}

/// The documents the viewer offers, and where their JSON lives.
///
/// The name list is fixed at startup; files are read on demand.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    data_dir: PathBuf,
    names: Vec<String>,
}

impl FileCatalog {
    pub fn new(data_dir: impl Into<PathBuf>, names: Vec<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            names,
        }
    }

    /// Uses the configured file list when there is one, otherwise scans the
    /// data directory.
    pub fn from_config(config: &Config) -> io::Result<Self> {
        match &config.file_list {
            Some(names) => Ok(Self::new(&config.data_dir, names.clone())),
            None => Self::scan(&config.data_dir),
        }
    }

    /// Lists `*.json` stems in `data_dir`, sorted. A missing directory gives
    /// an empty catalog.
    pub fn scan(data_dir: impl AsRef<Path>) -> io::Result<Self> {
        let data_dir = data_dir.as_ref();

        let entries = match std::fs::read_dir(data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("Data directory {} does not exist", data_dir.display());
                return Ok(Self::new(data_dir, Vec::new()));
            }
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();

        Ok(Self::new(data_dir, names))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Case-insensitive substring search over the catalog. A blank term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<FileEntry> {
        if term.trim().is_empty() {
            return self.names.iter().map(|name| FileEntry::new(name)).collect();
        }

        let term = term.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&term))
            .map(|name| FileEntry::new(name))
            .collect()
    }

    /// Reads and parses `<data_dir>/<name>.json`.
    pub async fn load(&self, name: &str) -> Result<LoadedFile, AppError> {
        if !is_valid_name(name) {
            return Err(AppError::BadRequest(format!("Invalid file name '{}'", name)));
        }

        let path = self.data_dir.join(format!("{}.json", name));
        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                AppError::NotFound(format!("File '{}' not found", name))
            } else {
                AppError::from(e)
            }
        })?;

        let json = serde_json::from_str(&contents)?;

        let modified_at = tokio::fs::metadata(&path)
            .await
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .ok();

        Ok(LoadedFile { json, modified_at })
    }
}

pub fn is_valid_name(name: &str) -> bool {
    FILE_NAME.is_match(name)
}
