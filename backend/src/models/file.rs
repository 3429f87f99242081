// src/models/file.rs

use serde::Serialize;

const NAME_PREFIX: &str = "ENG_";
const DISPLAY_NAME_CHARS: usize = 15;

/// An entry in the file list sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// File stem, e.g. `ENG_3353111026223547757`.
    pub name: String,

    /// Shortened label: prefix dropped, first 15 characters, then `...`.
    pub display_name: String,
}

/// Header shown above an opened document.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub display_name: String,

    /// `파일 크기: ... | 페이지: ...`, empty when the export has no metadata.
    pub meta: String,
}

impl FileEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name(name),
        }
    }
}

pub fn display_name(name: &str) -> String {
    let short: String = name
        .replacen(NAME_PREFIX, "", 1)
        .chars()
        .take(DISPLAY_NAME_CHARS)
        .collect();
    format!("{short}...")
}
