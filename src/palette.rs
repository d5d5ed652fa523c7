//! Committed palette: colours the user explicitly kept
//!
//! Entries are only ever appended or cleared as a whole; regenerating a
//! scheme never touches them.

use crate::color::Color;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("palette file unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("palette file has an unexpected format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Opaque handle returned by [`Palette::append`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteHandle(u64);

/// Extra data stored alongside a palette colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteMeta {
    pub name: String,
    pub added_at: DateTime<Utc>,
}

impl PaletteMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            added_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub handle: PaletteHandle,
    pub color: Color,
    #[serde(flatten)]
    pub meta: PaletteMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default)]
    entries: Vec<PaletteEntry>,
    #[serde(default)]
    next_handle: u64,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, color: Color, meta: PaletteMeta) -> PaletteHandle {
        let handle = PaletteHandle(self.next_handle);
        self.next_handle += 1;
        info!(color = %color, name = %meta.name, "added colour to palette");
        self.entries.push(PaletteEntry {
            handle,
            color,
            meta,
        });
        handle
    }

    pub fn remove_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, handle: PaletteHandle) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.handle == handle)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load from a JSON file; a missing file is an empty palette
    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PaletteError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
