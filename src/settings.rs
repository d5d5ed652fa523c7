//! Namespaced key-value store for values that survive restarts
//!
//! Every namespace is a TOML table; keys hold either an int32 or a float.
//! Readers always supply a default, so a missing or mistyped key is never
//! an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings store unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("settings file is corrupt: {0}")]
    Corrupt(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Value {
    Int32(i32),
    Float(f64),
}

type Namespace = BTreeMap<String, Value>;

/// Key-value settings persisted to a TOML file
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    namespaces: BTreeMap<String, Namespace>,
}

impl SettingsStore {
    /// Store that lives only in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`; a missing file yields an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let namespaces = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            namespaces,
        })
    }

    /// Scoped view on one namespace
    pub fn namespace<'a>(&'a mut self, name: &str) -> Settings<'a> {
        Settings {
            values: self.namespaces.entry(name.to_string()).or_default(),
        }
    }

    /// Write everything back to disk (no-op for an in-memory store)
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(&self.namespaces)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Accessors for the keys of a single namespace
pub struct Settings<'a> {
    values: &'a mut Namespace,
}

impl Settings<'_> {
    pub fn get_int32_or(&self, key: &str, default: i32) -> i32 {
        match self.values.get(key) {
            Some(Value::Int32(v)) => *v,
            _ => default,
        }
    }

    pub fn get_float_or(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(Value::Float(v)) => *v as f32,
            Some(Value::Int32(v)) => *v as f32,
            None => default,
        }
    }

    pub fn set_int32(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), Value::Int32(value));
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), Value::Float(f64::from(value)));
    }
}
