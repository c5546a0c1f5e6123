//! Reads API keys from a properties file

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Property holding the openexchangerates.org app id.
pub const OPEN_KEY: &str = "open_key";

#[derive(Debug, Default, Clone)]
pub struct KeyFile {
    entries: HashMap<String, String>,
}

impl KeyFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?;
        let keys = Self::parse(&content);
        debug!(count = keys.entries.len(), "Loaded key file");
        Ok(keys)
    }

    /// Parses `key=value` and `key: value` lines; `#` and `!` start comments.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| {
                let idx = line.find(['=', ':'])?;
                let (key, value) = line.split_at(idx);
                Some((key.trim().to_string(), value[1..].trim().to_string()))
            })
            .collect();
        KeyFile { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .with_context(|| format!("Missing key '{key}' in key file"))
    }
}
