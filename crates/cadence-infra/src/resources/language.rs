// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use cadence_core::Subsystem;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Read access to the loaded string table.
#[derive(Debug, Clone, Default)]
pub struct LanguageHandle {
    strings: Arc<RwLock<HashMap<String, String>>>,
}

impl LanguageHandle {
    /// The translation of `key`, if the table has one.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.strings.read().ok()?.get(key).cloned()
    }

    /// The translation of `key`, or `key` itself when there is none.
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }
}

/// Loads a flat JSON object of `"key": "text"` pairs.
pub struct LanguageTable {
    file: Option<PathBuf>,
    handle: LanguageHandle,
}

impl LanguageTable {
    /// Creates a table over `file`; `None` means keys translate to
    /// themselves.
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            handle: LanguageHandle::default(),
        }
    }

    /// A handle that sees the table once loaded.
    pub fn handle(&self) -> LanguageHandle {
        self.handle.clone()
    }

    fn replace(&self, strings: HashMap<String, String>) {
        match self.handle.strings.write() {
            Ok(mut table) => *table = strings,
            Err(_) => log::error!("Language table lock poisoned."),
        }
    }
}

impl Subsystem for LanguageTable {
    fn name(&self) -> &'static str {
        "language"
    }

    fn init(&mut self) -> Result<()> {
        let Some(file) = &self.file else {
            log::debug!("No language file configured.");
            return Ok(());
        };
        let json = std::fs::read_to_string(file)
            .with_context(|| format!("reading language file {}", file.display()))?;
        let strings: HashMap<String, String> = serde_json::from_str(&json)
            .with_context(|| format!("parsing language file {}", file.display()))?;
        log::info!("Loaded {} strings from {}.", strings.len(), file.display());
        self.replace(strings);
        Ok(())
    }

    fn close(&mut self) {
        self.replace(HashMap::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_strings_and_falls_back_to_keys() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("en.json");
        std::fs::write(&path, r#"{ "demo.title": "Cadence demo" }"#).expect("write");

        let mut table = LanguageTable::new(Some(path));
        let handle = table.handle();
        assert_eq!(handle.get("demo.title"), "demo.title");

        table.init().expect("init");
        assert_eq!(handle.get("demo.title"), "Cadence demo");
        assert_eq!(handle.get("missing"), "missing");
        assert_eq!(handle.lookup("missing"), None);

        table.close();
        assert_eq!(handle.get("demo.title"), "demo.title");
    }

    #[test]
    fn malformed_file_fails_init() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2").expect("write");
        assert!(LanguageTable::new(Some(path)).init().is_err());
    }
}
