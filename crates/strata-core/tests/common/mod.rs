#![allow(dead_code)]
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use strata_core::ConfigSource;

/// In-memory source fixture with a name and ordinal.
pub struct FixtureSource {
    name: String,
    ordinal: i32,
    entries: BTreeMap<String, String>,
}

impl FixtureSource {
    pub fn new(name: &str, ordinal: i32) -> Self {
        Self {
            name: name.to_string(),
            ordinal,
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigSource for FixtureSource {
    fn value(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn property_names(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }
}
