//! Environment-variable source.

use std::collections::{BTreeSet, HashMap};

use strata_core::ConfigSource;

/// Default ordinal of the environment source.
pub const ENV_ORDINAL: i32 = 300;

/// Configuration source backed by environment variables.
///
/// Because most shells restrict variable names, a dotted key is looked up in
/// three forms, first hit wins:
/// 1. the key verbatim (`app.name`),
/// 2. with every non-alphanumeric character replaced by `_` (`app_name`),
/// 3. that form uppercased (`APP_NAME`).
///
/// Profile-scoped keys work the same way: `%dev.app.name` mangles to
/// `_dev_app_name` and `_DEV_APP_NAME`.
pub struct EnvSource {
    name: String,
    ordinal: i32,
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Creates a source over the current process environment.
    pub fn new() -> Self {
        Self::with_vars(std::env::vars())
    }

    /// Creates a source over an explicit variable table.
    pub fn with_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            name: "environment".to_string(),
            ordinal: ENV_ORDINAL,
            vars: vars.into_iter().collect(),
        }
    }

    /// Sets the ordinal of this source.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    fn mangle(key: &str) -> String {
        key.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvSource {
    fn value(&self, key: &str) -> Option<String> {
        if let Some(value) = self.vars.get(key) {
            return Some(value.clone());
        }

        let mangled = Self::mangle(key);
        if let Some(value) = self.vars.get(&mangled) {
            return Some(value.clone());
        }

        self.vars.get(&mangled.to_ascii_uppercase()).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn property_names(&self) -> BTreeSet<String> {
        self.vars.keys().cloned().collect()
    }
}
