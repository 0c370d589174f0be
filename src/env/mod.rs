pub mod loader;

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;

/// Secrets available to one invocation: values from a secrets file layered
/// over the inherited process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentMap {
    file: HashMap<String, String>,
    inherited: HashMap<String, String>,
}

impl EnvironmentMap {
    /// Load a secrets file (missing is fine) and capture the process environment.
    pub fn load(path: &Path) -> Result<Self> {
        let file = loader::load_file(path)?;
        Ok(Self::from_parts(file, inherited_vars(std::env::vars_os())))
    }

    /// Build a map from explicit file and inherited layers.
    pub fn from_parts(file: HashMap<String, String>, inherited: HashMap<String, String>) -> Self {
        Self { file, inherited }
    }

    /// Build a map from file values only, with an empty inherited layer.
    #[cfg(test)]
    pub fn from_file_vars(file: HashMap<String, String>) -> Self {
        Self::from_parts(file, HashMap::new())
    }

    /// Look up a variable: the file layer first, then the inherited
    /// environment. An empty file value falls through to the inherited one.
    ///
    /// Returns `None` only when neither layer has the name. A present but
    /// empty value is returned as `Some("")`.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        match self.file.get(name) {
            Some(value) if !value.is_empty() => Some(value.as_str()),
            from_file => self
                .inherited
                .get(name)
                .or(from_file)
                .map(String::as_str),
        }
    }

    /// Like [`resolve`](Self::resolve), but treats an empty value as missing.
    pub fn resolve_non_empty(&self, name: &str) -> Option<&str> {
        self.resolve(name).filter(|v| !v.is_empty())
    }

    /// Number of variables loaded from the secrets file.
    pub fn file_var_count(&self) -> usize {
        self.file.len()
    }
}

/// Keep only variables whose name and value are valid UTF-8.
fn inherited_vars<I>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
