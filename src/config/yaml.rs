//! Required-key lookup over a flat YAML mapping

use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use yaml_rust::{Yaml, YamlLoader};

/// A parsed flat key/value YAML document
pub struct YamlDoc {
    path: PathBuf,
    root: Yaml,
}

impl YamlDoc {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse document text; `path` is only used in error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        // An empty file loads as no documents; treat it as an empty mapping so
        // the first lookup reports the missing key.
        let root = docs
            .into_iter()
            .next()
            .unwrap_or_else(|| Yaml::Hash(Default::default()));

        if !matches!(root, Yaml::Hash(_)) {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                detail: "expected a key/value mapping at the top level".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lookup(&self, key: &'static str) -> Result<&Yaml, ConfigError> {
        match &self.root[key] {
            Yaml::BadValue | Yaml::Null => Err(ConfigError::MissingKey {
                path: self.path.clone(),
                key,
            }),
            value => Ok(value),
        }
    }

    /// Scalar value as a string. Numbers are accepted and kept in their
    /// written form, so a numeric password still loads.
    pub fn string(&self, key: &'static str) -> Result<String, ConfigError> {
        match self.lookup(key)? {
            Yaml::String(s) => Ok(s.clone()),
            Yaml::Integer(i) => Ok(i.to_string()),
            Yaml::Real(r) => Ok(r.clone()),
            _ => Err(self.invalid(key, "a string")),
        }
    }

    /// Non-negative integer value; a quoted integer is accepted too
    pub fn number(&self, key: &'static str) -> Result<u32, ConfigError> {
        let parsed = match self.lookup(key)? {
            Yaml::Integer(i) => u32::try_from(*i).ok(),
            Yaml::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.invalid(key, "a non-negative integer"))
    }

    fn invalid(&self, key: &'static str, expected: &'static str) -> ConfigError {
        ConfigError::InvalidValue {
            path: self.path.clone(),
            key,
            expected,
        }
    }
}
