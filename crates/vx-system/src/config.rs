//! Hierarchical configuration store.
//!
//! A [`Configuration`] is a tree of named [`Section`]s. Each section holds
//! typed entries ([`Value::Int`], [`Value::Float`], [`Value::Str`]) and
//! child sections. Sections are addressed by `/`-separated paths relative
//! to the root; the empty path is the root itself.
//!
//! The whole tree saves to and loads from a YAML file:
//!
//! ```yaml
//! sections:
//!   render:
//!     entries:
//!       width: 640
//!       gamma: 2.2
//!       driver: d3d
//! ```
//!
//! # Example
//!
//! ```rust
//! use vx_system::config::Configuration;
//!
//! let mut config = Configuration::new();
//! config.section_mut("render/window").unwrap().set("width", 640);
//!
//! assert_eq!(config.get_int("render/window", "width"), Some(640));
//! assert_eq!(config.get_float("render/window", "width"), Some(640.0));
//! assert!(config.section("render/missing").is_none());
//! ```

use crate::{SystemError, SystemResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A typed configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Str(String),
}

impl Value {
    /// The integer, if this is an [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The number as a float. Integers convert.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    /// The text, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! value_from {
    ($variant:ident: $($t:ty),+) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::$variant(v.into())
            }
        })+
    };
}

value_from!(Int: i64, i32, u32, i16, u16, u8);
value_from!(Float: f64, f32);
value_from!(Str: String, &str);

/// A named group of entries and child sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    entries: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    sections: BTreeMap<String, Section>,
}

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Integer entry.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Numeric entry as a float.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    /// Text entry.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Sets an entry, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes an entry.
    pub fn remove_entry(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Direct child section.
    pub fn child(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Direct child section, created when missing.
    pub fn child_mut(&mut self, name: impl Into<String>) -> &mut Section {
        self.sections.entry(name.into()).or_default()
    }

    /// Removes a direct child section with everything below it.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Child sections in name order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, s)| (k.as_str(), s))
    }

    /// True when the section has no entries and no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.sections.is_empty()
    }
}

/// Splits a section path. Leading and trailing `/` are ignored.
fn components(path: &str) -> SystemResult<Vec<&str>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(SystemError::invalid_path(path));
    }
    Ok(parts)
}

/// Root of a configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    root: Section,
}

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root section.
    pub fn root(&self) -> &Section {
        &self.root
    }

    /// Section at `path`, if it exists.
    pub fn section(&self, path: &str) -> Option<&Section> {
        let parts = components(path).ok()?;
        parts.iter().try_fold(&self.root, |s, name| s.child(name))
    }

    /// Section at `path`, creating every missing section on the way.
    pub fn section_mut(&mut self, path: &str) -> SystemResult<&mut Section> {
        let parts = components(path)?;
        Ok(parts.into_iter().fold(&mut self.root, |s, name| s.child_mut(name)))
    }

    /// Integer entry `key` of the section at `path`.
    pub fn get_int(&self, path: &str, key: &str) -> Option<i64> {
        self.section(path)?.get_int(key)
    }

    /// Numeric entry `key` of the section at `path`, as a float.
    pub fn get_float(&self, path: &str, key: &str) -> Option<f64> {
        self.section(path)?.get_float(key)
    }

    /// Text entry `key` of the section at `path`.
    pub fn get_str(&self, path: &str, key: &str) -> Option<&str> {
        self.section(path)?.get_str(key)
    }

    /// Sets `key` in the section at `path`, creating the section if needed.
    pub fn set(&mut self, path: &str, key: impl Into<String>, value: impl Into<Value>) -> SystemResult<Option<Value>> {
        Ok(self.section_mut(path)?.set(key, value))
    }

    /// Removes entry `key` from the section at `path`.
    pub fn remove_entry(&mut self, path: &str, key: &str) -> Option<Value> {
        let parts = components(path).ok()?;
        let mut section = &mut self.root;
        for name in parts {
            section = section.sections.get_mut(name)?;
        }
        section.remove_entry(key)
    }

    /// Removes the section at `path` and everything below it.
    ///
    /// The root cannot be removed; use [`Configuration::clear`].
    pub fn remove_section(&mut self, path: &str) -> Option<Section> {
        let mut parts = components(path).ok()?;
        let last = parts.pop()?;
        let mut section = &mut self.root;
        for name in parts {
            section = section.sections.get_mut(name)?;
        }
        section.remove_section(last)
    }

    /// Drops every entry and section.
    pub fn clear(&mut self) {
        self.root = Section::default();
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml(text: &str) -> SystemResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serializes the configuration to YAML text.
    pub fn to_yaml(&self) -> SystemResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> SystemResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        debug!(path = %path.display(), sections = config.root.sections.len(), "Loaded configuration");
        Ok(config)
    }

    /// Writes the configuration to a file, replacing it.
    pub fn save(&self, path: impl AsRef<Path>) -> SystemResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml()?)?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}
