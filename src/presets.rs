//! Named plat diagrams shown when a request carries no parameters.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::diagram::DiagramConfig;
use crate::error::{ConfigurationError, Error, ParseError};

pub const DEFAULT_PRESET_KEY: &str = "m10_132_nv";

const BUNDLED_PRESETS: &str = include_str!("presets.json5");
const COMMENT_FIELD: &str = "comment";

#[derive(Debug, Clone)]
pub struct PresetTable {
    entries: BTreeMap<String, Map<String, Value>>,
}

impl PresetTable {
    /// The table compiled into the crate.
    pub fn bundled() -> Result<Self, ParseError> {
        Self::from_json5(BUNDLED_PRESETS)
    }

    pub fn from_json5(source: &str) -> Result<Self, ParseError> {
        let entries: BTreeMap<String, Map<String, Value>> =
            json5::from_str(source).map_err(|err| ParseError::Presets(err.to_string()))?;
        Ok(Self { entries })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn comment(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|entry| entry.get(COMMENT_FIELD))
            .and_then(Value::as_str)
    }

    /// Constructor arguments for `key`, without the descriptive comment.
    pub fn resolve(&self, key: &str) -> Result<DiagramConfig, Error> {
        let mut data = self
            .entries
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownPreset(key.to_string()))?;
        data.remove(COMMENT_FIELD);
        let config: DiagramConfig = serde_json::from_value(Value::Object(data))
            .map_err(|err| ParseError::Presets(format!("{key}: {err}")))?;
        Ok(config)
    }
}
