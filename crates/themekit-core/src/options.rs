//! Theme creation options.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The `create` operation accepts its target names in two forms:
//!
//! ```json
//! { "files": "site.css" }
//! { "files": ["site.css", "print.css"] }
//! ```
//!
//! Absent `files` means a single [`DEFAULT_TARGET`]. Anything else (a
//! number, an object, `null`, a boolean) is rejected before the engine is
//! touched.

use serde_json::{Map, Value};

use crate::error::{Result, ThemeError};
use crate::types::{DEFAULT_TARGET, ProcessorConfig};

/// One or more target names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFiles {
    One(String),
    Many(Vec<String>),
}

impl Default for TargetFiles {
    fn default() -> Self {
        TargetFiles::One(DEFAULT_TARGET.to_string())
    }
}

impl TargetFiles {
    /// Target names in registration order.
    pub fn names(&self) -> &[String] {
        match self {
            TargetFiles::One(name) => std::slice::from_ref(name),
            TargetFiles::Many(names) => names,
        }
    }

    /// Check the names are usable as targets.
    pub fn validate(&self) -> Result<()> {
        if self.names().is_empty() {
            return Err(ThemeError::invalid_argument(
                "files must name at least one target",
            ));
        }
        if self.names().iter().any(String::is_empty) {
            return Err(ThemeError::invalid_argument("target names must not be empty"));
        }
        Ok(())
    }
}

impl From<&str> for TargetFiles {
    fn from(name: &str) -> Self {
        TargetFiles::One(name.to_string())
    }
}

impl From<String> for TargetFiles {
    fn from(name: String) -> Self {
        TargetFiles::One(name)
    }
}

impl From<Vec<String>> for TargetFiles {
    fn from(names: Vec<String>) -> Self {
        TargetFiles::Many(names)
    }
}

/// Options for creating a themed CSS pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateThemeOptions {
    pub files: TargetFiles,

    /// Emit inline source maps. Defaults to `true`.
    pub source_map: bool,

    /// Explicit processor pipeline. `None` selects the default pipeline.
    pub processors: Option<Vec<ProcessorConfig>>,

    pub silent: bool,

    /// Keep output readable: the default pipeline skips its cleanup stages.
    pub debug: bool,
}

impl Default for CreateThemeOptions {
    fn default() -> Self {
        Self {
            files: TargetFiles::default(),
            source_map: true,
            processors: None,
            silent: false,
            debug: false,
        }
    }
}

impl CreateThemeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(mut self, files: impl Into<TargetFiles>) -> Self {
        self.files = files.into();
        self
    }

    pub fn with_processors(mut self, processors: Vec<ProcessorConfig>) -> Self {
        self.processors = Some(processors);
        self
    }

    pub fn source_map(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Decode options from their wire form.
    ///
    /// Wire keys: `files`, `sourceMap`, `processors`, `silent`, `debug`.
    /// A `null` payload means all defaults. `processors` may be left out
    /// but not set to `null`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => {
                return Err(ThemeError::invalid_argument(
                    "create options must be an object",
                ));
            }
        };

        let files = match map.get("files") {
            None => TargetFiles::default(),
            Some(value) => extract_target_files(value)?,
        };

        let processors = match map.get("processors") {
            None => None,
            Some(Value::Array(items)) => Some(extract_processors(items)?),
            Some(_) => {
                return Err(ThemeError::invalid_argument("processors must be an array"));
            }
        };

        Ok(Self {
            files,
            source_map: bool_field(map, "sourceMap", true)?,
            processors,
            silent: bool_field(map, "silent", false)?,
            debug: bool_field(map, "debug", false)?,
        })
    }
}

/// Handles both string and array formats.
fn extract_target_files(value: &Value) -> Result<TargetFiles> {
    if let Some(s) = value.as_str() {
        return Ok(TargetFiles::One(s.to_string()));
    }

    if let Some(items) = value.as_array() {
        let mut names = Vec::with_capacity(items.len());
        for item in items {
            match item.as_str() {
                Some(s) => names.push(s.to_string()),
                None => {
                    return Err(ThemeError::invalid_argument(
                        "files array must contain only strings",
                    ));
                }
            }
        }
        return Ok(TargetFiles::Many(names));
    }

    Err(ThemeError::invalid_argument(
        "files must be a string or an array of strings",
    ))
}

fn extract_processors(items: &[Value]) -> Result<Vec<ProcessorConfig>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item.clone()).map_err(|e| {
                ThemeError::invalid_argument(format!("invalid processor at index {}: {}", index, e))
            })
        })
        .collect()
}

fn bool_field(map: &Map<String, Value>, key: &str, default: bool) -> Result<bool> {
    match map.get(key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ThemeError::invalid_argument(format!(
            "{} must be a boolean",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = CreateThemeOptions::from_value(&json!({})).unwrap();
        assert_eq!(options, CreateThemeOptions::default());
        assert_eq!(options.files.names(), &["theme.css".to_string()]);
        assert!(options.source_map);
        assert!(options.processors.is_none());

        assert_eq!(
            CreateThemeOptions::from_value(&json!(null)).unwrap(),
            CreateThemeOptions::default()
        );
    }

    #[test]
    fn test_files_string_or_array() {
        let options = CreateThemeOptions::from_value(&json!({ "files": "site.css" })).unwrap();
        assert_eq!(options.files, TargetFiles::One("site.css".to_string()));

        let options =
            CreateThemeOptions::from_value(&json!({ "files": ["site.css", "print.css"] })).unwrap();
        assert_eq!(options.files.names(), &["site.css".to_string(), "print.css".to_string()]);
    }

    #[test]
    fn test_files_of_wrong_shape_are_rejected() {
        let bad = [
            json!(42),
            json!({ "name": "site.css" }),
            json!(null),
            json!(true),
            json!(["a.css", 1]),
        ];
        for files in bad {
            let err =
                CreateThemeOptions::from_value(&json!({ "files": files.clone() })).unwrap_err();
            assert!(matches!(err, ThemeError::InvalidArgument(_)), "files = {}", files);
        }
    }

    #[test]
    fn test_processors() {
        let options = CreateThemeOptions::from_value(&json!({
            "processors": ["transform", { "name": "minify", "options": { "level": 2 } }]
        }))
        .unwrap();
        assert_eq!(
            options.processors,
            Some(vec![
                ProcessorConfig::new("transform"),
                ProcessorConfig::new("minify").with_option("level", 2),
            ])
        );

        let options = CreateThemeOptions::from_value(&json!({})).unwrap();
        assert!(options.processors.is_none());
    }

    #[test]
    fn test_processors_must_be_an_array() {
        for processors in [json!("minify"), json!({ "name": "minify" }), json!(3), json!(null)] {
            let err =
                CreateThemeOptions::from_value(&json!({ "processors": processors })).unwrap_err();
            assert!(err.to_string().contains("processors must be an array"));
        }

        let err = CreateThemeOptions::from_value(&json!({ "processors": [1] })).unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn test_flags() {
        let options = CreateThemeOptions::from_value(&json!({
            "sourceMap": false,
            "silent": true,
            "debug": true,
        }))
        .unwrap();
        assert!(!options.source_map);
        assert!(options.silent);
        assert!(options.debug);

        let err = CreateThemeOptions::from_value(&json!({ "debug": "yes" })).unwrap_err();
        assert!(err.to_string().contains("debug must be a boolean"));
    }

    #[test]
    fn test_non_object_options() {
        let err = CreateThemeOptions::from_value(&json!("site.css")).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidArgument(_)));
    }

    #[test]
    fn test_target_files_validate() {
        assert!(TargetFiles::default().validate().is_ok());
        assert!(TargetFiles::Many(vec![]).validate().is_err());
        assert!(TargetFiles::from("").validate().is_err());
        assert!(TargetFiles::from(vec!["a.css".to_string(), String::new()]).validate().is_err());
    }
}
