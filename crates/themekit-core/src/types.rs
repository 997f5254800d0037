//! Request and response types exchanged with the engine and the bus.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Every type here is transient: it lives for one operation. Wire names
//! use camelCase (`dirName`, `filePath`) because other plugins bind to
//! them by string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, ThemeError};

/// Target name used when a request does not name one.
pub const DEFAULT_TARGET: &str = "theme.css";

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

/// Where a fragment goes relative to a target's existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssAction {
    Append,
    Prepend,
}

impl CssAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssAction::Append => "append",
            CssAction::Prepend => "prepend",
        }
    }
}

impl fmt::Display for CssAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssAction {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "append" => Ok(CssAction::Append),
            "prepend" => Ok(CssAction::Prepend),
            other => Err(ThemeError::invalid_operation(format!(
                "CSS action must be 'append' or 'prepend', got '{}'",
                other
            ))),
        }
    }
}

/// One processor stage in a target's pipeline.
///
/// Decodes from a bare name (`"minify"`) or from
/// `{ "name": "transform", "options": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProcessorRepr")]
pub struct ProcessorConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl ProcessorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Map::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProcessorRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        options: Map<String, Value>,
    },
}

impl From<ProcessorRepr> for ProcessorConfig {
    fn from(repr: ProcessorRepr) -> Self {
        match repr {
            ProcessorRepr::Name(name) => ProcessorConfig::new(name),
            ProcessorRepr::Full { name, options } => ProcessorConfig { name, options },
        }
    }
}

/// Registration of one target with the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    pub name: String,
    /// Output artifact name. Same as `name` for targets created by the orchestrator.
    pub output: String,
    pub source_map: bool,
    pub processors: Vec<ProcessorConfig>,
    pub silent: bool,
}

/// A fragment handed to the engine, and the entry shape of theme replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssFragment {
    #[serde(default = "default_target")]
    pub name: String,
    pub dir_name: PathBuf,
    pub file_path: String,
    #[serde(default)]
    pub silent: bool,
}

impl CssFragment {
    pub fn new(
        name: impl Into<String>,
        dir_name: impl Into<PathBuf>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dir_name: dir_name.into(),
            file_path: file_path.into(),
            silent: false,
        }
    }

    /// Location of the fragment on disk.
    pub fn path(&self) -> PathBuf {
        self.dir_name.join(&self.file_path)
    }
}

/// A request to add one fragment to a target.
///
/// Keys other than `name`, `dirName`, `filePath` and `silent` are kept in
/// `vars` and used as substitution data when rendering `file_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentRequest {
    #[serde(default = "default_target")]
    pub name: String,
    pub dir_name: PathBuf,
    pub file_path: String,
    #[serde(default)]
    pub silent: bool,
    #[serde(flatten)]
    pub vars: Map<String, Value>,
}

impl FragmentRequest {
    /// Request against the default target.
    pub fn new(dir_name: impl Into<PathBuf>, file_path: impl Into<String>) -> Self {
        Self {
            name: default_target(),
            dir_name: dir_name.into(),
            file_path: file_path.into(),
            silent: false,
            vars: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Decode a request from its wire form.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ThemeError::invalid_argument(
                "fragment request must be an object",
            ));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| ThemeError::invalid_argument(format!("invalid fragment request: {}", e)))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ThemeError::invalid_argument("target name must not be empty"));
        }
        if self.file_path.is_empty() {
            return Err(ThemeError::invalid_argument("filePath must not be empty"));
        }
        if !self.dir_name.is_absolute() {
            return Err(ThemeError::invalid_argument(format!(
                "dirName must be an absolute path, got '{}'",
                self.dir_name.display()
            )));
        }
        if Path::new(&self.file_path).is_absolute() {
            return Err(ThemeError::invalid_argument(format!(
                "filePath must be relative to dirName, got '{}'",
                self.file_path
            )));
        }
        Ok(())
    }
}

/// A file a theme needs copied next to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    pub dir_name: PathBuf,
    pub file_path: String,
}

impl ResourceFile {
    pub fn new(dir_name: impl Into<PathBuf>, file_path: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            file_path: file_path.into(),
        }
    }
}

/// The contribution of one installed theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeResources {
    #[serde(default)]
    pub append: Vec<CssFragment>,
    #[serde(default)]
    pub prepend: Vec<CssFragment>,
    #[serde(default)]
    pub copy: Vec<ResourceFile>,
}

/// Finished CSS for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssOutput {
    pub name: String,
    pub css: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeOptions {
    #[serde(default)]
    pub silent: bool,
}

impl FinalizeOptions {
    /// Decode options from their wire form. `null` means defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value.clone()).map_err(|e| {
                ThemeError::invalid_argument(format!("invalid finalize options: {}", e))
            }),
            _ => Err(ThemeError::invalid_argument(
                "finalize options must be an object",
            )),
        }
    }
}

/// Result of finalizing a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedTheme {
    pub css: Vec<CssOutput>,
    pub copy: Vec<ResourceFile>,
}
