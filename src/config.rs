use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::component::Component;
use crate::constants::{
    API_CMD_VAR, CONFIG_PATH_VAR, CONVERTER_CMD_VAR, DEFAULT_API_PROGRAM,
    DEFAULT_CONVERTER_PROGRAM,
};
use crate::error::{DispatchError, Result};

/// Program and fixed arguments for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl TargetConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub api: TargetConfig,
    pub converter: TargetConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            api: TargetConfig::new(DEFAULT_API_PROGRAM),
            converter: TargetConfig::new(DEFAULT_CONVERTER_PROGRAM),
        }
    }
}

// On-disk shape. Every field is optional so a file only has to name what it changes.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api: Option<FileTarget>,
    converter: Option<FileTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileTarget {
    program: Option<PathBuf>,
    args: Option<Vec<String>>,
}

impl DispatchConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var_os(key))
    }

    /// Layers defaults, the optional TOML file and the per-target overrides.
    /// `lookup` stands in for the environment.
    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut config = Self::default();

        if let Some(path) = non_empty(CONFIG_PATH_VAR) {
            config.merge_file(Path::new(&path))?;
        }
        if let Some(program) = non_empty(API_CMD_VAR) {
            config.api.program = PathBuf::from(program);
        }
        if let Some(program) = non_empty(CONVERTER_CMD_VAR) {
            config.converter.program = PathBuf::from(program);
        }

        Ok(config)
    }

    pub fn target(&self, component: Component) -> &TargetConfig {
        match component {
            Component::Api => &self.api,
            Component::Converter => &self.converter,
        }
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            DispatchError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        self.merge_toml(&content)
    }

    fn merge_toml(&mut self, content: &str) -> Result<()> {
        let file: FileConfig =
            toml::from_str(content).map_err(|e| toml_error(content, &e))?;
        self.apply(file);
        Ok(())
    }

    fn apply(&mut self, file: FileConfig) {
        if let Some(api) = file.api {
            api.apply_to(&mut self.api);
        }
        if let Some(converter) = file.converter {
            converter.apply_to(&mut self.converter);
        }
    }
}

/// Flattens a TOML error to a single line: location, then the message.
/// The library's own `Display` renders a multi-line source snippet.
fn toml_error(content: &str, err: &toml::de::Error) -> DispatchError {
    let detail = err
        .message()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let message = match err.span() {
        Some(span) => {
            let before = content.get(..span.start).unwrap_or(content);
            let line = before.matches('\n').count() + 1;
            let line_start = before.rfind('\n').map_or(0, |i| i + 1);
            let column = before[line_start..].chars().count() + 1;
            format!("line {line}, column {column}: {detail}")
        }
        None => detail,
    };

    DispatchError::Toml(message)
}

impl FileTarget {
    fn apply_to(self, target: &mut TargetConfig) {
        if let Some(program) = self.program {
            target.program = program;
        }
        if let Some(args) = self.args {
            target.args = args;
        }
    }
}
