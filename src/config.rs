//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/etymon/etymon.toml`
//! 3. Local config: `<project_dir>/.etymon.toml`
//! 4. Environment variables: `ETYMON_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DEFAULT_PLACEHOLDER};

/// How word entries are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Definition for entries that have none
    pub definition_placeholder: String,
    /// Use `Word (breakdown)：gloss` text as the definition
    pub trailing_gloss: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            definition_placeholder: DEFAULT_PLACEHOLDER.into(),
            trailing_gloss: true,
        }
    }
}

/// Where and how the JSON database is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Database file written by `etymon parse`
    pub path: PathBuf,
    /// Indent the JSON
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("etymon_database.json"),
            pretty: true,
        }
    }
}

/// Raw parser config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawParserConfig {
    pub definition_placeholder: Option<String>,
    pub trailing_gloss: Option<bool>,
}

/// Raw output config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputConfig {
    pub path: Option<PathBuf>,
    pub pretty: Option<bool>,
}

/// Raw settings for intermediate parsing.
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub extensions: Option<Vec<String>>,
    pub parser: RawParserConfig,
    pub output: RawOutputConfig,
}

/// Unified configuration for etymon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File extensions read when a directory is parsed (empty = all files)
    pub extensions: Vec<String>,
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".into(), "md".into()],
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Merge arrays with union semantics and negation support.
///
/// - Items from overlay are added to base
/// - Items prefixed with `!` remove the corresponding item from the result
/// - Duplicates are de-duplicated
///
/// # Examples
/// ```ignore
/// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
/// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
/// ```
pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
    let mut result: HashSet<String> = base.iter().cloned().collect();

    for item in overlay {
        if let Some(negated) = item.strip_prefix('!') {
            result.remove(negated);
        } else {
            result.insert(item.clone());
        }
    }

    // Sorted for deterministic output
    let mut vec: Vec<String> = result.into_iter().collect();
    vec.sort();
    vec
}

/// Get the XDG config directory for etymon.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "etymon").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("etymon.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".etymon.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in the output path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output.path.to_string_lossy().as_ref());
        self.output.path = PathBuf::from(expanded);
    }

    /// Scalars from `raw` win when present; `extensions` is combined by `arrays`.
    fn overlay(&self, raw: &RawSettings, arrays: fn(&[String], &[String]) -> Vec<String>) -> Self {
        Self {
            extensions: raw
                .extensions
                .as_ref()
                .map(|o| arrays(&self.extensions, o))
                .unwrap_or_else(|| self.extensions.clone()),
            parser: ParserConfig {
                definition_placeholder: raw
                    .parser
                    .definition_placeholder
                    .clone()
                    .unwrap_or_else(|| self.parser.definition_placeholder.clone()),
                trailing_gloss: raw
                    .parser
                    .trailing_gloss
                    .unwrap_or(self.parser.trailing_gloss),
            },
            output: OutputConfig {
                path: raw
                    .output
                    .path
                    .clone()
                    .unwrap_or_else(|| self.output.path.clone()),
                pretty: raw.output.pretty.unwrap_or(self.output.pretty),
            },
        }
    }

    /// Merge local config onto self with union semantics for `extensions`.
    pub fn merge_with(&self, local: &RawSettings) -> Self {
        self.overlay(local, merge_array)
    }

    /// Apply global config onto defaults with REPLACE semantics for `extensions`.
    ///
    /// Defaults are only examples; the global file defines the real baseline.
    pub fn apply_global(&self, global: &RawSettings) -> Self {
        self.overlay(global, |_, overlay| overlay.to_vec())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.etymon.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ETYMON_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ETYMON")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("extensions")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("extensions") {
            settings.extensions = val;
        }
        if let Ok(val) = config.get_string("parser.definition_placeholder") {
            settings.parser.definition_placeholder = val;
        }
        if let Ok(val) = config.get_bool("parser.trailing_gloss") {
            settings.parser.trailing_gloss = val;
        }
        if let Ok(val) = config.get_string("output.path") {
            settings.output.path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("output.pretty") {
            settings.output.pretty = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# etymon configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/etymon/etymon.toml  (defines your baseline)
#   Local:  <project>/.etymon.toml        (project-specific additions)
#   Env:    ETYMON_* environment variables, e.g. ETYMON_PARSER__TRAILING_GLOSS=false
#
# Local config UNIONS `extensions` with global; "!ext" removes an inherited item.

# File extensions read when parsing a directory
# extensions = ["txt", "md"]

[parser]
# Definition used when a word line has none
# definition_placeholder = "pending review"

# Accept `Word (breakdown)：gloss` as the definition
# trailing_gloss = true

[output]
# Database written by `etymon parse` (~ and $VAR are expanded)
# path = "etymon_database.json"

# Indent the JSON
# pretty = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_default_settings_when_created_then_matches_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.extensions, strings(&["txt", "md"]));
        assert_eq!(settings.parser.definition_placeholder, "pending review");
        assert!(settings.parser.trailing_gloss);
        assert_eq!(settings.output.path, PathBuf::from("etymon_database.json"));
        assert!(settings.output.pretty);
    }

    #[test]
    fn given_tilde_in_output_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings::default();
        settings.output.path = PathBuf::from("~/notes/db.json");

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.output.path.to_string_lossy();
        assert!(path.starts_with(&home), "should start with home: {}", path);
        assert!(!path.contains('~'));
    }

    #[test]
    fn test_merge_array_union() {
        let result = merge_array(&strings(&["a", "b"]), &strings(&["c"]));
        assert_eq!(result, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_merge_array_negation() {
        let result = merge_array(&strings(&["a", "b"]), &strings(&["!a", "c"]));
        assert_eq!(result, strings(&["b", "c"]));
    }

    #[test]
    fn test_merge_array_duplicates() {
        let result = merge_array(&strings(&["a", "b"]), &strings(&["a", "c"]));
        assert_eq!(result, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_apply_global_replaces_extensions() {
        let global = RawSettings {
            extensions: Some(strings(&["note"])),
            ..Default::default()
        };

        let result = Settings::default().apply_global(&global);

        assert_eq!(result.extensions, strings(&["note"]));
        assert_eq!(result.parser, ParserConfig::default());
    }

    #[test]
    fn test_merge_with_overrides_scalars_and_unions_arrays() {
        let local = RawSettings {
            extensions: Some(strings(&["!md", "note"])),
            parser: RawParserConfig {
                definition_placeholder: Some("待補".into()),
                trailing_gloss: None,
            },
            output: RawOutputConfig {
                path: None,
                pretty: Some(false),
            },
        };

        let result = Settings::default().merge_with(&local);

        assert_eq!(result.extensions, strings(&["note", "txt"]));
        assert_eq!(result.parser.definition_placeholder, "待補");
        assert!(result.parser.trailing_gloss);
        assert_eq!(result.output.path, PathBuf::from("etymon_database.json"));
        assert!(!result.output.pretty);
    }

    #[test]
    fn test_template_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.extensions.is_none());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
