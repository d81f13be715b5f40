//! Configuration types for fla-lint.
//!
//! Configuration is JSON. Every recognized field that is absent or has the
//! wrong shape silently falls back to its default; only unparsable JSON is an
//! error. A missing configuration file is not an error either.

use miette::Diagnostic;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration for fla-lint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Layer directory names, ordered from top to bottom.
    pub layer_dirs: Vec<String>,
    /// Directory names skipped during the walk.
    pub ignore_dirs: Vec<String>,
    /// Extensions allowed for files under layer directories.
    pub allowed_extensions: Vec<String>,
    /// Built-in dotted suffixes allowed on `.ts`/`.tsx` files.
    pub default_ts_suffixes: Vec<String>,
    /// Project-specific dotted suffixes.
    pub extra_ts_suffixes: Vec<String>,
    /// Files matching these globs may declare `interface`/`type`/`enum`.
    pub interface_allowed_globs: Vec<String>,
    /// Explicit path aliases (pattern → base path). Override discovered ones.
    pub path_aliases: BTreeMap<String, String>,
    /// FLA005 switch.
    pub nested_layer: Toggle,
    /// FLA006 settings.
    pub single_use_global: SingleUseGlobalConfig,
    /// FLA007 switch.
    pub naming_convention: Toggle,
    /// FLA008 switch.
    pub layer_directory_naming: Toggle,
    /// FLA009 switch.
    pub module_grouping: Toggle,
    /// FLA010 settings.
    pub page_only_router_hook: RouterHookConfig,
    /// Whether FLA002 may use the syntax-tree accelerator.
    pub syntax_accelerator: Toggle,
    /// Per-rule switches keyed by rule id (e.g. `"FLA003"`).
    pub rules: BTreeMap<String, RuleConfig>,
}

/// A sub-configuration that only carries an enable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggle {
    /// Whether the feature is enabled.
    pub enabled: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Settings for the shared-module usage threshold rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleUseGlobalConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Layers whose modules are tracked.
    pub layers: Vec<String>,
    /// Minimum number of distinct consumer scopes.
    pub min_upper_module_references: usize,
}

impl Default for SingleUseGlobalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            layers: strings(&["_states", "_components"]),
            min_upper_module_references: 2,
        }
    }
}

/// Settings for the page-only router hook rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterHookConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Router module specifiers, as restricted globs.
    pub router_modules: Vec<String>,
}

impl Default for RouterHookConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            router_modules: strings(&[
                "next/navigation",
                "next/app/navigation",
                "next/router",
                "next/compat/router",
                "react-router",
                "react-router-dom",
                "react-router-dom/**",
                "@remix-run/router",
            ]),
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layer_dirs: strings(&[
                "_pages",
                "_containers",
                "_states",
                "_components",
                "_apis",
                "_utils",
            ]),
            ignore_dirs: strings(&[".git", "node_modules", "docs", "linter"]),
            allowed_extensions: strings(&[".ts", ".tsx"]),
            default_ts_suffixes: strings(&["type", "schema", "stories", "test"]),
            extra_ts_suffixes: Vec::new(),
            interface_allowed_globs: strings(&["**/*.type.ts"]),
            path_aliases: BTreeMap::new(),
            nested_layer: Toggle::default(),
            single_use_global: SingleUseGlobalConfig::default(),
            naming_convention: Toggle::default(),
            layer_directory_naming: Toggle::default(),
            module_grouping: Toggle::default(),
            page_only_router_hook: RouterHookConfig::default(),
            syntax_accelerator: Toggle::default(),
            rules: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from a JSON string, merging it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the JSON is unparsable. Shape mismatches fall
    /// back to defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Ok(Self::from_value(&value))
    }

    /// Merges a parsed JSON value over the defaults, field by field.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let base = Self::default();
        let Some(raw) = value.as_object() else {
            return base;
        };

        let single_use = object(raw, "singleUseGlobal");
        let router = object(raw, "pageOnlyRouterHook");

        Self {
            layer_dirs: string_array(raw, "layerDirs").unwrap_or(base.layer_dirs),
            ignore_dirs: string_array(raw, "ignoreDirs").unwrap_or(base.ignore_dirs),
            allowed_extensions: string_array(raw, "allowedExtensions")
                .unwrap_or(base.allowed_extensions),
            default_ts_suffixes: string_array(raw, "defaultTsSuffixes")
                .unwrap_or(base.default_ts_suffixes),
            extra_ts_suffixes: string_array(raw, "extraTsSuffixes")
                .unwrap_or(base.extra_ts_suffixes),
            interface_allowed_globs: string_array(raw, "interfaceAllowedGlobs")
                .unwrap_or(base.interface_allowed_globs),
            path_aliases: object(raw, "pathAliases").map_or(base.path_aliases, |aliases| {
                aliases
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            }),
            nested_layer: toggle(raw, "nestedLayer", base.nested_layer),
            single_use_global: SingleUseGlobalConfig {
                enabled: single_use
                    .and_then(|o| flag(o, "enabled"))
                    .unwrap_or(base.single_use_global.enabled),
                layers: single_use
                    .and_then(|o| string_array(o, "layers"))
                    .unwrap_or(base.single_use_global.layers),
                min_upper_module_references: single_use
                    .and_then(|o| o.get("minUpperModuleReferences"))
                    .and_then(Value::as_u64)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(base.single_use_global.min_upper_module_references),
            },
            naming_convention: toggle(raw, "namingConvention", base.naming_convention),
            layer_directory_naming: toggle(
                raw,
                "layerDirectoryNaming",
                base.layer_directory_naming,
            ),
            module_grouping: toggle(raw, "moduleGrouping", base.module_grouping),
            page_only_router_hook: RouterHookConfig {
                enabled: router
                    .and_then(|o| flag(o, "enabled"))
                    .unwrap_or(base.page_only_router_hook.enabled),
                router_modules: router
                    .and_then(|o| string_array(o, "routerModules"))
                    .unwrap_or(base.page_only_router_hook.router_modules),
            },
            syntax_accelerator: toggle(raw, "syntaxAccelerator", base.syntax_accelerator),
            rules: object(raw, "rules").map_or(base.rules, |rules| {
                rules
                    .iter()
                    .filter_map(|(id, v)| {
                        v.as_object().map(|o| {
                            (
                                id.clone(),
                                RuleConfig {
                                    enabled: flag(o, "enabled"),
                                },
                            )
                        })
                    })
                    .collect()
            }),
        }
    }

    /// Loads the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<LoadedConfig, ConfigError> {
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(LoadedConfig {
                config: Self::default(),
                path: path.to_path_buf(),
                loaded: false,
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        Ok(LoadedConfig {
            config: Self::from_file(path)?,
            path: path.to_path_buf(),
            loaded: true,
        })
    }

    /// Checks if a rule is enabled in the `rules` table.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules
            .get(rule_id)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Union of default and extra `.ts` suffix tokens, in declaration order.
    #[must_use]
    pub fn allowed_ts_suffixes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for s in self.default_ts_suffixes.iter().chain(&self.extra_ts_suffixes) {
            if !out.contains(&s.as_str()) {
                out.push(s);
            }
        }
        out
    }
}

/// A configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The effective configuration.
    pub config: Config,
    /// The resolved configuration path (whether or not it exists).
    pub path: PathBuf,
    /// True if the file existed and was parsed.
    pub loaded: bool,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn object<'a>(raw: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    raw.get(key).and_then(Value::as_object)
}

fn string_array(raw: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    raw.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

fn flag(raw: &Map<String, Value>, key: &str) -> Option<bool> {
    raw.get(key).and_then(Value::as_bool)
}

fn toggle(raw: &Map<String, Value>, key: &str, default: Toggle) -> Toggle {
    Toggle {
        enabled: object(raw, key)
            .and_then(|o| flag(o, "enabled"))
            .unwrap_or(default.enabled),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(fla_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON.
    #[error("Failed to parse config {}: {message}", path.display())]
    #[diagnostic(
        code(fla_lint::config::parse),
        help("fix the JSON syntax, or delete the file to run with defaults")
    )]
    Parse {
        /// Path of the malformed file (empty when parsed from a string).
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.layer_dirs.len(), 6);
        assert_eq!(config.single_use_global.min_upper_module_references, 2);
        assert!(config.nested_layer.enabled);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_overrides_fields() {
        let json = r#"{
            "extraTsSuffixes": ["mock"],
            "pathAliases": { "@/*": "src/*" },
            "singleUseGlobal": { "minUpperModuleReferences": 3 },
            "moduleGrouping": { "enabled": false },
            "rules": { "FLA004": { "enabled": false } }
        }"#;

        let config = Config::parse(json).expect("Failed to parse");
        assert_eq!(config.extra_ts_suffixes, vec!["mock"]);
        assert_eq!(config.path_aliases.get("@/*").map(String::as_str), Some("src/*"));
        assert_eq!(config.single_use_global.min_upper_module_references, 3);
        // Unspecified sibling fields keep their defaults.
        assert!(config.single_use_global.enabled);
        assert_eq!(config.single_use_global.layers, vec!["_states", "_components"]);
        assert!(!config.module_grouping.enabled);
        assert!(!config.is_rule_enabled("FLA004"));
        assert!(config.is_rule_enabled("FLA001"));
    }

    #[test]
    fn test_shape_mismatch_falls_back_to_default() {
        let json = r#"{
            "layerDirs": "_pages",
            "nestedLayer": true,
            "singleUseGlobal": { "layers": {}, "minUpperModuleReferences": "2" },
            "pathAliases": ["@/*"]
        }"#;

        let config = Config::parse(json).expect("shape mismatches must not fail");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_non_object_root_is_default() {
        assert_eq!(Config::parse("[]").unwrap(), Config::default());
    }

    #[test]
    fn test_unparsable_json_is_error() {
        let err = Config::parse("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_allowed_ts_suffixes_dedupes() {
        let mut config = Config::default();
        config.extra_ts_suffixes = vec!["mock".into(), "type".into()];
        assert_eq!(
            config.allowed_ts_suffixes(),
            vec!["type", "schema", "stories", "test", "mock"]
        );
    }
}
