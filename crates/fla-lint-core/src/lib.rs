//! # fla-lint-core
//!
//! Core framework for linting a layered front-end architecture.
//!
//! A source tree is split into ordered layer directories (`_pages`,
//! `_containers`, `_states`, `_components`, `_apis`, `_utils`). This crate
//! provides what every rule builds on:
//!
//! - path algebra: layer detection, [`ModuleInfo`], specifier resolution
//!   and the [`AliasMap`]
//! - configuration: [`Config`] loading and `tsconfig.json` alias discovery
//! - the import graph: comment/string masking, specifier extraction and
//!   [`ImportEdge`]s
//! - the [`FileRule`] / [`RepoRule`] traits closed under [`LintRule`]
//! - the [`Analyzer`], which walks the tree and produces a [`RunReport`]
//!
//! ## Example
//!
//! ```ignore
//! use fla_lint_core::{Analyzer, Config};
//!
//! let report = Analyzer::builder()
//!     .root("./web")
//!     .config(Config::default())
//!     .rules(my_rules())
//!     .build()?
//!     .analyze()?;
//!
//! for v in &report.violations {
//!     println!("{v}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod graph;
mod layers;
mod module_info;
mod resolve;
mod rule;
mod types;

/// Comment/string masking and specifier extraction.
pub mod scan;
/// Path-alias discovery from project configuration files.
pub mod tsconfig;
/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    Config, ConfigError, LoadedConfig, RouterHookConfig, RuleConfig, SingleUseGlobalConfig, Toggle,
};
pub use context::{is_parseable, DirEntries, DirIndex, FileContext, LintContext, PARSEABLE_EXTENSIONS};
pub use graph::{collect_edges, ImportEdge};
pub use layers::{
    find_innermost_layer, has_layer_segment, is_layer, LayerRanks, CONTAINER_LAYER, PAGE_LAYER,
};
pub use module_info::{ConsumerScope, ModuleInfo};
pub use resolve::{classify, resolve_specifier, AliasMap, SpecifierClass};
pub use rule::{FileRule, FileRuleBox, LintRule, RepoRule, RepoRuleBox, RuleKind};
pub use types::{Location, RunReport, RunSummary, Violation};
