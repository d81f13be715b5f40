//! Core types for lint violations and run results.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Source location of a violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Root-relative posix path.
    #[serde(rename = "filePath")]
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// A location at the start of `file`.
    #[must_use]
    pub fn file_start(file: impl Into<String>) -> Self {
        Self::new(file, 1, 1)
    }
}

/// A lint violation.
///
/// Violations order by path, line, column and rule id, with the message as
/// the final tie-breaker. Reports sort on this order, so output never
/// depends on the order rules ran in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Rule id (e.g., "FLA003").
    pub rule_id: String,
    /// Human-readable message.
    pub message: String,
    /// Where the violation was found.
    #[serde(flatten)]
    pub location: Location,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(rule_id: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            location,
        }
    }
}

impl Ord for Violation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location
            .file
            .cmp(&other.location.file)
            .then(self.location.line.cmp(&other.location.line))
            .then(self.location.column.cmp(&other.location.column))
            .then_with(|| self.rule_id.cmp(&other.rule_id))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{} [{}] {}",
            self.location.file, self.location.line, self.location.column, self.rule_id, self.message
        )
    }
}

/// Aggregate counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Number of candidate files.
    pub scanned_files: usize,
    /// Number of violations.
    pub error_count: usize,
    /// Violations per rule id.
    pub rule_counts: BTreeMap<String, usize>,
    /// Root-relative posix path of the resolved config file.
    pub config_path: String,
    /// True if the config file existed and was parsed.
    pub config_loaded: bool,
}

/// Result of running lint analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Aggregate counts.
    pub summary: RunSummary,
    /// All violations, sorted.
    pub violations: Vec<Violation>,
}

impl RunReport {
    /// Builds a report, sorting `violations` and deriving the counts.
    #[must_use]
    pub fn new(
        mut violations: Vec<Violation>,
        scanned_files: usize,
        config_path: impl Into<String>,
        config_loaded: bool,
    ) -> Self {
        violations.sort();

        let mut rule_counts = BTreeMap::new();
        for v in &violations {
            *rule_counts.entry(v.rule_id.clone()).or_insert(0) += 1;
        }

        Self {
            summary: RunSummary {
                scanned_files,
                error_count: violations.len(),
                rule_counts,
                config_path: config_path.into(),
                config_loaded,
            },
            violations,
        }
    }

    /// Returns true if any violation was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Groups violations by file, preserving the sorted order.
    #[must_use]
    pub fn by_file(&self) -> Vec<(&str, Vec<&Violation>)> {
        let mut groups: Vec<(&str, Vec<&Violation>)> = Vec::new();
        for v in &self.violations {
            match groups.last_mut() {
                Some((file, items)) if *file == v.location.file => items.push(v),
                _ => groups.push((v.location.file.as_str(), vec![v])),
            }
        }
        groups
    }

    /// Violations for one rule id.
    #[must_use]
    pub fn by_rule(&self, rule_id: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.rule_id == rule_id)
            .collect()
    }
}
