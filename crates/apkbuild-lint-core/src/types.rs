//! Core types for lint violations and results.

use apkbuild_lint_syntax::Position;
use serde::{Deserialize, Serialize};

/// A lint violation found during a check pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "APK001").
    pub code: String,
    /// Rule name (e.g., "comment-prefix").
    pub rule: String,
    /// Source position, or `None` for script-wide violations such as a
    /// missing maintainer.
    pub position: Option<Position>,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a violation anchored at a source position.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        position: Position,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            position: Some(position),
            message: message.into(),
        }
    }

    /// Creates a position-less, script-wide violation.
    #[must_use]
    pub fn global(
        code: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            position: None,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "{position}: [{}] {}", self.code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Result of linting one or more scripts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, in pass order.
    pub violations: Vec<Violation>,
    /// Number of scripts checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any violation was found.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}
