//! The lint engine: runs a fixed sequence of rules over one document.

use tracing::debug;

use crate::apkbuild::Apkbuild;
use crate::rule::RuleBox;
use crate::types::LintResult;

/// Runs registered rules over parsed APKBUILDs.
///
/// Rules run in registration order and each contributes its violations to the
/// result in that order, so output is stable across runs.
pub struct Linter {
    rules: Vec<RuleBox>,
}

impl Linter {
    /// Creates a linter with the given rule sequence.
    #[must_use]
    pub fn new(rules: Vec<RuleBox>) -> Self {
        Self { rules }
    }

    /// The registered rules, in execution order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Checks a single APKBUILD against all registered rules.
    #[must_use]
    pub fn check(&self, apkbuild: &Apkbuild) -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 1;

        for rule in &self.rules {
            let violations = rule.check(apkbuild);
            debug!(
                rule = rule.name(),
                code = rule.code(),
                count = violations.len(),
                "pass finished"
            );
            result.violations.extend(violations);
        }

        result
    }
}
