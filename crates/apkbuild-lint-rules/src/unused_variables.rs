//! Rule for unused variables.
//!
//! # Rationale
//!
//! A variable that is assigned but never expanded, exported, or referenced
//! dynamically is dead weight in the script. Metadata variables are exempt
//! since abuild(1) reads them from the outside.

use apkbuild_lint_core::{is_metadata_var, Apkbuild, Rule, ShellNode, Violation, WalkAction};

/// Rule code for unused-variables.
pub const CODE: &str = "APK004";

/// Rule name for unused-variables.
pub const NAME: &str = "unused-variables";

/// Flags assignments, in any scope, whose target is never used.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedVariables;

impl UnusedVariables {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UnusedVariables {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Flags variables that are assigned but never used"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        // Inline environment overrides (`FOO=bar cmd`) are exempt: they are
        // consumed by the invoked command, not by the script itself.
        let mut candidates = Vec::new();
        apkbuild.walk(&mut |node| {
            if let ShellNode::Assignment {
                name,
                environment: false,
            } = node.classify()
            {
                candidates.push((name.to_owned(), node.position()));
            }
            WalkAction::Continue
        });

        candidates
            .into_iter()
            .filter(|(name, _)| !is_metadata_var(name) && apkbuild.is_unused_var(name))
            .map(|(name, position)| {
                Violation::new(
                    CODE,
                    NAME,
                    position,
                    format!("Variable '{name}' is unused"),
                )
            })
            .collect()
    }
}
