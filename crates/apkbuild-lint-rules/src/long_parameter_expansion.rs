//! Rule against needless `${name}` expansions.
//!
//! # Rationale
//!
//! `${name}` is only needed when a modifier is present or when an
//! identifier-continuing fragment follows the expansion. Everywhere else
//! `$name` reads better and is the house style.

use apkbuild_lint_core::{Apkbuild, Rule, ShellNode, Violation, WalkAction};

/// Rule code for long-parameter-expansion.
pub const CODE: &str = "APK007";

/// Rule name for long-parameter-expansion.
pub const NAME: &str = "long-parameter-expansion";

/// Flags `${name}` expansions whose braces do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongParameterExpansion;

impl LongParameterExpansion {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LongParameterExpansion {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Prefers $name over ${name} when the braces are not needed"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();
        apkbuild.walk(&mut |node| {
            if let ShellNode::ParamExpansion(exp) = node.classify() {
                if exp.trivial() {
                    if let Some(name) = exp.name {
                        violations.push(Violation::new(
                            CODE,
                            NAME,
                            node.position(),
                            format!("Use ${name} instead of ${{{name}}}"),
                        ));
                    }
                }
            }
            WalkAction::Continue
        });
        violations
    }
}
