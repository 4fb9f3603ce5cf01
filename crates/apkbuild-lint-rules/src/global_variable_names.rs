//! Rule for global variable naming.
//!
//! # Rationale
//!
//! abuild(1) only picks up a fixed set of metadata variables. Any other
//! global is private to the APKBUILD and must carry a single leading
//! underscore so readers can tell it apart from metadata.

use apkbuild_lint_core::{is_metadata_var, Apkbuild, Rule, Violation};

/// Rule code for global-variable-names.
pub const CODE: &str = "APK003";

/// Rule name for global-variable-names.
pub const NAME: &str = "global-variable-names";

/// Requires custom global variables to start with exactly one underscore.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalVariableNames;

impl GlobalVariableNames {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for GlobalVariableNames {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires custom global variables to start with a single underscore"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        apkbuild
            .assignments()
            .iter()
            .filter(|a| !is_metadata_var(&a.name) && !is_prefix_var(&a.name))
            .map(|a| {
                Violation::new(
                    CODE,
                    NAME,
                    a.position,
                    format!("Custom global variable '{}' should start with an '_'", a.name),
                )
            })
            .collect()
    }
}

/// Whether the name starts with exactly one underscore. A bare `_` does
/// not count as a prefixed name.
fn is_prefix_var(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('_') && chars.next().is_some_and(|c| c != '_')
}
