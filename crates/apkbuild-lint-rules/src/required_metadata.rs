//! Rule for mandatory metadata variables.

use apkbuild_lint_core::{Apkbuild, Rule, Violation, METADATA_VARIABLES};

/// Rule code for required-metadata.
pub const CODE: &str = "APK009";

/// Rule name for required-metadata.
pub const NAME: &str = "required-metadata";

/// Checks that every required metadata variable is assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredMetadata;

impl RequiredMetadata {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RequiredMetadata {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires mandatory metadata variables to be assigned"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        METADATA_VARIABLES
            .iter()
            .filter(|var| var.required)
            .filter(|var| !apkbuild.assignments().iter().any(|a| a.name == var.name))
            .map(|var| {
                Violation::global(
                    CODE,
                    NAME,
                    format!("Required variable '{}' is missing", var.name),
                )
            })
            .collect()
    }
}
