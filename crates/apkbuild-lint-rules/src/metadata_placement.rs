//! Rule for metadata variable placement.
//!
//! # Rationale
//!
//! abuild(1) expects descriptive metadata at the top of the script and
//! checksum variables at the bottom, after every function declaration.

use apkbuild_lint_core::{metadata_var, Apkbuild, Placement, Rule, Violation};

/// Rule code for metadata-placement.
pub const CODE: &str = "APK008";

/// Rule name for metadata-placement.
pub const NAME: &str = "metadata-placement";

/// Checks that metadata assignments sit in their mandated region.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataPlacement;

impl MetadataPlacement {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MetadataPlacement {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks placement of metadata variables relative to functions"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let first = apkbuild.first_function_position();
        let last = apkbuild.last_function_position();

        let mut violations = Vec::new();
        for assignment in apkbuild.assignments() {
            let Some(var) = metadata_var(&assignment.name) else {
                continue;
            };

            match var.placement {
                Placement::BeforeFunctions => {
                    if first.is_some_and(|first| assignment.position > first) {
                        violations.push(Violation::new(
                            CODE,
                            NAME,
                            assignment.position,
                            format!(
                                "Variable '{}' should be declared before any function",
                                var.name
                            ),
                        ));
                    }
                }
                Placement::AfterFunctions => {
                    if last.is_some_and(|last| assignment.position <= last) {
                        violations.push(Violation::new(
                            CODE,
                            NAME,
                            assignment.position,
                            format!(
                                "Variable '{}' should be declared after all functions",
                                var.name
                            ),
                        ));
                    }
                }
            }
        }
        violations
    }
}
