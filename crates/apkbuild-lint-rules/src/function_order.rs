//! Rule for lifecycle function ordering.
//!
//! # Rationale
//!
//! abuild(1) calls the lifecycle functions in a fixed order; declaring them
//! in that same order keeps the script readable top to bottom.

use apkbuild_lint_core::{Apkbuild, Position, Rule, Violation, PACKAGE_FUNCTIONS};

/// Rule code for function-order.
pub const CODE: &str = "APK010";

/// Rule name for function-order.
pub const NAME: &str = "function-order";

/// Checks that lifecycle functions are declared in invocation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionOrder;

impl FunctionOrder {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FunctionOrder {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires lifecycle functions in the order abuild invokes them"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut seen: Vec<(&str, Position)> = Vec::new();

        for name in PACKAGE_FUNCTIONS.iter().copied() {
            let Some(decl) = apkbuild.functions().get(name) else {
                continue;
            };

            for (earlier, position) in &seen {
                if decl.position <= *position {
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        decl.position,
                        format!("Function '{name}' should be declared after '{earlier}'"),
                    ));
                }
            }
            seen.push((name, decl.position));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(src: &str) -> Vec<Violation> {
        let apkbuild = Apkbuild::parse("Testinput", src).expect("valid script");
        FunctionOrder::new().check(&apkbuild)
    }

    #[test]
    fn flags_out_of_order_declaration() {
        let violations = check("package() {\ntrue\n}\nbuild() {\ntrue\n}\n");
        assert_eq!(violations.len(), 1);
        let p = violations[0].position.expect("positioned");
        assert_eq!((p.line, p.column), (1, 1));
        assert_eq!(
            violations[0].message,
            "Function 'package' should be declared after 'build'"
        );
    }

    #[test]
    fn canonical_order_passes() {
        let src = "prepare() {\ntrue\n}\nbuild() {\ntrue\n}\ncheck() {\ntrue\n}\npackage() {\ntrue\n}\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn non_lifecycle_functions_are_ignored() {
        assert!(check("_helper() {\ntrue\n}\nbuild() {\ntrue\n}\n").is_empty());
    }
}
