//! Rule against command substitution in global scope.
//!
//! # Rationale
//!
//! APKBUILDs are sourced by abuild(1); top-level command substitutions run
//! on every source and make metadata non-declarative. Function bodies run
//! only when abuild invokes them and are exempt.

use apkbuild_lint_core::{Apkbuild, Rule, ShellNode, Violation, WalkAction};

/// Rule code for global-command-substitution.
pub const CODE: &str = "APK005";

/// Rule name for global-command-substitution.
pub const NAME: &str = "global-command-substitution";

const MESSAGE: &str = "Global variables should not use command substitution";

/// Flags `$(..)` substitutions outside function bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalCommandSubstitution;

impl GlobalCommandSubstitution {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for GlobalCommandSubstitution {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids command substitution outside function bodies"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();
        apkbuild.walk(&mut |node| match node.classify() {
            ShellNode::FunctionDecl { .. } => WalkAction::SkipChildren,
            ShellNode::CommandSubstitution => {
                violations.push(Violation::new(CODE, NAME, node.position(), MESSAGE));
                WalkAction::Continue
            }
            _ => WalkAction::Continue,
        });
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(src: &str) -> Vec<Violation> {
        let apkbuild = Apkbuild::parse("Testinput", src).expect("valid script");
        GlobalCommandSubstitution::new().check(&apkbuild)
    }

    #[test]
    fn flags_substitutions_outside_functions_only() {
        let src = "pkgname=bar\n\
                   _bar=$(ls)\n\
                   f1() {\n\
                   local v1=${_bar}\n\
                   }\n\
                   _baz=$(cp -h)\n\
                   f2() {\n\
                   local v2=${_baz}\n\
                   }\n";
        let violations = check(src);
        let positions: Vec<_> = violations
            .iter()
            .map(|v| {
                let p = v.position.expect("positioned");
                (p.line, p.column)
            })
            .collect();
        assert_eq!(positions, [(2, 6), (6, 6)]);
        assert!(violations.iter().all(|v| v.message == MESSAGE));
    }

    #[test]
    fn function_bodies_are_exempt() {
        assert!(check("f() {\n_x=$(ls)\necho $_x\n}\n").is_empty());
    }
}
