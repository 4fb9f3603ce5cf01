//! Rule against bashisms.
//!
//! # Rationale
//!
//! APKBUILDs run under busybox ash. The parser accepts a permissive bash
//! superset so these constructs can be reported here instead of failing
//! with a syntax error. `local` and `export` declarations are the two
//! permitted extensions.

use apkbuild_lint_core::{Apkbuild, Rule, ShellNode, Violation, WalkAction};

/// Rule code for forbidden-bashisms.
pub const CODE: &str = "APK011";

/// Rule name for forbidden-bashisms.
pub const NAME: &str = "forbidden-bashisms";

/// Flags shell constructs outside the POSIX dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForbiddenBashisms;

impl ForbiddenBashisms {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ForbiddenBashisms {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids non-POSIX shell constructs"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();
        apkbuild.walk(&mut |node| {
            let feature: Option<&str> = match node.classify() {
                ShellNode::TestClause => Some("test clause"),
                ShellNode::ExtendedGlob => Some("extended globbing expression"),
                ShellNode::ProcessSubstitution => Some("process substitution"),
                ShellNode::LetClause => Some("let clause"),
                ShellNode::SelectLoop => Some("select clause"),
                ShellNode::DeclClause { keyword, .. }
                    if keyword != "local" && keyword != "export" =>
                {
                    Some(keyword)
                }
                ShellNode::ParamExpansion(exp) if exp.advanced() => {
                    Some("advanced parameter expression")
                }
                ShellNode::FunctionDecl {
                    keyword_form: true, ..
                } => Some("non-POSIX function declaration"),
                _ => None,
            };

            if let Some(feature) = feature {
                violations.push(Violation::new(
                    CODE,
                    NAME,
                    node.position(),
                    format!("{feature} is a bashism"),
                ));
            }
            WalkAction::Continue
        });
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(src: &str) -> Vec<Violation> {
        let apkbuild = Apkbuild::parse("Testinput", src).expect("valid script");
        ForbiddenBashisms::new().check(&apkbuild)
    }

    fn features(src: &str) -> Vec<String> {
        check(src).into_iter().map(|v| v.message).collect()
    }

    #[test]
    fn flags_double_bracket_test_clause() {
        assert_eq!(
            features("[[ -e \"$builddir\" ]] && foo=bar\n"),
            ["test clause is a bashism"]
        );
    }

    #[test]
    fn flags_let_clause() {
        assert_eq!(features("let x=1\n"), ["let clause is a bashism"]);
    }

    #[test]
    fn flags_declaration_keywords() {
        assert_eq!(features("declare -A foobar\n"), ["declare is a bashism"]);
        assert_eq!(features("readonly x=1\n"), ["readonly is a bashism"]);
        assert_eq!(features("typeset -r x=1\n"), ["typeset is a bashism"]);
    }

    #[test]
    fn flags_nameref_command() {
        assert_eq!(features("nameref foo\n"), ["nameref is a bashism"]);
    }

    #[test]
    fn flags_advanced_parameter_expression() {
        let violations = check("echo ${#foo}\n");
        assert_eq!(violations.len(), 1);
        let p = violations[0].position.expect("positioned");
        assert_eq!((p.line, p.column), (1, 6));
        assert_eq!(violations[0].message, "advanced parameter expression is a bashism");
    }

    #[test]
    fn flags_extended_glob_in_assignment() {
        let violations = check("bar=*(foo bar)\n");
        assert_eq!(violations.len(), 1);
        let p = violations[0].position.expect("positioned");
        assert_eq!((p.line, p.column), (1, 5));
        assert_eq!(
            violations[0].message,
            "extended globbing expression is a bashism"
        );
    }

    #[test]
    fn flags_select_loop() {
        let violations = check("select s in foo bar baz; do\n\techo $s\ndone\n");
        assert_eq!(violations.len(), 1);
        let p = violations[0].position.expect("positioned");
        assert_eq!((p.line, p.column), (1, 1));
        assert_eq!(violations[0].message, "select clause is a bashism");
    }

    #[test]
    fn flags_process_substitution() {
        assert_eq!(
            features("echo >(true)\n"),
            ["process substitution is a bashism"]
        );
    }

    #[test]
    fn flags_function_keyword_declaration() {
        assert_eq!(
            features("function f() {\nreturn 1\n}\n"),
            ["non-POSIX function declaration is a bashism"]
        );
    }

    #[test]
    fn permits_local_and_export() {
        assert!(check("f() {\nlocal x=1\nexport y=2\necho $x $y\n}\n").is_empty());
    }

    #[test]
    fn permits_posix_expansions() {
        assert!(check("foo=${bar:-baz}\necho ${foo%%.*}\n").is_empty());
    }
}
