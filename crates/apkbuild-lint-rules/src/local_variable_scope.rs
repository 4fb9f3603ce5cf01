//! Rule for variable scoping inside functions.
//!
//! # Rationale
//!
//! APKBUILD functions are sourced into abuild's own shell process, so any
//! variable assigned without `local` leaks into every later function. Only
//! script globals, metadata variables, and names declared via `local` or
//! `export` may be assigned inside a function body.

use apkbuild_lint_core::{
    is_metadata_var, Apkbuild, Rule, ShellNode, SyntaxNode, Violation, WalkAction,
};

/// Rule code for local-variable-scope.
pub const CODE: &str = "APK006";

/// Rule name for local-variable-scope.
pub const NAME: &str = "local-variable-scope";

/// Requires function variables to be declared `local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalVariableScope;

impl LocalVariableScope {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LocalVariableScope {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires variables assigned inside functions to be declared local"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();
        apkbuild.walk(&mut |node| {
            if matches!(node.classify(), ShellNode::FunctionDecl { .. }) {
                check_function(apkbuild, node, &mut violations);
                return WalkAction::SkipChildren;
            }
            WalkAction::Continue
        });
        violations
    }
}

fn check_function(apkbuild: &Apkbuild, func: &SyntaxNode<'_>, violations: &mut Vec<Violation>) {
    // Names become local from their declaration onwards; declarations later
    // in the body do not retroactively excuse earlier assignments.
    let mut locals: Vec<String> = Vec::new();

    for child in func.children() {
        child.walk(&mut |node| match node.classify() {
            ShellNode::DeclClause {
                keyword: "local" | "export",
                names,
            } => {
                locals.extend(names.iter().map(|n| (*n).to_owned()));
                WalkAction::SkipChildren
            }
            ShellNode::Assignment {
                name,
                environment: false,
            } => {
                if out_of_scope(apkbuild, &locals, name) {
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        node.position(),
                        format!("Variable '{name}' should be declared local"),
                    ));
                }
                WalkAction::Continue
            }
            ShellNode::ForBinder { name, position } => {
                if out_of_scope(apkbuild, &locals, name) {
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        position,
                        format!("Variable '{name}' should be declared local"),
                    ));
                }
                WalkAction::Continue
            }
            _ => WalkAction::Continue,
        });
    }
}

fn out_of_scope(apkbuild: &Apkbuild, locals: &[String], name: &str) -> bool {
    !locals.iter().any(|l| l == name) && !apkbuild.is_global_var(name) && !is_metadata_var(name)
}
