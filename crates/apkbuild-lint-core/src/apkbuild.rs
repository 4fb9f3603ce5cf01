//! Document model for a parsed APKBUILD.

use std::collections::HashMap;

use apkbuild_lint_syntax::{ParseError, Position, ShellNode, ShellScript, SyntaxNode, WalkAction};

/// A top-level comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text without the leading `#`.
    pub text: String,
    /// Position of the comment.
    pub position: Position,
}

/// A top-level variable assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Assigned variable name.
    pub name: String,
    /// Position of the assignment.
    pub position: Position,
}

/// A declared function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Position of the declaration.
    pub position: Position,
}

/// An Alpine Linux APKBUILD: the parsed script plus one classification pass
/// over its top level.
///
/// The classification traversal prunes at function bodies, so in-function
/// assignments are never recorded as globals, and at `export` declaration
/// clauses, so exported environment variables are not treated as script
/// globals either. Assignment order is source order; rules rely on it for
/// before/after comparisons.
#[derive(Debug)]
pub struct Apkbuild {
    script: ShellScript,
    comments: Vec<Comment>,
    assignments: Vec<Assignment>,
    functions: HashMap<String, FunctionDecl>,
}

impl Apkbuild {
    /// Parses an APKBUILD. The name is used in diagnostics for this script.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the source is not valid under the
    /// permissive shell grammar. No lint output is produced for such input.
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, ParseError> {
        let script = ShellScript::parse(name, source)?;

        let mut comments = Vec::new();
        let mut assignments = Vec::new();
        let mut functions = HashMap::new();

        script.walk(&mut |node| match node.classify() {
            ShellNode::FunctionDecl { name, .. } => {
                // Duplicate names collapse; the last declaration wins.
                functions.insert(
                    name.to_owned(),
                    FunctionDecl {
                        name: name.to_owned(),
                        position: node.position(),
                    },
                );
                WalkAction::SkipChildren
            }
            ShellNode::DeclClause { keyword: "export", .. } => WalkAction::SkipChildren,
            ShellNode::Assignment {
                name,
                environment: false,
            } => {
                assignments.push(Assignment {
                    name: name.to_owned(),
                    position: node.position(),
                });
                WalkAction::Continue
            }
            ShellNode::Comment { text } => {
                comments.push(Comment {
                    text: text.to_owned(),
                    position: node.position(),
                });
                WalkAction::Continue
            }
            _ => WalkAction::Continue,
        });

        Ok(Self {
            script,
            comments,
            assignments,
            functions,
        })
    }

    /// The name supplied at parse time.
    #[must_use]
    pub fn name(&self) -> &str {
        self.script.name()
    }

    /// Top-level comments, in source order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Top-level assignments, in source order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Declared functions, keyed by name.
    #[must_use]
    pub fn functions(&self) -> &HashMap<String, FunctionDecl> {
        &self.functions
    }

    /// Position of the first function declaration, if any.
    #[must_use]
    pub fn first_function_position(&self) -> Option<Position> {
        self.functions.values().map(|f| f.position).min()
    }

    /// Position of the last function declaration, if any.
    #[must_use]
    pub fn last_function_position(&self) -> Option<Position> {
        self.functions.values().map(|f| f.position).max()
    }

    /// Walks the whole underlying syntax tree in pre-order.
    pub fn walk(&self, f: &mut dyn FnMut(&SyntaxNode<'_>) -> WalkAction) {
        self.script.walk(f);
    }

    /// Reports whether `name` is assigned at the top level of the script.
    #[must_use]
    pub fn is_global_var(&self, name: &str) -> bool {
        self.assignments.iter().any(|a| a.name == name)
    }

    /// Reports whether the variable `name` is never used anywhere in the
    /// script. A variable counts as used when an `export` clause targets it,
    /// when a single-quoted literal `'$name'` references it dynamically, or
    /// when any parameter expansion mentions it.
    #[must_use]
    pub fn is_unused_var(&self, name: &str) -> bool {
        let dynamic_ref = format!("${name}");
        let mut used = false;

        self.script.walk(&mut |node| {
            match node.classify() {
                ShellNode::DeclClause { keyword: "export", names } => {
                    if names.contains(&name) {
                        used = true;
                        return WalkAction::Stop;
                    }
                }
                ShellNode::SingleQuoted { text } if text == dynamic_ref => {
                    used = true;
                    return WalkAction::Stop;
                }
                ShellNode::ParamExpansion(exp) if exp.name == Some(name) => {
                    used = true;
                    return WalkAction::Stop;
                }
                _ => {}
            }
            WalkAction::Continue
        });

        !used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Apkbuild {
        Apkbuild::parse("Testinput", src).expect("valid script")
    }

    #[test]
    fn records_top_level_assignments_in_order() {
        let a = parse("pkgname=foo\n_bar=1\nbuild() {\ninner=2\n}\n_baz=3\n");
        let names: Vec<_> = a.assignments().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["pkgname", "_bar", "_baz"]);
    }

    #[test]
    fn in_function_assignments_are_not_global() {
        let a = parse("build() {\ninner=2\n}\n");
        assert!(!a.is_global_var("inner"));
    }

    #[test]
    fn exported_variables_are_not_global() {
        let a = parse("export CFLAGS=-O2\npkgname=foo\n");
        assert!(!a.is_global_var("CFLAGS"));
        assert!(a.is_global_var("pkgname"));
    }

    #[test]
    fn environment_overrides_are_not_global() {
        let a = parse("FOO=bar make\n");
        assert!(!a.is_global_var("FOO"));
    }

    #[test]
    fn comments_stop_at_function_bodies() {
        let a = parse("# top\nbuild() {\n# inner\ntrue\n}\n");
        assert_eq!(a.comments().len(), 1);
        assert_eq!(a.comments()[0].text, " top");
    }

    #[test]
    fn functions_keyed_by_name() {
        let a = parse("build() {\ntrue\n}\npackage() {\ntrue\n}\n");
        assert_eq!(a.functions().len(), 2);
        assert_eq!(a.functions()["build"].position, Position::new(1, 1));
        assert!(a.first_function_position() < a.last_function_position());
    }

    #[test]
    fn unused_var_found_by_expansion() {
        let a = parse("_used=1\nbuild() {\necho $_used\n}\n");
        assert!(!a.is_unused_var("_used"));
    }

    #[test]
    fn unused_var_found_by_braced_expansion() {
        let a = parse("_used=1\nbuild() {\necho ${_used}\n}\n");
        assert!(!a.is_unused_var("_used"));
    }

    #[test]
    fn unused_var_found_by_export() {
        let a = parse("build() {\nexport ENV=42\n}\n");
        assert!(!a.is_unused_var("ENV"));
    }

    #[test]
    fn unused_var_found_by_single_quoted_reference() {
        let a = parse("_cmd=ls\nbuild() {\neval '$_cmd'\n}\n");
        assert!(!a.is_unused_var("_cmd"));
    }

    #[test]
    fn unreferenced_var_is_unused() {
        let a = parse("_dead=1\n");
        assert!(a.is_unused_var("_dead"));
    }
}
