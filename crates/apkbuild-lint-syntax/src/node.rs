//! Node classification over the tree-sitter CST.

use tree_sitter::Node;

use crate::{Position, WalkAction};

/// A node in a parsed script, borrowed from its [`crate::ShellScript`].
#[derive(Debug, Clone, Copy)]
pub struct SyntaxNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

/// A `${name}`-style or `$name`-style parameter expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamExpansion<'a> {
    /// The referenced variable, when it is a plain name (not `$@`, `$1`, ...).
    pub name: Option<&'a str>,
    /// Whether the braced `${..}` form was used.
    pub braced: bool,
    /// `${!name}` indirection.
    pub negation: bool,
    /// `${#name}` length.
    pub length: bool,
    /// `${name[i]}` subscript.
    pub index: bool,
    /// `${name:off:len}` slice.
    pub slice: bool,
    /// Any modifier at all, including the permitted ones (`:-`, `##`, `/`, ...).
    pub modified: bool,
    /// Whether an identifier-continuing literal fragment directly follows,
    /// as in `${name}suffix`, where the braces are load-bearing.
    pub followed_by_name_fragment: bool,
}

impl ParamExpansion<'_> {
    /// Whether this expansion uses a modifier outside the POSIX dialect.
    #[must_use]
    pub fn advanced(&self) -> bool {
        self.negation || self.length || self.index || self.slice
    }

    /// Whether the braces do nothing: `${name}` that could be `$name`.
    #[must_use]
    pub fn trivial(&self) -> bool {
        self.braced && self.name.is_some() && !self.modified && !self.followed_by_name_fragment
    }
}

/// The closed set of node shapes the lint rules dispatch on.
///
/// Everything the grammar produces that no rule cares about collapses into
/// [`ShellNode::Other`]; traversal still descends through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellNode<'a> {
    /// A `# ...` comment; `text` excludes the `#`.
    Comment {
        /// Comment text without the leading `#`.
        text: &'a str,
    },
    /// A `name=value` assignment.
    Assignment {
        /// Assigned variable name.
        name: &'a str,
        /// True for inline environment overrides (`FOO=bar cmd`).
        environment: bool,
    },
    /// A function declaration.
    FunctionDecl {
        /// Function name.
        name: &'a str,
        /// True for the non-POSIX `function name() { .. }` form.
        keyword_form: bool,
    },
    /// A command invocation.
    Command {
        /// The command word, when syntactically plain.
        name: Option<&'a str>,
    },
    /// A `$(..)` or backtick command substitution.
    CommandSubstitution,
    /// A parameter expansion, `$name` or `${name..}`.
    ParamExpansion(ParamExpansion<'a>),
    /// A `local`/`export`/`declare`/... clause.
    DeclClause {
        /// The clause keyword.
        keyword: &'a str,
        /// Names assigned or declared by the clause.
        names: Vec<&'a str>,
    },
    /// The iteration variable of a `for name in ..` loop.
    ForBinder {
        /// Bound variable name.
        name: &'a str,
        /// Position of the variable word itself, not the `for` keyword.
        position: Position,
    },
    /// A `[[ .. ]]` test clause.
    TestClause,
    /// An extended glob such as `!(a|b)`.
    ExtendedGlob,
    /// A `<(..)`/`>(..)` process substitution.
    ProcessSubstitution,
    /// A `let` arithmetic clause.
    LetClause,
    /// A `select name in ..` loop.
    SelectLoop,
    /// A single-quoted string; `text` excludes the quotes.
    SingleQuoted {
        /// Literal content between the quotes.
        text: &'a str,
    },
    /// A bare word or literal fragment.
    Literal {
        /// The literal text.
        text: &'a str,
    },
    /// Any node shape no rule inspects.
    Other,
}

impl<'a> SyntaxNode<'a> {
    pub(crate) fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    /// 1-based position of the node's first character.
    #[must_use]
    pub fn position(&self) -> Position {
        let point = self.node.start_position();
        Position::new(point.row + 1, point.column + 1)
    }

    /// The node's source text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Pre-order depth-first traversal starting at (and including) this node.
    ///
    /// `SkipChildren` prunes the subtree, `Stop` aborts the whole walk.
    pub fn walk(&self, f: &mut dyn FnMut(&SyntaxNode<'a>) -> WalkAction) {
        self.walk_inner(f);
    }

    fn walk_inner(&self, f: &mut dyn FnMut(&SyntaxNode<'a>) -> WalkAction) -> bool {
        match f(self) {
            WalkAction::Stop => false,
            WalkAction::SkipChildren => true,
            WalkAction::Continue => {
                for child in self.children() {
                    if !child.walk_inner(f) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Whether the node is a parse error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.node.is_error()
    }

    /// Whether the node was inserted by error recovery.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.node.is_missing()
    }

    /// All children, anonymous tokens included.
    #[must_use]
    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        (0..self.node.child_count())
            .filter_map(|i| self.node.child(i))
            .map(|n| SyntaxNode::new(n, self.source))
            .collect()
    }

    /// Classifies the node into the closed [`ShellNode`] union.
    #[must_use]
    pub fn classify(&self) -> ShellNode<'a> {
        match self.node.kind() {
            "comment" => ShellNode::Comment {
                text: self.text().strip_prefix('#').unwrap_or_else(|| self.text()),
            },
            "variable_assignment" => self.assignment(),
            "function_definition" => self.function_decl(),
            "command" => self.command(),
            "command_substitution" => ShellNode::CommandSubstitution,
            "simple_expansion" => ShellNode::ParamExpansion(self.simple_expansion()),
            "expansion" => ShellNode::ParamExpansion(self.braced_expansion()),
            "declaration_command" => self.decl_clause(),
            "for_statement" => self.for_binder(),
            "test_command" => self.test_clause(),
            "extglob_pattern" => ShellNode::ExtendedGlob,
            // Extended globs outside case patterns are invalid words to the
            // grammar and come out as error nodes shaped like `*(..)`.
            "ERROR" if looks_like_extglob(self.text()) => ShellNode::ExtendedGlob,
            "process_substitution" => ShellNode::ProcessSubstitution,
            "raw_string" => ShellNode::SingleQuoted {
                text: strip_quotes(self.text()),
            },
            "word" | "string_content" | "number" => ShellNode::Literal { text: self.text() },
            _ => ShellNode::Other,
        }
    }

    fn assignment(&self) -> ShellNode<'a> {
        let Some(name) = self.assignment_name() else {
            return ShellNode::Other;
        };
        let environment = self
            .node
            .parent()
            .is_some_and(|p| p.kind() == "command");
        ShellNode::Assignment { name, environment }
    }

    fn assignment_name(&self) -> Option<&'a str> {
        let name = self.node.child_by_field_name("name")?;
        let name = if name.kind() == "subscript" {
            name.child(0)?
        } else {
            name
        };
        name.utf8_text(self.source.as_bytes()).ok()
    }

    fn function_decl(&self) -> ShellNode<'a> {
        let Some(name) = self.node.child_by_field_name("name") else {
            return ShellNode::Other;
        };
        let keyword_form = self.node.child(0).is_some_and(|c| c.kind() == "function");
        ShellNode::FunctionDecl {
            name: SyntaxNode::new(name, self.source).text(),
            keyword_form,
        }
    }

    fn command(&self) -> ShellNode<'a> {
        let name = self
            .node
            .child_by_field_name("name")
            .map(|n| SyntaxNode::new(n, self.source).text());
        match name {
            Some("let") => ShellNode::LetClause,
            // `select` loops and mksh-style nameref have no distinct grammar
            // node; both look like plain commands by their name word.
            Some("select") => ShellNode::SelectLoop,
            Some("nameref") => ShellNode::DeclClause {
                keyword: "nameref",
                names: self.command_argument_names(),
            },
            name => ShellNode::Command { name },
        }
    }

    fn command_argument_names(&self) -> Vec<&'a str> {
        // The command word itself is a `command_name`, not a bare word.
        self.children()
            .into_iter()
            .filter(|c| c.node.kind() == "word")
            .map(|c| c.text())
            .collect()
    }

    fn decl_clause(&self) -> ShellNode<'a> {
        let keyword = self
            .node
            .child(0)
            .map_or("", |c| SyntaxNode::new(c, self.source).text());
        let mut names = Vec::new();
        for child in self.children() {
            match child.node.kind() {
                "variable_assignment" => {
                    if let Some(name) = child.assignment_name() {
                        names.push(name);
                    }
                }
                "variable_name" => names.push(child.text()),
                _ => {}
            }
        }
        ShellNode::DeclClause { keyword, names }
    }

    fn for_binder(&self) -> ShellNode<'a> {
        let Some(variable) = self.node.child_by_field_name("variable") else {
            return ShellNode::Other;
        };
        let variable = SyntaxNode::new(variable, self.source);
        ShellNode::ForBinder {
            name: variable.text(),
            position: variable.position(),
        }
    }

    fn test_clause(&self) -> ShellNode<'a> {
        // `test_command` also covers `[ .. ]` and `(( .. ))`; only the
        // double-bracket form is a bashism worth surfacing.
        match self.node.child(0).map(|c| c.kind()) {
            Some("[[") => ShellNode::TestClause,
            _ => ShellNode::Other,
        }
    }

    fn simple_expansion(&self) -> ParamExpansion<'a> {
        let name = self
            .children()
            .into_iter()
            .find(|c| c.node.kind() == "variable_name")
            .map(|c| c.text());
        ParamExpansion {
            name,
            braced: false,
            negation: false,
            length: false,
            index: false,
            slice: false,
            modified: false,
            followed_by_name_fragment: false,
        }
    }

    fn braced_expansion(&self) -> ParamExpansion<'a> {
        let mut exp = ParamExpansion {
            name: None,
            braced: true,
            negation: false,
            length: false,
            index: false,
            slice: false,
            modified: false,
            followed_by_name_fragment: self.followed_by_name_fragment(),
        };

        let mut seen_name = false;
        let mut extra = false;
        for child in self.children() {
            match child.node.kind() {
                "${" | "}" => {}
                "variable_name" if !seen_name => {
                    exp.name = Some(child.text());
                    seen_name = true;
                }
                "subscript" if !seen_name => {
                    exp.index = true;
                    seen_name = true;
                    exp.name = child
                        .children()
                        .into_iter()
                        .find(|c| c.node.kind() == "variable_name")
                        .map(|c| c.text());
                }
                "!" if !seen_name => exp.negation = true,
                "#" if !seen_name => exp.length = true,
                ":" => exp.slice = true,
                _ => extra = true,
            }
        }

        exp.modified = exp.advanced() || extra;
        exp
    }

    fn followed_by_name_fragment(&self) -> bool {
        let Some(next) = self.node.next_sibling() else {
            return false;
        };
        if next.start_byte() != self.node.end_byte() {
            return false;
        }
        let text = SyntaxNode::new(next, self.source).text();
        text.chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

fn looks_like_extglob(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some('?' | '*' | '+' | '@' | '!')) && chars.next() == Some('(')
}

fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use crate::{Position, ShellNode, ShellScript, WalkAction};

    fn collect(src: &str) -> Vec<String> {
        let script = ShellScript::parse("t", src).expect("valid script");
        let mut kinds = Vec::new();
        script.walk(&mut |node| {
            let classified = node.classify();
            if !matches!(classified, ShellNode::Other | ShellNode::Literal { .. }) {
                kinds.push(format!("{classified:?}"));
            }
            WalkAction::Continue
        });
        kinds
    }

    fn find_expansions(src: &str) -> Vec<(Option<String>, bool, bool)> {
        let script = ShellScript::parse("t", src).expect("valid script");
        let mut out = Vec::new();
        script.walk(&mut |node| {
            if let ShellNode::ParamExpansion(exp) = node.classify() {
                out.push((
                    exp.name.map(str::to_owned),
                    exp.trivial(),
                    exp.advanced(),
                ));
            }
            WalkAction::Continue
        });
        out
    }

    #[test]
    fn classifies_comment_without_hash() {
        let script = ShellScript::parse("t", "# hello\n").expect("valid script");
        let mut found = None;
        script.walk(&mut |node| {
            if let ShellNode::Comment { text } = node.classify() {
                found = Some(text.to_owned());
            }
            WalkAction::Continue
        });
        assert_eq!(found.as_deref(), Some(" hello"));
    }

    #[test]
    fn environment_overrides_are_marked() {
        let script = ShellScript::parse("t", "FOO=bar make\nBAZ=1\n").expect("valid script");
        let mut seen = Vec::new();
        script.walk(&mut |node| {
            if let ShellNode::Assignment { name, environment } = node.classify() {
                seen.push((name.to_owned(), environment));
            }
            WalkAction::Continue
        });
        assert_eq!(seen, [("FOO".to_owned(), true), ("BAZ".to_owned(), false)]);
    }

    #[test]
    fn function_keyword_form_detected() {
        let kinds = collect("function f() {\nreturn 1\n}\n");
        assert!(kinds.iter().any(|k| k.contains("keyword_form: true")));

        let kinds = collect("f() {\nreturn 1\n}\n");
        assert!(kinds.iter().any(|k| k.contains("keyword_form: false")));
    }

    #[test]
    fn trivial_expansion_detected() {
        let exps = find_expansions("foo=${pkgname}\n");
        assert_eq!(exps.len(), 1);
        assert_eq!(exps[0], (Some("pkgname".to_owned()), true, false));
    }

    #[test]
    fn suffix_fragment_keeps_braces_load_bearing() {
        let exps = find_expansions("foo=${bar}baz\n");
        assert!(!exps[0].1, "braces are required before a fragment");
    }

    #[test]
    fn strip_modifier_is_not_trivial_and_not_advanced() {
        let exps = find_expansions("foo=${pkgver%%.*}\n");
        assert_eq!(exps[0], (Some("pkgver".to_owned()), false, false));
    }

    #[test]
    fn length_modifier_is_advanced() {
        let exps = find_expansions("echo ${#foo}\n");
        assert_eq!(exps[0], (Some("foo".to_owned()), false, true));
    }

    #[test]
    fn short_expansion_is_never_trivial() {
        let exps = find_expansions("foo=$bar\n");
        assert_eq!(exps[0], (Some("bar".to_owned()), false, false));
    }

    #[test]
    fn decl_clause_carries_keyword_and_names() {
        let script =
            ShellScript::parse("t", "f() {\nlocal a=1 b=2\n}\n").expect("valid script");
        let mut found = None;
        script.walk(&mut |node| {
            if let ShellNode::DeclClause { keyword, names } = node.classify() {
                found = Some((keyword.to_owned(), names.len()));
            }
            WalkAction::Continue
        });
        assert_eq!(found, Some(("local".to_owned(), 2)));
    }

    #[test]
    fn for_binder_position_points_at_variable() {
        let script =
            ShellScript::parse("t", "f() {\nfor x in a b; do echo \"$x\"; done\n}\n")
                .expect("valid script");
        let mut found = None;
        script.walk(&mut |node| {
            if let ShellNode::ForBinder { name, position } = node.classify() {
                found = Some((name.to_owned(), position));
            }
            WalkAction::Continue
        });
        assert_eq!(found, Some(("x".to_owned(), Position::new(2, 5))));
    }

    #[test]
    fn double_bracket_test_clause_detected() {
        let kinds = collect("[[ -e \"$x\" ]] && y=1\n");
        assert!(kinds.iter().any(|k| k.contains("TestClause")));
    }

    #[test]
    fn single_bracket_test_is_not_flagged_shape() {
        let kinds = collect("[ -e \"$x\" ] && y=1\n");
        assert!(!kinds.iter().any(|k| k.contains("TestClause")));
    }

    #[test]
    fn let_clause_detected() {
        let kinds = collect("let x=1\n");
        assert!(kinds.iter().any(|k| k.contains("LetClause")));
    }

    #[test]
    fn select_command_classified_as_select_loop() {
        let kinds = collect("select s in foo bar baz; do\n\techo $s\ndone\n");
        assert!(kinds.iter().any(|k| k.contains("SelectLoop")));
    }

    #[test]
    fn nameref_clause_names_include_first_argument() {
        let script = ShellScript::parse("t", "nameref foo\n").expect("valid script");
        let mut found = None;
        script.walk(&mut |node| {
            if let ShellNode::DeclClause { keyword, names } = node.classify() {
                found = Some((keyword.to_owned(), names.iter().map(|n| (*n).to_owned()).collect::<Vec<_>>()));
            }
            WalkAction::Continue
        });
        assert_eq!(found, Some(("nameref".to_owned(), vec!["foo".to_owned()])));
    }

    #[test]
    fn extended_glob_in_assignment_classified() {
        let script = ShellScript::parse("t", "bar=*(foo bar)\n").expect("tolerated input");
        let mut found = None;
        script.walk(&mut |node| {
            if matches!(node.classify(), ShellNode::ExtendedGlob) {
                found = Some(node.position());
                return WalkAction::SkipChildren;
            }
            WalkAction::Continue
        });
        assert_eq!(found, Some(Position::new(1, 5)));
    }

    #[test]
    fn single_quoted_text_excludes_quotes() {
        let script = ShellScript::parse("t", "eval '$cmd'\n").expect("valid script");
        let mut found = None;
        script.walk(&mut |node| {
            if let ShellNode::SingleQuoted { text } = node.classify() {
                found = Some(text.to_owned());
            }
            WalkAction::Continue
        });
        assert_eq!(found.as_deref(), Some("$cmd"));
    }
}
