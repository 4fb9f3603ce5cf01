//! # apkbuild-lint-syntax
//!
//! Thin access layer over the external shell parser (`tree-sitter-bash`).
//!
//! APKBUILDs are mostly POSIX shell, but the grammar used here is a permissive
//! bash superset on purpose: disallowed constructs like `[[ ]]` test clauses or
//! process substitutions must parse into inspectable nodes so the lint rules
//! can flag them, instead of being rejected with a syntax error.
//!
//! The crate exposes:
//!
//! - [`ShellScript`] — a script parsed once, immutable afterwards
//! - [`SyntaxNode`] — pre-order depth-first traversal with pruning via
//!   [`WalkAction`], and 1-based [`Position`]s
//! - [`ShellNode`] — a closed union of the node shapes the lint rules care
//!   about, so rule dispatch is an exhaustive `match`

mod node;

pub use node::{ParamExpansion, ShellNode, SyntaxNode};

use serde::{Deserialize, Serialize};
use tree_sitter::Parser;

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Controls a [`SyntaxNode::walk`] traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    /// Descend into the node's children.
    Continue,
    /// Skip the node's children, continue with its siblings.
    SkipChildren,
    /// Abort the whole traversal.
    Stop,
}

/// Errors produced while parsing a script.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The bash grammar could not be loaded.
    #[error("language error: {0}")]
    Language(String),
    /// The parser gave up without producing a tree.
    #[error("parse failed")]
    Failed,
    /// The source is not valid under the (permissive) shell grammar.
    #[error("syntax error at {position}")]
    Syntax {
        /// Position of the first offending node.
        position: Position,
    },
}

/// A parsed shell script. Built once, never mutated by the lint rules.
pub struct ShellScript {
    name: String,
    source: String,
    tree: tree_sitter::Tree,
}

impl ShellScript {
    /// Parses `source` under the permissive bash grammar.
    ///
    /// The name is only used in diagnostics emitted for this script.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the source is not valid shell. A script
    /// that fails here produces no lint output at all.
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, ParseError> {
        let source = source.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_bash::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or(ParseError::Failed)?;

        let script = Self {
            name: name.into(),
            source,
            tree,
        };
        if script.tree.root_node().has_error() {
            if let Some(position) = first_fatal_error(&script) {
                return Err(ParseError::Syntax { position });
            }
        }

        Ok(script)
    }

    /// The name supplied at parse time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root node of the syntax tree.
    #[must_use]
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self.tree.root_node(), &self.source)
    }

    /// Walks the whole tree in pre-order depth-first order.
    pub fn walk(&self, f: &mut dyn FnMut(&SyntaxNode<'_>) -> WalkAction) {
        self.root().walk(f);
    }
}

impl std::fmt::Debug for ShellScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellScript")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Position of the first error node that does not classify as a flaggable
/// construct. Extended globs outside case patterns parse as error nodes and
/// must survive so the lint rules can report them.
fn first_fatal_error(script: &ShellScript) -> Option<Position> {
    let mut position = None;
    script.root().walk(&mut |node| {
        if matches!(node.classify(), ShellNode::ExtendedGlob) {
            return WalkAction::SkipChildren;
        }
        if node.is_error() || node.is_missing() {
            position = Some(node.position());
            return WalkAction::Stop;
        }
        WalkAction::Continue
    });
    position
}
