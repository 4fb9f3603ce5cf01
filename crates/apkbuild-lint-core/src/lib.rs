//! # apkbuild-lint-core
//!
//! Core framework for linting Alpine Linux APKBUILDs.
//!
//! This crate provides the foundational traits and types the rule crate is
//! built on:
//!
//! - [`Apkbuild`] — the document model built from one parse of the script
//! - [`Rule`] trait for check passes returning structured [`Violation`]s
//! - [`Linter`] for running the fixed pass sequence
//! - [`Reporter`] for the one-line-per-violation diagnostic format
//! - the static metadata-variable and lifecycle-function registries
//!
//! ## Example
//!
//! ```ignore
//! use apkbuild_lint_core::{Apkbuild, Linter};
//!
//! let apkbuild = Apkbuild::parse("APKBUILD", source)?;
//! let result = Linter::new(apkbuild_lint_rules::default_rules()).check(&apkbuild);
//! ```

mod apkbuild;
mod linter;
mod registry;
mod reporter;
mod rule;
mod types;

pub use apkbuild::{Apkbuild, Assignment, Comment, FunctionDecl};
pub use linter::Linter;
pub use registry::{
    is_metadata_var, metadata_var, MetadataVar, Placement, METADATA_VARIABLES, PACKAGE_FUNCTIONS,
};
pub use reporter::Reporter;
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Violation};

/// Re-exported so rule implementations only need one dependency for positions.
pub use apkbuild_lint_syntax::{ParseError, Position, ShellNode, SyntaxNode, WalkAction};
