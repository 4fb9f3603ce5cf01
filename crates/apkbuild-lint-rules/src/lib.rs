//! # apkbuild-lint-rules
//!
//! Built-in lint rules for apkbuild-lint.
//!
//! This crate provides the check passes enforcing Alpine Linux APKBUILD
//! conventions on top of the `apkbuild-lint-core` framework.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | APK001 | `comment-prefix` | Comments must start with exactly one space |
//! | APK002 | `address-comments` | Maintainer/Contributor comments carry RFC 5322 addresses |
//! | APK003 | `global-variable-names` | Custom globals need a single leading underscore |
//! | APK004 | `unused-variables` | Non-metadata variables must be referenced somewhere |
//! | APK005 | `global-command-substitution` | No `$(..)` outside function bodies |
//! | APK006 | `local-variable-scope` | Function variables must be declared `local` |
//! | APK007 | `long-parameter-expansion` | `${name}` where `$name` suffices |
//! | APK008 | `metadata-placement` | Metadata variables in their mandated region |
//! | APK009 | `required-metadata` | Mandatory metadata variables must be assigned |
//! | APK010 | `function-order` | Lifecycle functions in invocation order |
//! | APK011 | `forbidden-bashisms` | Non-POSIX constructs are disallowed |
//!
//! ## Usage
//!
//! ```ignore
//! use apkbuild_lint_core::{Apkbuild, Linter};
//! use apkbuild_lint_rules::default_rules;
//!
//! let apkbuild = Apkbuild::parse("APKBUILD", source)?;
//! let result = Linter::new(default_rules()).check(&apkbuild);
//! ```

mod address_comments;
mod comment_prefix;
mod forbidden_bashisms;
mod function_order;
mod global_command_substitution;
mod global_variable_names;
mod local_variable_scope;
mod long_parameter_expansion;
mod metadata_placement;
mod required_metadata;
mod unused_variables;

pub use address_comments::AddressComments;
pub use comment_prefix::CommentPrefix;
pub use forbidden_bashisms::ForbiddenBashisms;
pub use function_order::FunctionOrder;
pub use global_command_substitution::GlobalCommandSubstitution;
pub use global_variable_names::GlobalVariableNames;
pub use local_variable_scope::LocalVariableScope;
pub use long_parameter_expansion::LongParameterExpansion;
pub use metadata_placement::MetadataPlacement;
pub use required_metadata::RequiredMetadata;
pub use unused_variables::UnusedVariables;

/// Re-export core types for convenience.
pub use apkbuild_lint_core::{Rule, RuleBox, Violation};

/// All built-in rules, in their fixed execution order.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(CommentPrefix::new()),
        Box::new(AddressComments::new()),
        Box::new(GlobalVariableNames::new()),
        Box::new(UnusedVariables::new()),
        Box::new(GlobalCommandSubstitution::new()),
        Box::new(LocalVariableScope::new()),
        Box::new(LongParameterExpansion::new()),
        Box::new(MetadataPlacement::new()),
        Box::new(RequiredMetadata::new()),
        Box::new(FunctionOrder::new()),
        Box::new(ForbiddenBashisms::new()),
    ]
}
