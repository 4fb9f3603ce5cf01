//! Rule to enforce the comment prefix convention.
//!
//! # Rationale
//!
//! APKBUILD comments start with `# ` followed by the text, with exactly one
//! space after the hash. Shebangs are no exception since they should not
//! appear in an APKBUILD at all.

use apkbuild_lint_core::{Apkbuild, Rule, ShellNode, Violation, WalkAction};

/// Rule code for comment-prefix.
pub const CODE: &str = "APK001";

/// Rule name for comment-prefix.
pub const NAME: &str = "comment-prefix";

const MESSAGE: &str = "Comment doesn't start with exactly one space";

/// Requires every comment to start with exactly one space.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentPrefix;

impl CommentPrefix {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CommentPrefix {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires comments to start with exactly one space"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();
        apkbuild.walk(&mut |node| {
            if let ShellNode::Comment { text } = node.classify() {
                if !well_prefixed(text) {
                    violations.push(Violation::new(CODE, NAME, node.position(), MESSAGE));
                }
            }
            WalkAction::Continue
        });
        violations
    }
}

fn well_prefixed(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(' ') && chars.next() != Some(' ')
}
