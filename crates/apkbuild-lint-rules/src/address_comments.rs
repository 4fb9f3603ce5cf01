//! Rule for maintainer and contributor address comments.
//!
//! # Rationale
//!
//! Every APKBUILD carries exactly one `# Maintainer:` comment with an
//! RFC 5322 mailbox, optionally preceded by `# Contributor:` comments.
//! The maintainer comment must come before the first assignment, every
//! contributor comment must come before the maintainer comment, and no
//! contributor address may repeat.

use std::collections::HashSet;

use apkbuild_lint_core::{Apkbuild, Comment, Rule, Violation};
use email_address::EmailAddress;

/// Rule code for address-comments.
pub const CODE: &str = "APK002";

/// Rule name for address-comments.
pub const NAME: &str = "address-comments";

/// Comment prefix marking the package maintainer. The leading space is
/// part of the comment text (the `#` itself is stripped by the parser).
const MAINTAINER_PREFIX: &str = " Maintainer:";

/// Comment prefix marking a package contributor.
const CONTRIBUTOR_PREFIX: &str = " Contributor:";

const MISSING_MAINTAINER: &str = "Maintainer is missing";
const MISSING_ADDRESS: &str = "Comment is missing an RFC 5322 address";
const NO_ADDRESS_SEPARATOR: &str = "Mail address should be separated from prefix with a space";
const INVALID_ADDRESS: &str = "Mail address doesn't conform to RFC 5322";
const TOO_MANY_MAINTAINERS: &str = "Only one maintainer can be specified";
const MAINTAINER_AFTER_ASSIGN: &str = "Maintainer comment should be declared before any assignment";
const WRONG_ADDR_COMMENT_ORDER: &str =
    "Contributor comments should be declared before the maintainer comment";
const REPEATED_ADDR_COMMENT: &str = "Contributor comment is repeated";

/// Checks maintainer and contributor comments for well-formed, correctly
/// ordered RFC 5322 addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressComments;

impl AddressComments {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for AddressComments {
    fn code(&self) -> &'static str {
        CODE
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires one maintainer comment with valid RFC 5322 addresses"
    }

    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation> {
        let mut violations = Vec::new();

        let maintainers = scan_address_comments(apkbuild, MAINTAINER_PREFIX, &mut violations);
        let maintainer = match maintainers.matched {
            0 => {
                violations.push(Violation::global(CODE, NAME, MISSING_MAINTAINER));
                None
            }
            1 => maintainers.parsed.first(),
            _ => {
                if let Some(position) = maintainers
                    .parsed
                    .last()
                    .map(|p| p.comment.position)
                    .or(maintainers.last_matched)
                {
                    violations.push(Violation::new(CODE, NAME, position, TOO_MANY_MAINTAINERS));
                }
                None
            }
        };

        if let Some(maintainer) = maintainer {
            if let Some(first) = apkbuild.assignments().first() {
                if maintainer.comment.position > first.position {
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        maintainer.comment.position,
                        MAINTAINER_AFTER_ASSIGN,
                    ));
                }
            }
        }

        let contributors = scan_address_comments(apkbuild, CONTRIBUTOR_PREFIX, &mut violations);
        let mut seen = HashSet::new();
        for contributor in &contributors.parsed {
            let position = contributor.comment.position;
            if let Some(maintainer) = maintainer {
                if position > maintainer.comment.position {
                    violations.push(Violation::new(CODE, NAME, position, WRONG_ADDR_COMMENT_ORDER));
                }
            }

            if !seen.insert(contributor.mailbox.clone()) {
                violations.push(Violation::new(CODE, NAME, position, REPEATED_ADDR_COMMENT));
            }
        }

        violations
    }
}

/// A prefixed comment whose remainder parsed as an RFC 5322 mailbox.
struct AddressComment<'a> {
    comment: &'a Comment,
    /// Normalized `name <addr>` form, used to detect repeats.
    mailbox: String,
}

struct ScanOutcome<'a> {
    /// How many comments carried the prefix, well-formed or not.
    matched: usize,
    /// Position of the last prefixed comment.
    last_matched: Option<apkbuild_lint_core::Position>,
    /// The well-formed subset, in source order.
    parsed: Vec<AddressComment<'a>>,
}

/// Scans top-level comments starting with `prefix` and validates the mail
/// address following it, recording a violation per malformed comment.
fn scan_address_comments<'a>(
    apkbuild: &'a Apkbuild,
    prefix: &str,
    violations: &mut Vec<Violation>,
) -> ScanOutcome<'a> {
    let mut outcome = ScanOutcome {
        matched: 0,
        last_matched: None,
        parsed: Vec::new(),
    };

    for comment in apkbuild.comments() {
        let Some(rest) = comment.text.strip_prefix(prefix) else {
            continue;
        };
        outcome.matched += 1;
        outcome.last_matched = Some(comment.position);

        if rest.trim_matches(' ').is_empty() {
            violations.push(Violation::new(CODE, NAME, comment.position, MISSING_ADDRESS));
            continue;
        }

        let Some(address) = rest.strip_prefix(' ') else {
            violations.push(Violation::new(
                CODE,
                NAME,
                comment.position,
                NO_ADDRESS_SEPARATOR,
            ));
            continue;
        };

        match parse_mailbox(address) {
            Some(mailbox) => outcome.parsed.push(AddressComment { comment, mailbox }),
            None => {
                violations.push(Violation::new(CODE, NAME, comment.position, INVALID_ADDRESS));
            }
        }
    }

    outcome
}

/// Parses an RFC 5322 mailbox, either `addr-spec` or `name <addr-spec>`,
/// returning its normalized form.
fn parse_mailbox(input: &str) -> Option<String> {
    let input = input.trim();

    if let Some(open) = input.find('<') {
        let addr = input[open + 1..].strip_suffix('>')?.trim();
        if !EmailAddress::is_valid(addr) {
            return None;
        }
        let name = input[..open].trim();
        if name.is_empty() {
            return Some(format!("<{addr}>"));
        }
        return Some(format!("{name} <{addr}>"));
    }

    if EmailAddress::is_valid(input) {
        Some(format!("<{input}>"))
    } else {
        None
    }
}
