//! The rule trait every check pass implements.

use crate::apkbuild::Apkbuild;
use crate::types::Violation;

/// A single lint pass over one APKBUILD.
///
/// Passes are pure functions of the document: they return their findings
/// instead of mutating shared state, so the engine can run them in a fixed
/// order and concatenate the output deterministically.
pub trait Rule: Send + Sync {
    /// Stable machine-readable code, e.g. `"APK001"`.
    fn code(&self) -> &'static str;

    /// Short kebab-case rule name, e.g. `"comment-prefix"`.
    fn name(&self) -> &'static str;

    /// One-line human description of what the rule enforces.
    fn description(&self) -> &'static str;

    /// Runs the pass and returns every violation it found, in source order.
    fn check(&self, apkbuild: &Apkbuild) -> Vec<Violation>;
}

/// A boxed rule, as stored by the engine.
pub type RuleBox = Box<dyn Rule>;
