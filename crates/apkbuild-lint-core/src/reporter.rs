//! One-line-per-violation diagnostic output.

use std::io::{self, Write};

use crate::types::Violation;

/// Writes violations as `<script>:<line>:<col>: <message>` lines.
///
/// Script-wide violations with no position print as `<script>: <message>`.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Reports all violations for one script.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn report(&mut self, script_name: &str, violations: &[Violation]) -> io::Result<()> {
        for violation in violations {
            match violation.position {
                Some(position) => {
                    writeln!(self.out, "{script_name}:{position}: {}", violation.message)?;
                }
                None => writeln!(self.out, "{script_name}: {}", violation.message)?,
            }
        }
        Ok(())
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apkbuild_lint_syntax::Position;

    #[test]
    fn formats_positioned_and_global_lines() {
        let mut reporter = Reporter::new(Vec::new());
        reporter
            .report(
                "APKBUILD",
                &[
                    Violation::new("APK001", "comment-prefix", Position::new(3, 1), "bad comment"),
                    Violation::global("APK009", "required-metadata", "pkgver is missing"),
                ],
            )
            .expect("write to vec");

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert_eq!(
            text,
            "APKBUILD:3:1: bad comment\nAPKBUILD: pkgver is missing\n"
        );
    }

    #[test]
    fn no_violations_writes_nothing() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.report("APKBUILD", &[]).expect("write to vec");
        assert!(reporter.into_inner().is_empty());
    }
}
