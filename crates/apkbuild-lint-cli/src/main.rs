//! apkbuild-lint CLI tool.
//!
//! Usage:
//! ```bash
//! apkbuild-lint [PATH]...
//! ```
//!
//! With no arguments the `APKBUILD` in the current directory is linted.
//! Directory arguments are resolved by appending `APKBUILD`. Exit status
//! is 0 when no script had a violation, 1 when at least one did, and 2 on
//! a fatal I/O or parse failure.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use apkbuild_lint_core::{Apkbuild, Linter, Reporter};
use apkbuild_lint_rules::default_rules;

/// Fixed file name of an Alpine Linux build script.
const APKBUILD_FILENAME: &str = "APKBUILD";

/// Style linter for Alpine Linux APKBUILDs
#[derive(Parser)]
#[command(name = "apkbuild-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// APKBUILD files or directories containing one (default: ./APKBUILD)
    paths: Vec<PathBuf>,
}

/// Aggregate outcome of a run, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RunStatus {
    Clean,
    Violations,
    Fatal,
}

impl RunStatus {
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::Violations => ExitCode::from(1),
            Self::Fatal => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli.paths, io::stderr().lock()) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("{err:#}");
            RunStatus::Fatal.exit_code()
        }
    }
}

/// Lints every resolved target, writing diagnostics to `out`.
///
/// A missing named target aborts the whole run; a read or parse failure
/// aborts only that file and lets the remaining targets proceed.
fn run<W: Write>(paths: &[PathBuf], out: W) -> Result<RunStatus> {
    let targets = resolve_targets(paths)?;

    let linter = Linter::new(default_rules());
    let mut reporter = Reporter::new(out);
    let mut status = RunStatus::Clean;

    for target in &targets {
        debug!(target = %target.display(), "linting");
        match lint_file(&linter, target, &mut reporter) {
            Ok(true) => status = status.max(RunStatus::Violations),
            Ok(false) => {}
            Err(err) => {
                eprintln!("{err:#}");
                status = RunStatus::Fatal;
            }
        }
    }

    Ok(status)
}

/// Maps path arguments to APKBUILD files. Directories resolve to the
/// APKBUILD inside them; no arguments means the one in the working
/// directory.
fn resolve_targets(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        let default = PathBuf::from(APKBUILD_FILENAME);
        if !default.exists() {
            bail!("\"{APKBUILD_FILENAME}\" doesn't exist in the current directory");
        }
        return Ok(vec![default]);
    }

    let mut targets = Vec::with_capacity(paths.len());
    for path in paths {
        let target = if path.is_dir() {
            path.join(APKBUILD_FILENAME)
        } else {
            path.clone()
        };
        if !target.exists() {
            bail!("\"{}\" doesn't exist", target.display());
        }
        targets.push(target);
    }
    Ok(targets)
}

/// Lints one file, returning whether it had any violation.
fn lint_file<W: Write>(
    linter: &Linter,
    path: &Path,
    reporter: &mut Reporter<W>,
) -> Result<bool> {
    let name = path.display().to_string();
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {name}"))?;
    let apkbuild = Apkbuild::parse(name.clone(), source)
        .with_context(|| format!("failed to parse {name}"))?;

    let result = linter.check(&apkbuild);
    reporter.report(&name, &result.violations)?;
    Ok(result.has_violations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const CLEAN: &str = "\
# Maintainer: Jane Doe <jane@example.org>
pkgname=foo
pkgver=1.0
pkgrel=0
pkgdesc=\"Test package\"
url=https://example.org
arch=all
license=MIT
build() {
\ttrue
}
sha512sums=\"abc\"
";

    fn write_apkbuild(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(APKBUILD_FILENAME);
        let mut file = std::fs::File::create(&path).expect("create APKBUILD");
        file.write_all(content.as_bytes()).expect("write APKBUILD");
        path
    }

    #[test]
    fn directory_argument_resolves_to_apkbuild() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_apkbuild(dir.path(), CLEAN);

        let targets =
            resolve_targets(&[dir.path().to_path_buf()]).expect("resolved");
        assert_eq!(targets, [dir.path().join(APKBUILD_FILENAME)]);
    }

    #[test]
    fn missing_target_aborts_resolution() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert!(resolve_targets(&[missing]).is_err());
    }

    #[test]
    fn clean_script_exits_clean() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_apkbuild(dir.path(), CLEAN);

        let mut out = Vec::new();
        let status = run(&[path], &mut out).expect("run");
        assert_eq!(status, RunStatus::Clean);
        assert!(out.is_empty(), "unexpected output: {}", String::from_utf8_lossy(&out));
    }

    #[test]
    fn violations_are_reported_and_exit_nonzero() {
        let source = format!("{CLEAN}_unused=1\n");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_apkbuild(dir.path(), &source);

        let mut out = Vec::new();
        let status = run(&[path.clone()], &mut out).expect("run");
        assert_eq!(status, RunStatus::Violations);

        let text = String::from_utf8(out).expect("utf8");
        assert!(
            text.contains(&format!("{}:13:1: Variable '_unused' is unused", path.display())),
            "got: {text}"
        );
    }

    #[test]
    fn broken_script_is_fatal_for_that_file_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_apkbuild(dir.path(), "f() {\n");

        let mut out = Vec::new();
        let status = run(&[path], &mut out).expect("run");
        assert_eq!(status, RunStatus::Fatal);
        assert!(out.is_empty());
    }
}
