//! Diagnostic report formatting and printing.
//!
//! Colorized with `colored`, with a simple success/failure-mark convention
//! (`SUCCESS_MARK` / `FAILURE_MARK`) for the one-line summary.

use std::io::{self, Write};

use colored::Colorize;

use crate::diagnostics::{Diagnostic, Describe, Severity};
use crate::runner::RunOutcome;

pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print every diagnostic plus the summary line to stdout.
pub fn report(outcome: &RunOutcome, verbose: bool) {
    report_to(outcome, verbose, &mut io::stdout().lock());
}

/// Print to a custom writer - the CLI's entry point delegates here so tests
/// can capture output without touching stdout.
pub fn report_to<W: Write>(outcome: &RunOutcome, verbose: bool, writer: &mut W) {
    let collector = &outcome.collector;
    let mut diagnostics: Vec<&Diagnostic> = collector.diagnostics().iter().collect();
    diagnostics.sort_by_key(|d| collector.severity_for(*d));
    diagnostics.reverse();

    for diagnostic in &diagnostics {
        let severity = collector.severity_for(*diagnostic);
        let location = diagnostic.location();
        let _ = writeln!(
            writer,
            "{}: {}: {}",
            severity_tag(severity),
            location.path,
            location.message
        );
    }

    print_summary(outcome, verbose, writer);
}

fn severity_tag(severity: Severity) -> colored::ColoredString {
    let text = severity.to_string();
    match severity {
        Severity::Fatal => text.bright_red().bold(),
        Severity::Error => text.red().bold(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.blue(),
        Severity::Ignore => text.dimmed(),
    }
}

fn print_summary<W: Write>(outcome: &RunOutcome, verbose: bool, writer: &mut W) {
    let collector = &outcome.collector;
    let counts = collector.counts();
    let blocking = collector.has_blocking();

    if verbose {
        for (record_type, count) in &outcome.record_type_counts {
            let _ = writeln!(writer, "  {}: {} document(s)", record_type, count);
        }
        let pass = &outcome.pass_summary;
        let _ = writeln!(
            writer,
            "  passes visited: include={} profiles={} extends={} dictionary={}",
            pass.include, pass.profiles, pass.extends, pass.dictionary
        );
        for severity in [
            Severity::Fatal,
            Severity::Error,
            Severity::Warning,
            Severity::Info,
        ] {
            let count = counts.get(&severity).copied().unwrap_or(0);
            if count > 0 {
                let _ = writeln!(writer, "  {}: {}", severity, count);
            }
        }
    }

    if blocking {
        let total: usize = counts.values().sum();
        let _ = writeln!(
            writer,
            "{} {} diagnostic(s), schema failed to validate cleanly",
            FAILURE_MARK.red(),
            total
        );
    } else if counts.is_empty() {
        let _ = writeln!(writer, "{} no diagnostics", SUCCESS_MARK.green());
    } else {
        let total: usize = counts.values().sum();
        let _ = writeln!(
            writer,
            "{} {} diagnostic(s), none blocking",
            SUCCESS_MARK.green(),
            total
        );
    }
}
