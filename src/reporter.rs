//! Human-readable output: cargo-style issue reports and run summaries.
//!
//! Kept apart from the extraction code so the library prints nothing.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::catalog::Catalog;
use crate::issues::{Issue, Report, ReportLocation, Severity};

pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues to stderr.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = sorted
        .iter()
        .filter_map(|issue| match issue.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map_or(1, |n| n.to_string().len());

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    let errors = sorted
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let warnings = sorted.len() - errors;
    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        sorted.len(),
        if sorted.len() == 1 { "problem" } else { "problems" },
        errors,
        if errors == 1 { "error" } else { "errors" }.red(),
        warnings,
        if warnings == 1 { "warning" } else { "warnings" }.yellow()
    );
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path,
                ctx.line,
                ctx.col
            );
            if let Some(source_line) = &ctx.source_line {
                let caret = match severity {
                    Severity::Error => "^".red(),
                    Severity::Warning => "^".yellow(),
                };
                let _ = writeln!(writer, "{:>width$} {}", "", "|".blue());
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {}",
                    ctx.line.to_string().blue(),
                    "|".blue(),
                    source_line
                );
                // display width, so wide characters before the column line up
                let prefix: String = source_line.chars().take(ctx.col.saturating_sub(1)).collect();
                let padding = UnicodeWidthStr::width(prefix.as_str());
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {:>padding$}{}",
                    "",
                    "|".blue(),
                    "",
                    caret
                );
            }
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details
        );
    }
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint
        );
    }
    let _ = writeln!(writer);
}

/// Per-file message counts followed by a total line.
pub fn print_summary_to<'a, W, I>(catalogs: I, writer: &mut W)
where
    W: Write,
    I: IntoIterator<Item = (&'a String, &'a Catalog)>,
{
    let mut files = 0;
    let mut messages = 0;
    for (path, catalog) in catalogs {
        files += 1;
        messages += catalog.len();
        let _ = writeln!(
            writer,
            "{:>5} {}  {}",
            catalog.len(),
            if catalog.len() == 1 { "message " } else { "messages" },
            path
        );
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} {}",
            messages,
            if messages == 1 { "message" } else { "messages" },
            files,
            if files == 1 { "template" } else { "templates" }
        )
        .green()
    );
}

/// Print a warning about paths that could not be visited.
pub fn print_skipped_warning(count: usize, verbose: bool) {
    if count > 0 && !verbose {
        eprintln!(
            "{} {} path(s) could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractedMessage;
    use crate::issues::{PluralMismatchIssue, ReadErrorIssue, SourceContext};

    fn render(issues: &[Issue]) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        report_to(issues, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_nothing_for_no_issues() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_report_source_issue_with_caret() {
        let source = "<p>\n  <b>{{ _('x') }}</b>\n";
        let issue: Issue = PluralMismatchIssue {
            context: SourceContext::new("views/a.njk", source, 2, 6),
            key: "x".into(),
            existing: "xs".into(),
            found: "xx".into(),
        }
        .into();

        let out = render(&[issue]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "error: \"x\"  plural-mismatch");
        assert_eq!(lines[1], "  --> views/a.njk:2:6");
        assert_eq!(lines[3], "2 |   <b>{{ _('x') }}</b>");
        assert_eq!(lines[4], "  |      ^");
        assert!(lines[5].contains("note:"));
        assert!(out.contains("1 problem (1 error, 0 warnings)"));
    }

    #[test]
    fn test_report_caret_uses_display_width() {
        let source = "标题 {{ x";
        let issue: Issue = crate::issues::SyntaxErrorIssue {
            context: SourceContext::new("a.njk", source, 1, 4),
            message: "unexpected end".into(),
        }
        .into();

        let out = render(&[issue]);
        // two wide chars and a space before the column
        assert!(out.lines().any(|l| l == "  |      ^"));
    }

    #[test]
    fn test_report_file_issue() {
        let issue: Issue = ReadErrorIssue {
            file_path: "gone.njk".into(),
            error: "No such file".into(),
        }
        .into();

        let out = render(&[issue]);
        assert!(out.contains("  --> gone.njk\n"));
        assert!(!out.contains(" | "));
    }

    #[test]
    fn test_summary_counts() {
        colored::control::set_override(false);
        let mut catalog = Catalog::new();
        for msgid in ["a", "b"] {
            catalog
                .merge(ExtractedMessage {
                    msgid: msgid.into(),
                    msgid_plural: None,
                    msgctxt: None,
                    line: 1,
                })
                .unwrap();
        }
        let path = "views/index.njk".to_string();

        let mut out = Vec::new();
        print_summary_to([(&path, &catalog)], &mut out);
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("    2 messages  views/index.njk"));
        assert!(out.contains("Extracted 2 messages from 1 template"));
    }
}
