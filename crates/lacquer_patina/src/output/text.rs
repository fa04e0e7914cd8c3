//! Terminal output.
//!
//! Each diagnostic gets a `file:line:col` header, the code snippet rendered
//! by oxc_diagnostics, and the fix description when one is available.

use crate::diagnostic::LintSummary;
use crate::linter::LintResult;
use lacquer_carton::{FxHashMap, LineIndex};
use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use std::fmt::Write;
use std::sync::Arc;

/// Format lint results as rich terminal output
pub fn format_text(results: &[LintResult], sources: &[(String, String)]) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());
    let source_map: FxHashMap<&str, &str> = sources
        .iter()
        .map(|(f, s)| (f.as_str(), s.as_str()))
        .collect();

    let mut output = String::new();
    for result in results.iter().filter(|r| r.has_diagnostics()) {
        let source = source_map
            .get(result.filename.as_str())
            .copied()
            .unwrap_or("");
        let index = LineIndex::new(source);
        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));

        for diagnostic in &result.diagnostics {
            let (line, column) = index.line_col(diagnostic.start);
            let _ = writeln!(
                output,
                "{}:{}:{}  {}  {}",
                result.filename,
                line,
                column,
                diagnostic.severity.as_str(),
                diagnostic.rule_name
            );

            let report = diagnostic
                .clone()
                .into_oxc_diagnostic()
                .with_source_code(Arc::clone(&named_source));
            let mut snippet = String::new();
            if handler.render_report(&mut snippet, report.as_ref()).is_ok() {
                output.push_str(&snippet);
            }

            if let Some(fix) = &diagnostic.fix {
                let _ = writeln!(output, "  fix: {}", fix.message);
            }
            output.push('\n');
        }
    }

    output
}

#[inline]
fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// One-line run summary, mentioning how many problems `--fix` can handle
pub fn format_summary(summary: &LintSummary) -> String {
    let files = plural(summary.file_count, "file");
    if summary.error_count == 0 && summary.warning_count == 0 {
        return format!("No problems found in {}", files);
    }

    let mut line = format!(
        "{}, {} in {}",
        plural(summary.error_count, "error"),
        plural(summary.warning_count, "warning"),
        files
    );
    if summary.fixable_count > 0 {
        let _ = write!(line, " ({} fixable with --fix)", summary.fixable_count);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Fix, LintDiagnostic, TextEdit};

    fn summary(errors: usize, warnings: usize, fixable: usize, files: usize) -> LintSummary {
        LintSummary {
            error_count: errors,
            warning_count: warnings,
            fixable_count: fixable,
            file_count: files,
        }
    }

    #[test]
    fn test_header_and_fix_hint() {
        let source = "<form>\n  <input ([ngModel])=\"name\">\n</form>";
        let result = LintResult {
            filename: "form.html".to_string(),
            diagnostics: vec![LintDiagnostic::error("angular/banana-in-box", "bad box", 16, 27)
                .with_fix(Fix::new(
                    "Replace with `[(ngModel)]`",
                    TextEdit::new(16, 27, "[(ngModel)]"),
                ))],
            error_count: 1,
            warning_count: 0,
        };

        let output = format_text(&[result], &[("form.html".to_string(), source.to_string())]);
        assert!(output.starts_with("form.html:2:10  error  angular/banana-in-box\n"));
        assert!(output.contains("  fix: Replace with `[(ngModel)]`"));
    }

    #[test]
    fn test_clean_results_print_nothing() {
        let result = LintResult {
            filename: "a.html".to_string(),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        };
        assert_eq!(format_text(&[result], &[]), "");
    }

    #[test]
    fn test_summary_clean() {
        assert_eq!(format_summary(&summary(0, 0, 0, 3)), "No problems found in 3 files");
        assert_eq!(format_summary(&summary(0, 0, 0, 1)), "No problems found in 1 file");
    }

    #[test]
    fn test_summary_counts() {
        assert_eq!(
            format_summary(&summary(1, 0, 0, 1)),
            "1 error, 0 warnings in 1 file"
        );
        assert_eq!(
            format_summary(&summary(2, 1, 2, 4)),
            "2 errors, 1 warning in 4 files (2 fixable with --fix)"
        );
    }
}
