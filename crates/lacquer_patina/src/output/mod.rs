//! Output formatters for lint diagnostics.

mod text;

pub use text::*;

use crate::diagnostic::Severity;
use crate::linter::LintResult;
use lacquer_carton::{FxHashMap, LineIndex};
use serde::Serialize;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich terminal output with colors and code snippets
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value, falling back to text
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Format lint results according to the specified format
///
/// `sources` pairs each filename with the template source it was linted from.
pub fn format_results(
    results: &[LintResult],
    sources: &[(String, String)],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_text(results, sources),
        OutputFormat::Json => format_json(results, sources),
    }
}

/// JSON output structure for a single file
#[derive(Debug, Serialize)]
pub struct JsonFileResult {
    pub file: String,
    pub messages: Vec<JsonMessage>,
    #[serde(rename = "errorCount")]
    pub error_count: usize,
    #[serde(rename = "warningCount")]
    pub warning_count: usize,
}

/// JSON output structure for a single message
#[derive(Debug, Serialize)]
pub struct JsonMessage {
    #[serde(rename = "ruleId")]
    pub rule_id: &'static str,
    pub severity: u8,
    pub message: String,
    pub line: u32,
    pub column: u32,
    #[serde(rename = "endLine")]
    pub end_line: u32,
    #[serde(rename = "endColumn")]
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<JsonFix>,
}

/// ESLint-style fix: replace `range` with `text`
#[derive(Debug, Serialize)]
pub struct JsonFix {
    pub range: [u32; 2],
    pub text: String,
}

/// Format results as JSON
fn format_json(results: &[LintResult], sources: &[(String, String)]) -> String {
    let source_map: FxHashMap<&str, &str> = sources
        .iter()
        .map(|(f, s)| (f.as_str(), s.as_str()))
        .collect();

    let json_results: Vec<JsonFileResult> = results
        .iter()
        .map(|r| {
            let source = source_map.get(r.filename.as_str()).copied().unwrap_or("");
            let index = LineIndex::new(source);

            JsonFileResult {
                file: r.filename.clone(),
                messages: r
                    .diagnostics
                    .iter()
                    .map(|d| {
                        let (line, column) = index.line_col(d.start);
                        let (end_line, end_column) = index.line_col(d.end);
                        JsonMessage {
                            rule_id: d.rule_name,
                            severity: match d.severity {
                                Severity::Error => 2,
                                Severity::Warning => 1,
                            },
                            message: d.message.to_string(),
                            line,
                            column,
                            end_line,
                            end_column,
                            fix: d
                                .fix
                                .as_ref()
                                .and_then(|fix| fix.edits.first())
                                .map(|edit| JsonFix {
                                    range: [edit.start, edit.end],
                                    text: edit.new_text.clone(),
                                }),
                        }
                    })
                    .collect(),
                error_count: r.error_count,
                warning_count: r.warning_count,
            }
        })
        .collect();

    serde_json::to_string_pretty(&json_results).unwrap_or_else(|_| "[]".to_string())
}
