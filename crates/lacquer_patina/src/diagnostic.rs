//! Diagnostic types for lacquer_patina linter.
//!
//! Uses `CompactString` for efficient small string storage.

use lacquer_carton::CompactString;
use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::{Deserialize, Serialize};

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A text edit for auto-fixing a diagnostic.
///
/// Represents a single text replacement in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset
    pub start: u32,
    /// End byte offset
    pub end: u32,
    /// Replacement text
    #[serde(rename = "newText")]
    pub new_text: String,
}

impl TextEdit {
    /// Create a new text edit
    #[inline]
    pub fn new(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    /// Number of source bytes this edit replaces
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    fn overlaps(&self, other: &TextEdit) -> bool {
        (self.start < other.end && other.start < self.end) || self.start == other.start
    }

    #[inline]
    fn fits(&self, source: &str) -> bool {
        let (start, end) = (self.start as usize, self.end as usize);
        start <= end
            && end <= source.len()
            && source.is_char_boundary(start)
            && source.is_char_boundary(end)
    }
}

/// A fix for a diagnostic, containing one or more text edits.
#[derive(Debug, Clone, Serialize)]
pub struct Fix {
    /// Description of the fix
    pub message: String,
    /// Text edits to apply
    pub edits: Vec<TextEdit>,
}

impl Fix {
    /// Create a new fix with a single edit
    #[inline]
    pub fn new(message: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            message: message.into(),
            edits: vec![edit],
        }
    }

    /// Apply the fix to a source string
    #[inline]
    pub fn apply(&self, source: &str) -> String {
        let mut result = source.to_string();
        // Apply edits in reverse order to preserve offsets
        let mut edits = self.edits.clone();
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        for edit in edits {
            if edit.fits(&result) {
                result.replace_range(edit.start as usize..edit.end as usize, &edit.new_text);
            }
        }
        result
    }
}

/// A lint diagnostic with rich information for display.
///
/// Uses `CompactString` for message storage - strings up to 24 bytes
/// are stored inline without heap allocation.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    /// Severity level
    pub severity: Severity,
    /// Primary message (CompactString for efficiency)
    pub message: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// Help message for fixing (optional, CompactString)
    pub help: Option<CompactString>,
    /// Auto-fix for this diagnostic (optional)
    pub fix: Option<Fix>,
}

impl LintDiagnostic {
    /// Create a new diagnostic with the given severity
    #[inline]
    pub fn new(
        rule_name: &'static str,
        severity: Severity,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            rule_name,
            severity,
            message: message.into(),
            start,
            end,
            help: None,
            fix: None,
        }
    }

    /// Create a new error diagnostic
    #[inline]
    pub fn error(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(rule_name, Severity::Error, message, start, end)
    }

    /// Create a new warning diagnostic
    #[inline]
    pub fn warn(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(rule_name, Severity::Warning, message, start, end)
    }

    /// Add a help message
    #[inline]
    pub fn with_help(mut self, help: impl Into<CompactString>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a fix for this diagnostic
    #[inline]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Check if this diagnostic has a fix
    #[inline]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    /// Convert to OxcDiagnostic for rich rendering
    #[inline]
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(self.message.to_string()),
            Severity::Warning => OxcDiagnostic::warn(self.message.to_string()),
        };

        // Add primary label
        diag = diag.with_label(Span::new(self.start, self.end));

        // Add help if present
        if let Some(help) = self.help {
            diag = diag.with_help(help.to_string());
        }

        diag
    }
}

/// Result of applying every available fix to a source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// Source with all accepted edits applied
    pub output: String,
    /// Number of fixes applied
    pub applied: usize,
    /// Number of fixes dropped because they overlapped or were out of range
    pub skipped: usize,
}

/// Apply the fixes of all `diagnostics` to `source`.
///
/// Fixes are accepted in source order. A fix is dropped whole when any of its
/// edits overlaps an edit that was already accepted, or does not land on
/// character boundaries inside `source`.
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> FixOutcome {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|fix| fix.edits.iter().map(|e| e.start).min().unwrap_or(u32::MAX));

    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut applied = 0;
    let mut skipped = 0;

    for fix in fixes {
        let usable = !fix.edits.is_empty()
            && fix.edits.iter().all(|edit| {
                edit.fits(source) && accepted.iter().all(|other| !edit.overlaps(other))
            });
        if usable {
            accepted.extend(fix.edits.iter());
            applied += 1;
        } else {
            skipped += 1;
        }
    }

    accepted.sort_by(|a, b| b.start.cmp(&a.start));
    let mut output = source.to_string();
    for edit in accepted {
        output.replace_range(edit.start as usize..edit.end as usize, &edit.new_text);
    }

    FixOutcome {
        output,
        applied,
        skipped,
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub fixable_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        if diagnostic.has_fix() {
            self.fixable_count += 1;
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
