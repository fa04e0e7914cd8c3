//! Lint context for rule execution.
//!
//! The context is the per-file diagnostic sink. One traversal owns it, so
//! rules append to it without any locking.

use crate::diagnostic::{LintDiagnostic, Severity};
use lacquer_carton::CompactString;

/// Lint context provides utilities for rules during execution.
pub struct LintContext<'a> {
    /// Source code being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    /// Collected diagnostics (pre-allocated capacity)
    diagnostics: Vec<LintDiagnostic>,
    /// Current rule name (set by visitor before calling rule methods)
    pub current_rule: &'static str,
    /// Configured severity for the current rule, overriding what it reports
    severity_override: Option<Severity>,
    /// Tags of the enclosing elements, innermost last
    element_stack: Vec<CompactString>,
    /// Cached error count for fast access
    error_count: usize,
    /// Cached warning count for fast access
    warning_count: usize,
}

impl<'a> LintContext<'a> {
    /// Initial capacity for diagnostics vector
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;
    /// Initial capacity for element stack
    const INITIAL_STACK_CAPACITY: usize = 32;

    /// Create a new lint context
    #[inline]
    pub fn new(source: &'a str, filename: &'a str) -> Self {
        Self {
            source,
            filename,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            current_rule: "",
            severity_override: None,
            element_stack: Vec::with_capacity(Self::INITIAL_STACK_CAPACITY),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Switch to a rule before dispatching one of its hooks
    #[inline]
    pub fn enter_rule(&mut self, name: &'static str, severity_override: Option<Severity>) {
        self.current_rule = name;
        self.severity_override = severity_override;
    }

    /// Report a lint diagnostic
    #[inline]
    pub fn report(&mut self, mut diagnostic: LintDiagnostic) {
        if let Some(severity) = self.severity_override {
            diagnostic.severity = severity;
        }
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Get collected diagnostics
    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    /// Get reference to collected diagnostics
    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    /// Push an element onto the context stack
    #[inline]
    pub fn push_element(&mut self, tag: impl Into<CompactString>) {
        self.element_stack.push(tag.into());
    }

    /// Pop an element from the context stack
    #[inline]
    pub fn pop_element(&mut self) -> Option<CompactString> {
        self.element_stack.pop()
    }

    /// Tag of the element currently being visited
    #[inline]
    pub fn current_element(&self) -> Option<&str> {
        self.element_stack.last().map(|tag| tag.as_str())
    }

    /// Number of enclosing elements
    #[inline]
    pub fn element_depth(&self) -> usize {
        self.element_stack.len()
    }

    /// Get the error count (cached, O(1))
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the warning count (cached, O(1))
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}
