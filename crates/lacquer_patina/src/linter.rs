//! Main linter entry point.
//!
//! Lints parsed Angular templates with the registered rules.

use crate::config::{LintConfig, RuleLevel};
use crate::context::LintContext;
use crate::diagnostic::{apply_fixes, FixOutcome, LintDiagnostic, LintSummary};
use crate::error::{LintError, LintResultOf};
use crate::rule::{Rule, RuleRegistry};
use crate::visitor::{ActiveRule, LintVisitor};
use lacquer_carton::FxHashMap;
use lacquer_relief::ast::RootNode;

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics carrying an auto-fix
    #[inline]
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.has_fix()).count()
    }

    /// Apply every non-overlapping fix to the linted source
    #[inline]
    pub fn apply_fixes(&self, source: &str) -> FixOutcome {
        apply_fixes(source, &self.diagnostics)
    }
}

/// Main linter struct.
pub struct Linter {
    registry: RuleRegistry,
    /// Configured level per rule; rules without an entry keep their default
    levels: FxHashMap<&'static str, RuleLevel>,
}

impl Linter {
    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            levels: FxHashMap::default(),
        }
    }

    /// Set the level of a registered rule
    pub fn with_rule_level(mut self, rule_name: &str, level: RuleLevel) -> LintResultOf<Self> {
        let name = self
            .registry
            .get(rule_name)
            .map(|rule| rule.meta().name)
            .ok_or_else(|| LintError::UnknownRule(rule_name.to_string()))?;
        self.levels.insert(name, level);
        Ok(self)
    }

    /// Apply the rule levels from a config file
    ///
    /// Fails with [`LintError::UnknownRule`] if the config names a rule that is
    /// not registered.
    pub fn with_config(self, config: &LintConfig) -> LintResultOf<Self> {
        config
            .rules
            .iter()
            .try_fold(self, |linter, (name, level)| {
                linter.with_rule_level(name, *level)
            })
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.registry.contains(rule_name) && self.levels.get(rule_name) != Some(&RuleLevel::Off)
    }

    /// Rules that take part in a run, with their configured severity
    fn active_rules(&self) -> Vec<ActiveRule<'_>> {
        self.registry
            .rules()
            .iter()
            .filter_map(|rule| {
                let rule: &dyn Rule = &**rule;
                match self.levels.get(rule.meta().name) {
                    Some(level) => level
                        .severity()
                        .map(|severity| ActiveRule {
                            rule,
                            severity: Some(severity),
                        }),
                    None => Some(ActiveRule::new(rule)),
                }
            })
            .collect()
    }

    /// Lint a parsed Angular template
    pub fn lint_template(&self, root: &RootNode, filename: &str) -> LintResult {
        let rules = self.active_rules();
        tracing::debug!(
            "linting {} ({} bytes, {} active rule(s))",
            filename,
            root.source.len(),
            rules.len()
        );

        let mut ctx = LintContext::new(&root.source, filename);
        let mut visitor = LintVisitor::new(&mut ctx, &rules);
        visitor.visit_root(root);

        // Collect results (error/warning counts are cached)
        let error_count = ctx.error_count();
        let warning_count = ctx.warning_count();
        let diagnostics = ctx.into_diagnostics();

        tracing::debug!(
            "{}: {} error(s), {} warning(s)",
            filename,
            error_count,
            warning_count
        );

        LintResult {
            filename: filename.to_string(),
            diagnostics,
            error_count,
            warning_count,
        }
    }

    /// Lint multiple templates and aggregate results
    pub fn lint_files(&self, files: &[(String, RootNode)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, root) in files {
            let result = self.lint_template(root, filename);
            for diagnostic in &result.diagnostics {
                summary.add(diagnostic);
            }
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
