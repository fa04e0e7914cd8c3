//! Rule trait and registry for lint rules.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use lacquer_relief::ast::{BoundAttributeNode, BoundEventNode, ElementNode, RootNode};

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Catches templates that do not do what their author meant
    Functionality,
    /// Keeps templates easy to change
    Maintainability,
    /// Formatting and naming conventions
    Style,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "angular/banana-in-box")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Why the rule exists
    pub rationale: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Default severity
    pub default_severity: Severity,
}

/// Rule trait for implementing lint rules
///
/// Rules implement visitor-like methods that are called during AST traversal.
/// Every method defaults to a no-op, so a rule only overrides the node kinds
/// it cares about and the visitor keeps walking the rest of the tree.
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Run on template root node (called once per template)
    #[allow(unused_variables)]
    fn run_on_template(&self, ctx: &mut LintContext<'_>, root: &RootNode) {}

    /// Called when entering an element node
    #[allow(unused_variables)]
    fn enter_element(&self, ctx: &mut LintContext<'_>, element: &ElementNode) {}

    /// Called for each property binding on an element
    #[allow(unused_variables)]
    fn check_bound_attribute(
        &self,
        ctx: &mut LintContext<'_>,
        element: &ElementNode,
        input: &BoundAttributeNode,
    ) {
    }

    /// Called exactly once for each event binding on an element
    #[allow(unused_variables)]
    fn check_bound_event(
        &self,
        ctx: &mut LintContext<'_>,
        element: &ElementNode,
        event: &BoundEventNode,
    ) {
    }
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Look up a registered rule by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.meta().name == name)
            .map(|rule| &**rule)
    }

    /// Whether a rule with this name is registered
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all registered rules, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.meta().name)
    }

    /// Create registry with all built-in rules enabled
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();

        // ============================================
        // Angular Functionality Rules (Error)
        // ============================================

        registry.register(Box::new(crate::rules::angular::BananaInBox));

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}
