//! AST visitor for lint rule execution.
//!
//! Walks the template in document order and hands every node to each active
//! rule. Rule hooks never control traversal: after the hooks for an element
//! run, the visitor always descends into its children.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::Rule;
use lacquer_relief::ast::{ElementNode, RootNode, TemplateNode};

/// A rule selected for this run together with its configured severity
#[derive(Clone, Copy)]
pub struct ActiveRule<'r> {
    pub rule: &'r dyn Rule,
    /// Overrides the severity the rule reports with
    pub severity: Option<Severity>,
}

impl<'r> ActiveRule<'r> {
    #[inline]
    pub fn new(rule: &'r dyn Rule) -> Self {
        Self {
            rule,
            severity: None,
        }
    }
}

/// Visit the AST and run all rules
pub struct LintVisitor<'a, 'ctx, 'rules> {
    ctx: &'ctx mut LintContext<'a>,
    rules: &'rules [ActiveRule<'rules>],
}

impl<'a, 'ctx, 'rules> LintVisitor<'a, 'ctx, 'rules> {
    /// Create a new visitor
    #[inline]
    pub fn new(ctx: &'ctx mut LintContext<'a>, rules: &'rules [ActiveRule<'rules>]) -> Self {
        Self { ctx, rules }
    }

    /// Visit the root node and traverse the AST
    pub fn visit_root(&mut self, root: &RootNode) {
        // Run template-level checks
        for active in self.rules {
            self.ctx.enter_rule(active.rule.meta().name, active.severity);
            active.rule.run_on_template(self.ctx, root);
        }

        for child in &root.children {
            self.visit_child(child);
        }
    }

    #[inline]
    fn visit_child(&mut self, node: &TemplateNode) {
        match node {
            TemplateNode::Element(el) => self.visit_element(el),
            TemplateNode::Text(_) | TemplateNode::BoundText(_) => {}
        }
    }

    fn visit_element(&mut self, el: &ElementNode) {
        self.ctx.push_element(el.tag.as_str());

        for active in self.rules {
            self.ctx.enter_rule(active.rule.meta().name, active.severity);
            active.rule.enter_element(self.ctx, el);
        }

        for input in &el.inputs {
            for active in self.rules {
                self.ctx.enter_rule(active.rule.meta().name, active.severity);
                active.rule.check_bound_attribute(self.ctx, el, input);
            }
        }

        for output in &el.outputs {
            for active in self.rules {
                self.ctx.enter_rule(active.rule.meta().name, active.severity);
                active.rule.check_bound_event(self.ctx, el, output);
            }
        }

        for child in &el.children {
            self.visit_child(child);
        }

        self.ctx.pop_element();
    }
}
