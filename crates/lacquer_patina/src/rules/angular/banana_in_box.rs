//! angular/banana-in-box
//!
//! Ensure that the two-way data binding syntax is correct.
//!
//! Two-way binding puts the parens inside the brackets ("banana in a box").
//! Writing them the other way round makes Angular treat the attribute as an
//! event binding on an event literally named `[prop]`, which never fires.
//!
//! The check on the event name only looks for `[...]`, since the parser has
//! already stripped the outer parens. A node is reported only when its
//! attribute text also holds `([` followed by `])`, and the fix is computed
//! from that text.
//!
//! ## Examples
//!
//! ### Invalid
//! ```html
//! <input ([ngModel])="name">
//! ```
//!
//! ### Valid
//! ```html
//! <input [(ngModel)]="name">
//! ```

use crate::context::LintContext;
use crate::diagnostic::{Fix, LintDiagnostic, Severity, TextEdit};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use lacquer_relief::ast::{BoundEventNode, ElementNode};
use memchr::{memchr, memmem};

const INVALID_BOX_OPEN: &[u8] = b"([";
const INVALID_BOX_CLOSE: &[u8] = b"])";
const VALID_BOX_OPEN: &str = "[(";
const VALID_BOX_CLOSE: &str = ")]";

const MESSAGE: &str = "Invalid binding syntax. Use [(expr)] instead";

static META: RuleMeta = RuleMeta {
    name: "angular/banana-in-box",
    description: "Ensure that the two-way data binding syntax is correct.",
    rationale: "The parens \"()\" should have been inside the brackets \"[]\".",
    category: RuleCategory::Functionality,
    fixable: true,
    default_severity: Severity::Error,
};

/// Inverted `([expr])` delimiters found in a binding's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BananaMatch<'s> {
    /// Offset of the `(` in `([`, relative to the node text
    pub internal_start: usize,
    /// Offset of the `]` in `])`, relative to the node text
    pub internal_end: usize,
    /// Text between the delimiters with surrounding whitespace removed
    pub trimmed_expression: &'s str,
}

impl BananaMatch<'_> {
    /// Length of the `([expr])` region, delimiters included
    #[inline]
    pub fn span_len(&self) -> usize {
        self.internal_end - self.internal_start + VALID_BOX_CLOSE.len()
    }

    /// The region rewritten as `[(expr)]`
    pub fn replacement_text(&self) -> String {
        let mut text = String::with_capacity(self.trimmed_expression.len() + 4);
        text.push_str(VALID_BOX_OPEN);
        text.push_str(self.trimmed_expression);
        text.push_str(VALID_BOX_CLOSE);
        text
    }
}

/// Detect `([expr])` written where `[(expr)]` was meant
pub struct BananaInBox;

impl BananaInBox {
    /// Cheap pre-filter on the parsed event name: a `[` followed later by `]`.
    ///
    /// The parser strips the outer parens, so `([ngModel])` arrives here as
    /// the event name `[ngModel]`. Empty names never match.
    pub fn detect(name: &str) -> bool {
        let bytes = name.as_bytes();
        match memchr(b'[', bytes) {
            Some(open) => memchr(b']', &bytes[open + 1..]).is_some(),
            None => false,
        }
    }

    /// Find the first `([` and the last `])` in `text`.
    ///
    /// Returns `None` unless both are present and `])` starts after `([`
    /// ends, so callers never see a negative-length region.
    pub fn locate(text: &str) -> Option<BananaMatch<'_>> {
        let bytes = text.as_bytes();
        let internal_start = memmem::find(bytes, INVALID_BOX_OPEN)?;
        let internal_end = memmem::rfind(bytes, INVALID_BOX_CLOSE)?;
        let inner_start = internal_start + INVALID_BOX_OPEN.len();
        if internal_end < inner_start {
            return None;
        }

        // Both delimiters are ASCII, so these are char boundaries
        let trimmed_expression = text[inner_start..internal_end].trim();
        Some(BananaMatch {
            internal_start,
            internal_end,
            trimmed_expression,
        })
    }

    /// Absolute `[start, end)` of the `([expr])` region in the template.
    ///
    /// `None` when the offsets overflow or the template bytes at that range
    /// differ from the region read out of the node text.
    fn absolute_range(
        source: &str,
        event: &BoundEventNode,
        key: &str,
        found: &BananaMatch<'_>,
    ) -> Option<(u32, u32)> {
        let region = key.get(found.internal_start..found.internal_start + found.span_len())?;
        let start = event
            .source_span
            .start
            .offset
            .checked_add(u32::try_from(found.internal_start).ok()?)?;
        let end = start.checked_add(u32::try_from(found.span_len()).ok()?)?;
        (source.get(start as usize..end as usize)? == region).then_some((start, end))
    }

    /// Report `found` against `event` with a fix that swaps the delimiters.
    fn emit(
        ctx: &mut LintContext<'_>,
        event: &BoundEventNode,
        key: &str,
        found: &BananaMatch<'_>,
    ) {
        let Some((start, end)) = Self::absolute_range(ctx.source, event, key, found) else {
            tracing::warn!(
                "{}: span of `{}` at offset {} does not match the template, skipping",
                ctx.filename,
                event.name,
                event.source_span.start.offset
            );
            return;
        };
        let new_text = found.replacement_text();

        tracing::trace!(
            "banana-in-box at {}..{} in {}: `{}`",
            start,
            end,
            ctx.filename,
            new_text
        );

        let help = format!("Write `{}` to bind both ways", new_text);
        let fix = Fix::new(
            format!("Replace with `{}`", new_text),
            TextEdit::new(start, end, new_text),
        );

        ctx.report(
            LintDiagnostic::new(META.name, META.default_severity, MESSAGE, start, end)
                .with_help(help)
                .with_fix(fix),
        );
    }
}

/// The binding key: node text up to the first `=`, where the value starts.
#[inline]
fn attribute_key(text: &str) -> &str {
    match memchr(b'=', text.as_bytes()) {
        Some(eq) => &text[..eq],
        None => text,
    }
}

impl Rule for BananaInBox {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_bound_event(
        &self,
        ctx: &mut LintContext<'_>,
        _element: &ElementNode,
        event: &BoundEventNode,
    ) {
        if !Self::detect(event.name.as_str()) {
            return;
        }

        let key = attribute_key(event.source_span.as_str());
        if let Some(found) = Self::locate(key) {
            Self::emit(ctx, event, key, &found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::apply_fixes;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;
    use lacquer_relief::ast::{Position, RootNode, SourceSpan, TemplateNode};

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(BananaInBox));
        Linter::with_registry(registry)
    }

    /// Template with one `<input>` whose single output covers `attr`.
    fn template_with_event(template: &str, attr: &str, name: &str) -> RootNode {
        let start = template.find(attr).unwrap() as u32;
        let span = SourceSpan::from_template(template, start, start + attr.len() as u32).unwrap();
        let element = ElementNode::new("input", SourceSpan::STUB)
            .with_output(BoundEventNode::new(name, "", span));
        RootNode::new(template).with_child(TemplateNode::Element(element))
    }

    #[test]
    fn test_detect() {
        assert!(BananaInBox::detect("[ngModel]"));
        assert!(BananaInBox::detect("([foo.bar())]"));
        assert!(BananaInBox::detect("[(click)]"));
        assert!(!BananaInBox::detect("click"));
        assert!(!BananaInBox::detect("ngModelChange"));
        assert!(!BananaInBox::detect("]["));
        assert!(!BananaInBox::detect("[open"));
        assert!(!BananaInBox::detect(""));
    }

    #[test]
    fn test_locate_trims_expression() {
        let found = BananaInBox::locate("([ foo.bar() ])").unwrap();
        assert_eq!(found.internal_start, 0);
        assert_eq!(found.internal_end, 13);
        assert_eq!(found.trimmed_expression, "foo.bar()");
        assert_eq!(found.span_len(), 15);
        assert_eq!(found.replacement_text(), "[(foo.bar())]");
    }

    #[test]
    fn test_locate_rejects_missing_or_misordered_delimiters() {
        assert_eq!(BananaInBox::locate("[(ngModel)]"), None);
        assert_eq!(BananaInBox::locate("([ngModel"), None);
        assert_eq!(BananaInBox::locate("ngModel])"), None);
        assert_eq!(BananaInBox::locate("])x(["), None);
        assert_eq!(BananaInBox::locate("(])"), None);
    }

    #[test]
    fn test_locate_empty_box() {
        let found = BananaInBox::locate("([])").unwrap();
        assert_eq!(found.trimmed_expression, "");
        assert_eq!(found.replacement_text(), "[()]");
    }

    #[test]
    fn test_attribute_key() {
        assert_eq!(attribute_key("([a])=\"b[0])\""), "([a])");
        assert_eq!(attribute_key("([a])"), "([a])");
    }

    #[test]
    fn test_valid_two_way_binding() {
        let linter = create_linter();
        let template = r#"<input [(ngModel)]="name">"#;
        // The parser splits `[(ngModel)]` into a property and an `ngModelChange` output.
        let root = template_with_event(template, r#"[(ngModel)]="name""#, "ngModelChange");
        let result = linter.lint_template(&root, "test.html");
        assert_eq!(result.error_count, 0);
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_valid_name_with_brackets_but_no_banana_in_text() {
        let linter = create_linter();
        let template = r#"<input [(click)]="go()">"#;
        let root = template_with_event(template, r#"[(click)]="go()""#, "[(click)]");
        let result = linter.lint_template(&root, "test.html");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_plain_event_binding() {
        let linter = create_linter();
        let template = r#"<button (click)="onClick()">Go</button>"#;
        let root = template_with_event(template, r#"(click)="onClick()""#, "click");
        let result = linter.lint_template(&root, "test.html");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let linter = create_linter();
        let template = r#"<input ([x])="y">"#;
        let root = template_with_event(template, r#"([x])="y""#, "");
        let result = linter.lint_template(&root, "test.html");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_invalid_banana_in_box() {
        let linter = create_linter();
        let template = r#"<input ([ngModel])="name">"#;
        let root = template_with_event(template, r#"([ngModel])="name""#, "[ngModel]");
        let result = linter.lint_template(&root, "test.html");

        assert_eq!(result.error_count, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.rule_name, "angular/banana-in-box");
        assert_eq!(diag.message, MESSAGE);
        assert_eq!((diag.start, diag.end), (7, 18));
        assert_eq!(&template[diag.start as usize..diag.end as usize], "([ngModel])");

        let fix = diag.fix.as_ref().unwrap();
        assert_eq!(fix.edits.len(), 1);
        assert_eq!(fix.edits[0], TextEdit::new(7, 18, "[(ngModel)]"));
        assert_eq!(fix.apply(template), r#"<input [(ngModel)]="name">"#);
    }

    #[test]
    fn test_fix_trims_whitespace_inside_box() {
        let linter = create_linter();
        let template = r#"<my-cmp ([ value ])="v"></my-cmp>"#;
        let root = template_with_event(template, r#"([ value ])="v""#, "[ value ]");
        let result = linter.lint_template(&root, "test.html");

        let fixed = apply_fixes(template, &result.diagnostics);
        assert_eq!(fixed.output, r#"<my-cmp [(value)]="v"></my-cmp>"#);
    }

    #[test]
    fn test_bracket_in_value_does_not_widen_fix() {
        let linter = create_linter();
        let template = r#"<input ([ngModel])="items[0])">"#;
        let root = template_with_event(template, r#"([ngModel])="items[0])""#, "[ngModel]");
        let result = linter.lint_template(&root, "test.html");

        let fixed = apply_fixes(template, &result.diagnostics);
        assert_eq!(fixed.output, r#"<input [(ngModel)]="items[0])">"#);
    }

    #[test]
    fn test_fixed_template_is_clean() {
        let linter = create_linter();
        let template = r#"<input ([ngModel])="name">"#;
        let root = template_with_event(template, r#"([ngModel])="name""#, "[ngModel]");
        let result = linter.lint_template(&root, "test.html");
        let fixed = apply_fixes(template, &result.diagnostics).output;

        // Re-lint with the same (now stale) event name: the text no longer matches
        let relint = template_with_event(&fixed, r#"[(ngModel)]="name""#, "[ngModel]");
        assert!(!linter.lint_template(&relint, "test.html").has_diagnostics());

        // And with the nodes a parser produces for the fixed text
        let reparsed = template_with_event(&fixed, r#"[(ngModel)]="name""#, "ngModelChange");
        assert!(!linter.lint_template(&reparsed, "test.html").has_diagnostics());
    }

    #[test]
    fn test_absolute_offset_uses_node_start() {
        let linter = create_linter();
        let template = "<form>\n  <input type=\"text\" ([ngModel])=\"user.name\">\n</form>";
        let root = template_with_event(template, "([ngModel])=\"user.name\"", "[ngModel]");
        let result = linter.lint_template(&root, "test.html");

        let diag = &result.diagnostics[0];
        assert_eq!(&template[diag.start as usize..diag.end as usize], "([ngModel])");
    }

    #[test]
    fn test_offset_near_u32_max_is_skipped() {
        let linter = create_linter();
        let text = r#"([ngModel])="x""#;
        let span = SourceSpan::new(
            Position::new(u32::MAX - 3, 1, 1),
            Position::new(u32::MAX, 1, 1),
            text,
        );
        let root = RootNode::new(format!("<input {}>", text)).with_child(TemplateNode::Element(
            ElementNode::new("input", SourceSpan::STUB)
                .with_output(BoundEventNode::new("[ngModel]", "x", span)),
        ));

        let result = linter.lint_template(&root, "test.html");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_span_offset_not_pointing_at_text_is_skipped() {
        let linter = create_linter();
        let template = r#"<input ([ngModel])="name">"#;
        let text = r#"([ngModel])="name""#;
        // Correct text, but the offset points at `<input` instead of the attribute
        let span = SourceSpan::new(Position::new(0, 1, 1), Position::new(18, 1, 19), text);
        let root = RootNode::new(template).with_child(TemplateNode::Element(
            ElementNode::new("input", SourceSpan::STUB)
                .with_output(BoundEventNode::new("[ngModel]", "name", span)),
        ));

        let result = linter.lint_template(&root, "test.html");
        assert!(!result.has_diagnostics());
        assert_eq!(result.apply_fixes(template).output, template);
    }
}
