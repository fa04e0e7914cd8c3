//! # lacquer_patina
//!
//! Patina - The quality checker for Lacquer.
//! Linter for Angular component templates.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the film that forms on a lacquered or metal
//! surface over time and shows how the piece was handled. `lacquer_patina`
//! looks over Angular templates for the marks of binding-syntax mistakes.
//!
//! ## Features
//!
//! - Rich diagnostic output with code snippets (via `oxc_diagnostics`)
//! - Auto-fixes expressed as text edits against the template source
//! - Per-rule levels from `lacquer.config.json`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lacquer_patina::{load_document, Linter, OutputFormat, format_results};
//!
//! let root = load_document("app.component.ast.json".as_ref())?;
//! let result = Linter::new().lint_template(&root, "app.component.html");
//!
//! if result.has_errors() {
//!     let fixed = result.apply_fixes(&root.source);
//!     println!("{}", fixed.output);
//! }
//! ```
//!
//! ## Rules
//!
//! - `angular/banana-in-box` - Ensure that the two-way data binding syntax is correct

mod config;
mod context;
mod diagnostic;
mod document;
mod error;
mod linter;
pub mod output;
mod rule;
pub mod rules;
mod visitor;

pub use config::{LintConfig, RuleLevel, CONFIG_FILE_NAME};
pub use context::LintContext;
pub use diagnostic::{
    apply_fixes, Fix, FixOutcome, LintDiagnostic, LintSummary, Severity, TextEdit,
};
pub use document::{load_document, parse_document, DOCUMENT_SUFFIX};
pub use error::{LintError, LintResultOf};
pub use linter::{LintResult, Linter};
pub use output::{format_results, format_summary, OutputFormat};
pub use rule::{Rule, RuleCategory, RuleMeta, RuleRegistry};
pub use visitor::{ActiveRule, LintVisitor};

use lacquer_relief::ast::RootNode;

/// Lint a parsed Angular template with default rules
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(root: &RootNode, filename: &str) -> LintResult {
    Linter::new().lint_template(root, filename)
}
