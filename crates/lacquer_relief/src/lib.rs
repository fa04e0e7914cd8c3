//! # lacquer_relief
//!
//! Relief - The sculptured AST surface for Angular templates.
//!
//! ## Name Origin
//!
//! A **relief** is a sculpture raised from a flat surface. `lacquer_relief`
//! raises the structure of an Angular template (elements, bindings and text)
//! into typed nodes that the linter can walk.
//!
//! The AST is produced by an external template parser. Every node type is
//! serde (de)serializable so a parsed template can cross a process boundary
//! as JSON.

pub mod ast;

pub use ast::*;
