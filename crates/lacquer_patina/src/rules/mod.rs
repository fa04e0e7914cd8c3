//! Lint rules for Angular templates.

pub mod angular;
