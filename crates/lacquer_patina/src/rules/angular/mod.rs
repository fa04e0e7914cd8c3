//! Angular template rules.
//!
//! These rules target mistakes in Angular binding syntax that the template
//! compiler accepts but that do not do what the author meant.

mod banana_in_box;

pub use banana_in_box::{BananaInBox, BananaMatch};
