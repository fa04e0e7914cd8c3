//! Carton - The shared toolbox for Lacquer.
//!
//! This crate holds the small utilities every other Lacquer crate reaches for,
//! the way an artist's carton holds brushes and pigments.
//!
//! # Modules
//!
//! - **line_index**: byte offset to line/column conversion for diagnostics
//! - **Re-exports**: `CompactString` and `FxHashMap`

pub mod line_index;

pub use line_index::LineIndex;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps
pub use rustc_hash::FxHashMap;
