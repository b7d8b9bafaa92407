//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! - **`CodeSpan`**: `` ` `` runs; raw zone that suppresses other parsing
//! - **`Emphasis`**: `*` and `_` runs plus flanking rules
//! - **`Link`**: `[`, `]`, `!` and the `(destination "title")` tail
//!
//! The recognizer calls these; it never hardcodes delimiter bytes.

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::{Emphasis, Flanking};
pub use link::Link;
