//! # Snapshot Testing Support
//!
//! Utilities for inspecting and testing the parser.
//!
//! ## Modules
//!
//! - **`normalize`**: converts a parsed document into a stable, serializable
//!   `Snap`, and renders it as an indented text `dump`
//! - **`invariants`**: runtime checks for parser correctness (spans in
//!   bounds, list structure, inline children tiling their parent's content)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, SnapOptions, dump, dump_with, normalize, normalize_with, render};
