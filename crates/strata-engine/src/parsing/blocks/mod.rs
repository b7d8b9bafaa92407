//! # Block Parsing
//!
//! Lines are classified one at a time and fed to a [`BlockBuilder`], which
//! grows a depth-addressed tree of [`BlockNode`]s in a single forward pass.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line becomes a [`Line`] with
//!    its indentation and a [`LineKind`]. Container markers (`>`, list
//!    markers) wrap the classified remainder of the line.
//!
//! 2. **Block Construction** (`builder`, `strand`): the builder offers the line
//!    to the last block at depth 0, which recurses into its content. When no
//!    open block absorbs the line, a new *strand* (one node per container
//!    marker plus a leaf) is appended at the depth where extension failed.
//!
//! 3. **Reference Resolution** (`references`): after the last line, reference
//!    definitions are collected into a [`ReferenceMap`].
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode` and its per-kind payloads
//! - **`kinds`**: block-specific syntax with owned delimiters
//! - **`classify`**: `MarkdownLineClassifier` produces a `Line` per input line
//! - **`builder`**: `BlockBuilder` continuation dispatch
//! - **`strand`**: new chains of blocks for lines nothing absorbed
//! - **`lazy`**: lazy-continuation flags on lists and quotes
//! - **`references`**: `ReferenceMap`
//!
//! ## Key Invariants
//!
//! - Appending at depth `d` retires everything that hung below the previous
//!   node at depth `d`
//! - List items never receive lines; their content sits one depth deeper
//! - Fenced and indented code are raw zones: no inline parsing inside
//! - All block nodes store byte spans into the rope

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod lazy;
pub mod references;
pub mod strand;
pub mod types;

pub use builder::{BlockBuilder, Extend};
pub use classify::{CODE_INDENT, Indent, Line, LineKind, MarkdownLineClassifier};
pub use references::ReferenceMap;
pub use types::{
    BlockNode, CodeNode, FenceNode, HeaderNode, ListItemNode, ListNode, ListState, ParagraphNode,
    QuoteNode, ReferenceDefinitionNode, ThematicBreakNode,
};
