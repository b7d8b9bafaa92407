//! Block-specific syntax types. Each owns its delimiters; the classifier
//! calls into these and never hardcodes `>`, `#` or fence characters itself.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_marker;
pub mod reference;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use heading::{Heading, HeadingScan};
pub use list_marker::{ListKind, ListMarker};
pub use reference::{ReferenceDefinition, ReferenceLine, normalize_label};
pub use thematic_break::ThematicBreak;
