pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use io::{IoError, read_document};
pub use parsing::{ParseOptions, ParsedDoc, parse_document, parse_document_with};
