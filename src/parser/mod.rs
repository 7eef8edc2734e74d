//! Query parser and language utilities

mod utils;
#[allow(clippy::module_inception)]
mod parser;
mod lexer;
mod value;
mod document;

#[cfg(test)]
mod tests;

pub use self::document::{parse_document_source, parse_type};

pub use self::lexer::{Lexer, LexerError, Token};
pub use self::parser::{OptionParseResult, ParseError, ParseResult, Parser, UnlocatedParseResult};
pub use self::utils::{SourcePosition, Span, Spanning};
