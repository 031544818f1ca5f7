//! Filename grammar: tokenizer, ordered matcher rules, unit correction and
//! the extractor that drives them.

pub mod extractor;
pub mod rules;
pub mod tokenizer;
pub mod units;

pub use extractor::FilenameParser;
pub use tokenizer::{Delimiters, SizeToken, TokenCursor, TokenizedName};
pub use units::UnitNormalizer;
