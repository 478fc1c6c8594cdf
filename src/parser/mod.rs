mod error;
mod lexer;
mod parse;

#[cfg(test)]
pub(crate) mod str_test_strategies;

pub use error::ParseError;
pub(crate) use lexer::{Lexer, Token};
pub use parse::{
    Parser, parse, validate,
    OVERSIZED_COUNT_FALLBACK, OVERSIZED_SIDES_FALLBACK, OVERSIZED_MODIFIER_FALLBACK
};
