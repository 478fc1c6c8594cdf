//! Dice formulas for interactive fiction.
//!
//! Formulas take the form `<count>d<sides>[<sign><modifier>]`, e.g. `1d20`,
//! `2d6+3` or `3d6-3`. The modifier is applied to every die, not once to the
//! total.
//!
//! ```
//! use storydice::{DiceEngine, parse, validate};
//!
//! assert!(validate("2d6+3"));
//! assert!(parse("2d6 + 3").is_err());
//!
//! let engine = DiceEngine::new();
//! let outcome = engine.roll("2d6+3", None);
//! assert!((8..=18).contains(&outcome.total));
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod expression_test_strategies;

mod config;
mod engine;
mod error;
mod expression;
mod parser;
mod random;
mod roller;

pub use config::RollerConfig;
pub use engine::{DiceEngine, RollOutcome, FormulaStatistics};
pub use error::Error;
pub use expression::{DiceExpression, DiceExpressionBuilder, Sign, MAX_DICE};
pub use parser::{
    ParseError, Parser,
    parse, validate,
    OVERSIZED_COUNT_FALLBACK, OVERSIZED_SIDES_FALLBACK, OVERSIZED_MODIFIER_FALLBACK
};
pub use random::{RandomSource, ThreadRandom, SeededRandom};
pub use roller::{DiceRoller, RollHistory, RecentFormulas};
