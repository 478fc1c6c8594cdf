use crate::parser::ParseError;


/// Errors raised outside the parser: building an expression by hand,
/// or asking a [`crate::DiceRoller`] to roll something it cannot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An expression needs at least one die.
    #[error("Dice count must be at least 1")]
    ZeroDice,

    /// More than [`crate::MAX_DICE`] dice.
    #[error("At most {max} dice can be rolled at once, got {0}", max = crate::MAX_DICE)]
    TooManyDice(u32),

    /// A die with fewer than two sides.
    #[error("A die needs at least 2 sides, got {0}")]
    TooFewSides(u32),

    /// The roller refused the formula; holds the formula as given.
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    /// Wrapped parser error.
    #[error("Parser error - {0}")]
    Parser(#[from] ParseError)
}
