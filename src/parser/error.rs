/// Everything that can go wrong while turning formula text into a [`crate::DiceExpression`].
///
/// Errors returned from [`crate::parse`] are always wrapped in [`ParseError::AtPosition`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Character offset at which the wrapped error was detected.
    #[error("At position {0} - {1}")]
    AtPosition(usize, Box<ParseError>),

    /// The formula text is empty.
    #[error("Formula is empty")]
    Empty,

    /// A character that is not part of the notation, whitespace and `D` included.
    #[error("Invalid character: {0:?}")]
    Token(char),

    /// Valid tokens in an order the grammar does not allow.
    #[error("Malformed formula, expected {expected}, got {found}")]
    MalformedFormula {
        /// What the grammar allows at this point.
        expected: &'static str,
        /// What the text contains instead.
        found: String
    },

    /// The formula rolls no dice.
    #[error("Dice count must be at least 1")]
    ZeroDice,

    /// The formula rolls more than [`crate::MAX_DICE`] dice.
    #[error("At most {max} dice can be rolled at once, got {0}", max = crate::MAX_DICE)]
    TooManyDice(u32),

    /// A die with fewer than two sides.
    #[error("A die needs at least 2 sides, got {0}")]
    TooFewSides(u32),

    /// A number the grammar accepts but that does not fit in a `u32`.
    #[error("The {field} {value} is too large")]
    TooLarge {
        /// Which part of the formula held the number.
        field: &'static str,
        /// The number as written.
        value: u64
    },
}

impl ParseError {
    /// Returns the wrapped error, skipping the positional wrapper if there is one.
    pub fn err(&self) -> &Self {
        match self {
            ParseError::AtPosition(_, err) => err.as_ref(),
            other => other
        }
    }

    /// Character offset at which the error was detected, if known.
    pub fn pos(&self) -> Option<&usize> {
        match self {
            ParseError::AtPosition(position, _) => Some(position),
            _ => None
        }
    }

    /// Wraps the error with a position. Already positioned errors are left as they are.
    pub fn at_pos(self, position: usize) -> Self {
        match self {
            ParseError::AtPosition(_, _) => self,
            other => ParseError::AtPosition(position, Box::new(other))
        }
    }

    /// `true` when the text does not match the grammar at all, as opposed to a
    /// well-formed formula whose numbers break the expression invariants.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.err(),
            ParseError::Empty | ParseError::Token(_) | ParseError::MalformedFormula { .. }
        )
    }

    pub(crate) fn unexpected(expected: &'static str, found: impl ToString) -> Self {
        ParseError::MalformedFormula { expected, found: found.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
