use crate::{DiceExpression, Error, Sign};
use crate::parser::error::*;
use crate::parser::{Lexer, Token};


/// Dice count used when the count digits overflow a `u64`.
pub const OVERSIZED_COUNT_FALLBACK: u32 = 1;

/// Number of sides used when the sides digits overflow a `u64`.
pub const OVERSIZED_SIDES_FALLBACK: u32 = 6;

/// Modifier used when the modifier digits overflow a `u64`.
pub const OVERSIZED_MODIFIER_FALLBACK: u32 = 0;


/// A formula that matched the grammar but has not been checked against the
/// expression invariants yet. `None` marks a digit run that overflowed a `u64`.
#[derive(Debug)]
pub(crate) struct RawFormula {
    count: Option<u64>,
    sides: Option<u64>,
    sides_at: usize,
    modifier: Option<(Sign, Option<u64>, usize)>,
}

impl RawFormula {
    fn into_expression(self) -> Result<DiceExpression> {
        let count = narrow(self.count, OVERSIZED_COUNT_FALLBACK, "dice count", 0)?;
        let sides = narrow(self.sides, OVERSIZED_SIDES_FALLBACK, "number of sides", self.sides_at)?;

        let builder = DiceExpression::builder(sides).count(count);
        let builder = match self.modifier {
            Some((sign, magnitude, at)) => builder.modifier(sign, narrow(magnitude, OVERSIZED_MODIFIER_FALLBACK, "modifier", at)?),
            None => builder
        };

        builder.build().map_err(|err| match err {
            Error::ZeroDice => ParseError::ZeroDice.at_pos(0),
            Error::TooManyDice(count) => ParseError::TooManyDice(count).at_pos(0),
            Error::TooFewSides(sides) => ParseError::TooFewSides(sides).at_pos(self.sides_at),
            other => unreachable!("{other:?}")
        })
    }
}

/// Fits a lexed number into a `u32`. Digit runs past `u64::MAX` take `fallback`.
fn narrow(value: Option<u64>, fallback: u32, field: &'static str, at: usize) -> Result<u32> {
    match value {
        Some(value) => u32::try_from(value)
            .map_err(|_| ParseError::TooLarge { field, value }.at_pos(at)),
        None => {
            tracing::debug!(field, fallback, "number overflows u64, using fallback");
            Ok(fallback)
        }
    }
}


/// A recursive-descent parser for `<count>d<sides>[<sign><modifier>]` formulas.
///
/// The grammar admits no whitespace, exactly one dice group and at most one
/// `+` or `-` modifier. Parsing happens in two steps: a purely syntactic pass
/// (the one [`validate`] runs) and a semantic pass that enforces at least one
/// die with at least two sides.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    current: Token,
    current_pos: usize,
    peek: Token,
    peek_pos: usize,
}

impl Parser {
    /// Creates a new `Parser` for the given formula text.
    ///
    /// # Errors
    /// Returns [`ParseError::Empty`] for an empty string, or the lexer error for
    /// a character outside the notation among the first two tokens. Errors are
    /// wrapped in [`ParseError::AtPosition`].
    ///
    /// # Examples
    /// ```
    /// use storydice::{Parser, ParseError};
    ///
    /// assert!(Parser::new("2d6+3").is_ok());
    ///
    /// let err = Parser::new("").unwrap_err();
    /// assert!(matches!(err.err(), ParseError::Empty));
    /// ```
    pub fn new(input: &str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;

        if current == Token::Eof {
            return Err(ParseError::Empty.at_pos(0));
        }

        let peek_pos = lexer.position;
        let peek = lexer.next_token()?;

        Ok(Self { lexer, current, current_pos: 0, peek, peek_pos })
    }

    /// Parses the whole input into a [`DiceExpression`].
    ///
    /// # Errors
    /// Any [`ParseError`], wrapped with the position where it was detected.
    ///
    /// # Examples
    /// ```
    /// use storydice::{Parser, ParseError};
    ///
    /// let expr = Parser::new("3d6-3").unwrap().parse().unwrap();
    /// assert_eq!(expr.to_string(), "3d6-3");
    ///
    /// let err = Parser::new("2d6*2").unwrap().parse().unwrap_err();
    /// assert_eq!(err.pos(), Some(&3));
    /// ```
    pub fn parse(&mut self) -> Result<DiceExpression> {
        self.parse_formula()?.into_expression()
    }

    pub(crate) fn parse_formula(&mut self) -> Result<RawFormula> {
        let count = self.number("dice count")?;

        self.next_token()?;
        if self.current != Token::Dice {
            return Err(self.unexpected("'d'"));
        }

        self.next_token()?;
        let sides_at = self.current_pos;
        let sides = self.number("number of sides")?;

        let modifier = self.parse_modifier()?;

        if self.peek != Token::Eof {
            self.next_token()?;
            return Err(self.unexpected("end of input"));
        }

        Ok(RawFormula { count, sides, sides_at, modifier })
    }

    fn parse_modifier(&mut self) -> Result<Option<(Sign, Option<u64>, usize)>> {
        let sign = match self.peek {
            Token::Plus => Sign::Plus,
            Token::Minus => Sign::Minus,
            _ => return Ok(None)
        };

        self.next_token()?;
        self.next_token()?;
        let magnitude_at = self.current_pos;
        let magnitude = self.number("modifier")?;

        Ok(Some((sign, magnitude, magnitude_at)))
    }

    fn next_token(&mut self) -> Result<()> {
        self.current = self.peek;
        self.current_pos = self.peek_pos;
        self.peek_pos = self.lexer.position;
        self.peek = self.lexer.next_token()?;

        Ok(())
    }

    fn number(&self, expected: &'static str) -> Result<Option<u64>> {
        match self.current {
            Token::Number(n) => Ok(n),
            _ => Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::unexpected(expected, self.current).at_pos(self.current_pos)
    }
}


/// Parses formula text into a [`DiceExpression`].
///
/// # Errors
/// Returns a [`ParseError`] wrapped with positional information when the text
/// does not match `<count>d<sides>[<sign><modifier>]`, when the count is zero
/// or above [`crate::MAX_DICE`], when a die has fewer than two sides, or when
/// a number does not fit in a `u32`.
///
/// # Examples
/// ```
/// use storydice::parse;
///
/// let expr = parse("2d6+3").unwrap();
/// assert_eq!((expr.count(), expr.sides(), expr.modifier()), (2, 6, 3));
/// assert!(!expr.is_subtractive());
///
/// assert!(parse("d20").is_err());
/// assert!(parse("2d6 + 3").is_err());
/// ```
pub fn parse(input: &str) -> Result<DiceExpression> {
    Parser::new(input)?.parse()
}


/// Returns whether `input` matches the formula grammar.
///
/// This is a syntactic check only: `"0d6"` is well formed even though
/// [`parse`] rejects it for having no dice.
///
/// # Examples
/// ```
/// use storydice::validate;
///
/// assert!(validate("2d6"));
/// assert!(!validate("2d6 "));
/// assert!(!validate("d6"));
/// assert!(!validate(""));
/// ```
pub fn validate(input: &str) -> bool {
    Parser::new(input)
        .and_then(|mut parser| parser.parse_formula())
        .is_ok()
}
