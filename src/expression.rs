use std::fmt::Display;
use crate::{Error, RandomSource};


/// Most dice a single expression may roll.
pub const MAX_DICE: u32 = 10_000;


/// Direction in which a modifier adjusts each die.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// `+`, adds the modifier.
    #[default]
    Plus,
    /// `-`, subtracts the modifier.
    Minus
}

impl Sign {
    /// Applies the sign to a die face and a modifier magnitude.
    pub const fn apply(self, value: i64, modifier: i64) -> i64 {
        match self {
            Sign::Plus => value + modifier,
            Sign::Minus => value - modifier
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-")
        }
    }
}


/// A parsed dice formula: `count` dice of `sides` faces, each adjusted by a modifier.
///
/// The modifier applies to **every die**, not once to the sum: `2d6+3` rolls
/// two dice and adds 3 to each of them. Statistics and rolls both follow this rule.
///
/// Build one with [`DiceExpression::builder()`] or [`crate::parse()`].
/// Deserialized expressions go through the same builder checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDiceExpression"))]
pub struct DiceExpression {
    count: u32,
    sides: u32,
    modifier: u32,
    sign: Sign
}

impl DiceExpression {
    /// The expression `roll` substitutes for text that does not parse.
    pub const FALLBACK: DiceExpression = DiceExpression {
        count: 1,
        sides: 20,
        modifier: 0,
        sign: Sign::Plus
    };

    /// Creates a [`DiceExpressionBuilder`] for dice with `sides` faces.
    ///
    /// # Examples
    /// ```
    /// use storydice::DiceExpression;
    ///
    /// let expr = DiceExpression::builder(6)
    ///     .count(2)
    ///     .plus(3)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(expr.to_string(), "2d6+3");
    /// ```
    pub fn builder(sides: u32) -> DiceExpressionBuilder {
        DiceExpressionBuilder::new(sides)
    }

    /// Number of dice rolled, between 1 and [`MAX_DICE`].
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Faces per die, at least 2.
    pub const fn sides(&self) -> u32 {
        self.sides
    }

    /// Magnitude of the modifier, always non-negative. See [`DiceExpression::sign()`].
    pub const fn modifier(&self) -> u32 {
        self.modifier
    }

    /// Whether the modifier is added to or subtracted from each die.
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// `true` when the formula was written with a `-` modifier, including `-0`.
    pub const fn is_subtractive(&self) -> bool {
        matches!(self.sign, Sign::Minus)
    }

    /// Lowest value a single adjusted die can show.
    pub const fn die_min(&self) -> i64 {
        self.sign.apply(1, self.modifier as i64)
    }

    /// Highest value a single adjusted die can show.
    pub const fn die_max(&self) -> i64 {
        self.sign.apply(self.sides as i64, self.modifier as i64)
    }

    /// Minimum possible total.
    ///
    /// # Examples
    /// ```
    /// use storydice::parse;
    ///
    /// // each die shows at least 1 + 3
    /// assert_eq!(parse("2d6+3").unwrap().min(), 8);
    /// assert_eq!(parse("3d6-3").unwrap().min(), -6);
    /// ```
    pub const fn min(&self) -> i64 {
        self.count as i64 * self.die_min()
    }

    /// Maximum possible total.
    ///
    /// # Examples
    /// ```
    /// use storydice::parse;
    ///
    /// assert_eq!(parse("2d6+3").unwrap().max(), 18);
    /// assert_eq!(parse("1d20").unwrap().max(), 20);
    /// ```
    pub const fn max(&self) -> i64 {
        self.count as i64 * self.die_max()
    }

    /// Expected total.
    pub fn avg(&self) -> f64 {
        let die_avg = (1.0 + f64::from(self.sides)) / 2.0;
        let modifier = f64::from(self.modifier);

        let adjusted = match self.sign {
            Sign::Plus => die_avg + modifier,
            Sign::Minus => die_avg - modifier
        };

        f64::from(self.count) * adjusted
    }

    /// `(min, max)` of the total.
    pub const fn possible_values(&self) -> (i64, i64) {
        (self.min(), self.max())
    }

    /// Draws `count` faces from `random` and applies the modifier to each one.
    pub fn roll_with(&self, random: &dyn RandomSource) -> Vec<i64> {
        self.generate_values(random)
            .into_iter()
            .map(|face| self.sign.apply(i64::from(face), i64::from(self.modifier)))
            .collect()
    }

    /// Raw faces in `1..=sides`, before the modifier.
    pub fn generate_values(&self, random: &dyn RandomSource) -> Vec<u32> {
        (0..self.count)
            .map(|_| random.random_in(1, self.sides))
            .collect()
    }
}

impl Display for DiceExpression {
    /// Canonical notation. A zero modifier is only written when it was given
    /// with a `-`, so `is_subtractive` survives a round trip.
    ///
    /// # Examples
    /// ```
    /// use storydice::parse;
    ///
    /// assert_eq!(parse("1d20").unwrap().to_string(), "1d20");
    /// assert_eq!(parse("2d6+0").unwrap().to_string(), "2d6");
    /// assert_eq!(parse("3d6-3").unwrap().to_string(), "3d6-3");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;

        match (self.sign, self.modifier) {
            (Sign::Plus, 0) => Ok(()),
            (sign, modifier) => write!(f, "{sign}{modifier}")
        }
    }
}


/// Builder for [`DiceExpression`]. Count defaults to 1, the modifier to `+0`.
#[derive(Debug, Clone)]
pub struct DiceExpressionBuilder {
    count: u32,
    sides: u32,
    modifier: u32,
    sign: Sign
}

impl DiceExpressionBuilder {
    fn new(sides: u32) -> Self {
        Self {
            count: 1,
            sides,
            modifier: 0,
            sign: Sign::Plus
        }
    }

    /// Sets how many dice are rolled.
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the modifier applied to each die.
    pub fn modifier(mut self, sign: Sign, modifier: u32) -> Self {
        self.sign = sign;
        self.modifier = modifier;
        self
    }

    /// Adds `modifier` to every die.
    pub fn plus(self, modifier: u32) -> Self {
        self.modifier(Sign::Plus, modifier)
    }

    /// Subtracts `modifier` from every die.
    pub fn minus(self, modifier: u32) -> Self {
        self.modifier(Sign::Minus, modifier)
    }

    /// Checks the invariants and returns the expression.
    ///
    /// # Errors
    /// - [`Error::ZeroDice`] if the count is 0.
    /// - [`Error::TooManyDice`] if the count is above [`MAX_DICE`].
    /// - [`Error::TooFewSides`] if a die has fewer than 2 sides.
    ///
    /// # Examples
    /// ```
    /// use storydice::{DiceExpression, Error};
    ///
    /// assert_eq!(DiceExpression::builder(6).count(0).build(), Err(Error::ZeroDice));
    /// assert_eq!(DiceExpression::builder(6).count(20_000).build(), Err(Error::TooManyDice(20_000)));
    /// assert_eq!(DiceExpression::builder(1).build(), Err(Error::TooFewSides(1)));
    /// ```
    pub fn build(self) -> Result<DiceExpression, Error> {
        if self.count == 0 {
            return Err(Error::ZeroDice);
        }

        if self.count > MAX_DICE {
            return Err(Error::TooManyDice(self.count));
        }

        if self.sides < 2 {
            return Err(Error::TooFewSides(self.sides));
        }

        Ok(DiceExpression {
            count: self.count,
            sides: self.sides,
            modifier: self.modifier,
            sign: self.sign
        })
    }
}


#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDiceExpression {
    count: u32,
    sides: u32,
    modifier: u32,
    sign: Sign
}

#[cfg(feature = "serde")]
impl TryFrom<RawDiceExpression> for DiceExpression {
    type Error = Error;

    fn try_from(raw: RawDiceExpression) -> Result<Self, Self::Error> {
        DiceExpression::builder(raw.sides)
            .count(raw.count)
            .modifier(raw.sign, raw.modifier)
            .build()
    }
}
