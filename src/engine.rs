//! The dice engine: parse, validate, roll and analyze formula text.
//!
//! Two failure policies live side by side here. [`DiceEngine::parse`] and
//! [`DiceEngine::validate`] report malformed text. [`DiceEngine::roll`] never
//! fails and rolls [`DiceExpression::FALLBACK`] instead, while
//! [`DiceEngine::analyze`] returns `None` rather than statistics for a formula
//! nobody wrote.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::{DiceExpression, ParseError, RandomSource, ThreadRandom};


/// The realized result of evaluating a formula once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollOutcome {
    /// Unique per outcome, so a history entry can be addressed.
    pub id: Uuid,
    /// The text the caller asked for, even when it did not parse.
    pub formula: String,
    /// The expression that was actually rolled.
    pub expression: DiceExpression,
    /// One entry per die, modifier already applied.
    pub results: Vec<i64>,
    /// Sum of `results`.
    pub total: i64,
    /// When the dice were rolled.
    pub timestamp: DateTime<Utc>,
    /// Free-form label supplied by the caller.
    pub context: Option<String>,
    /// Set when `formula` did not parse and [`DiceExpression::FALLBACK`] was rolled instead.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback: bool
}

impl RollOutcome {
    /// Builds an outcome from already adjusted die values; the total is their sum.
    pub fn new(formula: impl Into<String>, expression: DiceExpression, results: Vec<i64>, context: Option<String>) -> Self {
        let total: i64 = results.iter().sum();

        Self {
            id: Uuid::new_v4(),
            formula: formula.into(),
            expression,
            results,
            total,
            timestamp: Utc::now(),
            context,
            fallback: false
        }
    }

    /// `true` when the formula text did not parse and [`DiceExpression::FALLBACK`] was rolled.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}


/// Bounds and expectation of a formula's total, computed without rolling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaStatistics {
    /// Lowest reachable total.
    pub minimum: i64,
    /// Highest reachable total.
    pub maximum: i64,
    /// Expected total.
    pub average: f64
}

impl From<&DiceExpression> for FormulaStatistics {
    fn from(expr: &DiceExpression) -> Self {
        Self {
            minimum: expr.min(),
            maximum: expr.max(),
            average: expr.avg()
        }
    }
}


/// Parses, validates, rolls and analyzes dice formulas.
///
/// The engine keeps no state between calls besides its [`RandomSource`], so a
/// single engine can be shared across threads.
///
/// # Examples
/// ```
/// use storydice::DiceEngine;
///
/// let engine = DiceEngine::new();
///
/// let outcome = engine.roll("2d6+3", Some("goblin fight"));
/// assert_eq!(outcome.results.len(), 2);
/// assert!((8..=18).contains(&outcome.total));
///
/// let stats = engine.analyze("2d6+3").unwrap();
/// assert_eq!((stats.minimum, stats.maximum, stats.average), (8, 18, 13.0));
/// ```
#[derive(Clone)]
pub struct DiceEngine {
    random: Arc<dyn RandomSource>
}

impl DiceEngine {
    /// An engine drawing from the calling thread's generator.
    pub fn new() -> Self {
        Self::with_random(Arc::new(ThreadRandom::new()))
    }

    /// An engine drawing every face from `random`.
    pub fn with_random(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Parses `text` into an expression.
    ///
    /// # Errors
    /// See [`crate::parse`].
    pub fn parse(&self, text: &str) -> Result<DiceExpression, ParseError> {
        crate::parse(text)
    }

    /// Grammar check only. See [`crate::validate`].
    pub fn validate(&self, text: &str) -> bool {
        crate::validate(text)
    }

    /// Rolls `text`, or `1d20` if `text` does not parse.
    ///
    /// The returned outcome keeps `text` as its formula either way.
    ///
    /// # Examples
    /// ```
    /// use storydice::DiceEngine;
    ///
    /// let outcome = DiceEngine::new().roll("not-a-formula", None);
    ///
    /// assert_eq!(outcome.formula, "not-a-formula");
    /// assert_eq!(outcome.results.len(), 1);
    /// assert!((1..=20).contains(&outcome.total));
    /// assert!(outcome.is_fallback());
    /// ```
    pub fn roll(&self, text: &str, context: Option<&str>) -> RollOutcome {
        match crate::parse(text) {
            Ok(expression) => self.roll_expression(text, expression, context),
            Err(err) => {
                tracing::debug!(formula = text, error = %err, "formula did not parse, rolling {}", DiceExpression::FALLBACK);

                let mut outcome = self.roll_expression(text, DiceExpression::FALLBACK, context);
                outcome.fallback = true;
                outcome
            }
        }
    }

    /// Rolls an already parsed expression, recording `text` as its formula.
    pub fn roll_expression(&self, text: &str, expression: DiceExpression, context: Option<&str>) -> RollOutcome {
        let results = expression.roll_with(self.random.as_ref());
        let outcome = RollOutcome::new(text, expression, results, context.map(str::to_owned));

        tracing::trace!(formula = text, total = outcome.total, results = ?outcome.results, "rolled");
        outcome
    }

    /// One [`DiceEngine::roll`] per formula, in input order, without context.
    pub fn roll_multiple<I, S>(&self, texts: I) -> Vec<RollOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        texts.into_iter()
            .map(|text| self.roll(text.as_ref(), None))
            .collect()
    }

    /// Statistics of `text`'s total, or `None` if it does not parse.
    pub fn analyze(&self, text: &str) -> Option<FormulaStatistics> {
        crate::parse(text)
            .ok()
            .map(|expr| FormulaStatistics::from(&expr))
    }
}

impl Default for DiceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DiceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceEngine").finish_non_exhaustive()
    }
}
