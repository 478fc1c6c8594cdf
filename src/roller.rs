//! A dice-roller session: the current formula, roll history and recently used formulas.
//!
//! Unlike [`DiceEngine::roll`], [`DiceRoller::roll`] refuses malformed formulas
//! instead of rolling `1d20`.

use std::ops::Deref;
use crate::{DiceEngine, Error, FormulaStatistics, RollOutcome, RollerConfig};


/// Rolls ordered newest first, optionally capped.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollHistory {
    rolls: Vec<RollOutcome>,
    capacity: Option<usize>
}

impl RollHistory {
    /// An empty history keeping at most `capacity` rolls, or all of them for `None`.
    pub fn new(capacity: Option<usize>) -> Self {
        Self { rolls: Vec::new(), capacity }
    }

    /// Most recent roll.
    pub fn latest(&self) -> Option<&RollOutcome> {
        self.rolls.first()
    }

    /// Records `outcome` as the newest roll.
    pub fn push(&mut self, outcome: RollOutcome) {
        self.rolls.insert(0, outcome);
        self.enforce_capacity();
    }

    /// Puts a batch in front of the existing rolls, keeping the batch's own order.
    pub fn push_batch(&mut self, outcomes: impl IntoIterator<Item = RollOutcome>) {
        self.rolls.splice(0..0, outcomes);
        self.enforce_capacity();
    }

    /// Removes the roll at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<RollOutcome> {
        (index < self.rolls.len()).then(|| self.rolls.remove(index))
    }

    /// Forgets every roll.
    pub fn clear(&mut self) {
        self.rolls.clear();
    }

    /// The rolls, newest first.
    pub fn into_vec(self) -> Vec<RollOutcome> {
        self.rolls
    }

    fn enforce_capacity(&mut self) {
        if let Some(capacity) = self.capacity {
            self.rolls.truncate(capacity);
        }
    }
}

impl From<Vec<RollOutcome>> for RollHistory {
    /// Restores an uncapped history, newest first.
    fn from(rolls: Vec<RollOutcome>) -> Self {
        Self { rolls, capacity: None }
    }
}

impl Deref for RollHistory {
    type Target = [RollOutcome];

    fn deref(&self) -> &Self::Target {
        &self.rolls
    }
}


/// Most recently rolled formulas, newest first, without duplicates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecentFormulas {
    formulas: Vec<String>,
    capacity: usize
}

impl RecentFormulas {
    /// Seeds the list with `initial`, deduplicated and cut to `capacity`.
    pub fn new<I, S>(capacity: usize, initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        let mut recent = Self { formulas: Vec::new(), capacity };
        for formula in initial {
            let formula = formula.into();
            if !recent.formulas.contains(&formula) {
                recent.formulas.push(formula);
            }
        }
        recent.formulas.truncate(capacity);
        recent
    }

    /// Moves `formula` to the front, adding it if new and dropping the oldest past capacity.
    ///
    /// # Examples
    /// ```
    /// use storydice::RecentFormulas;
    ///
    /// let mut recent = RecentFormulas::new(3, ["1d20", "2d6", "1d100"]);
    /// recent.promote("2d6");
    /// recent.promote("1d4");
    ///
    /// assert_eq!(&recent[..], ["1d4", "2d6", "1d20"]);
    /// ```
    pub fn promote(&mut self, formula: &str) {
        self.formulas.retain(|existing| existing != formula);
        self.formulas.insert(0, formula.to_owned());
        self.formulas.truncate(self.capacity);
    }

    /// Most formulas kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Deref for RecentFormulas {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.formulas
    }
}


/// State behind a dice-roller screen.
///
/// # Examples
/// ```
/// use storydice::{DiceRoller, RollerConfig};
///
/// let mut roller = DiceRoller::new(RollerConfig::default());
///
/// let outcome = roller.roll(Some("3d6+3")).unwrap();
/// assert_eq!(outcome.results.len(), 3);
/// assert_eq!(roller.history().len(), 1);
/// assert_eq!(roller.recent_formulas()[0], "3d6+3");
///
/// assert!(roller.roll(Some("3d6 + 3")).is_err());
/// assert_eq!(roller.history().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiceRoller {
    engine: DiceEngine,
    config: RollerConfig,
    current_formula: String,
    history: RollHistory,
    recent: RecentFormulas
}

impl DiceRoller {
    /// A session on a [`DiceEngine::new`] engine.
    pub fn new(config: RollerConfig) -> Self {
        Self::with_engine(DiceEngine::new(), config)
    }

    /// A session rolling through `engine`.
    pub fn with_engine(engine: DiceEngine, config: RollerConfig) -> Self {
        let history = RollHistory::new(config.history_capacity);
        let recent = RecentFormulas::new(config.recent_capacity, config.recent_formulas.iter().cloned());

        Self {
            engine,
            current_formula: config.default_formula.clone(),
            config,
            history,
            recent
        }
    }

    /// Replaces the history, e.g. with one loaded from storage. Excess rolls are dropped.
    pub fn restore_history(&mut self, rolls: Vec<RollOutcome>) {
        self.history = RollHistory::new(self.config.history_capacity);
        self.history.push_batch(rolls);
    }

    /// Rolls `formula`, or the current formula when `None`, and records the outcome.
    ///
    /// # Errors
    /// [`Error::InvalidFormula`] when the formula does not parse. Nothing is recorded then.
    pub fn roll(&mut self, formula: Option<&str>) -> Result<RollOutcome, Error> {
        let formula = formula.unwrap_or(self.current_formula.as_str()).to_owned();

        let expression = match self.engine.parse(&formula) {
            Ok(expression) => expression,
            Err(err) => {
                tracing::warn!(formula = %formula, error = %err, "refusing to roll malformed formula");
                return Err(Error::InvalidFormula(formula));
            }
        };

        let outcome = self.engine.roll_expression(&formula, expression, Some(&self.config.context_label));

        self.history.push(outcome.clone());
        self.recent.promote(&formula);
        tracing::debug!(formula = %formula, total = outcome.total, history = self.history.len(), "recorded roll");

        Ok(outcome)
    }

    /// Rolls every formula with the engine's fallback policy and records the
    /// batch at the front of the history in input order.
    pub fn roll_multiple<I, S>(&mut self, formulas: I) -> Vec<RollOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let outcomes = self.engine.roll_multiple(formulas);
        self.history.push_batch(outcomes.iter().cloned());
        tracing::debug!(rolled = outcomes.len(), history = self.history.len(), "recorded roll batch");

        outcomes
    }

    /// See [`DiceEngine::analyze`].
    pub fn analyze(&self, formula: &str) -> Option<FormulaStatistics> {
        self.engine.analyze(formula)
    }

    /// Forgets every recorded roll.
    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!("cleared roll history");
    }

    /// Deletes the roll at `index` (0 is the newest). Out of range is a no-op.
    pub fn delete_roll(&mut self, index: usize) -> Option<RollOutcome> {
        let removed = self.history.remove(index);
        if removed.is_some() {
            tracing::debug!(index, "deleted roll");
        }
        removed
    }

    /// Formula used by [`DiceRoller::roll`] when given `None`.
    pub fn set_current_formula(&mut self, formula: impl Into<String>) {
        self.current_formula = formula.into();
    }

    /// The formula rolled by default.
    pub fn current_formula(&self) -> &str {
        &self.current_formula
    }

    /// Newest recorded roll.
    pub fn last_roll(&self) -> Option<&RollOutcome> {
        self.history.latest()
    }

    /// Recorded rolls, newest first.
    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    /// Recently rolled formulas.
    pub fn recent_formulas(&self) -> &RecentFormulas {
        &self.recent
    }

    /// Settings the session was created with.
    pub fn config(&self) -> &RollerConfig {
        &self.config
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(RollerConfig::default())
    }
}


#[cfg(test)]
mod test {
    use std::sync::Arc;
    use proptest::prelude::*;
    use super::*;
    use crate::expression_test_strategies::expression_text_strategy;
    use crate::random::FixedRandom;


    fn fixed_roller(face: u32, config: RollerConfig) -> DiceRoller {
        DiceRoller::with_engine(DiceEngine::with_random(Arc::new(FixedRandom(face))), config)
    }

    proptest! {
        #[test]
        fn test_recent_formulas_stay_unique_and_capped(
            formulas in prop::collection::vec(expression_text_strategy(), 0..30),
            capacity in 1usize..=10
        ) {
            let mut recent = RecentFormulas::new(capacity, Vec::<String>::new());
            for formula in &formulas {
                recent.promote(formula);
            }

            prop_assert!(recent.len() <= capacity);
            if let Some(last) = formulas.last() {
                prop_assert_eq!(&recent[0], last);
            }
            for (i, formula) in recent.iter().enumerate() {
                prop_assert!(!recent[i + 1..].contains(formula));
            }
        }

        #[test]
        fn test_history_respects_capacity(count in 0usize..40, capacity in 0usize..10) {
            let mut roller = fixed_roller(1, RollerConfig::default().with_history_capacity(Some(capacity)));

            for _ in 0..count {
                roller.roll(Some("1d6")).unwrap();
            }

            prop_assert_eq!(roller.history().len(), count.min(capacity));
        }
    }

    #[test]
    fn test_roll_uses_current_formula_and_context() {
        let config = RollerConfig::default()
            .with_default_formula("2d6+3")
            .with_context_label("chapter 1");
        let mut roller = fixed_roller(4, config);

        let outcome = roller.roll(None).unwrap();

        assert_eq!(outcome.formula, "2d6+3");
        assert_eq!(outcome.results, vec![7, 7]);
        assert_eq!(outcome.context.as_deref(), Some("chapter 1"));
        assert_eq!(roller.last_roll(), Some(&outcome));
    }

    #[test]
    fn test_invalid_formula_is_refused() {
        let mut roller = DiceRoller::default();
        let recent_before = roller.recent_formulas().clone();

        for formula in ["2d6 + 3", "d20", "", "0d6"] {
            let err = roller.roll(Some(formula)).unwrap_err();
            assert_eq!(err, Error::InvalidFormula(formula.into()));
        }

        assert!(roller.history().is_empty());
        assert_eq!(roller.recent_formulas(), &recent_before);
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut roller = fixed_roller(2, RollerConfig::default());

        roller.roll(Some("1d4")).unwrap();
        roller.roll(Some("1d8")).unwrap();

        let formulas: Vec<&str> = roller.history().iter().map(|o| o.formula.as_str()).collect();
        assert_eq!(formulas, ["1d8", "1d4"]);
    }

    #[test]
    fn test_roll_multiple_inserts_batch_in_order() {
        let mut roller = fixed_roller(3, RollerConfig::default());
        roller.roll(Some("1d4")).unwrap();

        let outcomes = roller.roll_multiple(["1d20", "2d6+1", "oops"]);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[2].results, vec![3]);
        assert!(outcomes[2].is_fallback());

        let formulas: Vec<&str> = roller.history().iter().map(|o| o.formula.as_str()).collect();
        assert_eq!(formulas, ["1d20", "2d6+1", "oops", "1d4"]);
        assert_eq!(roller.recent_formulas()[0], "1d4");
    }

    #[test]
    fn test_recent_formulas_promoted_and_capped() {
        let config = RollerConfig::default().with_recent_capacity(3);
        let mut roller = fixed_roller(1, config);

        assert_eq!(&roller.recent_formulas()[..], ["1d20", "2d6", "1d100"]);

        roller.roll(Some("2d6")).unwrap();
        roller.roll(Some("1d4")).unwrap();

        assert_eq!(&roller.recent_formulas()[..], ["1d4", "2d6", "1d20"]);
        assert_eq!(roller.recent_formulas().capacity(), 3);
    }

    #[test]
    fn test_delete_and_clear() {
        let mut roller = fixed_roller(1, RollerConfig::default());
        roller.roll_multiple(["1d4", "1d6", "1d8"]);

        let removed = roller.delete_roll(1).unwrap();
        assert_eq!(removed.formula, "1d6");
        assert_eq!(roller.history().len(), 2);

        assert!(roller.delete_roll(5).is_none());
        assert_eq!(roller.history().len(), 2);

        roller.clear_history();
        assert!(roller.history().is_empty());
        assert!(roller.last_roll().is_none());
    }

    #[test]
    fn test_set_current_formula() {
        let mut roller = fixed_roller(6, RollerConfig::default());
        roller.set_current_formula("1d12+2");

        assert_eq!(roller.current_formula(), "1d12+2");
        assert_eq!(roller.roll(None).unwrap().total, 8);
    }

    #[test]
    fn test_restore_history() {
        let mut source = fixed_roller(1, RollerConfig::default());
        let saved = source.roll_multiple(["1d4", "1d6", "1d8"]);

        let mut roller = DiceRoller::new(RollerConfig::default().with_history_capacity(Some(2)));
        roller.restore_history(saved.clone());

        assert_eq!(&roller.history()[..], &saved[..2]);
        assert_eq!(RollHistory::from(saved.clone()).into_vec(), saved);
    }

    #[test]
    fn test_analyze_through_roller() {
        let roller = DiceRoller::default();

        assert_eq!(roller.analyze("1d20").map(|s| s.average), Some(10.5));
        assert!(roller.analyze("garbage").is_none());
    }

    #[test]
    fn test_recent_formulas_dedup_initial() {
        let recent = RecentFormulas::new(10, ["1d20", "1d20", "2d6"]);

        assert_eq!(&recent[..], ["1d20", "2d6"]);
    }
}
