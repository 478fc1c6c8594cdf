/// Settings for a [`crate::DiceRoller`] session.
///
/// Deserializable (with the `serde` feature) so a host app can keep it next to
/// its other preferences. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RollerConfig {
    /// Formula selected when the session starts.
    pub default_formula: String,
    /// Quick-pick formulas offered before anything has been rolled.
    pub recent_formulas: Vec<String>,
    /// How many recent formulas are remembered.
    pub recent_capacity: usize,
    /// `None` keeps every roll.
    pub history_capacity: Option<usize>,
    /// Context attached to rolls made through [`crate::DiceRoller::roll`].
    pub context_label: String
}

impl RollerConfig {
    /// Sets [`RollerConfig::default_formula`].
    pub fn with_default_formula(mut self, formula: impl Into<String>) -> Self {
        self.default_formula = formula.into();
        self
    }

    /// Sets [`RollerConfig::recent_formulas`].
    pub fn with_recent_formulas<I, S>(mut self, formulas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.recent_formulas = formulas.into_iter().map(Into::into).collect();
        self
    }

    /// Sets [`RollerConfig::recent_capacity`].
    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent_capacity = capacity;
        self
    }

    /// Sets [`RollerConfig::history_capacity`].
    pub fn with_history_capacity(mut self, capacity: Option<usize>) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets [`RollerConfig::context_label`].
    pub fn with_context_label(mut self, label: impl Into<String>) -> Self {
        self.context_label = label.into();
        self
    }
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            default_formula: "1d20".into(),
            recent_formulas: ["1d20", "2d6", "1d100", "3d6+3", "1d12+2"]
                .into_iter()
                .map(String::from)
                .collect(),
            recent_capacity: 10,
            history_capacity: None,
            context_label: "Roll from app".into()
        }
    }
}
