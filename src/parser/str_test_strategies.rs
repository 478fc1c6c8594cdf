use proptest::prelude::*;


pub(crate) fn simple_dice_strategy() -> impl Strategy<Value = String> {
    (1u32..=1000, 2u32..=1_000_000)
        .prop_map(|(count, sides)| format!("{count}d{sides}"))
}

pub(crate) fn dice_with_modifier_strategy() -> impl Strategy<Value = String> {
    (
        simple_dice_strategy(),
        prop_oneof![Just("+"), Just("-")],
        0u32..=1_000_000
    ).prop_map(|(dice, sign, modifier)| format!("{dice}{sign}{modifier}"))
}

/// Formulas that match the grammar and satisfy the expression invariants.
pub(crate) fn formula_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        simple_dice_strategy(),
        dice_with_modifier_strategy(),
    ]
}

/// Strings that do not match the grammar.
pub(crate) fn malformed_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (2u32..=100).prop_map(|sides| format!("d{sides}")),
        formula_strategy().prop_map(|f| format!("{f} ")),
        formula_strategy().prop_map(|f| format!(" {f}")),
        formula_strategy().prop_map(|f| format!("{f}*2")),
        formula_strategy().prop_map(|f| format!("{f}{f}")),
        formula_strategy().prop_map(|f| f.replace('d', "D")),
        simple_dice_strategy().prop_map(|f| format!("{f} + 3")),
        simple_dice_strategy().prop_map(|f| format!("{f}+")),
        "[a-ce-z]{1,8}",
    ]
}
