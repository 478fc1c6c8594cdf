use proptest::prelude::*;
use crate::expression::{DiceExpression, Sign};


pub(crate) fn sign_strategy() -> impl Strategy<Value = Sign> {
    prop_oneof![Just(Sign::Plus), Just(Sign::Minus)]
}

pub(crate) fn expression_strategy() -> impl Strategy<Value = DiceExpression> {
    (1..=50u32, 2..=100_000u32, sign_strategy(), 0..=100_000u32)
        .prop_map(|(count, sides, sign, modifier)| {
            DiceExpression::builder(sides)
                .count(count)
                .modifier(sign, modifier)
                .build()
                .unwrap()
        })
}

pub(crate) fn expression_text_strategy() -> impl Strategy<Value = String> {
    expression_strategy().prop_map(|expr| expr.to_string())
}
