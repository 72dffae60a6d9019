//! Built-in fact generators. Difficulty level widens the operand range.

use mmt_store::{MAX_LEVEL, MIN_LEVEL, Question};
use rand::{Rng, RngCore};
use serde_json::json;

use crate::skills::FactGenerator;

fn clamp_level(level: u8) -> i64 {
    i64::from(level.clamp(MIN_LEVEL, MAX_LEVEL))
}

fn addition(a: i64, b: i64, hint: String) -> Question {
    Question {
        text: format!("{a} + {b} = ?"),
        answer: a + b,
        hint,
        meta: json!({ "a": a, "op": "+", "b": b }),
    }
}

fn subtraction(a: i64, b: i64, hint: String) -> Question {
    Question {
        text: format!("{a} - {b} = ?"),
        answer: a - b,
        hint,
        meta: json!({ "a": a, "op": "-", "b": b }),
    }
}

/// `n + n`, with `n` up to 5 per level
#[derive(Debug, Clone, Copy)]
pub struct Doubles;

impl FactGenerator for Doubles {
    fn generate(&self, level: u8, rng: &mut dyn RngCore) -> Question {
        let n = rng.gen_range(1..=5 * clamp_level(level));
        addition(n, n, format!("Double {n} means {n} two times."))
    }
}

/// `n + (n + 1)`
#[derive(Debug, Clone, Copy)]
pub struct NearDoubles;

impl FactGenerator for NearDoubles {
    fn generate(&self, level: u8, rng: &mut dyn RngCore) -> Question {
        let n = rng.gen_range(1..=5 * clamp_level(level));
        addition(
            n,
            n + 1,
            format!("Think double {n}, then add one more."),
        )
    }
}

/// Missing addend up to the next multiple of ten
#[derive(Debug, Clone, Copy)]
pub struct MakeTen;

impl FactGenerator for MakeTen {
    fn generate(&self, level: u8, rng: &mut dyn RngCore) -> Question {
        let target = 10 * rng.gen_range(1..=clamp_level(level));
        let a = rng.gen_range(target - 9..target);
        let b = target - a;

        Question {
            text: format!("{a} + ? = {target}"),
            answer: b,
            hint: format!("How many more does {a} need to reach {target}?"),
            meta: json!({ "a": a, "op": "+", "b": b, "target": target }),
        }
    }
}

/// Two-addend sums up to 20 per level
#[derive(Debug, Clone, Copy)]
pub struct AddWithin100;

impl FactGenerator for AddWithin100 {
    fn generate(&self, level: u8, rng: &mut dyn RngCore) -> Question {
        let max = 20 * clamp_level(level);
        let a = rng.gen_range(1..max);
        let b = rng.gen_range(1..=max - a);
        addition(a, b, "Add the tens first, then the ones.".to_string())
    }
}

/// Differences with a minuend up to 20 per level
#[derive(Debug, Clone, Copy)]
pub struct SubtractWithin100;

impl FactGenerator for SubtractWithin100 {
    fn generate(&self, level: u8, rng: &mut dyn RngCore) -> Question {
        let max = 20 * clamp_level(level);
        let a = rng.gen_range(2..=max);
        let b = rng.gen_range(1..a);
        subtraction(
            a,
            b,
            format!("Count up from {b} to {a}."),
        )
    }
}
