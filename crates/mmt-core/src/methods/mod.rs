//! Worked solution methods and the suitability scorer that ranks them.
//!
//! Every method is a [`SolvingMethod`] registered in a [`MethodRegistry`] at
//! startup. For a given [`ArithmeticProblem`] the registry keeps the methods
//! whose predicate accepts the problem and orders them by a per-method heuristic
//! score. [`personalize`] then folds in how comfortable the learner is with each
//! method, so a familiar method can outrank a slightly better fitting one.

mod column;
mod compensation;
mod counting_on;
mod partitioning;
mod same_difference;
mod sequencing;

pub use column::Column;
pub use compensation::Compensation;
pub use counting_on::CountingOn;
pub use partitioning::Partitioning;
pub use same_difference::SameDifference;
pub use sequencing::Sequencing;

use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Operation of an [`ArithmeticProblem`], serialized as its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }

    /// `a op b`, unchecked
    pub const fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A two-operand addition or subtraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArithmeticProblem {
    pub a: i64,
    pub op: Operator,
    pub b: i64,
}

impl ArithmeticProblem {
    pub const fn new(a: i64, op: Operator, b: i64) -> Self {
        Self { a, op, b }
    }

    pub const fn answer(&self) -> i64 {
        self.op.apply(self.a, self.b)
    }

    /// Both operands non-negative, and no negative result for subtraction
    pub(crate) const fn is_natural(&self) -> bool {
        self.a >= 0
            && self.b >= 0
            && match self.op {
                Operator::Add => true,
                Operator::Subtract => self.a >= self.b,
            }
    }
}

impl fmt::Display for ArithmeticProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.op, self.b)
    }
}

/// A mental or written method for solving an addition or subtraction
pub trait SolvingMethod: Send + Sync {
    /// Stable id used as the comfort map key
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// Pure predicate, checked before [`SolvingMethod::score`] is called
    fn can_apply(&self, problem: &ArithmeticProblem) -> bool;

    /// Heuristic fit in 0..=100
    fn score(&self, problem: &ArithmeticProblem) -> u8;

    /// Worked steps, ending with the full equation
    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String>;
}

/// A ranked applicable method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCandidate {
    pub method_id: String,
    pub suitability_score: u8,
    /// Set once comfort has been blended in by [`personalize`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_score: Option<f64>,
}

/// How at ease a learner is with a method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortLevel {
    #[default]
    Novice,
    Practising,
    Confident,
    Expert,
}

impl ComfortLevel {
    /// Points added to the suitability score
    pub const fn bonus(self) -> f64 {
        match self {
            Self::Novice => 0.0,
            Self::Practising => 15.0,
            Self::Confident => 30.0,
            Self::Expert => 40.0,
        }
    }
}

/// A learner's history with one method
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodComfort {
    #[serde(default)]
    pub level: ComfortLevel,
    /// Fraction of correct answers with this method, 0.0-1.0
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub times_used: u32,
}

impl MethodComfort {
    /// Personalization bonus added to the suitability score
    pub fn bonus(&self) -> f64 {
        let accuracy = if self.accuracy.is_finite() {
            self.accuracy.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let usage = (f64::from(self.times_used) * 2.0).min(20.0);

        self.level.bonus() + accuracy * 20.0 + usage
    }
}

/// Comfort per method id
pub type ComfortMap = HashMap<String, MethodComfort>;

/// Best method for a problem, with the full ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub method_id: String,
    pub method_name: String,
    pub answer: i64,
    pub steps: Vec<String>,
    pub candidates: Vec<MethodCandidate>,
}

/// Solving methods in registration order
#[derive(Default, Clone)]
pub struct MethodRegistry {
    methods: Vec<Arc<dyn SolvingMethod>>,
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.methods.iter().map(|m| m.id()))
            .finish()
    }
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in method. Column is always applicable, so
    /// every well-formed problem gets at least one candidate.
    pub fn with_default_methods() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Compensation));
        registry.register(Arc::new(CountingOn));
        registry.register(Arc::new(SameDifference));
        registry.register(Arc::new(Column));
        registry.register(Arc::new(Partitioning));
        registry.register(Arc::new(Sequencing));
        registry
    }

    /// Add a method, replacing one with the same id in place
    pub fn register(&mut self, method: Arc<dyn SolvingMethod>) {
        match self.methods.iter_mut().find(|m| m.id() == method.id()) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }

    pub fn get(&self, method_id: &str) -> Option<&dyn SolvingMethod> {
        self.methods
            .iter()
            .find(|m| m.id() == method_id)
            .map(|m| &**m)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.iter().map(|m| m.id())
    }

    /// Methods that can solve `problem`, best fit first.
    ///
    /// Equal scores keep registration order. Empty when no predicate matches.
    pub fn applicable_methods(&self, problem: &ArithmeticProblem) -> Vec<MethodCandidate> {
        let mut candidates: Vec<MethodCandidate> = self
            .methods
            .iter()
            .filter(|m| m.can_apply(problem))
            .map(|m| MethodCandidate {
                method_id: m.id().to_string(),
                suitability_score: m.score(problem).min(100),
                user_score: None,
            })
            .collect();

        candidates.sort_by(|a, b| b.suitability_score.cmp(&a.suitability_score));
        candidates
    }

    /// Rank the applicable methods for this learner and solve with the winner
    pub fn recommend(
        &self,
        problem: &ArithmeticProblem,
        comfort: &ComfortMap,
    ) -> Option<Recommendation> {
        let candidates = personalize(self.applicable_methods(problem), comfort);
        let best = self.get(&candidates.first()?.method_id)?;

        tracing::debug!(
            problem = %problem,
            method = best.id(),
            candidates = candidates.len(),
            "Recommended method"
        );

        Some(Recommendation {
            method_id: best.id().to_string(),
            method_name: best.name().to_string(),
            answer: problem.answer(),
            steps: best.solve(problem),
            candidates,
        })
    }
}

/// Blend each candidate's suitability with the learner's comfort and re-rank.
///
/// `user_score = suitability + level bonus + accuracy * 20 + min(times_used * 2, 20)`.
/// Methods missing from `comfort` count as novice with no history.
pub fn personalize(
    mut candidates: Vec<MethodCandidate>,
    comfort: &ComfortMap,
) -> Vec<MethodCandidate> {
    for candidate in &mut candidates {
        let history = comfort
            .get(&candidate.method_id)
            .copied()
            .unwrap_or_default();

        if !(0.0..=1.0).contains(&history.accuracy) {
            tracing::warn!(
                method = %candidate.method_id,
                accuracy = history.accuracy,
                "Method accuracy out of range, clamping"
            );
        }

        candidate.user_score = Some(f64::from(candidate.suitability_score) + history.bonus());
    }

    candidates.sort_by(|a, b| {
        b.user_score
            .unwrap_or_default()
            .total_cmp(&a.user_score.unwrap_or_default())
    });
    candidates
}

const PLACE_NAMES: [&str; 7] = [
    "Ones",
    "Tens",
    "Hundreds",
    "Thousands",
    "Ten thousands",
    "Hundred thousands",
    "Millions",
];

pub(crate) fn place_name(index: usize) -> &'static str {
    PLACE_NAMES.get(index).copied().unwrap_or("Next place")
}

/// Decimal digits, least significant first
pub(crate) fn digits(n: i64) -> Vec<i64> {
    let mut n = n.abs();
    let mut out = vec![n % 10];
    n /= 10;
    while n > 0 {
        out.push(n % 10);
        n /= 10;
    }
    out
}

pub(crate) fn digit_count(n: i64) -> usize {
    digits(n).len()
}

/// Non-zero place values, largest first: 342 -> [300, 40, 2]
pub(crate) fn place_parts(n: i64) -> Vec<i64> {
    let mut parts: Vec<i64> = digits(n)
        .into_iter()
        .enumerate()
        .map(|(i, d)| d * 10_i64.pow(i as u32))
        .filter(|&p| p != 0)
        .collect();
    parts.reverse();
    parts
}

/// Power of ten a number is naturally rounded to: 10 below 100, 100 below 1000, ...
pub(crate) const fn round_base(n: i64) -> i64 {
    match n.unsigned_abs() {
        0..=99 => 10,
        100..=999 => 100,
        1_000..=9_999 => 1_000,
        _ => 10_000,
    }
}

/// Nearest non-zero multiple of the number's round base (`n` must be non-negative)
pub(crate) const fn nearest_round(n: i64) -> i64 {
    let base = round_base(n);
    let rounded = (n + base / 2) / base * base;
    if rounded == 0 { base } else { rounded }
}

/// Distance to the nearest round number, if the number is close enough to one
/// to be worth rounding. Already-round numbers return `None`.
pub(crate) fn rounding_distance(n: i64) -> Option<i64> {
    if n < 0 {
        return None;
    }
    let distance = (n - nearest_round(n)).abs();
    // Two-digit operands only round within 3 of a ten: 44 -> 40 is no easier than
    // adding 44 directly. The ≤10 and ≤20 tiers are reachable from 100 upwards.
    let window = (round_base(n) / 4).max(3);
    (distance > 0 && distance <= window).then_some(distance)
}

/// Score tiers for a distance: ≤5, ≤10, ≤20, beyond
pub(crate) const fn tiered(distance: i64, scores: [u8; 4]) -> u8 {
    match distance {
        d if d <= 5 => scores[0],
        d if d <= 10 => scores[1],
        d if d <= 20 => scores[2],
        _ => scores[3],
    }
}

/// "add 3" / "take away 3" for a signed adjustment
pub(crate) fn adjustment(delta: i64) -> String {
    if delta >= 0 {
        format!("add {delta}")
    } else {
        format!("take away {}", -delta)
    }
}
