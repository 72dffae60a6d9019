use super::{
    ArithmeticProblem, Operator, SolvingMethod, adjustment, nearest_round, rounding_distance,
    tiered,
};

/// Round one operand to a friendly number, solve, then undo the rounding.
///
/// The operand closest to its round number is the one adjusted; on a tie the
/// second operand is preferred.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compensation;

impl Compensation {
    /// `(adjust_first_operand, distance)` for the operand to round
    fn pick(problem: &ArithmeticProblem) -> Option<(bool, i64)> {
        match (rounding_distance(problem.a), rounding_distance(problem.b)) {
            (Some(da), Some(db)) if da < db => Some((true, da)),
            (_, Some(db)) => Some((false, db)),
            (Some(da), None) => Some((true, da)),
            (None, None) => None,
        }
    }
}

impl SolvingMethod for Compensation {
    fn id(&self) -> &'static str {
        "compensation"
    }

    fn name(&self) -> &'static str {
        "Round and adjust"
    }

    fn can_apply(&self, problem: &ArithmeticProblem) -> bool {
        problem.is_natural() && Self::pick(problem).is_some()
    }

    fn score(&self, problem: &ArithmeticProblem) -> u8 {
        let distance = [problem.a, problem.b]
            .into_iter()
            .filter_map(rounding_distance)
            .min()
            .unwrap_or(i64::MAX);
        tiered(distance, [95, 85, 70, 50])
    }

    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String> {
        let ArithmeticProblem { a, op, b } = *problem;
        let answer = problem.answer();

        let Some((adjust_a, _)) = Self::pick(problem) else {
            return vec![format!("{a} {op} {b} = {answer}")];
        };

        let (original, rounded) = if adjust_a {
            (a, nearest_round(a))
        } else {
            (b, nearest_round(b))
        };
        let (left, right) = if adjust_a { (rounded, b) } else { (a, rounded) };
        let partial = op.apply(left, right);
        let fix = answer - partial;

        let mut steps = vec![
            format!("Round {original} to {rounded}."),
            format!("{left} {op} {right} = {partial}"),
        ];

        let reason = match (op, adjust_a, rounded > original) {
            (Operator::Add, _, true) | (Operator::Subtract, true, true) => {
                format!("{rounded} is {} more than {original}", rounded - original)
            }
            (Operator::Add, _, false) | (Operator::Subtract, true, false) => {
                format!("{rounded} is {} less than {original}", original - rounded)
            }
            (Operator::Subtract, false, true) => {
                format!("You took away {} too many", rounded - original)
            }
            (Operator::Subtract, false, false) => {
                format!("You took away {} too few", original - rounded)
            }
        };
        steps.push(format!(
            "{reason}, so {}: {partial} {} {} = {answer}",
            adjustment(fix),
            if fix >= 0 { '+' } else { '-' },
            fix.abs()
        ));
        steps.push(format!("{a} {op} {b} = {answer}"));
        steps
    }
}
