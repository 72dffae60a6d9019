use super::{ArithmeticProblem, Operator, SolvingMethod, nearest_round, rounding_distance, tiered};

/// Shift both numbers by the same amount so the subtrahend becomes round
#[derive(Debug, Clone, Copy, Default)]
pub struct SameDifference;

impl SolvingMethod for SameDifference {
    fn id(&self) -> &'static str {
        "same-difference"
    }

    fn name(&self) -> &'static str {
        "Same difference"
    }

    fn can_apply(&self, problem: &ArithmeticProblem) -> bool {
        problem.op == Operator::Subtract
            && problem.is_natural()
            && rounding_distance(problem.b).is_some()
    }

    fn score(&self, problem: &ArithmeticProblem) -> u8 {
        let distance = rounding_distance(problem.b).unwrap_or(i64::MAX);
        tiered(distance, [90, 80, 65, 50])
    }

    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String> {
        let ArithmeticProblem { a, op, b } = *problem;
        let answer = problem.answer();

        if rounding_distance(b).is_none() {
            return vec![format!("{a} {op} {b} = {answer}")];
        }

        let rounded = nearest_round(b);
        let shift = rounded - b;
        let shifted_a = a + shift;
        let (verb, amount) = if shift >= 0 {
            ("Add", shift)
        } else {
            ("Take", -shift)
        };
        let to_both = if shift >= 0 { "to both" } else { "from both" };

        vec![
            format!("{verb} {amount} {to_both} numbers so {b} becomes {rounded}."),
            format!("{a} {op} {b} becomes {shifted_a} {op} {rounded}."),
            format!("The difference stays the same: {shifted_a} {op} {rounded} = {answer}"),
            format!("{a} {op} {b} = {answer}"),
        ]
    }
}
