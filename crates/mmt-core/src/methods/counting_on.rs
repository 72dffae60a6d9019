use super::{ArithmeticProblem, Operator, SolvingMethod, tiered};

/// Find a difference by counting up from the smaller number in friendly hops
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingOn;

impl SolvingMethod for CountingOn {
    fn id(&self) -> &'static str {
        "counting-on"
    }

    fn name(&self) -> &'static str {
        "Count on"
    }

    /// Subtraction where the two numbers are close together
    fn can_apply(&self, problem: &ArithmeticProblem) -> bool {
        problem.op == Operator::Subtract
            && problem.is_natural()
            && problem.b > 0
            && (problem.a - problem.b) * 2 <= problem.a
    }

    fn score(&self, problem: &ArithmeticProblem) -> u8 {
        tiered((problem.a - problem.b).abs(), [95, 85, 70, 50])
    }

    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String> {
        let ArithmeticProblem { a, op, b } = *problem;
        let answer = problem.answer();

        if a == b {
            return vec![
                "Both numbers are the same, so there is nothing to count.".to_string(),
                format!("{a} {op} {b} = {answer}"),
            ];
        }

        let mut steps = vec![format!("Start at {b} and count up to {a}.")];
        let mut at = b;
        let mut hops = Vec::new();

        let mut hop_to = |target: i64, steps: &mut Vec<String>| {
            if target > at && target <= a {
                let hop = target - at;
                steps.push(format!("{at} + {hop} = {target}"));
                hops.push(hop);
                at = target;
            }
        };

        hop_to((b / 10 + 1) * 10, &mut steps);
        hop_to(a / 10 * 10, &mut steps);
        hop_to(a, &mut steps);

        if hops.len() > 1 {
            let joined = hops
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" + ");
            steps.push(format!("Add up the hops: {joined} = {answer}"));
        }
        steps.push(format!("{a} {op} {b} = {answer}"));
        steps
    }
}
