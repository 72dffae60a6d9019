use super::{ArithmeticProblem, SolvingMethod, digit_count, place_parts};

/// Keep the first number whole and add or subtract the second one place at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequencing;

impl SolvingMethod for Sequencing {
    fn id(&self) -> &'static str {
        "sequencing"
    }

    fn name(&self) -> &'static str {
        "Sequencing"
    }

    fn can_apply(&self, problem: &ArithmeticProblem) -> bool {
        problem.is_natural() && problem.b >= 10
    }

    fn score(&self, problem: &ArithmeticProblem) -> u8 {
        match digit_count(problem.a.max(problem.b)) {
            2 => 80,
            3 => 70,
            _ => 60,
        }
    }

    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String> {
        let ArithmeticProblem { a, op, b } = *problem;
        let answer = problem.answer();
        let parts = place_parts(b);

        let mut steps = vec![format!(
            "Keep {a} whole and break {b} into parts: {}.",
            parts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )];

        let mut at = a;
        for part in parts {
            let next = op.apply(at, part);
            steps.push(format!("{at} {op} {part} = {next}"));
            at = next;
        }

        steps.push(format!("{a} {op} {b} = {answer}"));
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::Operator;

    #[test]
    fn test_applicability() {
        assert!(Sequencing.can_apply(&ArithmeticProblem::new(58, Operator::Add, 39)));
        assert!(Sequencing.can_apply(&ArithmeticProblem::new(502, Operator::Subtract, 498)));
        assert!(!Sequencing.can_apply(&ArithmeticProblem::new(58, Operator::Add, 9)));
        assert!(!Sequencing.can_apply(&ArithmeticProblem::new(39, Operator::Subtract, 58)));
    }

    #[test]
    fn test_score_by_digit_count() {
        assert_eq!(Sequencing.score(&ArithmeticProblem::new(58, Operator::Add, 39)), 80);
        assert_eq!(Sequencing.score(&ArithmeticProblem::new(502, Operator::Subtract, 498)), 70);
        assert_eq!(Sequencing.score(&ArithmeticProblem::new(1_502, Operator::Add, 98)), 60);
    }

    #[test]
    fn test_solve_subtraction() {
        let steps = Sequencing.solve(&ArithmeticProblem::new(502, Operator::Subtract, 498));
        assert_eq!(
            steps,
            [
                "Keep 502 whole and break 498 into parts: 400, 90, 8.",
                "502 - 400 = 102",
                "102 - 90 = 12",
                "12 - 8 = 4",
                "502 - 498 = 4",
            ]
        );
    }
}
