use super::{ArithmeticProblem, Operator, SolvingMethod, digit_count, digits};

/// Split both numbers into place values and combine place by place
#[derive(Debug, Clone, Copy, Default)]
pub struct Partitioning;

/// Place values of `n`, least significant first, padded to `len`
fn place_values(n: i64, len: usize) -> Vec<i64> {
    let mut values: Vec<i64> = digits(n)
        .into_iter()
        .enumerate()
        .map(|(i, d)| d * 10_i64.pow(i as u32))
        .collect();
    values.resize(len, 0);
    values
}

impl SolvingMethod for Partitioning {
    fn id(&self) -> &'static str {
        "partitioning"
    }

    fn name(&self) -> &'static str {
        "Partitioning"
    }

    /// Both numbers have at least two digits; subtraction only when no place
    /// needs an exchange
    fn can_apply(&self, problem: &ArithmeticProblem) -> bool {
        if !problem.is_natural() || problem.a < 10 || problem.b < 10 {
            return false;
        }

        match problem.op {
            Operator::Add => true,
            Operator::Subtract => {
                let (da, db) = (digits(problem.a), digits(problem.b));
                db.iter()
                    .enumerate()
                    .all(|(i, y)| da.get(i).is_some_and(|x| x >= y))
            }
        }
    }

    fn score(&self, problem: &ArithmeticProblem) -> u8 {
        match digit_count(problem.a.max(problem.b)) {
            2 => 75,
            3 => 70,
            _ => 65,
        }
    }

    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String> {
        let ArithmeticProblem { a, op, b } = *problem;
        let answer = problem.answer();
        let len = digit_count(a.max(b));
        let (pa, pb) = (place_values(a, len), place_values(b, len));

        let mut steps = vec![format!(
            "Split by place value: {a} = {}, {b} = {}.",
            join_parts(&pa),
            join_parts(&pb)
        )];

        let mut partials = Vec::with_capacity(len);
        for i in (0..len).rev() {
            if pa[i] == 0 && pb[i] == 0 {
                continue;
            }
            let partial = op.apply(pa[i], pb[i]);
            steps.push(format!("{} {op} {} = {partial}", pa[i], pb[i]));
            partials.push(partial);
        }

        if partials.len() > 1 {
            let joined = partials
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" + ");
            steps.push(format!("Put the parts back together: {joined} = {answer}"));
        }
        steps.push(format!("{a} {op} {b} = {answer}"));
        steps
    }
}

fn join_parts(values: &[i64]) -> String {
    let parts: Vec<String> = values
        .iter()
        .rev()
        .filter(|&&v| v != 0)
        .map(ToString::to_string)
        .collect();

    if parts.is_empty() {
        "0".to_string()
    } else {
        parts.join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicability() {
        assert!(Partitioning.can_apply(&ArithmeticProblem::new(58, Operator::Add, 39)));
        assert!(Partitioning.can_apply(&ArithmeticProblem::new(87, Operator::Subtract, 34)));
        assert!(!Partitioning.can_apply(&ArithmeticProblem::new(82, Operator::Subtract, 37)));
        assert!(!Partitioning.can_apply(&ArithmeticProblem::new(58, Operator::Add, 9)));
    }

    #[test]
    fn test_score_by_digit_count() {
        assert_eq!(Partitioning.score(&ArithmeticProblem::new(58, Operator::Add, 39)), 75);
        assert_eq!(Partitioning.score(&ArithmeticProblem::new(358, Operator::Add, 39)), 70);
        assert_eq!(Partitioning.score(&ArithmeticProblem::new(3_580, Operator::Add, 39)), 65);
    }

    #[test]
    fn test_solve_addition() {
        let steps = Partitioning.solve(&ArithmeticProblem::new(58, Operator::Add, 39));
        assert_eq!(
            steps,
            [
                "Split by place value: 58 = 50 + 8, 39 = 30 + 9.",
                "50 + 30 = 80",
                "8 + 9 = 17",
                "Put the parts back together: 80 + 17 = 97",
                "58 + 39 = 97",
            ]
        );
    }

    #[test]
    fn test_solve_subtraction() {
        let steps = Partitioning.solve(&ArithmeticProblem::new(87, Operator::Subtract, 34));
        assert_eq!(steps[1], "80 - 30 = 50");
        assert_eq!(steps[2], "7 - 4 = 3");
        assert_eq!(steps[3], "Put the parts back together: 50 + 3 = 53");
    }
}
