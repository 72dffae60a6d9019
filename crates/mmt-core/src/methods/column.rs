use super::{ArithmeticProblem, Operator, SolvingMethod, digits, place_name};

/// Written column method. Works for every problem, so it is the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Column;

impl Column {
    fn add_steps(a: i64, b: i64, steps: &mut Vec<String>) {
        let (da, db) = (digits(a), digits(b));
        let mut carry = 0;

        for i in 0..da.len().max(db.len()) {
            let x = da.get(i).copied().unwrap_or(0);
            let y = db.get(i).copied().unwrap_or(0);
            let total = x + y + carry;
            let carried = if carry > 0 {
                format!(" + {carry} carried")
            } else {
                String::new()
            };

            carry = total / 10;
            let digit = total % 10;
            if carry > 0 {
                steps.push(format!(
                    "{}: {x} + {y}{carried} = {total}, write {digit} and carry {carry}.",
                    place_name(i)
                ));
            } else {
                steps.push(format!(
                    "{}: {x} + {y}{carried} = {total}, write {digit}.",
                    place_name(i)
                ));
            }
        }

        if carry > 0 {
            steps.push(format!("Write the last carry {carry} in front."));
        }
    }

    /// Requires `big >= small`
    fn subtract_steps(big: i64, small: i64, steps: &mut Vec<String>) {
        let (db, ds) = (digits(big), digits(small));
        let mut borrow = 0;

        for (i, &digit) in db.iter().enumerate() {
            let y = ds.get(i).copied().unwrap_or(0);
            let mut x = digit - borrow;

            if x < y {
                x += 10;
                borrow = 1;
                steps.push(format!(
                    "{}: not enough to take {y}, exchange 1 from the next place: {x} - {y} = {}.",
                    place_name(i),
                    x - y
                ));
            } else {
                borrow = 0;
                steps.push(format!("{}: {x} - {y} = {}.", place_name(i), x - y));
            }
        }
    }
}

impl SolvingMethod for Column {
    fn id(&self) -> &'static str {
        "column"
    }

    fn name(&self) -> &'static str {
        "Column method"
    }

    fn can_apply(&self, _problem: &ArithmeticProblem) -> bool {
        true
    }

    fn score(&self, _problem: &ArithmeticProblem) -> u8 {
        60
    }

    fn solve(&self, problem: &ArithmeticProblem) -> Vec<String> {
        let ArithmeticProblem { a, op, b } = *problem;
        let answer = problem.answer();
        let mut steps = Vec::new();

        match op {
            Operator::Add if a >= 0 && b >= 0 => {
                steps.push(format!("Line up {a} and {b} by place value."));
                Self::add_steps(a, b, &mut steps);
            }
            Operator::Subtract if a >= b && b >= 0 => {
                steps.push(format!("Line up {a} and {b} by place value."));
                Self::subtract_steps(a, b, &mut steps);
            }
            Operator::Subtract if b > a && a >= 0 => {
                steps.push(format!(
                    "{b} is bigger than {a}, so work out {b} - {a} and make the answer negative."
                ));
                steps.push(format!("Line up {b} and {a} by place value."));
                Self::subtract_steps(b, a, &mut steps);
            }
            _ => {}
        }

        steps.push(format!("{a} {op} {b} = {answer}"));
        steps
    }
}
