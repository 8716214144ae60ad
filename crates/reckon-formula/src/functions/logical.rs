//! Logical functions

use crate::ast::Expr;
use crate::error::FormulaResult;
use crate::evaluator::Evaluator;

/// IF function: `If(cond, then, else)`
///
/// The condition is a comparison or a zero test; only the taken branch is
/// evaluated. The `else` branch may be omitted and defaults to zero.
pub fn fn_if(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    if ev.logical(&args[0])? {
        ev.value(&args[1])
    } else {
        match args.get(2) {
            Some(expr) => ev.value(expr),
            None => Ok(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::evaluator::Evaluator;
    use crate::parser::parse_formula;

    fn eval(formula: &str) -> f64 {
        let expr = parse_formula(formula).unwrap();
        Evaluator::new().evaluate(&expr).unwrap()
    }

    #[test]
    fn test_if_comparisons() {
        assert_eq!(eval("=If(3>4, 1, 0)"), 0.0);
        assert_eq!(eval("=If(2=2, 10, 20)"), 10.0);
        assert_eq!(eval("=If(5<=5, 1, 2)"), 1.0);
        assert_eq!(eval("=If(5<>5, 1, 2)"), 2.0);
    }

    #[test]
    fn test_if_zero_test() {
        assert_eq!(eval("=If(2-2, 1, 2)"), 2.0);
        assert_eq!(eval("=If(0.5, 1, 2)"), 1.0);
    }

    #[test]
    fn test_if_nested() {
        assert_eq!(eval("=If(1>2, 1, If(3>2, 5, 9))"), 5.0);
    }
}
