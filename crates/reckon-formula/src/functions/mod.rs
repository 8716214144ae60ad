//! Built-in functions
//!
//! The library is fixed at compile time. Dispatch is a match on
//! [`Func`]; each implementation receives the evaluator (for operand
//! evaluation and collaborator access) and its unevaluated argument
//! expressions, so conditional functions evaluate only the branch they
//! take.

pub mod data;
pub mod date;
pub mod finance;
pub mod logical;
pub mod math;

use crate::ast::{Expr, Func};
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Evaluator;

/// Minimum and maximum argument counts (None = unlimited)
fn arity(func: Func) -> (usize, Option<usize>) {
    use Func::*;

    match func {
        Sqrt | Abs | Acos | Asin | Atan | Ceil | Floor | Cos | Cosh | Exp | Log | Round | Sign
        | Sin | Sinh | Tan | Tanh | Truncate => (1, Some(1)),
        Sum | Avg | Max | Min => (1, None),
        Pi | Today => (0, Some(0)),
        Power => (2, Some(2)),
        Date | Pmt | Fv | Pv => (3, Some(3)),
        Stock | Data => (1, Some(1)),
        GetDataVal => (4, Some(4)),
        If => (2, Some(3)),
        // Reserved and stubbed functions accept anything
        Npv | PutDataVal | TimedGetDataVal | TimedPutDataVal | DataSum | DataAvg | DataMin
        | DataMax => (0, None),
    }
}

fn check_arity(func: Func, args: &[Expr]) -> FormulaResult<()> {
    let (min, max) = arity(func);

    if args.len() < min {
        let expected = match max {
            Some(max) if max == min => format!("{}", min),
            _ => format!("at least {}", min),
        };
        return Err(FormulaError::ArgumentCount {
            function: func.name(),
            expected,
            actual: args.len(),
        });
    }

    if let Some(max) = max {
        if args.len() > max {
            let expected = if max == min {
                format!("{}", min)
            } else {
                format!("at most {}", max)
            };
            return Err(FormulaError::ArgumentCount {
                function: func.name(),
                expected,
                actual: args.len(),
            });
        }
    }

    Ok(())
}

/// Evaluate a function call
pub(crate) fn dispatch(ev: &mut Evaluator, func: Func, args: &[Expr]) -> FormulaResult<f64> {
    use Func::*;

    check_arity(func, args)?;

    match func {
        Sqrt => math::fn_sqrt(ev, args),
        Abs => math::fn_abs(ev, args),
        Acos => math::fn_acos(ev, args),
        Asin => math::fn_asin(ev, args),
        Atan => math::fn_atan(ev, args),
        Ceil => math::fn_ceil(ev, args),
        Floor => math::fn_floor(ev, args),
        Cos => math::fn_cos(ev, args),
        Cosh => math::fn_cosh(ev, args),
        Exp => math::fn_exp(ev, args),
        Log => math::fn_log(ev, args),
        Round => math::fn_round(ev, args),
        Sign => math::fn_sign(ev, args),
        Sin => math::fn_sin(ev, args),
        Sinh => math::fn_sinh(ev, args),
        Tan => math::fn_tan(ev, args),
        Tanh => math::fn_tanh(ev, args),
        Truncate => math::fn_truncate(ev, args),
        Sum => math::fn_sum(ev, args),
        Avg => math::fn_avg(ev, args),
        Max => math::fn_max(ev, args),
        Min => math::fn_min(ev, args),
        Pi => math::fn_pi(ev, args),
        Power => math::fn_power(ev, args),

        Pmt => finance::fn_pmt(ev, args),
        Fv => finance::fn_fv(ev, args),
        Pv => finance::fn_pv(ev, args),
        Npv => finance::fn_npv(ev, args),

        Today => date::fn_today(ev, args),
        Date => date::fn_date(ev, args),

        If => logical::fn_if(ev, args),

        Stock => data::fn_stock(ev, args),
        Data => data::fn_data(ev, args),
        GetDataVal => data::fn_get_data_val(ev, args),
        PutDataVal | TimedGetDataVal | TimedPutDataVal | DataSum | DataAvg | DataMin | DataMax => {
            data::fn_reserved(ev, args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_formula;

    fn eval(formula: &str) -> FormulaResult<f64> {
        let expr = parse_formula(formula)?;
        Evaluator::new().evaluate(&expr)
    }

    #[test]
    fn test_arity_errors() {
        assert!(matches!(
            eval("=Sqrt()"),
            Err(FormulaError::ArgumentCount { .. })
        ));
        assert!(matches!(
            eval("=Sqrt(1,2)"),
            Err(FormulaError::ArgumentCount { .. })
        ));
        assert!(matches!(
            eval("=Sum()"),
            Err(FormulaError::ArgumentCount { .. })
        ));
        assert!(matches!(
            eval("=Pmt(1,2)"),
            Err(FormulaError::ArgumentCount { .. })
        ));
        assert!(matches!(
            eval("=If(1)"),
            Err(FormulaError::ArgumentCount { .. })
        ));
    }

    #[test]
    fn test_arity_accepts_bounds() {
        assert!(eval("=Pi()").is_ok());
        assert!(eval("=Sum(1)").is_ok());
        assert!(eval("=Sum(1,2,3,4,5,6,7,8)").is_ok());
        assert!(eval("=If(1,2)").is_ok());
        assert!(eval("=If(1,2,3)").is_ok());
    }
}
