//! Math functions

use crate::ast::Expr;
use crate::error::FormulaResult;
use crate::evaluator::{Evaluator, RangeOp};

/// SQRT function
pub fn fn_sqrt(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.sqrt())
}

/// ABS function
pub fn fn_abs(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.abs())
}

/// ACOS function
pub fn fn_acos(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.acos())
}

/// ASIN function
pub fn fn_asin(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.asin())
}

/// ATAN function
pub fn fn_atan(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.atan())
}

/// CEIL function
pub fn fn_ceil(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.ceil())
}

/// FLOOR function
pub fn fn_floor(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.floor())
}

/// COS function
pub fn fn_cos(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.cos())
}

/// COSH function
pub fn fn_cosh(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.cosh())
}

/// EXP function
pub fn fn_exp(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.exp())
}

/// LOG function (natural logarithm)
pub fn fn_log(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.ln())
}

/// ROUND function (ties round to even)
pub fn fn_round(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.round_ties_even())
}

/// SIGN function
pub fn fn_sign(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let x = ev.value(&args[0])?;
    Ok(if x.is_nan() {
        x
    } else if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    })
}

/// SIN function
pub fn fn_sin(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.sin())
}

/// SINH function
pub fn fn_sinh(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.sinh())
}

/// TAN function
pub fn fn_tan(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.tan())
}

/// TANH function
pub fn fn_tanh(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.tanh())
}

/// TRUNCATE function
pub fn fn_truncate(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    Ok(ev.value(&args[0])?.trunc())
}

/// SUM function
///
/// Arguments evaluate left to right; a range argument contributes the sum
/// of its cells.
pub fn fn_sum(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let mut sum = 0.0;
    for arg in args {
        sum += ev.value_with_reducer(arg, Some(RangeOp::Sum))?;
    }
    Ok(sum)
}

/// AVG function
///
/// The total divides by the number of arguments, not cells: a range
/// argument contributes its mean and counts once.
pub fn fn_avg(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let mut sum = 0.0;
    for arg in args {
        sum += ev.value_with_reducer(arg, Some(RangeOp::Avg))?;
    }
    Ok(sum / args.len() as f64)
}

/// MAX function
pub fn fn_max(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let mut max = f64::NAN;
    for arg in args {
        max = max.max(ev.value_with_reducer(arg, Some(RangeOp::Max))?);
    }
    Ok(max)
}

/// MIN function
pub fn fn_min(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let mut min = f64::NAN;
    for arg in args {
        min = min.min(ev.value_with_reducer(arg, Some(RangeOp::Min))?);
    }
    Ok(min)
}

/// PI function
///
/// Returns the fixed literal `3.141592654`, not `std::f64::consts::PI`;
/// results round-trip against sheets that stored the shorter value.
pub fn fn_pi(_ev: &mut Evaluator, _args: &[Expr]) -> FormulaResult<f64> {
    Ok(3.141592654)
}

/// POWER function (also reachable as POW)
pub fn fn_power(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let base = ev.value(&args[0])?;
    let exponent = ev.value(&args[1])?;
    Ok(base.powf(exponent))
}
