//! Financial functions
//!
//! Rates are per period; `n` is the number of periods.

use crate::ast::Expr;
use crate::error::FormulaResult;
use crate::evaluator::Evaluator;

/// PMT function: payment per period on a loan
///
/// `Pmt(rate, n, principal)` = `rate * principal / (1 - (1 + rate)^-n)`
pub fn fn_pmt(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let rate = ev.value(&args[0])?;
    let n = ev.value(&args[1])?;
    let principal = ev.value(&args[2])?;

    Ok((rate * principal) / (1.0 - (1.0 + rate).powf(-n)))
}

/// FV function: future value of a payment series
///
/// `Fv(rate, n, payment)` = `payment * ((1 + rate)^n - 1) / rate`
pub fn fn_fv(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let rate = ev.value(&args[0])?;
    let n = ev.value(&args[1])?;
    let payment = ev.value(&args[2])?;

    Ok(payment * ((1.0 + rate).powf(n) - 1.0) / rate)
}

/// PV function: present value of a future amount
///
/// `Pv(rate, n, payment)` = `payment / (1 + rate)^n`
pub fn fn_pv(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let rate = ev.value(&args[0])?;
    let n = ev.value(&args[1])?;
    let payment = ev.value(&args[2])?;

    Ok(payment / (1.0 + rate).powf(n))
}

/// NPV function (not yet implemented; always zero)
pub fn fn_npv(_ev: &mut Evaluator, _args: &[Expr]) -> FormulaResult<f64> {
    Ok(0.0)
}
