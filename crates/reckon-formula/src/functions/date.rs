//! Date functions
//!
//! Dates are day serials counted from 1900-01-01. The serial formula adds
//! `(year - 1900) / 4` leap days unconditionally, over-counting around
//! leap years; stored serials depend on the approximation, so it must not
//! be corrected. `2/29/1900` is a valid date under this calendar.

use crate::ast::Expr;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Evaluator;
use chrono::Datelike;

/// Days before the first of each month, non-leap year
const MONTH_START: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Day serial for a civil date; years are clamped to 1900 and month must
/// already be in 1..=12
pub(crate) fn day_serial(year: i64, month: usize, day: i64) -> f64 {
    let elapsed = year.max(1900) - 1900;
    (elapsed * 365 + elapsed / 4 + 1 + MONTH_START[month - 1] + day) as f64
}

/// TODAY function: the current civil date as a day serial
pub fn fn_today(_ev: &mut Evaluator, _args: &[Expr]) -> FormulaResult<f64> {
    let today = chrono::Local::now().date_naive();
    Ok(day_serial(
        today.year() as i64,
        today.month() as usize,
        today.day() as i64,
    ))
}

/// DATE function: `Date(year, month, day)` as a day serial
pub fn fn_date(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let year = ev.value(&args[0])?;
    let month = ev.value(&args[1])?;
    let day = ev.value(&args[2])?;

    if year < 0.0 || month < 0.0 || day < 0.0 {
        return Err(FormulaError::Syntax(
            "Date arguments must not be negative".into(),
        ));
    }

    let month = month.trunc() as usize;
    if !(1..=12).contains(&month) {
        return Err(FormulaError::Syntax(format!(
            "Date month {} out of range",
            month
        )));
    }

    Ok(day_serial(year.trunc() as i64, month, day.trunc() as i64))
}
