//! External data functions
//!
//! `Stock` and `Data` call out through the injected collaborators; their
//! failures are recorded on the evaluator and surface as NaN rather than
//! aborting the formula.

use crate::ast::Expr;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Evaluator;

/// Literal text of an argument, for functions keyed by name rather than
/// value (symbols, blob names, lookup keys)
pub(crate) fn literal_text(expr: &Expr) -> FormulaResult<String> {
    match expr {
        Expr::Str(s) => Ok(s.clone()),
        Expr::Number(n) | Expr::Date(n) => Ok(format!("{}", n)),
        Expr::CellRef(addr) => Ok(addr.to_string()),
        _ => Err(FormulaError::Evaluation(
            "expected a literal argument".into(),
        )),
    }
}

/// STOCK function: current quote for a symbol
///
/// The injected quote source returns the quote as text; a fetch or parse
/// failure is recorded and the result is NaN.
pub fn fn_stock(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let symbol = literal_text(&args[0])?;

    let body = match ev.fetch_quote(&symbol) {
        Some(body) => body,
        None => return Ok(f64::NAN),
    };

    match body.trim().parse::<f64>() {
        Ok(quote) => Ok(quote),
        Err(_) => {
            ev.record_io_error(format!("quote for '{}' is not a number: {}", symbol, body));
            Ok(f64::NAN)
        }
    }
}

/// DATA function: load a named blob through the table loader
///
/// Returns the number of cells loaded; the table stays on the evaluator
/// for `GetDataVal` to query.
pub fn fn_data(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let name = literal_text(&args[0])?;

    match ev.load_table(&name) {
        Some(cell_count) => Ok(cell_count as f64),
        None => Ok(f64::NAN),
    }
}

/// GETDATAVAL function: `GetDataVal(cell, keyCol, key, col)`
///
/// Scans the loaded table's key column for the key text and reports
/// whether it was found (1.0) or not (0.0). The `cell` and `col`
/// arguments are accepted for the full lookup, which is not wired up yet.
pub fn fn_get_data_val(ev: &mut Evaluator, args: &[Expr]) -> FormulaResult<f64> {
    let key_col = ev.value(&args[1])?.trunc();
    let key = literal_text(&args[2])?;

    let table = match ev.table() {
        Some(table) => table,
        None => return Ok(0.0),
    };

    if key_col < 0.0 {
        return Ok(0.0);
    }
    let key_col = key_col as usize;

    for row in 0..table.rows() {
        if table.at(row, key_col) == key {
            return Ok(1.0);
        }
    }

    Ok(0.0)
}

/// Reserved data operations; recognized but not yet implemented
pub fn fn_reserved(_ev: &mut Evaluator, _args: &[Expr]) -> FormulaResult<f64> {
    Ok(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_formula;
    use crate::sources::{QuoteSource, SourceError, TableLoader};
    use reckon_core::DataTable;

    struct FixedQuotes;

    impl QuoteSource for FixedQuotes {
        fn fetch(&self, symbol: &str) -> Result<String, SourceError> {
            match symbol {
                "IBM" => Ok("191.45\n".to_string()),
                "BAD" => Ok("not a price".to_string()),
                _ => Err(format!("unknown symbol {}", symbol).into()),
            }
        }
    }

    struct PartsLoader;

    impl TableLoader for PartsLoader {
        fn load(&self, name: &str) -> Result<DataTable, SourceError> {
            match name {
                "parts" => Ok(DataTable::from_columnar(
                    "bolt 0.35 1200\nwasher 0.05 9000\nnut 0.12 4400\n",
                )),
                _ => Err(format!("no blob named {}", name).into()),
            }
        }
    }

    fn eval_with_sources(formula: &str, ev: &mut Evaluator) -> f64 {
        let expr = parse_formula(formula).unwrap();
        ev.evaluate(&expr).unwrap()
    }

    #[test]
    fn test_stock() {
        let quotes = FixedQuotes;
        let mut ev = Evaluator::new().with_quotes(&quotes);

        assert_eq!(eval_with_sources("=Stock(IBM)", &mut ev), 191.45);
        assert!(ev.take_io_error().is_none());

        // Quoted symbol works the same way
        assert_eq!(eval_with_sources("=Stock(\"IBM\")", &mut ev), 191.45);
    }

    #[test]
    fn test_stock_failures_are_nan() {
        let quotes = FixedQuotes;
        let mut ev = Evaluator::new().with_quotes(&quotes);

        assert!(eval_with_sources("=Stock(XYZ)", &mut ev).is_nan());
        assert!(ev.take_io_error().unwrap().contains("XYZ"));

        assert!(eval_with_sources("=Stock(BAD)", &mut ev).is_nan());
        assert!(ev.take_io_error().unwrap().contains("not a number"));
    }

    #[test]
    fn test_stock_without_source_is_nan() {
        let mut ev = Evaluator::new();
        assert!(eval_with_sources("=Stock(IBM)", &mut ev).is_nan());
        assert!(ev.take_io_error().is_some());
    }

    #[test]
    fn test_data_returns_cell_count() {
        let loader = PartsLoader;
        let mut ev = Evaluator::new().with_loader(&loader);

        assert_eq!(eval_with_sources("=Data(parts)", &mut ev), 9.0);
        assert_eq!(ev.loaded_table().unwrap().rows(), 3);
    }

    #[test]
    fn test_data_missing_blob_is_nan() {
        let loader = PartsLoader;
        let mut ev = Evaluator::new().with_loader(&loader);

        assert!(eval_with_sources("=Data(nothere)", &mut ev).is_nan());
        assert!(ev.take_io_error().unwrap().contains("nothere"));
    }

    #[test]
    fn test_get_data_val() {
        let loader = PartsLoader;
        let mut ev = Evaluator::new().with_loader(&loader);

        eval_with_sources("=Data(parts)", &mut ev);
        assert_eq!(
            eval_with_sources("=GetDataVal(A1, 0, washer, 1)", &mut ev),
            1.0
        );
        assert_eq!(
            eval_with_sources("=GetDataVal(A1, 0, girder, 1)", &mut ev),
            0.0
        );
        // Key column 1 holds prices, not names
        assert_eq!(
            eval_with_sources("=GetDataVal(A1, 1, washer, 1)", &mut ev),
            0.0
        );
    }

    #[test]
    fn test_get_data_val_without_table() {
        let mut ev = Evaluator::new();
        assert_eq!(eval_with_sources("=GetDataVal(A1, 0, x, 1)", &mut ev), 0.0);
    }

    #[test]
    fn test_reserved_functions_are_zero() {
        let mut ev = Evaluator::new();
        assert_eq!(eval_with_sources("=PutDataVal(1, 2)", &mut ev), 0.0);
        assert_eq!(eval_with_sources("=DataSum(0)", &mut ev), 0.0);
        assert_eq!(eval_with_sources("=DataAvg(0)", &mut ev), 0.0);
        assert_eq!(eval_with_sources("=DataMin(0)", &mut ev), 0.0);
        assert_eq!(eval_with_sources("=DataMax(0)", &mut ev), 0.0);
        assert_eq!(eval_with_sources("=TimedGetDataVal(0)", &mut ev), 0.0);
        assert_eq!(eval_with_sources("=TimedPutDataVal(0)", &mut ev), 0.0);
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(literal_text(&Expr::Str("abc".into())).unwrap(), "abc");
        assert_eq!(literal_text(&Expr::Number(5.0)).unwrap(), "5");
    }
}
