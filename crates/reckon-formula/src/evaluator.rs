//! Formula evaluator
//!
//! Walks a parsed expression tree and reduces it to a single `f64`.
//! Cell values, stock quotes, and data tables come from the injected
//! [`sources`](crate::sources) collaborators; an evaluator with no
//! collaborators still computes pure arithmetic, reading NaN for every
//! cell.

use crate::ast::{BinOp, CmpOp, Expr, UnaryOp};
use crate::error::{FormulaError, FormulaResult};
use crate::functions;
use crate::sources::{CellSource, QuoteSource, TableLoader};
use reckon_core::{CellAddress, CellRange, DataTable};

/// Reduction applied to a cell range in an aggregate argument position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeOp {
    Sum,
    Avg,
    Min,
    Max,
}

/// Formula evaluator
///
/// Holds borrows of the injected collaborators, the table loaded by the
/// most recent `Data(...)` call, and the last recorded I/O failure.
/// Evaluation is single-threaded; one evaluator processes one formula at
/// a time.
///
/// # Example
/// ```rust
/// use reckon_formula::{parse_formula, Evaluator};
///
/// let expr = parse_formula("=1+2*3").unwrap();
/// let mut evaluator = Evaluator::new();
/// assert_eq!(evaluator.evaluate(&expr).unwrap(), 7.0);
/// ```
#[derive(Default)]
pub struct Evaluator<'a> {
    cells: Option<&'a dyn CellSource>,
    quotes: Option<&'a dyn QuoteSource>,
    loader: Option<&'a dyn TableLoader>,
    table: Option<DataTable>,
    last_io_error: Option<String>,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with no collaborators
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cell source
    pub fn with_cells(mut self, cells: &'a dyn CellSource) -> Self {
        self.cells = Some(cells);
        self
    }

    /// Attach a quote source
    pub fn with_quotes(mut self, quotes: &'a dyn QuoteSource) -> Self {
        self.quotes = Some(quotes);
        self
    }

    /// Attach a table loader
    pub fn with_loader(mut self, loader: &'a dyn TableLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Evaluate an expression tree to a number
    pub fn evaluate(&mut self, expr: &Expr) -> FormulaResult<f64> {
        self.value(expr)
    }

    /// The I/O failure recorded by the most recent `Stock`/`Data` call,
    /// if any, clearing it
    pub fn take_io_error(&mut self) -> Option<String> {
        self.last_io_error.take()
    }

    /// The table loaded by the most recent `Data(...)` call
    pub fn loaded_table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    // === Tree walking ===

    pub(crate) fn value(&mut self, expr: &Expr) -> FormulaResult<f64> {
        self.value_with_reducer(expr, None)
    }

    pub(crate) fn value_with_reducer(
        &mut self,
        expr: &Expr,
        reducer: Option<RangeOp>,
    ) -> FormulaResult<f64> {
        match expr {
            Expr::Number(n) | Expr::Date(n) => Ok(*n),

            // Strings have no numeric value
            Expr::Str(_) => Ok(f64::NAN),

            Expr::CellRef(addr) => Ok(self.read_cell(*addr)),

            Expr::Range(range) => match reducer {
                Some(op) => Ok(self.reduce_range(range, op)),
                None => Err(FormulaError::Evaluation(format!(
                    "range {} is only valid inside an aggregate function",
                    range
                ))),
            },

            Expr::Unary { op, operand } => {
                let v = self.value(operand)?;
                Ok(match op {
                    UnaryOp::Plus => v.abs(),
                    UnaryOp::Negate => -v,
                    UnaryOp::BitNot => !(v.trunc() as i64) as f64,
                    UnaryOp::Not => {
                        if v == 0.0 {
                            1.0
                        } else {
                            0.0
                        }
                    }
                })
            }

            Expr::Binary { op, left, right } => {
                let l = self.value(left)?;
                let r = self.value(right)?;
                Ok(match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                })
            }

            // Comparison nodes exist only where an `If(` armed the
            // parser; in value position the relation yields 1 or 0
            Expr::Compare { .. } => Ok(if self.logical(expr)? { 1.0 } else { 0.0 }),

            Expr::Call { func, args } => functions::dispatch(self, *func, args),
        }
    }

    /// Evaluate an expression as a condition
    ///
    /// A comparison node applies its relation; any other expression is
    /// true when its value is non-zero.
    pub(crate) fn logical(&mut self, expr: &Expr) -> FormulaResult<bool> {
        match expr {
            Expr::Compare { op, left, right } => {
                let l = self.value(left)?;
                let r = self.value(right)?;
                Ok(match op {
                    CmpOp::Equal => l == r,
                    CmpOp::Greater => l > r,
                    CmpOp::Less => l < r,
                    CmpOp::GreaterEqual => l >= r,
                    CmpOp::LessEqual => l <= r,
                    CmpOp::NotEqual => l != r,
                })
            }
            _ => Ok(self.value(expr)? != 0.0),
        }
    }

    fn read_cell(&self, addr: CellAddress) -> f64 {
        match self.cells {
            Some(cells) => cells.read(addr.col, addr.row),
            None => f64::NAN,
        }
    }

    /// Reduce the values of a range without mutating the tree
    fn reduce_range(&self, range: &CellRange, op: RangeOp) -> f64 {
        let values = range.cells().map(|addr| self.read_cell(addr));

        match op {
            RangeOp::Sum => values.sum(),
            RangeOp::Avg => {
                let count = range.cell_count() as f64;
                values.sum::<f64>() / count
            }
            // f64::min/max skip NaN operands, so unset cells drop out
            RangeOp::Min => values.fold(f64::NAN, f64::min),
            RangeOp::Max => values.fold(f64::NAN, f64::max),
        }
    }

    // === Collaborator access for the function library ===

    pub(crate) fn fetch_quote(&mut self, symbol: &str) -> Option<String> {
        match self.quotes {
            Some(quotes) => match quotes.fetch(symbol) {
                Ok(body) => Some(body),
                Err(e) => {
                    self.record_io_error(format!("quote fetch for '{}' failed: {}", symbol, e));
                    None
                }
            },
            None => {
                self.record_io_error(format!("no quote source for '{}'", symbol));
                None
            }
        }
    }

    pub(crate) fn load_table(&mut self, name: &str) -> Option<usize> {
        match self.loader {
            Some(loader) => match loader.load(name) {
                Ok(table) => {
                    let count = table.cell_count();
                    self.table = Some(table);
                    Some(count)
                }
                Err(e) => {
                    self.record_io_error(format!("loading table '{}' failed: {}", name, e));
                    None
                }
            },
            None => {
                self.record_io_error(format!("no table loader for '{}'", name));
                None
            }
        }
    }

    pub(crate) fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    pub(crate) fn record_io_error(&mut self, message: String) {
        self.last_io_error = Some(message);
    }
}
