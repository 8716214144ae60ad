//! # reckon-formula
//!
//! Formula parser and evaluator for reckon.
//!
//! This crate provides:
//! - Formula parsing (text → expression tree)
//! - Formula evaluation (expression tree → number)
//! - The built-in function library (math, finance, dates, external data)
//! - Collaborator traits for cell values, stock quotes, and data tables
//!
//! ## Example
//!
//! ```rust
//! use reckon_formula::{parse_formula, Evaluator};
//!
//! let expr = parse_formula("=Sum(1,2,3,4,5)").unwrap();
//! let mut evaluator = Evaluator::new();
//! assert_eq!(evaluator.evaluate(&expr).unwrap(), 15.0);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod sources;

pub use ast::{BinOp, CmpOp, Expr, Func, UnaryOp};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::Evaluator;
pub use parser::parse_formula;
pub use sources::{CellSource, QuoteSource, SheetSource, SourceError, TableLoader};
