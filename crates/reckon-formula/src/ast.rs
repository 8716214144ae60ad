//! Formula expression tree types

use reckon_core::{CellAddress, CellRange};
use std::fmt;

/// Formula expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // === Literals ===
    /// Numeric literal
    Number(f64),
    /// Date literal, stored as a day serial
    Date(f64),
    /// String literal (quoted or bare)
    Str(String),

    // === References ===
    /// Single cell reference
    CellRef(CellAddress),
    /// Range reference
    Range(CellRange),

    // === Operators ===
    /// Unary operation
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Binary arithmetic operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Comparison
    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // === Function call ===
    Call { func: Func, args: Vec<Expr> },
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    fn symbol(&self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }
}

/// Unary operators
///
/// Only `Plus` (absolute value) and `Negate` carry full semantics; `BitNot`
/// and `Not` act on the truncated integer value and the zero test
/// respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Negate,
    BitNot,
    Not,
}

impl UnaryOp {
    fn symbol(&self) -> char {
        match self {
            UnaryOp::Plus => '+',
            UnaryOp::Negate => '-',
            UnaryOp::BitNot => '~',
            UnaryOp::Not => '!',
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Equal,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    NotEqual,
}

impl CmpOp {
    fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Equal => "=",
            CmpOp::Greater => ">",
            CmpOp::Less => "<",
            CmpOp::GreaterEqual => ">=",
            CmpOp::LessEqual => "<=",
            CmpOp::NotEqual => "<>",
        }
    }
}

/// The built-in function library
///
/// The library is closed: functions are identified at lex time and
/// dispatched by variant, with no runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sqrt,
    Abs,
    Acos,
    Asin,
    Atan,
    Ceil,
    Floor,
    Cos,
    Cosh,
    Exp,
    Log,
    Round,
    Sign,
    Sin,
    Sinh,
    Tan,
    Tanh,
    Truncate,
    Sum,
    Avg,
    Pi,
    Stock,
    Today,
    Date,
    Power,
    Data,
    GetDataVal,
    PutDataVal,
    TimedGetDataVal,
    TimedPutDataVal,
    DataSum,
    DataAvg,
    DataMin,
    DataMax,
    Pmt,
    Fv,
    Max,
    Min,
    If,
    Pv,
    Npv,
}

/// Name table used for case-insensitive lookup; `POW` and `POWER` share a
/// variant.
const FUNC_NAMES: &[(&str, Func)] = &[
    ("SQRT", Func::Sqrt),
    ("ABS", Func::Abs),
    ("ACOS", Func::Acos),
    ("ASIN", Func::Asin),
    ("ATAN", Func::Atan),
    ("CEIL", Func::Ceil),
    ("FLOOR", Func::Floor),
    ("COSH", Func::Cosh),
    ("COS", Func::Cos),
    ("EXP", Func::Exp),
    ("LOG", Func::Log),
    ("ROUND", Func::Round),
    ("SIGN", Func::Sign),
    ("SINH", Func::Sinh),
    ("SIN", Func::Sin),
    ("TANH", Func::Tanh),
    ("TAN", Func::Tan),
    ("TRUNCATE", Func::Truncate),
    ("SUM", Func::Sum),
    ("AVG", Func::Avg),
    ("PI", Func::Pi),
    ("STOCK", Func::Stock),
    ("TODAY", Func::Today),
    ("DATE", Func::Date),
    ("POWER", Func::Power),
    ("POW", Func::Power),
    ("DATA", Func::Data),
    ("GETDATAVAL", Func::GetDataVal),
    ("PUTDATAVAL", Func::PutDataVal),
    ("TIMEDGETDATAVAL", Func::TimedGetDataVal),
    ("TIMEDPUTDATAVAL", Func::TimedPutDataVal),
    ("DATASUM", Func::DataSum),
    ("DATAAVG", Func::DataAvg),
    ("DATAMIN", Func::DataMin),
    ("DATAMAX", Func::DataMax),
    ("PMT", Func::Pmt),
    ("FV", Func::Fv),
    ("MAX", Func::Max),
    ("MIN", Func::Min),
    ("IF", Func::If),
    ("PV", Func::Pv),
    ("NPV", Func::Npv),
];

impl Func {
    /// Look up a function by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Func> {
        FUNC_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, f)| *f)
    }

    /// Canonical (uppercase) name of this function
    pub fn name(&self) -> &'static str {
        FUNC_NAMES
            .iter()
            .find(|(_, f)| f == self)
            .map(|(n, _)| *n)
            .unwrap_or("?")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Date(serial) => write!(f, "{}", serial),
            Expr::Str(s) => write!(f, "\"{}\"", s),
            Expr::CellRef(addr) => write!(f, "{}", addr),
            Expr::Range(range) => write!(f, "{}", range),
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Compare { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Call { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
