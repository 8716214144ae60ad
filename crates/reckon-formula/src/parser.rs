//! Formula parser
//!
//! A recursive descent parser with one method per precedence level.
//! Comparisons bind loosest, then `+`/`-`, then `*`/`/`, then `^`
//! (right-associative), then the unary sigils, then primary expressions.
//!
//! Comparison operators are recognized only when an `If(` token has armed
//! the parser; the next comparison operator consumes the arming. An
//! unarmed comparison token is ignored along with the operand to its
//! right, so `=3>4` parses to just `3`.

use crate::ast::{BinOp, CmpOp, Expr, Func, UnaryOp};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{Lexer, Token};

/// Parse a formula string into an expression tree
///
/// A single leading `=` or `+` sigil is skipped; a leading `-` is parsed
/// as unary negation.
///
/// # Example
/// ```rust
/// use reckon_formula::parse_formula;
///
/// let expr = parse_formula("=1+2*3").unwrap();
/// let expr = parse_formula("Sum(A1:A10)").unwrap();
/// let expr = parse_formula("=If(A1>0, 1, 0)").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<Expr> {
    let formula = formula.trim();
    let formula = formula
        .strip_prefix(['=', '+'])
        .unwrap_or(formula);

    if formula.trim().is_empty() {
        return Err(FormulaError::Parse("empty formula".into()));
    }

    let mut parser = Parser::new(formula);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if parser.current_token() != &Token::Eof {
        return Err(FormulaError::Parse(format!(
            "unexpected trailing token: {:?}",
            parser.current_token()
        )));
    }

    Ok(expr)
}

/// Formula parser
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Armed by `If(`, consumed by the next comparison operator
    expecting_comparison: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            expecting_comparison: false,
        }
    }

    fn current_token(&self) -> &Token {
        &self.current
    }

    fn consume(&mut self) -> Token {
        std::mem::replace(&mut self.current, self.lexer.next_token())
    }

    fn expect_right_paren(&mut self) -> FormulaResult<()> {
        if self.current == Token::RightParen {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "expected ')', got {:?}",
                self.current
            )))
        }
    }

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current_token() {
                Token::Equal => CmpOp::Equal,
                Token::Greater => CmpOp::Greater,
                Token::Less => CmpOp::Less,
                Token::GreaterEqual => CmpOp::GreaterEqual,
                Token::LessEqual => CmpOp::LessEqual,
                Token::NotEqual => CmpOp::NotEqual,
                _ => break,
            };

            self.consume();
            let right = self.parse_additive()?;

            if self.expecting_comparison {
                self.expecting_comparison = false;
                left = Expr::Compare {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                };
            }
            // Unarmed: the operator is ignored and `right` never pairs
            // with an operand
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_exponent()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };

            self.consume();
            let right = self.parse_exponent()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_exponent(&mut self) -> FormulaResult<Expr> {
        let left = self.parse_unary()?;

        if self.current_token() == &Token::Caret {
            self.consume();
            let right = self.parse_exponent()?; // Right associative
            return Ok(Expr::Binary {
                op: BinOp::Pow,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        let op = match self.current_token() {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Negate,
            Token::Tilde => UnaryOp::BitNot,
            Token::Bang => UnaryOp::Not,
            _ => return self.parse_primary(),
        };

        self.consume();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.consume() {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Date(serial) => Ok(Expr::Date(serial)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::CellRef(addr) => Ok(Expr::CellRef(addr)),
            Token::Range(range) => Ok(Expr::Range(range)),

            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect_right_paren()?;
                Ok(expr)
            }

            // The lexer consumed the opening paren with the name
            Token::Func(func) => {
                if func == Func::If {
                    self.expecting_comparison = true;
                }

                let mut args = Vec::new();

                if self.current_token() != &Token::RightParen {
                    args.push(self.parse_expression()?);

                    while self.current_token() == &Token::Comma {
                        self.consume();
                        args.push(self.parse_expression()?);
                    }
                }

                self.expect_right_paren()?;
                Ok(Expr::Call { func, args })
            }

            token => Err(FormulaError::Parse(format!(
                "unexpected token: {:?}",
                token
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Func;
    use reckon_core::CellAddress;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_formula("=42").unwrap(), Expr::Number(42.0));
        assert_eq!(parse_formula("3.14").unwrap(), Expr::Number(3.14));
    }

    #[test]
    fn test_leading_sigils() {
        // '=' and '+' sigils are skipped, '-' is unary
        assert_eq!(parse_formula("=7").unwrap(), Expr::Number(7.0));
        assert_eq!(parse_formula("+7").unwrap(), Expr::Number(7.0));
        assert!(matches!(
            parse_formula("-7").unwrap(),
            Expr::Unary {
                op: UnaryOp::Negate,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(parse_formula("").is_err());
        assert!(parse_formula("   ").is_err());
        assert!(parse_formula("=").is_err());
    }

    #[test]
    fn test_parse_arithmetic_precedence() {
        // 1+2*3 parses as 1+(2*3)
        let expr = parse_formula("=1+2*3").unwrap();
        if let Expr::Binary { op, left, right } = expr {
            assert_eq!(op, BinOp::Add);
            assert_eq!(*left, Expr::Number(1.0));
            assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinOp::Mul,
                    ..
                }
            ));
        } else {
            panic!("Expected Binary");
        }
    }

    #[test]
    fn test_parse_parentheses() {
        let expr = parse_formula("=(1+2)*3").unwrap();
        if let Expr::Binary { op, left, right } = expr {
            assert_eq!(op, BinOp::Mul);
            assert!(matches!(
                *left,
                Expr::Binary {
                    op: BinOp::Add,
                    ..
                }
            ));
            assert_eq!(*right, Expr::Number(3.0));
        } else {
            panic!("Expected Binary");
        }
    }

    #[test]
    fn test_parse_exponent_right_associative() {
        // 2^3^2 parses as 2^(3^2)
        let expr = parse_formula("=2^3^2").unwrap();
        if let Expr::Binary { op, left, right } = expr {
            assert_eq!(op, BinOp::Pow);
            assert_eq!(*left, Expr::Number(2.0));
            assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinOp::Pow,
                    ..
                }
            ));
        } else {
            panic!("Expected Binary");
        }
    }

    #[test]
    fn test_parse_unary() {
        let expr = parse_formula("=-5").unwrap();
        assert!(matches!(
            expr,
            Expr::Unary {
                op: UnaryOp::Negate,
                ..
            }
        ));

        let expr = parse_formula("=!0").unwrap();
        assert!(matches!(
            expr,
            Expr::Unary {
                op: UnaryOp::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_comparison_outside_if_is_dropped() {
        // The operator and its right-hand side vanish; the left operand
        // stays
        assert_eq!(parse_formula("=3>4").unwrap(), Expr::Number(3.0));
        assert_eq!(
            parse_formula("=A1<>B1").unwrap(),
            Expr::CellRef(CellAddress::new(0, 0))
        );
    }

    #[test]
    fn test_comparison_inside_if() {
        let expr = parse_formula("=If(3>4, 1, 0)").unwrap();
        if let Expr::Call { func, args } = expr {
            assert_eq!(func, Func::If);
            assert!(matches!(
                &args[0],
                Expr::Compare {
                    op: CmpOp::Greater,
                    ..
                }
            ));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_comparison_armed_once_per_if() {
        // Only the first comparison after If( is recognized
        let expr = parse_formula("=If(1>2, 3>4, 5)").unwrap();
        if let Expr::Call { args, .. } = expr {
            assert!(matches!(&args[0], Expr::Compare { .. }));
            assert_eq!(args[1], Expr::Number(3.0));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_parse_cell_reference() {
        assert_eq!(
            parse_formula("=A1").unwrap(),
            Expr::CellRef(CellAddress::new(0, 0))
        );
    }

    #[test]
    fn test_parse_range_in_function() {
        let expr = parse_formula("=Sum(A1:A10)").unwrap();
        if let Expr::Call { func, args } = expr {
            assert_eq!(func, Func::Sum);
            assert_eq!(args.len(), 1);
            assert!(matches!(&args[0], Expr::Range(_)));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_parse_function_args() {
        let expr = parse_formula("=Sum(1,2,3,4,5)").unwrap();
        if let Expr::Call { func, args } = expr {
            assert_eq!(func, Func::Sum);
            assert_eq!(args.len(), 5);
        } else {
            panic!("Expected Call");
        }

        let expr = parse_formula("=Pi()").unwrap();
        if let Expr::Call { func, args } = expr {
            assert_eq!(func, Func::Pi);
            assert!(args.is_empty());
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_parse_expression_arguments() {
        // Each argument slot holds a full expression sub-tree
        let expr = parse_formula("=Pmt(0.05/12, 12*30, 500000)").unwrap();
        if let Expr::Call { func, args } = expr {
            assert_eq!(func, Func::Pmt);
            assert_eq!(args.len(), 3);
            assert!(matches!(
                &args[0],
                Expr::Binary {
                    op: BinOp::Div,
                    ..
                }
            ));
            assert!(matches!(
                &args[1],
                Expr::Binary {
                    op: BinOp::Mul,
                    ..
                }
            ));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_parse_nested_function() {
        let expr = parse_formula("=If(A1>0, Sum(B1:B10), 0)").unwrap();
        if let Expr::Call { func, args } = expr {
            assert_eq!(func, Func::If);
            assert_eq!(args.len(), 3);
            assert!(matches!(&args[0], Expr::Compare { .. }));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_unclosed_paren() {
        assert!(parse_formula("=(1+2").is_err());
        assert!(parse_formula("=Sum(1,2").is_err());
    }

    #[test]
    fn test_trailing_input() {
        assert!(parse_formula("=1 2").is_err());
        assert!(parse_formula("=1)").is_err());
    }
}
