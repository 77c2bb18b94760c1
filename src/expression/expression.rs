//! Compiles formula text such as `x**2 + sin(x)` into an evaluable tree.
//!
//! Evaluation walks the tree; nothing is ever executed dynamically.

use std::fmt;

use thiserror::Error;

use crate::expression::parser::Parser;
use crate::expression::token::tokenize;
use crate::integrand::integrand::Integrand;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("invalid number '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("function '{function}' expects a parenthesised argument at position {position}")]
    ExpectedArgument { function: String, position: usize },

    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("unexpected token at position {position}")]
    UnexpectedToken { position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow
}

impl BinaryOperator {
    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOperator::Add => lhs + rhs,
            BinaryOperator::Sub => lhs - rhs,
            BinaryOperator::Mul => lhs * rhs,
            BinaryOperator::Div => lhs / rhs,
            BinaryOperator::Pow => pow(lhs, rhs)
        }
    }
}

// Integer exponents go through powi so negative bases stay real.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs
}

impl Function {
    pub fn from_name(name: &str) -> Option<Function> {
        let function = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" | "arcsin" => Function::Asin,
            "acos" | "arccos" => Function::Acos,
            "atan" | "arctan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "exp" => Function::Exp,
            // natural log, as in the usual math libraries
            "ln" | "log" => Function::Ln,
            "log10" => Function::Log10,
            "log2" => Function::Log2,
            "sqrt" => Function::Sqrt,
            "abs" => Function::Abs,
            _ => return None
        };
        Some(function)
    }

    fn apply(&self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Log10 => x.log10(),
            Function::Log2 => x.log2(),
            Function::Sqrt => x.sqrt(),
            Function::Abs => x.abs()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    Variable,
    Negate(Box<Expr>),
    Binary(BinaryOperator, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>)
}

impl Expr {
    pub fn binary(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Constant(value) => *value,
            Expr::Variable => x,
            Expr::Negate(operand) => -operand.eval(x),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval(x), rhs.eval(x)),
            Expr::Call(function, argument) => function.apply(argument.eval(x))
        }
    }
}

/// A formula in `x` ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    source: String,
    root: Expr
}

impl CompiledExpression {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }
}

impl Integrand for CompiledExpression {
    fn value(&self, x: f64) -> f64 {
        self.root.eval(x)
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

pub fn compile(text: &str) -> Result<CompiledExpression, ParseExpressionError> {
    let tokens = tokenize(text)?;
    let root = Parser::new(&tokens, text.len()).parse()?;
    Ok(CompiledExpression { source: text.trim().to_owned(), root })
}
