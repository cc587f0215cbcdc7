use std::f64::consts::PI;

use crate::error::ExprError;

/// Parse-time expression tree. Identifiers and function names are still
/// unresolved strings; [`resolve`] checks them against the declared variable
/// and the known function set.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawExpr {
    Number(f64),
    Ident(String),
    Neg(Box<RawExpr>),
    Add(Box<RawExpr>, Box<RawExpr>),
    Sub(Box<RawExpr>, Box<RawExpr>),
    Mul(Box<RawExpr>, Box<RawExpr>),
    Div(Box<RawExpr>, Box<RawExpr>),
    Pow(Box<RawExpr>, Box<RawExpr>),
    Call(String, Box<RawExpr>),
}

/// Resolved expression tree over a single variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

/// Built-in unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Abs,
    Sqrt,
    Exp,
    Ln,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "abs" => Some(Self::Abs),
            "sqrt" => Some(Self::Sqrt),
            "exp" => Some(Self::Exp),
            "ln" => Some(Self::Ln),
            _ => None,
        }
    }
}

/// Resolves identifiers against the declared variable name and the known
/// constants/functions. Unknown names are reported, never guessed.
pub(crate) fn resolve(raw: RawExpr, variable: &str) -> Result<Expr, ExprError> {
    let bin = |lhs: RawExpr, rhs: RawExpr, variable: &str| -> Result<(Box<Expr>, Box<Expr>), ExprError> {
        Ok((
            Box::new(resolve(lhs, variable)?),
            Box::new(resolve(rhs, variable)?),
        ))
    };
    match raw {
        RawExpr::Number(value) => Ok(Expr::Number(value)),
        RawExpr::Ident(name) => {
            if name == variable {
                Ok(Expr::Var)
            } else if name == "pi" {
                Ok(Expr::Number(PI))
            } else {
                Err(ExprError::UnknownIdentifier(name))
            }
        }
        RawExpr::Neg(inner) => Ok(Expr::Neg(Box::new(resolve(*inner, variable)?))),
        RawExpr::Add(lhs, rhs) => {
            let (lhs, rhs) = bin(*lhs, *rhs, variable)?;
            Ok(Expr::Add(lhs, rhs))
        }
        RawExpr::Sub(lhs, rhs) => {
            let (lhs, rhs) = bin(*lhs, *rhs, variable)?;
            Ok(Expr::Sub(lhs, rhs))
        }
        RawExpr::Mul(lhs, rhs) => {
            let (lhs, rhs) = bin(*lhs, *rhs, variable)?;
            Ok(Expr::Mul(lhs, rhs))
        }
        RawExpr::Div(lhs, rhs) => {
            let (lhs, rhs) = bin(*lhs, *rhs, variable)?;
            Ok(Expr::Div(lhs, rhs))
        }
        RawExpr::Pow(lhs, rhs) => {
            let (lhs, rhs) = bin(*lhs, *rhs, variable)?;
            Ok(Expr::Pow(lhs, rhs))
        }
        RawExpr::Call(name, arg) => {
            let func = Func::from_name(&name).ok_or(ExprError::UnknownFunction(name))?;
            Ok(Expr::Call(func, Box::new(resolve(*arg, variable)?)))
        }
    }
}

pub(crate) fn eval(expr: &Expr, t: f64) -> Result<f64, ExprError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Var => Ok(t),
        Expr::Neg(inner) => Ok(-eval(inner, t)?),
        Expr::Add(lhs, rhs) => Ok(eval(lhs, t)? + eval(rhs, t)?),
        Expr::Sub(lhs, rhs) => Ok(eval(lhs, t)? - eval(rhs, t)?),
        Expr::Mul(lhs, rhs) => Ok(eval(lhs, t)? * eval(rhs, t)?),
        Expr::Div(lhs, rhs) => {
            // Only exact zero is a domain error; tiny denominators are
            // legitimate, and overflow to infinity is caught by the
            // top-level finiteness check.
            let denominator = eval(rhs, t)?;
            if denominator == 0.0 {
                return Err(ExprError::Domain("division by zero".to_owned()));
            }
            Ok(eval(lhs, t)? / denominator)
        }
        Expr::Pow(lhs, rhs) => Ok(eval(lhs, t)?.powf(eval(rhs, t)?)),
        Expr::Call(func, arg) => {
            let value = eval(arg, t)?;
            match func {
                Func::Sin => Ok(value.sin()),
                Func::Cos => Ok(value.cos()),
                Func::Tan => Ok(value.tan()),
                Func::Abs => Ok(value.abs()),
                Func::Sqrt => {
                    if value < 0.0 {
                        return Err(ExprError::Domain(format!(
                            "square root of negative value {value}"
                        )));
                    }
                    Ok(value.sqrt())
                }
                Func::Exp => Ok(value.exp()),
                Func::Ln => {
                    if value <= 0.0 {
                        return Err(ExprError::Domain(format!(
                            "logarithm of non-positive value {value}"
                        )));
                    }
                    Ok(value.ln())
                }
            }
        }
    }
}
