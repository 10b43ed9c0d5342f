//! Tree-walking interpreter for expression-span code.

use restprobe_types::ast::*;
use restprobe_types::{CodeError, Value};

/// Identifier resolution, supplied by the evaluation context.
///
/// The interpreter itself knows nothing about scopes, raw specs, or the
/// runtime namespace; the [`SpecEvaluator`](crate::SpecEvaluator) implements
/// the full lookup chain behind this trait.
pub trait Resolve {
    /// Resolve a free identifier to a value, or `None` when it is unknown.
    fn resolve(&self, name: &str) -> Option<Value>;
}

/// Evaluates one parsed expression against a resolver.
pub struct Interpreter<'a> {
    resolver: &'a dyn Resolve,
}

impl<'a> Interpreter<'a> {
    pub fn new(resolver: &'a dyn Resolve) -> Self {
        Self { resolver }
    }

    /// Evaluate an expression to a value.
    pub fn eval(&self, expr: &Expr) -> Result<Value, CodeError> {
        match &expr.kind {
            ExprKind::NumberLit(n) => Ok(Value::Number(*n)),
            ExprKind::StringLit(s) => Ok(Value::String(s.clone())),
            ExprKind::BoolLit(b) => Ok(Value::Bool(*b)),
            ExprKind::NullLit => Ok(Value::Null),

            ExprKind::SequenceLit(elems) => {
                let mut values = Vec::with_capacity(elems.len());
                for elem in elems {
                    values.push(self.eval(elem)?);
                }
                Ok(Value::Sequence(values))
            }

            ExprKind::Identifier(name) => self
                .resolver
                .resolve(name)
                .ok_or_else(|| CodeError::UndefinedName(name.clone())),

            ExprKind::FieldAccess { object, field } => self.eval_field_access(object, field),
            ExprKind::Index { object, index } => self.eval_index(object, index),

            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, operand),
            ExprKind::Paren(inner) => self.eval(inner),
        }
    }

    // ── Access ───────────────────────────────────────────────────────────

    fn eval_field_access(&self, object: &Expr, field: &Ident) -> Result<Value, CodeError> {
        let obj = self.eval(object)?;
        match &obj {
            Value::Mapping(fields) => {
                fields
                    .get(&field.name)
                    .cloned()
                    .ok_or_else(|| CodeError::NoSuchField {
                        field: field.name.clone(),
                        type_name: "mapping",
                    })
            }
            _ => Err(CodeError::TypeMismatch(format!(
                "cannot access field '{}' on {}",
                field.name,
                obj.type_name()
            ))),
        }
    }

    fn eval_index(&self, object: &Expr, index: &Expr) -> Result<Value, CodeError> {
        let obj = self.eval(object)?;
        let idx = self.eval(index)?;
        match (&obj, &idx) {
            (Value::Sequence(items), Value::Number(n)) => {
                if n.fract() != 0.0 || !n.is_finite() {
                    return Err(CodeError::TypeMismatch(format!(
                        "sequence index must be an integer, got {n}"
                    )));
                }
                let raw = *n as i64;
                // Negative indices count from the end.
                let resolved = if raw < 0 { raw + items.len() as i64 } else { raw };
                usize::try_from(resolved)
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned()
                    .ok_or(CodeError::IndexOutOfBounds {
                        index: raw,
                        len: items.len(),
                    })
            }
            (Value::Mapping(fields), Value::String(key)) => fields
                .get(key)
                .cloned()
                .ok_or_else(|| CodeError::NoSuchKey(key.clone())),
            _ => Err(CodeError::TypeMismatch(format!(
                "cannot index {} with {}",
                obj.type_name(),
                idx.type_name()
            ))),
        }
    }

    // ── Operators ────────────────────────────────────────────────────────

    fn eval_binary(&self, left: &Expr, op: BinOp, right: &Expr) -> Result<Value, CodeError> {
        // Short-circuit for logical operators
        if op == BinOp::And {
            let lv = self.eval(left)?;
            return if !lv.is_truthy() {
                Ok(Value::Bool(false))
            } else {
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            };
        }
        if op == BinOp::Or {
            let lv = self.eval(left)?;
            return if lv.is_truthy() {
                Ok(Value::Bool(true))
            } else {
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            };
        }

        let lv = self.eval(left)?;
        let rv = self.eval(right)?;

        match op {
            BinOp::Add => eval_add(&lv, &rv),
            BinOp::Sub => eval_arith(&lv, &rv, |a, b| a - b, "-"),
            BinOp::Mul => eval_arith(&lv, &rv, |a, b| a * b, "*"),
            BinOp::Div => {
                if let (Value::Number(a), Value::Number(b)) = (&lv, &rv) {
                    if *b == 0.0 {
                        return Err(CodeError::ArithmeticTrap("division by zero".into()));
                    }
                    finite(a / b, "/")
                } else {
                    Err(CodeError::TypeMismatch(format!(
                        "cannot divide {} by {}",
                        lv.type_name(),
                        rv.type_name()
                    )))
                }
            }
            BinOp::Mod => {
                if let (Value::Number(a), Value::Number(b)) = (&lv, &rv) {
                    if *b == 0.0 {
                        return Err(CodeError::ArithmeticTrap("modulo by zero".into()));
                    }
                    finite(a % b, "%")
                } else {
                    Err(CodeError::TypeMismatch(format!(
                        "cannot modulo {} by {}",
                        lv.type_name(),
                        rv.type_name()
                    )))
                }
            }
            BinOp::Eq => Ok(Value::Bool(lv == rv)),
            BinOp::NotEq => Ok(Value::Bool(lv != rv)),
            BinOp::Less => eval_comparison(&lv, &rv, |o| o.is_lt()),
            BinOp::Greater => eval_comparison(&lv, &rv, |o| o.is_gt()),
            BinOp::LessEq => eval_comparison(&lv, &rv, |o| o.is_le()),
            BinOp::GreaterEq => eval_comparison(&lv, &rv, |o| o.is_ge()),
            BinOp::In => Ok(Value::Bool(eval_contains(&lv, &rv)?)),
            BinOp::NotIn => Ok(Value::Bool(!eval_contains(&lv, &rv)?)),
            BinOp::And | BinOp::Or => unreachable!("handled above"),
        }
    }

    fn eval_unary(&self, op: UnaryOp, operand: &Expr) -> Result<Value, CodeError> {
        let val = self.eval(operand)?;
        match op {
            UnaryOp::Neg => {
                if let Value::Number(n) = val {
                    Ok(Value::Number(-n))
                } else {
                    Err(CodeError::TypeMismatch(format!(
                        "cannot negate {}",
                        val.type_name()
                    )))
                }
            }
            UnaryOp::Not => Ok(Value::Bool(!val.is_truthy())),
        }
    }
}

// ── Operator helpers ─────────────────────────────────────────────────────

fn eval_add(lv: &Value, rv: &Value) -> Result<Value, CodeError> {
    match (lv, rv) {
        (Value::Number(a), Value::Number(b)) => finite(a + b, "+"),
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        _ => Err(CodeError::TypeMismatch(format!(
            "cannot add {} and {}",
            lv.type_name(),
            rv.type_name()
        ))),
    }
}

fn eval_arith(
    lv: &Value,
    rv: &Value,
    op: fn(f64, f64) -> f64,
    symbol: &str,
) -> Result<Value, CodeError> {
    if let (Value::Number(a), Value::Number(b)) = (lv, rv) {
        finite(op(*a, *b), symbol)
    } else {
        Err(CodeError::TypeMismatch(format!(
            "cannot apply '{symbol}' to {} and {}",
            lv.type_name(),
            rv.type_name()
        )))
    }
}

fn finite(result: f64, symbol: &str) -> Result<Value, CodeError> {
    if result.is_nan() || result.is_infinite() {
        Err(CodeError::ArithmeticTrap(format!(
            "'{symbol}' produced NaN/Infinity"
        )))
    } else {
        Ok(Value::Number(result))
    }
}

fn eval_comparison(
    lv: &Value,
    rv: &Value,
    accept: fn(std::cmp::Ordering) -> bool,
) -> Result<Value, CodeError> {
    let ordering = match (lv, rv) {
        (Value::Number(a), Value::Number(b)) => {
            a.partial_cmp(b).ok_or_else(|| {
                CodeError::ArithmeticTrap("cannot order NaN".into())
            })?
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => {
            return Err(CodeError::TypeMismatch(format!(
                "cannot compare {} and {}",
                lv.type_name(),
                rv.type_name()
            )));
        }
    };
    Ok(Value::Bool(accept(ordering)))
}

/// `needle in haystack`: substring for strings, membership for sequences,
/// key presence for mappings.
fn eval_contains(needle: &Value, haystack: &Value) -> Result<bool, CodeError> {
    match (needle, haystack) {
        (Value::String(n), Value::String(h)) => Ok(h.contains(n.as_str())),
        (_, Value::Sequence(items)) => Ok(items.iter().any(|item| item == needle)),
        (Value::String(n), Value::Mapping(fields)) => Ok(fields.contains_key(n)),
        _ => Err(CodeError::TypeMismatch(format!(
            "cannot test {} membership in {}",
            needle.type_name(),
            haystack.type_name()
        ))),
    }
}
