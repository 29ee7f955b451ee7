//! Evaluation of type-checked statements against live symbol state.
//!
//! Values are computed on demand. Every read walks the expression again and
//! loads from the bound symbols, so a read after an assignment observes the
//! new value. Nothing is cached between reads.

use std::{collections::HashSet, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryExpr, BinaryOp, CallExpr, Identifier, LValue, UnaryExpr, UnaryOp},
        types::{Passing, Type},
    },
    driver::console::Console,
    errors::errors::{Error, ErrorImpl},
    symbols::value::{Place, Value},
    Position,
};

/// How control leaves a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Option<Value>),
}

pub struct Evaluator<'a> {
    program: &'a Program,
    console: &'a mut dyn Console,
    ill_typed: &'a HashSet<String>,
    max_call_depth: usize,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        program: &'a Program,
        console: &'a mut dyn Console,
        ill_typed: &'a HashSet<String>,
        max_call_depth: usize,
    ) -> Self {
        Evaluator {
            program,
            console,
            ill_typed,
            max_call_depth,
            depth: 0,
        }
    }

    pub fn execute_block(&mut self, body: &[Stmt]) -> Result<Flow, Error> {
        for stmt in body {
            if let Flow::Return(value) = self.execute_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    pub fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Flow, Error> {
        match stmt {
            Stmt::VarDecl(decl) => {
                let value = match &decl.init {
                    Some(init) => self.evaluate_expr(init)?,
                    None => Value::default_for(&decl.ty.ty),
                };
                decl.id.symbol()?.borrow_mut().value = value;
            }
            Stmt::FnDecl(_) => {}
            Stmt::Assign(assign) => {
                let value = self.evaluate_expr(&assign.exp.src)?;
                let place = self.place_of(&assign.exp.dst)?;
                store(&place, value, assign.span.start.clone())?;
            }
            Stmt::FromConsole(read) => {
                let ty = lvalue_type(&read.dst)?;
                let position = read.span.start.clone();
                let token = self
                    .console
                    .read_token()
                    .ok_or_else(|| Error::new(ErrorImpl::InputExhausted, position.clone()))?;
                let value = parse_input(&token, &ty)
                    .ok_or_else(|| {
                        Error::new(
                            ErrorImpl::InvalidInput {
                                input: token.clone(),
                                type_: ty.to_string(),
                            },
                            position.clone(),
                        )
                    })?;
                let place = self.place_of(&read.dst)?;
                store(&place, value, position)?;
            }
            Stmt::ToConsole(write) => {
                let value = self.evaluate_expr(&write.src)?;
                self.console.write(&value.render());
            }
            Stmt::PostInc(step) => self.step(&step.dst, 1, step.span.start.clone())?,
            Stmt::PostDec(step) => self.step(&step.dst, -1, step.span.start.clone())?,
            Stmt::If(if_stmt) => {
                if self.evaluate_condition(&if_stmt.cond)? {
                    return self.execute_block(&if_stmt.body);
                }
            }
            Stmt::IfElse(if_else) => {
                return if self.evaluate_condition(&if_else.cond)? {
                    self.execute_block(&if_else.then_body)
                } else {
                    self.execute_block(&if_else.else_body)
                };
            }
            Stmt::While(while_stmt) => {
                while self.evaluate_condition(&while_stmt.cond)? {
                    if let Flow::Return(value) = self.execute_block(&while_stmt.body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(value) => Some(self.evaluate_expr(value)?),
                    None => None,
                };
                return Ok(Flow::Return(value));
            }
            Stmt::Call(call) => {
                self.call(&call.call)?;
            }
        }

        Ok(Flow::Normal)
    }

    pub fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, Error> {
        match expr {
            Expr::IntLit(lit) => Ok(Value::Int(lit.value)),
            Expr::CharLit(lit) => Ok(Value::Char(lit.value)),
            Expr::StrLit(lit) => Ok(Value::Array(
                lit.value.bytes().map(Value::Char).collect(),
            )),
            Expr::True(_) => Ok(Value::Bool(true)),
            Expr::False(_) => Ok(Value::Bool(false)),
            Expr::NullPtr(_) => Ok(Value::Null),
            Expr::LValue(LValue::Ref(reference)) => {
                Ok(Value::Ptr(Place::whole(Rc::clone(reference.id.symbol()?))))
            }
            Expr::LValue(lvalue) => {
                let place = self.place_of(lvalue)?;
                let value = load(&place, lvalue.get_span().start.clone())?;
                if !value.is_set() {
                    return Err(Error::new(
                        ErrorImpl::UninitializedRead {
                            variable: lvalue.to_string(),
                        },
                        lvalue.get_span().start.clone(),
                    ));
                }
                Ok(value)
            }
            Expr::Assign(assign) => {
                let value = self.evaluate_expr(&assign.src)?;
                let place = self.place_of(&assign.dst)?;
                store(&place, value.clone(), assign.span.start.clone())?;
                Ok(value)
            }
            Expr::Call(call) => Ok(self.call(call)?.unwrap_or_default()),
            Expr::Unary(unary) => self.evaluate_unary(unary),
            Expr::Binary(binary) => self.evaluate_binary(binary),
        }
    }

    fn evaluate_condition(&mut self, cond: &Expr) -> Result<bool, Error> {
        match self.evaluate_expr(cond)? {
            Value::Bool(value) => Ok(value),
            other => Err(Error::new(
                ErrorImpl::NonBoolCondition {
                    received: other.kind_name().to_string(),
                },
                cond.get_span().start.clone(),
            )),
        }
    }

    fn evaluate_unary(&mut self, unary: &UnaryExpr) -> Result<Value, Error> {
        let position = unary.span.start.clone();

        match (unary.op, self.evaluate_expr(&unary.operand)?) {
            (UnaryOp::Neg, Value::Int(value)) => value
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| Error::new(ErrorImpl::ArithmeticOverflow, position)),
            (UnaryOp::Not, Value::Bool(value)) => Ok(Value::Bool(!value)),
            (op, operand) => Err(Error::new(
                ErrorImpl::InvalidOperand {
                    operator: op.symbol().to_string(),
                    operand: operand.kind_name().to_string(),
                },
                position,
            )),
        }
    }

    fn evaluate_binary(&mut self, binary: &BinaryExpr) -> Result<Value, Error> {
        let position = binary.span.start.clone();

        // Short-circuit before touching the right operand
        if binary.op.is_logical() {
            let left = self.evaluate_condition(&binary.left)?;
            return match (binary.op, left) {
                (BinaryOp::And, false) => Ok(Value::Bool(false)),
                (BinaryOp::Or, true) => Ok(Value::Bool(true)),
                _ => Ok(Value::Bool(self.evaluate_condition(&binary.right)?)),
            };
        }

        let left = self.evaluate_expr(&binary.left)?;
        let right = self.evaluate_expr(&binary.right)?;

        let mismatch = |left: &Value, right: &Value| {
            Error::new(
                ErrorImpl::InvalidOperands {
                    operator: binary.op.symbol().to_string(),
                    left: left.kind_name().to_string(),
                    right: right.kind_name().to_string(),
                },
                position.clone(),
            )
        };

        if binary.op.is_arithmetic() {
            return match (&left, &right) {
                (Value::Int(a), Value::Int(b)) => {
                    int_arithmetic(binary.op, *a, *b, position.clone()).map(Value::Int)
                }
                (Value::Char(a), Value::Char(b)) => {
                    char_arithmetic(binary.op, *a, *b, position.clone()).map(Value::Char)
                }
                _ => Err(mismatch(&left, &right)),
            };
        }

        if binary.op.is_equality() {
            let equal = values_equal(&left, &right).ok_or_else(|| mismatch(&left, &right))?;
            return Ok(Value::Bool(equal == (binary.op == BinaryOp::Equals)));
        }

        let ordering = match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            _ => return Err(mismatch(&left, &right)),
        };

        Ok(Value::Bool(match binary.op {
            BinaryOp::Less => ordering.is_lt(),
            BinaryOp::LessEq => ordering.is_le(),
            BinaryOp::Greater => ordering.is_gt(),
            _ => ordering.is_ge(),
        }))
    }

    fn step(&mut self, dst: &LValue, delta: i64, position: Position) -> Result<(), Error> {
        let place = self.place_of(dst)?;

        match load(&place, position.clone())? {
            Value::Int(value) => {
                let stepped = value
                    .checked_add(delta)
                    .ok_or_else(|| Error::new(ErrorImpl::ArithmeticOverflow, position.clone()))?;
                store(&place, Value::Int(stepped), position)
            }
            Value::Unset => Err(Error::new(
                ErrorImpl::UninitializedRead {
                    variable: dst.to_string(),
                },
                position,
            )),
            other => Err(Error::new(
                ErrorImpl::InvalidOperand {
                    operator: String::from(if delta > 0 { "++" } else { "--" }),
                    operand: other.kind_name().to_string(),
                },
                position,
            )),
        }
    }

    /// Resolves an l-value to the storage it designates.
    fn place_of(&mut self, lvalue: &LValue) -> Result<Place, Error> {
        match lvalue {
            LValue::Id(id) => place_of_identifier(id),
            LValue::Ref(reference) => Err(Error::new(
                ErrorImpl::NotAssignable {
                    target: lvalue.to_string(),
                },
                reference.span.start.clone(),
            )),
            LValue::Deref(deref) => pointee(&deref.id, deref.span.start.clone()),
            LValue::Index(index) => {
                let position = index.span.start.clone();
                let offset = match self.evaluate_expr(&index.offset)? {
                    Value::Int(offset) => offset,
                    other => {
                        return Err(Error::new(
                            ErrorImpl::TypeMatchError {
                                expected: Type::Int.to_string(),
                                received: other.kind_name().to_string(),
                            },
                            position,
                        ))
                    }
                };

                let base = match index.id.ty()? {
                    Type::Ptr(_) => pointee(&index.id, position.clone())?,
                    _ => place_of_identifier(&index.id)?,
                };

                base.offset_by(offset)
                    .map_err(|error| Error::new(error, position))
            }
        }
    }

    /// Runs the first top-level declaration of the callee.
    ///
    /// Arguments are evaluated in the caller's state. The callee's locals are
    /// saved and reset before binding and restored afterwards, so recursive
    /// activations do not clobber each other.
    fn call(&mut self, call: &CallExpr) -> Result<Option<Value>, Error> {
        let name = &call.callee.name;
        let position = call.span.start.clone();

        if self.ill_typed.contains(name) {
            return Err(Error::new(
                ErrorImpl::FunctionNotWellTyped {
                    function: name.clone(),
                },
                position,
            ));
        }

        let program = self.program;
        let decl = program.find_fn(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::FunctionNotFound {
                    function: name.clone(),
                },
                position.clone(),
            )
        })?;

        if self.depth >= self.max_call_depth {
            return Err(Error::new(
                ErrorImpl::CallDepthExceeded {
                    limit: self.max_call_depth,
                },
                position,
            ));
        }

        let mut args = Vec::with_capacity(call.args.len());
        for (formal, arg) in decl.formals.iter().zip(&call.args) {
            args.push(self.bind_argument(&formal.ty.ty, arg)?);
        }

        trace!("calling `{}` at depth {}", name, self.depth + 1);

        let saved: Vec<Value> = decl
            .locals
            .iter()
            .map(|symbol| std::mem::take(&mut symbol.borrow_mut().value))
            .collect();

        let bound = decl
            .formals
            .iter()
            .zip(args)
            .try_for_each(|(formal, value)| {
                formal.id.symbol()?.borrow_mut().value = value;
                Ok::<(), Error>(())
            });

        self.depth += 1;
        let result = bound.and_then(|_| self.execute_block(&decl.body));
        self.depth -= 1;

        for (symbol, value) in decl.locals.iter().zip(saved) {
            symbol.borrow_mut().value = value;
        }

        match result? {
            Flow::Return(Some(value)) => Ok(Some(value)),
            _ if *decl.return_type() == Type::Void => Ok(None),
            _ => {
                debug!("`{}` finished without a return value", name);
                Err(Error::new(
                    ErrorImpl::NoReturnValue {
                        function: name.clone(),
                    },
                    position,
                ))
            }
        }
    }

    fn bind_argument(&mut self, formal: &Type, arg: &Expr) -> Result<Value, Error> {
        let passing = match arg {
            Expr::LValue(lvalue) if lvalue.is_addressable() => formal
                .argument_passing(&lvalue_type(lvalue)?, true)
                .map(|passing| (passing, lvalue)),
            _ => None,
        };

        match passing {
            Some((Passing::ByReference, lvalue)) => Ok(Value::Ptr(self.place_of(lvalue)?)),
            Some((Passing::FirstElement, lvalue)) => {
                Ok(Value::Ptr(self.place_of(lvalue)?.first_element()))
            }
            _ => self.evaluate_expr(arg),
        }
    }
}

/// Whole-symbol place, following an array formal to the array it aliases.
fn place_of_identifier(id: &Identifier) -> Result<Place, Error> {
    let symbol = Rc::clone(id.symbol()?);
    let alias = {
        let borrowed = symbol.borrow();
        match (&borrowed.ty, &borrowed.value) {
            (Type::Array(_, _), Value::Ptr(place)) => Some(place.clone()),
            _ => None,
        }
    };

    Ok(alias.unwrap_or_else(|| Place::whole(symbol)))
}

/// The place a pointer variable currently points at.
fn pointee(id: &Identifier, position: Position) -> Result<Place, Error> {
    let value = id.symbol()?.borrow().value.clone();

    match value {
        Value::Ptr(place) => Ok(place),
        Value::Null => Err(Error::new(
            ErrorImpl::NullDereference {
                variable: id.name.clone(),
            },
            position,
        )),
        Value::Unset => Err(Error::new(
            ErrorImpl::UninitializedRead {
                variable: id.name.clone(),
            },
            position,
        )),
        other => Err(Error::new(
            ErrorImpl::InvalidDeref {
                variable: id.name.clone(),
                type_: other.kind_name().to_string(),
            },
            position,
        )),
    }
}

/// Static type of the storage an l-value designates.
fn lvalue_type(lvalue: &LValue) -> Result<Type, Error> {
    let ty = lvalue.identifier().ty()?;

    Ok(match lvalue {
        LValue::Id(_) => ty,
        LValue::Ref(_) => Type::ptr_to(ty),
        LValue::Deref(_) | LValue::Index(_) => ty.element().cloned().unwrap_or(Type::Error),
    })
}

fn load(place: &Place, position: Position) -> Result<Value, Error> {
    place.load().map_err(|error| Error::new(error, position))
}

fn store(place: &Place, value: Value, position: Position) -> Result<(), Error> {
    place.store(value).map_err(|error| Error::new(error, position))
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64, position: Position) -> Result<i64, Error> {
    if op == BinaryOp::Divide && b == 0 {
        return Err(Error::new(ErrorImpl::DivisionByZero, position));
    }

    let result = match op {
        BinaryOp::Plus => a.checked_add(b),
        BinaryOp::Minus => a.checked_sub(b),
        BinaryOp::Times => a.checked_mul(b),
        _ => a.checked_div(b),
    };

    result.ok_or_else(|| Error::new(ErrorImpl::ArithmeticOverflow, position))
}

fn char_arithmetic(op: BinaryOp, a: u8, b: u8, position: Position) -> Result<u8, Error> {
    if op == BinaryOp::Divide && b == 0 {
        return Err(Error::new(ErrorImpl::DivisionByZero, position));
    }

    let result = match op {
        BinaryOp::Plus => a.checked_add(b),
        BinaryOp::Minus => a.checked_sub(b),
        BinaryOp::Times => a.checked_mul(b),
        _ => a.checked_div(b),
    };

    result.ok_or_else(|| Error::new(ErrorImpl::ArithmeticOverflow, position))
}

/// Equality on scalars and pointers. `None` when the values are not comparable.
fn values_equal(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a == b),
        (Value::Char(a), Value::Char(b)) => Some(a == b),
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::Null, Value::Null) => Some(true),
        (Value::Ptr(a), Value::Ptr(b)) => Some(a == b),
        (Value::Null, Value::Ptr(_)) | (Value::Ptr(_), Value::Null) => Some(false),
        _ => None,
    }
}

/// Converts one console token to a value of the destination's scalar type.
fn parse_input(token: &str, ty: &Type) -> Option<Value> {
    match ty {
        Type::Int => token.parse().ok().map(Value::Int),
        Type::Bool => match token {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Type::Char => {
            let bytes = token.as_bytes();
            (bytes.len() == 1 && bytes[0].is_ascii()).then(|| Value::Char(bytes[0]))
        }
        _ => None,
    }
}
