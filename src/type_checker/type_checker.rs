use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{AssignExpr, BinaryExpr, CallExpr, LValue, UnaryExpr, UnaryOp},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    symbols::symbol_table::SymbolKind,
    Position,
};

/// Collects diagnostics for one fragment.
///
/// Checking never stops at the first error: an ill-typed node gets the
/// `Error` type and its parents accept that silently, so each problem is
/// reported exactly once.
#[derive(Debug, Default)]
pub struct TypeChecker {
    diagnostics: Vec<Error>,
    return_types: Vec<Type>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker::default()
    }

    pub fn report(&mut self, error: ErrorImpl, position: Position) -> Type {
        self.diagnostics.push(Error::new(error, position));
        Type::Error
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Type {
    match expr {
        Expr::IntLit(_) => Type::Int,
        Expr::CharLit(_) => Type::Char,
        Expr::StrLit(lit) => Type::Array(Box::new(Type::Char), Some(lit.value.len())),
        Expr::True(_) | Expr::False(_) => Type::Bool,
        Expr::NullPtr(_) => Type::null_ptr(),
        Expr::LValue(lvalue) => type_check_lvalue(type_checker, lvalue),
        Expr::Assign(assign) => type_check_assign(type_checker, assign),
        Expr::Call(call) => {
            let ret = type_check_call(type_checker, call);
            if ret == Type::Void {
                type_checker.report(
                    ErrorImpl::VoidInExpression {
                        callee: call.callee.name.clone(),
                    },
                    call.span.start.clone(),
                )
            } else {
                ret
            }
        }
        Expr::Unary(unary) => type_check_unary(type_checker, unary),
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
    }
}

pub fn type_check_lvalue(type_checker: &mut TypeChecker, lvalue: &LValue) -> Type {
    let id = lvalue.identifier();
    let ty = match id.ty() {
        Ok(ty) => ty,
        Err(error) => {
            type_checker.diagnostics.push(error);
            return Type::Error;
        }
    };

    match lvalue {
        LValue::Id(_) => ty,
        LValue::Ref(reference) => {
            if ty.is_scalar() {
                Type::ptr_to(ty)
            } else {
                type_checker.report(
                    ErrorImpl::InvalidRef {
                        variable: id.name.clone(),
                    },
                    reference.span.start.clone(),
                )
            }
        }
        LValue::Deref(deref) => match &ty {
            Type::Ptr(inner) if **inner != Type::Void => (**inner).clone(),
            _ => type_checker.report(
                ErrorImpl::InvalidDeref {
                    variable: id.name.clone(),
                    type_: ty.to_string(),
                },
                deref.span.start.clone(),
            ),
        },
        LValue::Index(index) => {
            let offset = type_check_expr(type_checker, &index.offset);

            if !offset.is_error() && offset != Type::Int {
                return type_checker.report(
                    ErrorImpl::TypeMatchError {
                        expected: Type::Int.to_string(),
                        received: offset.to_string(),
                    },
                    index.offset.get_span().start.clone(),
                );
            }

            match ty.element() {
                Some(element) if !offset.is_error() => element.clone(),
                Some(_) => Type::Error,
                None => type_checker.report(
                    ErrorImpl::InvalidIndex {
                        variable: id.name.clone(),
                        type_: ty.to_string(),
                    },
                    index.span.start.clone(),
                ),
            }
        }
    }
}

pub fn type_check_assign(type_checker: &mut TypeChecker, assign: &AssignExpr) -> Type {
    let dst = type_check_destination(type_checker, &assign.dst);
    let src = type_check_expr(type_checker, &assign.src);

    if dst.is_error() || src.is_error() {
        Type::Error
    } else if !dst.accepts(&src) {
        type_checker.report(
            ErrorImpl::TypeMatchError {
                expected: dst.to_string(),
                received: src.to_string(),
            },
            assign.src.get_span().start.clone(),
        )
    } else {
        dst
    }
}

/// Type of an l-value used as a storage target.
fn type_check_destination(type_checker: &mut TypeChecker, dst: &LValue) -> Type {
    let ty = type_check_lvalue(type_checker, dst);
    if ty.is_error() {
        return ty;
    }

    let is_function = dst
        .identifier()
        .symbol
        .as_ref()
        .is_some_and(|symbol| symbol.borrow().kind == SymbolKind::Fn);

    if !dst.is_addressable() || is_function {
        return type_checker.report(
            ErrorImpl::NotAssignable {
                target: dst.to_string(),
            },
            dst.get_span().start.clone(),
        );
    }

    ty
}

/// Checks a call and returns the callee's return type, `void` included.
pub fn type_check_call(type_checker: &mut TypeChecker, call: &CallExpr) -> Type {
    let callee = match call.callee.ty() {
        Ok(ty) => ty,
        Err(error) => {
            type_checker.diagnostics.push(error);
            return Type::Error;
        }
    };

    let args: Vec<Type> = call
        .args
        .iter()
        .map(|arg| type_check_expr(type_checker, arg))
        .collect();

    let Type::Fn(fn_type) = callee else {
        return type_checker.report(
            ErrorImpl::NotCallable {
                callee: call.callee.name.clone(),
            },
            call.callee.span.start.clone(),
        );
    };

    if args.len() > fn_type.params.len() {
        return type_checker.report(
            ErrorImpl::UnexpectedArguments {
                expected: fn_type.params.len(),
                received: args.len(),
            },
            call.args[fn_type.params.len()].get_span().start.clone(),
        );
    } else if args.len() < fn_type.params.len() {
        return type_checker.report(
            ErrorImpl::MissingArguments {
                expected: fn_type.params.len(),
                received: args.len(),
            },
            call.span.end.clone(),
        );
    }

    let mut well_typed = true;
    for ((formal, actual), arg) in fn_type.params.iter().zip(&args).zip(&call.args) {
        if actual.is_error() {
            well_typed = false;
            continue;
        }

        let addressable = matches!(arg, Expr::LValue(lvalue) if lvalue.is_addressable());
        if formal.argument_passing(actual, addressable).is_none() {
            type_checker.report(
                ErrorImpl::ArgumentTypeMatchError {
                    expected: formal.to_string(),
                    received: actual.to_string(),
                },
                arg.get_span().start.clone(),
            );
            well_typed = false;
        }
    }

    if well_typed {
        *fn_type.ret
    } else {
        Type::Error
    }
}

fn type_check_unary(type_checker: &mut TypeChecker, unary: &UnaryExpr) -> Type {
    let operand = type_check_expr(type_checker, &unary.operand);
    if operand.is_error() {
        return Type::Error;
    }

    let expected = match unary.op {
        UnaryOp::Neg => Type::Int,
        UnaryOp::Not => Type::Bool,
    };

    if operand == expected {
        operand
    } else {
        type_checker.report(
            ErrorImpl::InvalidOperand {
                operator: unary.op.symbol().to_string(),
                operand: operand.to_string(),
            },
            unary.span.start.clone(),
        )
    }
}

fn type_check_binary(type_checker: &mut TypeChecker, binary: &BinaryExpr) -> Type {
    let left = type_check_expr(type_checker, &binary.left);
    let right = type_check_expr(type_checker, &binary.right);

    if left.is_error() || right.is_error() {
        return Type::Error;
    }

    let result = match binary.op {
        op if op.is_arithmetic() => match (&left, &right) {
            (Type::Int, Type::Int) => Some(Type::Int),
            (Type::Char, Type::Char) => Some(Type::Char),
            _ => None,
        },
        op if op.is_logical() => {
            (left == Type::Bool && right == Type::Bool).then_some(Type::Bool)
        }
        op if op.is_equality() => {
            let comparable = (left == right && (left.is_scalar() || left.is_ptr()))
                || (left.is_ptr() && right.is_ptr() && (left.is_null_ptr() || right.is_null_ptr()));
            comparable.then_some(Type::Bool)
        }
        _ => (left == right && left.is_scalar()).then_some(Type::Bool),
    };

    match result {
        Some(ty) => ty,
        None => type_checker.report(
            ErrorImpl::InvalidOperands {
                operator: binary.op.symbol().to_string(),
                left: left.to_string(),
                right: right.to_string(),
            },
            binary.span.start.clone(),
        ),
    }
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) {
    match stmt {
        Stmt::VarDecl(decl) => {
            if let Some(init) = &decl.init {
                let src = type_check_expr(type_checker, init);
                if !src.is_error() && !decl.ty.ty.accepts(&src) {
                    type_checker.report(
                        ErrorImpl::TypeMatchError {
                            expected: decl.ty.ty.to_string(),
                            received: src.to_string(),
                        },
                        init.get_span().start.clone(),
                    );
                }
            }
        }
        Stmt::FnDecl(decl) => {
            type_checker.return_types.push(decl.return_type().clone());
            type_check_block(type_checker, &decl.body);
            type_checker.return_types.pop();
        }
        Stmt::Assign(assign) => {
            type_check_assign(type_checker, &assign.exp);
        }
        Stmt::FromConsole(read) => {
            let dst = type_check_destination(type_checker, &read.dst);
            if !dst.is_error() && !dst.is_scalar() {
                type_checker.report(
                    ErrorImpl::InvalidConsoleRead {
                        type_: dst.to_string(),
                    },
                    read.dst.get_span().start.clone(),
                );
            }
        }
        Stmt::ToConsole(write) => {
            let src = type_check_expr(type_checker, &write.src);
            if !src.is_error() && !src.is_scalar() && !src.is_char_array() {
                type_checker.report(
                    ErrorImpl::InvalidConsoleWrite {
                        type_: src.to_string(),
                    },
                    write.src.get_span().start.clone(),
                );
            }
        }
        Stmt::PostInc(step) => type_check_step(type_checker, &step.dst, "++"),
        Stmt::PostDec(step) => type_check_step(type_checker, &step.dst, "--"),
        Stmt::If(if_stmt) => {
            type_check_condition(type_checker, &if_stmt.cond);
            type_check_block(type_checker, &if_stmt.body);
        }
        Stmt::IfElse(if_else) => {
            type_check_condition(type_checker, &if_else.cond);
            type_check_block(type_checker, &if_else.then_body);
            type_check_block(type_checker, &if_else.else_body);
        }
        Stmt::While(while_stmt) => {
            type_check_condition(type_checker, &while_stmt.cond);
            type_check_block(type_checker, &while_stmt.body);
        }
        Stmt::Return(ret) => {
            let Some(expected) = type_checker.return_types.last().cloned() else {
                type_checker.report(ErrorImpl::ReturnOutsideFunction, ret.span.start.clone());
                return;
            };

            match &ret.value {
                Some(value) => {
                    let received = type_check_expr(type_checker, value);
                    if received.is_error() {
                        return;
                    }
                    if expected == Type::Void {
                        type_checker.report(
                            ErrorImpl::UnexpectedReturnValue {
                                received: received.to_string(),
                            },
                            value.get_span().start.clone(),
                        );
                    } else if !expected.accepts(&received) {
                        type_checker.report(
                            ErrorImpl::TypeMatchError {
                                expected: expected.to_string(),
                                received: received.to_string(),
                            },
                            value.get_span().start.clone(),
                        );
                    }
                }
                None if expected != Type::Void => {
                    type_checker.report(
                        ErrorImpl::MissingReturnValue {
                            expected: expected.to_string(),
                        },
                        ret.span.start.clone(),
                    );
                }
                None => {}
            }
        }
        Stmt::Call(call) => {
            type_check_call(type_checker, &call.call);
        }
    }
}

pub fn type_check_block(type_checker: &mut TypeChecker, body: &[Stmt]) {
    for stmt in body {
        type_check_stmt(type_checker, stmt);
    }
}

fn type_check_condition(type_checker: &mut TypeChecker, cond: &Expr) {
    let ty = type_check_expr(type_checker, cond);
    if !ty.is_error() && ty != Type::Bool {
        type_checker.report(
            ErrorImpl::NonBoolCondition {
                received: ty.to_string(),
            },
            cond.get_span().start.clone(),
        );
    }
}

fn type_check_step(type_checker: &mut TypeChecker, dst: &LValue, operator: &str) {
    let ty = type_check_destination(type_checker, dst);
    if !ty.is_error() && ty != Type::Int {
        type_checker.report(
            ErrorImpl::InvalidOperand {
                operator: operator.to_string(),
                operand: ty.to_string(),
            },
            dst.get_span().start.clone(),
        );
    }
}

/// Checks one fragment and returns its diagnostics.
pub fn type_check(stmt: &Stmt) -> Vec<Error> {
    let mut type_checker = TypeChecker::new();
    type_check_stmt(&mut type_checker, stmt);
    type_checker.take_diagnostics()
}
