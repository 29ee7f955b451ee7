use std::slice::Iter;

use crate::Span;

use super::{
    expressions::{
        AssignExpr, BinaryExpr, BinaryOp, CallExpr, CharLit, IntLit, LValue, StrLit, UnaryExpr,
        UnaryOp,
    },
    statements::{
        AssignStmt, CallStmt, FnDecl, FromConsoleStmt, IfElseStmt, IfStmt, PostDecStmt,
        PostIncStmt, ReturnStmt, ToConsoleStmt, VarDecl, WhileStmt,
    },
};

/// Statement Types
///
/// Node kind tags, used by diagnostics, logging and tests.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    VarDecl,
    FnDecl,
    AssignStmt,
    FromConsoleStmt,
    ToConsoleStmt,
    PostIncStmt,
    PostDecStmt,
    IfStmt,
    IfElseStmt,
    WhileStmt,
    ReturnStmt,
    CallStmt,
}

/// Top-level declarations and statements.
#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl(VarDecl),
    FnDecl(FnDecl),
    Assign(AssignStmt),
    FromConsole(FromConsoleStmt),
    ToConsole(ToConsoleStmt),
    PostInc(PostIncStmt),
    PostDec(PostDecStmt),
    If(IfStmt),
    IfElse(IfElseStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    Call(CallStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::VarDecl(_) => StmtType::VarDecl,
            Stmt::FnDecl(_) => StmtType::FnDecl,
            Stmt::Assign(_) => StmtType::AssignStmt,
            Stmt::FromConsole(_) => StmtType::FromConsoleStmt,
            Stmt::ToConsole(_) => StmtType::ToConsoleStmt,
            Stmt::PostInc(_) => StmtType::PostIncStmt,
            Stmt::PostDec(_) => StmtType::PostDecStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::IfElse(_) => StmtType::IfElseStmt,
            Stmt::While(_) => StmtType::WhileStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::Call(_) => StmtType::CallStmt,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::FromConsole(stmt) => &stmt.span,
            Stmt::ToConsole(stmt) => &stmt.span,
            Stmt::PostInc(stmt) => &stmt.span,
            Stmt::PostDec(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::IfElse(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Call(stmt) => &stmt.span,
        }
    }
}

/// Expression Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    IntLit,
    CharLit,
    StrLit,
    True,
    False,
    NullPtr,
    Id,
    Ref,
    Deref,
    Index,
    AssignExp,
    CallExp,
    Neg,
    Not,
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Equals,
    NotEquals,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

#[derive(Debug, Clone)]
pub enum Expr {
    IntLit(IntLit),
    CharLit(CharLit),
    StrLit(StrLit),
    True(Span),
    False(Span),
    NullPtr(Span),
    LValue(LValue),
    Assign(AssignExpr),
    Call(CallExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::IntLit(_) => ExprType::IntLit,
            Expr::CharLit(_) => ExprType::CharLit,
            Expr::StrLit(_) => ExprType::StrLit,
            Expr::True(_) => ExprType::True,
            Expr::False(_) => ExprType::False,
            Expr::NullPtr(_) => ExprType::NullPtr,
            Expr::LValue(lvalue) => lvalue.get_expr_type(),
            Expr::Assign(_) => ExprType::AssignExp,
            Expr::Call(_) => ExprType::CallExp,
            Expr::Unary(unary) => match unary.op {
                UnaryOp::Neg => ExprType::Neg,
                UnaryOp::Not => ExprType::Not,
            },
            Expr::Binary(binary) => match binary.op {
                BinaryOp::Plus => ExprType::Plus,
                BinaryOp::Minus => ExprType::Minus,
                BinaryOp::Times => ExprType::Times,
                BinaryOp::Divide => ExprType::Divide,
                BinaryOp::And => ExprType::And,
                BinaryOp::Or => ExprType::Or,
                BinaryOp::Equals => ExprType::Equals,
                BinaryOp::NotEquals => ExprType::NotEquals,
                BinaryOp::Less => ExprType::Less,
                BinaryOp::LessEq => ExprType::LessEq,
                BinaryOp::Greater => ExprType::Greater,
                BinaryOp::GreaterEq => ExprType::GreaterEq,
            },
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::IntLit(lit) => &lit.span,
            Expr::CharLit(lit) => &lit.span,
            Expr::StrLit(lit) => &lit.span,
            Expr::True(span) | Expr::False(span) | Expr::NullPtr(span) => span,
            Expr::LValue(lvalue) => lvalue.get_span(),
            Expr::Assign(assign) => &assign.span,
            Expr::Call(call) => &call.span,
            Expr::Unary(unary) => &unary.span,
            Expr::Binary(binary) => &binary.span,
        }
    }
}

/// The persistent program: every accepted fragment, in order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    fragments: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.fragments.push(stmt);
    }

    pub fn last(&self) -> Option<&Stmt> {
        self.fragments.last()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.fragments.iter()
    }

    /// First top-level function declaration named `name`, in declaration order.
    pub fn find_fn(&self, name: &str) -> Option<&FnDecl> {
        self.fragments.iter().find_map(|stmt| match stmt {
            Stmt::FnDecl(decl) if decl.id.name == name => Some(decl),
            _ => None,
        })
    }
}
