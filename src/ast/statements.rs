use crate::{symbols::symbol_table::SymbolRef, Span};

use super::{
    ast::{Expr, Stmt},
    expressions::{AssignExpr, CallExpr, Identifier, LValue},
    types::{FnType, Type, TypeAnnotation},
};

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: TypeAnnotation,
    pub id: Identifier,
    pub init: Option<Expr>,
    pub span: Span,
}

/// A variable declaration in a parameter list.
#[derive(Debug, Clone)]
pub struct FormalDecl {
    pub ty: TypeAnnotation,
    pub id: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FnDecl {
    pub ret: TypeAnnotation,
    pub id: Identifier,
    pub formals: Vec<FormalDecl>,
    pub body: Vec<Stmt>,
    /// Formals followed by every variable declared in the body, filled in
    /// by name analysis. Calls save and restore these around the body.
    pub locals: Vec<SymbolRef>,
    pub span: Span,
}

impl FnDecl {
    pub fn fn_type(&self) -> FnType {
        FnType {
            params: self
                .formals
                .iter()
                .map(|formal| formal.ty.ty.clone())
                .collect(),
            ret: Box::new(self.ret.ty.clone()),
        }
    }

    pub fn return_type(&self) -> &Type {
        &self.ret.ty
    }
}

#[derive(Debug, Clone)]
pub struct AssignStmt {
    pub exp: AssignExpr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FromConsoleStmt {
    pub dst: LValue,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ToConsoleStmt {
    pub src: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PostIncStmt {
    pub dst: LValue,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PostDecStmt {
    pub dst: LValue,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfElseStmt {
    pub cond: Expr,
    pub then_body: Vec<Stmt>,
    pub else_body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallStmt {
    pub call: CallExpr,
    pub span: Span,
}
