use log::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{Identifier, LValue},
        statements::FnDecl,
        types::{Type, TypeAnnotation},
    },
    errors::errors::{Error, ErrorImpl},
    symbols::{
        symbol_table::{Symbol, SymbolRef, SymbolTable},
        value::MAX_ARRAY_LENGTH,
    },
};

/// Binds every identifier in a fragment to its declaration.
///
/// Stops at the first error. Every scope the walk opens is closed again on
/// every exit path, so a failed fragment leaves the table at its starting
/// depth. Global insertions are journaled so a caller can undo them.
pub struct NameAnalyzer<'a> {
    table: &'a mut SymbolTable,
    global_insertions: Vec<String>,
    locals: Option<Vec<SymbolRef>>,
}

impl<'a> NameAnalyzer<'a> {
    pub fn new(table: &'a mut SymbolTable) -> Self {
        NameAnalyzer {
            table,
            global_insertions: vec![],
            locals: None,
        }
    }

    /// Removes the global symbols this analyzer inserted.
    pub fn rollback(self) {
        for name in self.global_insertions.iter().rev() {
            debug!("rolling back global `{}`", name);
            self.table.remove_global(name);
        }
    }

    pub fn resolve_stmt(&mut self, stmt: &mut Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::VarDecl(decl) => {
                validate_declaration(&decl.id, &decl.ty, false)?;
                let symbol = Symbol::new_var(decl.id.name.clone(), decl.ty.ty.clone());
                self.declare(&mut decl.id, symbol)?;

                match &mut decl.init {
                    Some(init) => self.resolve_expr(init),
                    None => Ok(()),
                }
            }
            Stmt::FnDecl(decl) => self.resolve_fn_decl(decl),
            Stmt::Assign(assign) => {
                self.resolve_lvalue(&mut assign.exp.dst)?;
                self.resolve_expr(&mut assign.exp.src)
            }
            Stmt::FromConsole(read) => self.resolve_lvalue(&mut read.dst),
            Stmt::ToConsole(write) => self.resolve_expr(&mut write.src),
            Stmt::PostInc(inc) => self.resolve_lvalue(&mut inc.dst),
            Stmt::PostDec(dec) => self.resolve_lvalue(&mut dec.dst),
            Stmt::If(if_stmt) => {
                self.resolve_expr(&mut if_stmt.cond)?;
                self.resolve_block(&mut if_stmt.body)
            }
            Stmt::IfElse(if_else) => {
                self.resolve_expr(&mut if_else.cond)?;
                self.resolve_block(&mut if_else.then_body)?;
                self.resolve_block(&mut if_else.else_body)
            }
            Stmt::While(while_stmt) => {
                self.resolve_expr(&mut while_stmt.cond)?;
                self.resolve_block(&mut while_stmt.body)
            }
            Stmt::Return(ret) => match &mut ret.value {
                Some(value) => self.resolve_expr(value),
                None => Ok(()),
            },
            Stmt::Call(call) => {
                self.resolve_identifier(&mut call.call.callee)?;
                call.call
                    .args
                    .iter_mut()
                    .try_for_each(|arg| self.resolve_expr(arg))
            }
        }
    }

    fn resolve_block(&mut self, body: &mut [Stmt]) -> Result<(), Error> {
        self.table.enter_scope();
        let result = body.iter_mut().try_for_each(|stmt| self.resolve_stmt(stmt));
        self.table.leave_scope();
        result
    }

    fn resolve_fn_decl(&mut self, decl: &mut FnDecl) -> Result<(), Error> {
        let symbol = Symbol::new_fn(decl.id.name.clone(), decl.fn_type());
        self.declare(&mut decl.id, symbol)?;

        let enclosing = self.locals.replace(vec![]);
        self.table.enter_scope();

        let result = self.resolve_fn_scope(decl);

        self.table.leave_scope();
        decl.locals = self.locals.take().unwrap_or_default();
        self.locals = enclosing;

        trace!(
            "`{}` has {} local symbols",
            decl.id.name,
            decl.locals.len()
        );
        result
    }

    /// Formals and body share the scope opened for the function.
    fn resolve_fn_scope(&mut self, decl: &mut FnDecl) -> Result<(), Error> {
        for formal in decl.formals.iter_mut() {
            validate_declaration(&formal.id, &formal.ty, true)?;
            let symbol = Symbol::new_var(formal.id.name.clone(), formal.ty.ty.clone());
            self.declare(&mut formal.id, symbol)?;
        }

        decl.body
            .iter_mut()
            .try_for_each(|stmt| self.resolve_stmt(stmt))
    }

    fn declare(&mut self, id: &mut Identifier, symbol: SymbolRef) -> Result<(), Error> {
        if !self.table.insert(symbol.clone()) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: id.name.clone(),
                },
                id.span.start.clone(),
            ));
        }

        trace!("declared `{}` at depth {}", id.name, self.table.depth());

        if self.table.is_global() {
            self.global_insertions.push(id.name.clone());
        }
        if let Some(locals) = &mut self.locals {
            locals.push(symbol.clone());
        }

        id.bind(symbol);
        Ok(())
    }

    fn resolve_expr(&mut self, expr: &mut Expr) -> Result<(), Error> {
        match expr {
            Expr::IntLit(_)
            | Expr::CharLit(_)
            | Expr::StrLit(_)
            | Expr::True(_)
            | Expr::False(_)
            | Expr::NullPtr(_) => Ok(()),
            Expr::LValue(lvalue) => self.resolve_lvalue(lvalue),
            Expr::Assign(assign) => {
                self.resolve_lvalue(&mut assign.dst)?;
                self.resolve_expr(&mut assign.src)
            }
            Expr::Call(call) => {
                self.resolve_identifier(&mut call.callee)?;
                call.args
                    .iter_mut()
                    .try_for_each(|arg| self.resolve_expr(arg))
            }
            Expr::Unary(unary) => self.resolve_expr(&mut unary.operand),
            Expr::Binary(binary) => {
                self.resolve_expr(&mut binary.left)?;
                self.resolve_expr(&mut binary.right)
            }
        }
    }

    fn resolve_lvalue(&mut self, lvalue: &mut LValue) -> Result<(), Error> {
        self.resolve_identifier(lvalue.identifier_mut())?;

        match lvalue {
            LValue::Index(index) => self.resolve_expr(&mut index.offset),
            _ => Ok(()),
        }
    }

    fn resolve_identifier(&mut self, id: &mut Identifier) -> Result<(), Error> {
        match self.table.find(&id.name) {
            Some(symbol) => {
                id.bind(symbol);
                Ok(())
            }
            None => Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: id.name.clone(),
                },
                id.span.start.clone(),
            )),
        }
    }
}

/// Rejects types no variable can hold. Open-length arrays are only legal
/// as formals, and sized arrays are capped at `MAX_ARRAY_LENGTH` elements.
fn validate_declaration(id: &Identifier, ty: &TypeAnnotation, formal: bool) -> Result<(), Error> {
    if let Type::Array(_, Some(length)) = &ty.ty {
        if *length > MAX_ARRAY_LENGTH {
            return Err(Error::new(
                ErrorImpl::ArrayTooLarge {
                    variable: id.name.clone(),
                    length: *length,
                    limit: MAX_ARRAY_LENGTH,
                },
                ty.span.start.clone(),
            ));
        }
    }

    let valid = match &ty.ty {
        Type::Void | Type::Error | Type::Fn(_) => false,
        Type::Array(element, length) => {
            **element != Type::Void && (formal || length.is_some())
        }
        _ => true,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::InvalidDeclarationType {
                variable: id.name.clone(),
                type_: ty.ty.to_string(),
            },
            ty.span.start.clone(),
        ))
    }
}

/// Resolves one fragment against `table` without journaling.
pub fn name_analysis(table: &mut SymbolTable, stmt: &mut Stmt) -> Result<(), Error> {
    NameAnalyzer::new(table).resolve_stmt(stmt)
}
