use std::collections::HashSet;

use log::{debug, info, warn};

use crate::{
    ast::ast::{Program, Stmt, StmtType},
    errors::errors::{Error, ErrorImpl},
    name_analysis::name_analysis::NameAnalyzer,
    parser::parser::parse_fragment,
    symbols::{symbol_table::SymbolTable, value::Value},
    type_checker::{
        eval::Evaluator,
        type_checker::{type_check_stmt, TypeChecker},
    },
    Position,
};

use super::console::Console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Reject only the offending fragment on a name error instead of ending
    /// the session.
    pub recover_name_errors: bool,
    pub max_call_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            recover_name_errors: false,
            max_call_depth: 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Rejected,
    Closed,
}

/// Result of accepting one top-level fragment.
#[derive(Debug, Clone)]
pub enum FragmentOutcome {
    Declared,
    Executed,
    TypeErrors(Vec<Error>),
    RuntimeError(Error),
    /// Only produced when name errors are recoverable.
    NameError(Error),
}

/// The persistent state of one interpreter session.
///
/// Each fragment is appended to the program, resolved against the persistent
/// symbol table, type-checked and, when it is a runnable statement, executed.
pub struct Session<C: Console> {
    program: Program,
    table: SymbolTable,
    console: C,
    diagnostics: Vec<Error>,
    config: SessionConfig,
    state: SessionState,
    ill_typed: HashSet<String>,
    fragments: usize,
}

impl<C: Console> Session<C> {
    pub fn new(console: C) -> Self {
        Session::with_config(console, SessionConfig::default())
    }

    pub fn with_config(console: C, config: SessionConfig) -> Self {
        Session {
            program: Program::new(),
            table: SymbolTable::new(),
            console,
            diagnostics: vec![],
            config,
            state: SessionState::Ready,
            ill_typed: HashSet::new(),
            fragments: 0,
        }
    }

    /// Parses `source` and accepts every top-level node in it, in order.
    ///
    /// Parse errors and (unless recovering) name errors end the session.
    pub fn submit(&mut self, source: &str) -> Result<Vec<FragmentOutcome>, Error> {
        let name = format!("shell:{}", self.fragments + 1);
        self.submit_named(source, &name)
    }

    /// Like `submit`, with positions reported against `name`.
    pub fn submit_named(&mut self, source: &str, name: &str) -> Result<Vec<FragmentOutcome>, Error> {
        self.ensure_ready()?;
        self.fragments += 1;

        let stmts = match parse_fragment(source, name) {
            Ok(stmts) => stmts,
            Err(error) => {
                warn!("parse failed: {}", error);
                self.state = SessionState::Rejected;
                self.diagnostics.push(error.clone());
                return Err(error);
            }
        };

        let mut outcomes = Vec::with_capacity(stmts.len());
        let result = stmts.into_iter().try_for_each(|stmt| {
            outcomes.push(self.accept(stmt)?);
            Ok::<(), Error>(())
        });
        self.console.end_fragment();

        result.map(|_| outcomes)
    }

    /// Accepts one already-parsed fragment.
    pub fn accept(&mut self, mut stmt: Stmt) -> Result<FragmentOutcome, Error> {
        self.ensure_ready()?;
        debug!("accepting {:?} fragment", stmt.get_stmt_type());

        let mut analyzer = NameAnalyzer::new(&mut self.table);
        if let Err(error) = analyzer.resolve_stmt(&mut stmt) {
            warn!("name analysis failed: {}", error);
            self.diagnostics.push(error.clone());

            if self.config.recover_name_errors {
                analyzer.rollback();
                return Ok(FragmentOutcome::NameError(error));
            }

            self.program.push(stmt);
            self.state = SessionState::Rejected;
            return Err(error);
        }

        let mut type_checker = TypeChecker::new();
        type_check_stmt(&mut type_checker, &stmt);

        if type_checker.has_errors() {
            let errors = type_checker.take_diagnostics();
            debug!("{} type error(s) in fragment", errors.len());

            if let Stmt::FnDecl(decl) = &stmt {
                self.ill_typed.insert(decl.id.name.clone());
            }

            self.diagnostics.extend(errors.iter().cloned());
            self.program.push(stmt);
            return Ok(FragmentOutcome::TypeErrors(errors));
        }

        let kind = stmt.get_stmt_type();
        self.program.push(stmt);

        if kind == StmtType::FnDecl {
            return Ok(FragmentOutcome::Declared);
        }

        let Some(last) = self.program.last() else {
            return Ok(FragmentOutcome::Executed);
        };

        let mut evaluator = Evaluator::new(
            &self.program,
            &mut self.console,
            &self.ill_typed,
            self.config.max_call_depth,
        );

        match evaluator.execute_stmt(last) {
            Ok(_) if kind == StmtType::VarDecl => Ok(FragmentOutcome::Declared),
            Ok(_) => Ok(FragmentOutcome::Executed),
            Err(error) => {
                warn!("runtime error: {}", error);
                self.diagnostics.push(error.clone());
                Ok(FragmentOutcome::RuntimeError(error))
            }
        }
    }

    /// Releases the global scope. Every later submission fails.
    pub fn close(&mut self) {
        info!(
            "closing session after {} fragment(s), {} diagnostic(s)",
            self.program.len(),
            self.diagnostics.len()
        );
        self.table.clear();
        self.state = SessionState::Closed;
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Rejected | SessionState::Closed => {
                Err(Error::new(ErrorImpl::SessionClosed, Position::null()))
            }
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current value of a global variable.
    pub fn global_value(&self, name: &str) -> Option<Value> {
        let symbol = self.table.global_scope().borrow().lookup(name)?;
        let value = symbol.borrow().value.clone();
        Some(value)
    }
}
