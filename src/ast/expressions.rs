use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    symbols::symbol_table::SymbolRef,
    Span,
};

use super::{ast::Expr, ast::ExprType, types::Type};

// LITERALS

#[derive(Debug, Clone)]
pub struct IntLit {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CharLit {
    pub value: u8,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StrLit {
    pub value: String,
    pub span: Span,
}

// LVALUES

/// An identifier occurrence. Name analysis binds it to exactly one symbol.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
    pub symbol: Option<SymbolRef>,
}

impl Identifier {
    pub fn new(name: String, span: Span) -> Self {
        Identifier {
            name,
            span,
            symbol: None,
        }
    }

    pub fn bind(&mut self, symbol: SymbolRef) {
        self.symbol = Some(symbol);
    }

    pub fn symbol(&self) -> Result<&SymbolRef, Error> {
        self.symbol.as_ref().ok_or_else(|| {
            Error::new(
                ErrorImpl::UnboundIdentifier {
                    variable: self.name.clone(),
                },
                self.span.start.clone(),
            )
        })
    }

    /// Declared type of the bound symbol.
    pub fn ty(&self) -> Result<Type, Error> {
        Ok(self.symbol()?.borrow().ty.clone())
    }
}

/// `&x`
#[derive(Debug, Clone)]
pub struct RefExpr {
    pub id: Identifier,
    pub span: Span,
}

/// `^p`
#[derive(Debug, Clone)]
pub struct DerefExpr {
    pub id: Identifier,
    pub span: Span,
}

/// `a[i]`
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub id: Identifier,
    pub offset: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum LValue {
    Id(Identifier),
    Ref(RefExpr),
    Deref(DerefExpr),
    Index(IndexExpr),
}

impl LValue {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            LValue::Id(_) => ExprType::Id,
            LValue::Ref(_) => ExprType::Ref,
            LValue::Deref(_) => ExprType::Deref,
            LValue::Index(_) => ExprType::Index,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            LValue::Id(id) => &id.span,
            LValue::Ref(reference) => &reference.span,
            LValue::Deref(deref) => &deref.span,
            LValue::Index(index) => &index.span,
        }
    }

    /// The identifier every l-value form is built around.
    pub fn identifier(&self) -> &Identifier {
        match self {
            LValue::Id(id) => id,
            LValue::Ref(reference) => &reference.id,
            LValue::Deref(deref) => &deref.id,
            LValue::Index(index) => &index.id,
        }
    }

    pub fn identifier_mut(&mut self) -> &mut Identifier {
        match self {
            LValue::Id(id) => id,
            LValue::Ref(reference) => &mut reference.id,
            LValue::Deref(deref) => &mut deref.id,
            LValue::Index(index) => &mut index.id,
        }
    }

    /// Whether the l-value designates storage. `&x` is a value, not a location.
    pub fn is_addressable(&self) -> bool {
        !matches!(self, LValue::Ref(_))
    }
}

// COMPOUND

#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub dst: LValue,
    pub src: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Identifier,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
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

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Plus),
            TokenKind::Dash => Some(BinaryOp::Minus),
            TokenKind::Star => Some(BinaryOp::Times),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Or => Some(BinaryOp::Or),
            TokenKind::Equals => Some(BinaryOp::Equals),
            TokenKind::NotEquals => Some(BinaryOp::NotEquals),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessEquals => Some(BinaryOp::LessEq),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::GreaterEquals => Some(BinaryOp::GreaterEq),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Divide
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOp::Equals | BinaryOp::NotEquals)
    }
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}
