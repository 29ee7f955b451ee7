//! Type descriptors for the language.
//!
//! This module defines the value types used by every pass:
//!
//! - Scalars (`int`, `bool`, `char`) and `void`
//! - Pointers and fixed or open-length arrays
//! - Function signatures
//! - The absorbing `Error` sentinel produced by the type checker
//!
//! Types are written in declarations as annotations and are carried
//! unchanged into the symbol table.

use std::fmt::Display;

use crate::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    Char,
    Void,
    /// Marks a subexpression that has already been diagnosed.
    Error,
    Ptr(Box<Type>),
    /// Element type and length. `None` is an open length, only legal for formals.
    Array(Box<Type>, Option<usize>),
    Fn(FnType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnType {
    pub params: Vec<Type>,
    pub ret: Box<Type>,
}

/// How an actual argument is bound to a formal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passing {
    ByValue,
    /// The formal receives a pointer to the actual's storage.
    ByReference,
    /// The formal receives a pointer to the first element of an array actual.
    FirstElement,
}

impl Type {
    /// Type of `NULLPTR`, accepted by every pointer.
    pub fn null_ptr() -> Type {
        Type::Ptr(Box::new(Type::Void))
    }

    pub fn ptr_to(inner: Type) -> Type {
        Type::Ptr(Box::new(inner))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Int | Type::Bool | Type::Char)
    }

    pub fn is_ptr(&self) -> bool {
        matches!(self, Type::Ptr(_))
    }

    pub fn is_null_ptr(&self) -> bool {
        matches!(self, Type::Ptr(inner) if **inner == Type::Void)
    }

    pub fn is_char_array(&self) -> bool {
        matches!(self, Type::Array(element, _) if **element == Type::Char)
    }

    /// Element type reached through indexing, for pointers and arrays.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Ptr(inner) if **inner != Type::Void => Some(inner),
            Type::Array(element, _) => Some(element),
            _ => None,
        }
    }

    /// Whether a value of type `actual` may be stored where `self` is expected.
    pub fn accepts(&self, actual: &Type) -> bool {
        match (self, actual) {
            (Type::Ptr(_), Type::Ptr(inner)) if **inner == Type::Void => true,
            (Type::Array(expected, None), Type::Array(received, _)) => expected == received,
            _ => self == actual,
        }
    }

    /// Binding mode for passing `actual` to a formal of this type, or `None`
    /// when the argument is incompatible. `addressable` is true when the
    /// actual designates storage that a pointer can refer to.
    pub fn argument_passing(&self, actual: &Type, addressable: bool) -> Option<Passing> {
        match (self, actual) {
            (Type::Array(_, _), Type::Array(_, _)) if self.accepts(actual) => {
                if addressable {
                    Some(Passing::ByReference)
                } else {
                    Some(Passing::ByValue)
                }
            }
            _ if self.accepts(actual) => Some(Passing::ByValue),
            (Type::Ptr(inner), _) if addressable && actual.is_scalar() && **inner == *actual => {
                Some(Passing::ByReference)
            }
            (Type::Ptr(inner), Type::Array(element, _)) if addressable && inner == element => {
                Some(Passing::FirstElement)
            }
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Void => write!(f, "void"),
            Type::Error => write!(f, "ERROR"),
            Type::Ptr(inner) => write!(f, "{}ptr", inner),
            Type::Array(element, Some(length)) => write!(f, "{}[{}]", element, length),
            Type::Array(element, None) => write!(f, "{}[]", element),
            Type::Fn(fn_type) => write!(f, "{}", fn_type),
        }
    }
}

impl Display for FnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self.params.iter().map(|param| param.to_string()).collect();
        write!(f, "({})->{}", params.join(","), self.ret)
    }
}

/// A type as written in a declaration.
#[derive(Debug, Clone)]
pub struct TypeAnnotation {
    pub ty: Type,
    pub span: Span,
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ty)
    }
}
