use std::{fmt::Display, rc::Rc};

use crate::{ast::types::Type, errors::errors::ErrorImpl};

use super::symbol_table::SymbolRef;

/// Largest element count a sized array declaration may have.
pub const MAX_ARRAY_LENGTH: usize = 1 << 20;

/// A runtime value held by a symbol and passed by value through evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Unset,
    Int(i64),
    Bool(bool),
    Char(u8),
    Null,
    Ptr(Place),
    Array(Vec<Value>),
}

impl Value {
    /// Initial value of a freshly declared symbol.
    pub fn default_for(ty: &Type) -> Value {
        match ty {
            Type::Array(_, Some(length)) => Value::Array(vec![Value::Unset; *length]),
            _ => Value::Unset,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Value::Unset)
    }

    /// Short description of the value's shape, for runtime diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Unset => "unset",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Null => "NULLPTR",
            Value::Ptr(_) => "pointer",
            Value::Array(_) => "array",
        }
    }

    /// Text written to the console. Character arrays print as strings up to
    /// their first unset element.
    pub fn render(&self) -> String {
        match self {
            Value::Array(items) if items.iter().all(|item| matches!(item, Value::Char(_) | Value::Unset)) => items
                .iter()
                .map_while(|item| match item {
                    Value::Char(ch) => Some(*ch as char),
                    _ => None,
                })
                .collect(),
            other => other.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unset => write!(f, "<unset>"),
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Char(value) => write!(f, "{}", *value as char),
            Value::Null => write!(f, "NULLPTR"),
            Value::Ptr(place) => write!(f, "&{}", place),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// A storage location: a whole symbol, or one element of an array symbol.
#[derive(Clone)]
pub struct Place {
    pub symbol: SymbolRef,
    pub offset: Option<usize>,
}

impl Place {
    pub fn whole(symbol: SymbolRef) -> Self {
        Place {
            symbol,
            offset: None,
        }
    }

    pub fn element(symbol: SymbolRef, offset: usize) -> Self {
        Place {
            symbol,
            offset: Some(offset),
        }
    }

    pub fn name(&self) -> String {
        self.symbol.borrow().name.clone()
    }

    /// Number of addressable elements behind the symbol.
    pub fn len(&self) -> usize {
        match &self.symbol.borrow().value {
            Value::Array(items) => items.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The same place viewed as a pointer to its first element.
    pub fn first_element(&self) -> Place {
        Place::element(Rc::clone(&self.symbol), self.offset.unwrap_or(0))
    }

    /// Pointer arithmetic: the place `index` elements past this one.
    pub fn offset_by(&self, index: i64) -> Result<Place, ErrorImpl> {
        let base = self.offset.unwrap_or(0) as i64;
        let target = base.checked_add(index).ok_or(ErrorImpl::ArithmeticOverflow)?;

        if target < 0 {
            return Err(ErrorImpl::IndexOutOfBounds {
                index: target,
                length: self.len(),
            });
        }

        Ok(Place::element(Rc::clone(&self.symbol), target as usize))
    }

    pub fn load(&self) -> Result<Value, ErrorImpl> {
        let symbol = self.symbol.borrow();

        match (self.offset, &symbol.value) {
            (None, value) => Ok(value.clone()),
            (Some(offset), Value::Array(items)) => {
                items
                    .get(offset)
                    .cloned()
                    .ok_or(ErrorImpl::IndexOutOfBounds {
                        index: offset as i64,
                        length: items.len(),
                    })
            }
            (Some(0), value) => Ok(value.clone()),
            (Some(offset), _) => Err(ErrorImpl::IndexOutOfBounds {
                index: offset as i64,
                length: 1,
            }),
        }
    }

    pub fn store(&self, value: Value) -> Result<(), ErrorImpl> {
        let mut symbol = self.symbol.borrow_mut();

        match (self.offset, &mut symbol.value) {
            (None, slot) => {
                *slot = value;
                Ok(())
            }
            (Some(offset), Value::Array(items)) => {
                let length = items.len();
                let slot = items.get_mut(offset).ok_or(ErrorImpl::IndexOutOfBounds {
                    index: offset as i64,
                    length,
                })?;
                *slot = value;
                Ok(())
            }
            (Some(0), slot) => {
                *slot = value;
                Ok(())
            }
            (Some(offset), _) => Err(ErrorImpl::IndexOutOfBounds {
                index: offset as i64,
                length: 1,
            }),
        }
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.symbol, &other.symbol)
            && self.offset.unwrap_or(0) == other.offset.unwrap_or(0)
    }
}

impl std::fmt::Debug for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Place({}, {:?})", self.name(), self.offset)
    }
}

impl Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{}[{}]", self.name(), offset),
            None => write!(f, "{}", self.name()),
        }
    }
}
