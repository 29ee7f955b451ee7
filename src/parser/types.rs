//! Type parsing implementation.
//!
//! This module handles parsing of type annotations in declarations and
//! parameter lists. It supports:
//!
//! - Scalar and pointer keywords (`int`, `bool`, `char`, `void`, `intptr`,
//!   `boolptr`, `charptr`)
//! - Array suffixes, sized `[N]` or open `[]`
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::{Type, TypeAnnotation},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    for kind in [
        TokenKind::Int,
        TokenKind::Bool,
        TokenKind::CharKeyword,
        TokenKind::Void,
        TokenKind::IntPtr,
        TokenKind::BoolPtr,
        TokenKind::CharPtr,
    ] {
        parser.type_nud(kind, parse_keyword_type);
    }
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_keyword_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.advance().clone();

    let ty = match token.kind {
        TokenKind::Int => Type::Int,
        TokenKind::Bool => Type::Bool,
        TokenKind::CharKeyword => Type::Char,
        TokenKind::Void => Type::Void,
        TokenKind::IntPtr => Type::ptr_to(Type::Int),
        TokenKind::BoolPtr => Type::ptr_to(Type::Bool),
        TokenKind::CharPtr => Type::ptr_to(Type::Char),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    Ok(TypeAnnotation {
        ty,
        span: token.span,
    })
}

/// `T[N]` or `T[]`. Arrays of arrays are rejected.
pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    let open = parser.expect(TokenKind::OpenBracket)?;

    if let Type::Array(_, _) = left.ty {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: open.value,
                message: String::from("arrays of arrays are not supported"),
            },
            open.span.start,
        ));
    }

    let length = if parser.current_token_kind() == TokenKind::Number {
        let token = parser.advance().clone();
        match token.value.parse::<usize>() {
            Ok(length) => Some(length),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        }
    } else {
        None
    };

    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation {
        ty: Type::Array(Box::new(left.ty), length),
        span: Span {
            start: left.span.start,
            end: parser.previous_end(),
        },
    })
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a type"),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}
