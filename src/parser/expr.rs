use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignExpr, BinaryExpr, BinaryOp, CallExpr, CharLit, DerefExpr, Identifier, IndexExpr,
            IntLit, LValue, RefExpr, StrLit, UnaryExpr, UnaryOp,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
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

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let expr = match token.kind {
        TokenKind::Number => match token.value.parse() {
            Ok(value) => Expr::IntLit(IntLit {
                value,
                span: token.span,
            }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::Char => match single_ascii_byte(&token.value) {
            Some(value) => Expr::CharLit(CharLit {
                value,
                span: token.span,
            }),
            None => {
                return Err(Error::new(
                    ErrorImpl::CharParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::String => Expr::StrLit(StrLit {
            value: token.value,
            span: token.span,
        }),
        TokenKind::True => Expr::True(token.span),
        TokenKind::False => Expr::False(token.span),
        TokenKind::NullPtr => Expr::NullPtr(token.span),
        TokenKind::Identifier => Expr::LValue(LValue::Id(Identifier::new(token.value, token.span))),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    parser.advance();
    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(op) = BinaryOp::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value,
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        op,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = match operator_token.kind {
        TokenKind::Dash => UnaryOp::Neg,
        _ => UnaryOp::Not,
    };

    // Fold `-N` so the most negative int is writable as a literal
    if op == UnaryOp::Neg && parser.current_token_kind() == TokenKind::Number {
        let literal = parser.advance().clone();
        let text = format!("-{}", literal.value);

        return match text.parse() {
            Ok(value) => Ok(Expr::IntLit(IntLit {
                value,
                span: Span {
                    start: operator_token.span.start,
                    end: literal.span.end,
                },
            })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: text },
                operator_token.span.start,
            )),
        };
    }

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span {
            start: operator_token.span.start,
            end: operand.get_span().end.clone(),
        },
        op,
        operand: Box::new(operand),
    }))
}

/// `&x` and `^p`. Both apply to a bare identifier only.
pub fn parse_address_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: format!("expected identifier after `{}`", operator_token.value),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let id = Identifier::new(name.value, name.span.clone());
    let span = Span {
        start: operator_token.span.start,
        end: name.span.end,
    };

    Ok(Expr::LValue(match operator_token.kind {
        TokenKind::Ampersand => LValue::Ref(RefExpr { id, span }),
        _ => LValue::Deref(DerefExpr { id, span }),
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let start = left.get_span().start.clone();

    let Expr::LValue(dst) = left else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: operator_token.value,
                message: String::from("the left side of an assignment must be an l-value"),
            },
            start,
        ));
    };

    // Right associative
    let rhs = parse_expr(parser, BindingPower::Comma)?;

    Ok(Expr::Assign(AssignExpr {
        span: Span {
            start: dst.get_span().start.clone(),
            end: rhs.get_span().end.clone(),
        },
        dst,
        src: Box::new(rhs),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let callee = expect_identifier(parser, left, "only named functions can be called")?;
    parser.advance();

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expr(parser, BindingPower::Comma)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.span.start.clone(),
            end: parser.previous_end(),
        },
        callee,
        args,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let id = expect_identifier(parser, left, "only named arrays and pointers can be indexed")?;
    parser.advance();

    let offset = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::LValue(LValue::Index(IndexExpr {
        span: Span {
            start: id.span.start.clone(),
            end: parser.previous_end(),
        },
        id,
        offset: Box::new(offset),
    })))
}

fn expect_identifier(parser: &Parser, left: Expr, message: &str) -> Result<Identifier, Error> {
    match left {
        Expr::LValue(LValue::Id(id)) => Ok(id),
        other => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: message.to_string(),
            },
            other.get_span().start.clone(),
        )),
    }
}

fn single_ascii_byte(value: &str) -> Option<u8> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Some(*byte),
        _ => None,
    }
}
