use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{Identifier, LValue},
        statements::{
            AssignStmt, CallStmt, FnDecl, FormalDecl, FromConsoleStmt, IfElseStmt, IfStmt,
            PostDecStmt, PostIncStmt, ReturnStmt, ToConsoleStmt, VarDecl, WhileStmt,
        },
        types::{Type, TypeAnnotation},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position, Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

/// Assignments, calls and `++`/`--` on an l-value.
fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if matches!(
        parser.current_token_kind(),
        TokenKind::PlusPlus | TokenKind::MinusMinus
    ) {
        let operator_token = parser.advance().clone();
        let dst = expect_lvalue(expr, &operator_token.value)?;
        parser.expect(TokenKind::Semicolon)?;

        let span = Span {
            start,
            end: parser.previous_end(),
        };

        return Ok(match operator_token.kind {
            TokenKind::PlusPlus => Stmt::PostInc(PostIncStmt { dst, span }),
            _ => Stmt::PostDec(PostDecStmt { dst, span }),
        });
    }

    parser.expect(TokenKind::Semicolon)?;

    let span = Span {
        start,
        end: parser.previous_end(),
    };

    match expr {
        Expr::Assign(exp) => Ok(Stmt::Assign(AssignStmt { exp, span })),
        Expr::Call(call) => Ok(Stmt::Call(CallStmt { call, span })),
        other => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: other.to_string(),
                message: String::from("expected an assignment, a call or `++`/`--`"),
            },
            other.get_span().start.clone(),
        )),
    }
}

fn expect_lvalue(expr: Expr, operator: &str) -> Result<LValue, Error> {
    match expr {
        Expr::LValue(lvalue) if lvalue.is_addressable() => Ok(lvalue),
        other => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: operator.to_string(),
                message: format!("`{}` cannot be applied to `{}`", operator, other),
            },
            other.get_span().start.clone(),
        )),
    }
}

/// `type name;`, `type name = expr;` or `type name(formals) { body }`.
pub fn parse_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let ty = parse_type(parser, BindingPower::Default)?;
    let id = parse_identifier(parser, "expected identifier during declaration")?;

    match parser.current_token_kind() {
        TokenKind::OpenParen => parse_fn_rest(parser, start, ty, id),
        TokenKind::Assignment => {
            parser.advance();
            let init = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(Stmt::VarDecl(VarDecl {
                ty,
                id,
                init: Some(init),
                span: Span {
                    start,
                    end: parser.previous_end(),
                },
            }))
        }
        _ => {
            parser.expect(TokenKind::Semicolon)?;

            Ok(Stmt::VarDecl(VarDecl {
                ty,
                id,
                init: None,
                span: Span {
                    start,
                    end: parser.previous_end(),
                },
            }))
        }
    }
}

/// `fn name(formals) [-> type] { body }`. A missing return type is `void`.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let id = parse_identifier(parser, "expected function name")?;

    if !parser.at_top_level() {
        return Err(nested_fn_error(&id));
    }

    let formals = parse_formals(parser)?;

    let ret = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser, BindingPower::Default)?
    } else {
        TypeAnnotation {
            ty: Type::Void,
            span: id.span.clone(),
        }
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDecl {
        ret,
        id,
        formals,
        body,
        locals: vec![],
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

fn parse_fn_rest(
    parser: &mut Parser,
    start: Position,
    ret: TypeAnnotation,
    id: Identifier,
) -> Result<Stmt, Error> {
    if !parser.at_top_level() {
        return Err(nested_fn_error(&id));
    }

    let formals = parse_formals(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDecl {
        ret,
        id,
        formals,
        body,
        locals: vec![],
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

fn nested_fn_error(id: &Identifier) -> Error {
    Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: id.name.clone(),
            message: String::from("functions can only be declared at the top level"),
        },
        id.span.start.clone(),
    )
}

fn parse_formals(parser: &mut Parser) -> Result<Vec<FormalDecl>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut formals = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let start = parser.get_position();
            let ty = parse_type(parser, BindingPower::Default)?;
            let id = parse_identifier(parser, "expected parameter name")?;

            formals.push(FormalDecl {
                ty,
                id,
                span: Span {
                    start,
                    end: parser.previous_end(),
                },
            });

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(formals)
}

fn parse_identifier(parser: &mut Parser, message: &str) -> Result<Identifier, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: message.to_string(),
        },
        parser.get_position(),
    );
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(Identifier::new(token.value, token.span))
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    parser.enter_block();

    let mut body = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                parser.leave_block();
                return Err(error);
            }
        }
    }

    parser.leave_block();
    parser.expect(TokenKind::CloseCurly)?;

    Ok(body)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let cond = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    if parser.current_token_kind() != TokenKind::Else {
        return Ok(Stmt::If(IfStmt {
            cond,
            body: then_body,
            span: Span {
                start,
                end: parser.previous_end(),
            },
        }));
    }

    parser.advance();

    // `else if` nests the chained statement as the whole else block
    let else_body = if parser.current_token_kind() == TokenKind::If {
        vec![parse_if_stmt(parser)?]
    } else {
        parse_block(parser)?
    };

    Ok(Stmt::IfElse(IfElseStmt {
        cond,
        then_body,
        else_body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let cond = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        cond,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_to_console_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let src = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::ToConsole(ToConsoleStmt {
        src,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_from_console_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let expr = parse_expr(parser, BindingPower::Default)?;
    let dst = expect_lvalue(expr, "FROMCONSOLE")?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::FromConsole(FromConsoleStmt {
        dst,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}
