//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Variable, array and function declarations
//! - Expressions and operator precedence
//! - Control flow and console statements
//! - Syntax errors

use std::rc::Rc;

use super::parser::{parse, parse_fragment};
use crate::{
    ast::{
        ast::{Expr, Stmt, StmtType},
        expressions::{BinaryOp, LValue, UnaryOp},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Vec<Stmt>, Error> {
    let tokens = tokenize(source.to_string(), Some("test.lang".to_string())).unwrap();
    parse(tokens, Rc::new("test.lang".to_string()))
}

fn single(source: &str) -> Stmt {
    let mut stmts = parse_source(source).unwrap();
    assert_eq!(stmts.len(), 1, "expected one statement in {:?}", source);
    stmts.remove(0)
}

#[test]
fn test_parse_variable_declaration() {
    let Stmt::VarDecl(decl) = single("int x;") else {
        panic!("expected a declaration");
    };

    assert_eq!(decl.ty.ty, Type::Int);
    assert_eq!(decl.id.name, "x");
    assert!(decl.init.is_none());
}

#[test]
fn test_parse_initialized_declaration() {
    let Stmt::VarDecl(decl) = single("bool done = false;") else {
        panic!("expected a declaration");
    };

    assert_eq!(decl.ty.ty, Type::Bool);
    assert!(matches!(decl.init, Some(Expr::False(_))));
}

#[test]
fn test_parse_pointer_and_array_types() {
    let stmts = parse_source("intptr p; char[8] name; boolptr flags;").unwrap();
    let types: Vec<Type> = stmts
        .iter()
        .map(|stmt| match stmt {
            Stmt::VarDecl(decl) => decl.ty.ty.clone(),
            _ => panic!("expected declarations"),
        })
        .collect();

    assert_eq!(
        types,
        vec![
            Type::ptr_to(Type::Int),
            Type::Array(Box::new(Type::Char), Some(8)),
            Type::ptr_to(Type::Bool),
        ]
    );
}

#[test]
fn test_parse_function_declaration() {
    let Stmt::FnDecl(decl) = single("fn add(int a, int b) -> int { return a + b; }") else {
        panic!("expected a function");
    };

    assert_eq!(decl.id.name, "add");
    assert_eq!(decl.formals.len(), 2);
    assert_eq!(*decl.return_type(), Type::Int);
    assert_eq!(decl.body[0].get_stmt_type(), StmtType::ReturnStmt);
}

#[test]
fn test_parse_function_without_return_type_is_void() {
    let Stmt::FnDecl(decl) = single("fn greet() { TOCONSOLE \"hi\"; }") else {
        panic!("expected a function");
    };

    assert_eq!(*decl.return_type(), Type::Void);
    assert!(decl.formals.is_empty());
}

#[test]
fn test_parse_c_style_function_declaration() {
    let Stmt::FnDecl(decl) = single("int sum(int[] xs, int n) { return n; }") else {
        panic!("expected a function");
    };

    assert_eq!(*decl.return_type(), Type::Int);
    assert_eq!(decl.formals[0].ty.ty, Type::Array(Box::new(Type::Int), None));
}

#[test]
fn test_parse_nested_function_is_rejected() {
    let error = parse_source("fn outer() { fn inner() { } }").unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_if_statement() {
    assert_eq!(
        single("if x > 0 { TOCONSOLE x; }").get_stmt_type(),
        StmtType::IfStmt
    );
}

#[test]
fn test_parse_if_else_statement() {
    assert_eq!(
        single("if x > 0 { x = 1; } else { x = 2; }").get_stmt_type(),
        StmtType::IfElseStmt
    );
}

#[test]
fn test_parse_else_if_chain() {
    let Stmt::IfElse(if_else) = single("if a { x = 1; } else if b { x = 2; } else { x = 3; }")
    else {
        panic!("expected if/else");
    };

    assert_eq!(if_else.else_body.len(), 1);
    assert_eq!(if_else.else_body[0].get_stmt_type(), StmtType::IfElseStmt);
}

#[test]
fn test_parse_while_loop() {
    let Stmt::While(while_stmt) = single("while x < 10 { x = x + 1; }") else {
        panic!("expected while");
    };

    assert_eq!(while_stmt.body.len(), 1);
}

#[test]
fn test_parse_binary_expression_precedence() {
    let Stmt::Assign(assign) = single("x = 5 + 3 * 2;") else {
        panic!("expected assignment");
    };

    let Expr::Binary(sum) = assign.exp.src.as_ref() else {
        panic!("expected binary expression");
    };
    assert_eq!(sum.op, BinaryOp::Plus);
    assert!(matches!(sum.right.as_ref(), Expr::Binary(product) if product.op == BinaryOp::Times));
}

#[test]
fn test_parse_logical_precedence() {
    let Stmt::Assign(assign) = single("b = x > 0 && y < 10 || z;") else {
        panic!("expected assignment");
    };

    let Expr::Binary(or) = assign.exp.src.as_ref() else {
        panic!("expected binary expression");
    };
    assert_eq!(or.op, BinaryOp::Or);
    assert!(matches!(or.left.as_ref(), Expr::Binary(and) if and.op == BinaryOp::And));
}

#[test]
fn test_parse_subtraction_is_left_associative() {
    let Stmt::Assign(assign) = single("x = 10 - 4 - 3;") else {
        panic!("expected assignment");
    };

    let Expr::Binary(outer) = assign.exp.src.as_ref() else {
        panic!("expected binary expression");
    };
    assert!(matches!(outer.left.as_ref(), Expr::Binary(_)));
    assert!(matches!(outer.right.as_ref(), Expr::IntLit(lit) if lit.value == 3));
}

#[test]
fn test_parse_chained_assignment_is_right_associative() {
    let Stmt::Assign(assign) = single("a = b = 3;") else {
        panic!("expected assignment");
    };

    assert!(matches!(assign.exp.src.as_ref(), Expr::Assign(_)));
}

#[test]
fn test_parse_unary_expression() {
    let Stmt::Assign(assign) = single("x = -y + 1;") else {
        panic!("expected assignment");
    };

    let Expr::Binary(sum) = assign.exp.src.as_ref() else {
        panic!("expected binary expression");
    };
    assert!(matches!(sum.left.as_ref(), Expr::Unary(neg) if neg.op == UnaryOp::Neg));
}

#[test]
fn test_parse_parenthesized_expression() {
    let Stmt::Assign(assign) = single("x = (5 + 3) * 2;") else {
        panic!("expected assignment");
    };

    let Expr::Binary(product) = assign.exp.src.as_ref() else {
        panic!("expected binary expression");
    };
    assert_eq!(product.op, BinaryOp::Times);
}

#[test]
fn test_parse_reference_and_dereference() {
    let stmts = parse_source("p = &x; ^p = 4;").unwrap();

    let Stmt::Assign(first) = &stmts[0] else {
        panic!("expected assignment");
    };
    assert!(matches!(first.exp.src.as_ref(), Expr::LValue(LValue::Ref(_))));

    let Stmt::Assign(second) = &stmts[1] else {
        panic!("expected assignment");
    };
    assert!(matches!(second.exp.dst, LValue::Deref(_)));
}

#[test]
fn test_parse_index_expression() {
    let Stmt::Assign(assign) = single("a[i + 1] = a[i];") else {
        panic!("expected assignment");
    };

    assert!(matches!(assign.exp.dst, LValue::Index(_)));
    assert!(matches!(assign.exp.src.as_ref(), Expr::LValue(LValue::Index(_))));
}

#[test]
fn test_parse_function_call() {
    let Stmt::Call(call) = single("print(\"Hello, World!\", 3);") else {
        panic!("expected call");
    };

    assert_eq!(call.call.callee.name, "print");
    assert_eq!(call.call.args.len(), 2);
}

#[test]
fn test_parse_post_increment_and_decrement() {
    let stmts = parse_source("i++; a[2]--;").unwrap();

    assert_eq!(stmts[0].get_stmt_type(), StmtType::PostIncStmt);
    assert_eq!(stmts[1].get_stmt_type(), StmtType::PostDecStmt);
}

#[test]
fn test_parse_console_statements() {
    let stmts = parse_source("FROMCONSOLE x; TOCONSOLE x * 2;").unwrap();

    assert_eq!(stmts[0].get_stmt_type(), StmtType::FromConsoleStmt);
    assert_eq!(stmts[1].get_stmt_type(), StmtType::ToConsoleStmt);
}

#[test]
fn test_parse_char_and_string_literals() {
    let Stmt::ToConsole(write) = single("TOCONSOLE '\\n';") else {
        panic!("expected TOCONSOLE");
    };
    assert!(matches!(write.src, Expr::CharLit(ref lit) if lit.value == b'\n'));

    let Stmt::ToConsole(write) = single(r#"TOCONSOLE "a\"b";"#) else {
        panic!("expected TOCONSOLE");
    };
    assert!(matches!(write.src, Expr::StrLit(ref lit) if lit.value == "a\"b"));
}

#[test]
fn test_parse_return_statement() {
    let Stmt::Return(ret) = single("return;") else {
        panic!("expected return");
    };

    assert!(ret.value.is_none());
}

#[test]
fn test_parse_multiple_statements() {
    let stmts = parse_source("int x = 10; int y = 20; int z = x + y;").unwrap();

    assert_eq!(stmts.len(), 3);
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_source("").unwrap().is_empty());
}

#[test]
fn test_parse_fragment_uses_name() {
    let error = parse_fragment("int x = ;", "shell:4").unwrap_err();

    assert_eq!(error.get_position().1.as_str(), "shell:4");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_parse_syntax_error_missing_semicolon() {
    let error = parse_source("int x = 42").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_syntax_error_missing_identifier() {
    let error = parse_source("int = 42;").unwrap_err();

    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_bare_expression_is_rejected() {
    assert!(parse_source("x + 1;").is_err());
}

#[test]
fn test_parse_assignment_to_non_lvalue_is_rejected() {
    assert!(parse_source("1 = x;").is_err());
}

#[test]
fn test_parse_nested_array_type_is_rejected() {
    assert!(parse_source("int[2][3] grid;").is_err());
}

#[test]
fn test_parse_non_ascii_char_literal_is_rejected() {
    let error = parse_source("TOCONSOLE 'é';").unwrap_err();

    assert_eq!(error.get_error_name(), "CharParseError");
}

#[test]
fn test_parse_unterminated_block() {
    assert!(parse_source("while true { x = 1;").is_err());
}

#[test]
fn test_unparse_round_trip() {
    let source = "fn f(intptr p, int[] xs) -> int { if ^p > xs[0] { ^p = -(^p); } else { xs[1]++; } return ^p * (xs[0] + 1); }";
    let first = parse_source(source).unwrap();
    let printed: String = first.iter().map(|stmt| stmt.to_string()).collect();
    let second = parse_source(&printed).unwrap();
    let reprinted: String = second.iter().map(|stmt| stmt.to_string()).collect();

    assert_eq!(printed, reprinted);
}

#[test]
fn test_parse_negative_literal_is_folded() {
    let Stmt::Assign(assign) = single("x = -9223372036854775808;") else {
        panic!("expected assignment");
    };

    assert!(matches!(assign.exp.src.as_ref(), Expr::IntLit(lit) if lit.value == i64::MIN));
}

#[test]
fn test_parse_negative_literal_out_of_range() {
    let error = parse_source("x = -9223372036854775809;").unwrap_err();

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_parse_negated_literal_binds_before_product() {
    let Stmt::Assign(assign) = single("x = -2 * 3;") else {
        panic!("expected assignment");
    };

    let Expr::Binary(product) = assign.exp.src.as_ref() else {
        panic!("expected binary expression");
    };
    assert_eq!(product.op, BinaryOp::Times);
    assert!(matches!(product.left.as_ref(), Expr::IntLit(lit) if lit.value == -2));
}
