use super::{
    ast::{ExprType, Program, Stmt, StmtType},
    types::{FnType, Passing, Type},
};
use crate::parser::parser::parse_fragment;

fn program(source: &str) -> Program {
    let mut program = Program::new();
    for stmt in parse_fragment(source, "test").unwrap() {
        program.push(stmt);
    }
    program
}

#[test]
fn test_stmt_kind_tags() {
    let program = program("int x; fn f() { } x = 1; FROMCONSOLE x; x++; while true { } f();");
    let kinds: Vec<StmtType> = program.iter().map(Stmt::get_stmt_type).collect();

    assert_eq!(
        kinds,
        vec![
            StmtType::VarDecl,
            StmtType::FnDecl,
            StmtType::AssignStmt,
            StmtType::FromConsoleStmt,
            StmtType::PostIncStmt,
            StmtType::WhileStmt,
            StmtType::CallStmt,
        ]
    );
}

#[test]
fn test_expr_kind_tags() {
    let program = program("TOCONSOLE a[1] <= -b;");
    let Some(Stmt::ToConsole(write)) = program.last() else {
        panic!("expected TOCONSOLE");
    };

    assert_eq!(write.src.get_expr_type(), ExprType::LessEq);
}

#[test]
fn test_type_display() {
    let fn_type = Type::Fn(FnType {
        params: vec![Type::Int, Type::Array(Box::new(Type::Char), None)],
        ret: Box::new(Type::Bool),
    });

    assert_eq!(Type::ptr_to(Type::Int).to_string(), "intptr");
    assert_eq!(Type::Array(Box::new(Type::Bool), Some(3)).to_string(), "bool[3]");
    assert_eq!(fn_type.to_string(), "(int,char[])->bool");
    assert_eq!(Type::Error.to_string(), "ERROR");
}

#[test]
fn test_accepts() {
    let open = Type::Array(Box::new(Type::Int), None);
    let sized = Type::Array(Box::new(Type::Int), Some(4));

    assert!(Type::ptr_to(Type::Char).accepts(&Type::null_ptr()));
    assert!(open.accepts(&sized));
    assert!(!sized.accepts(&Type::Array(Box::new(Type::Int), Some(5))));
    assert!(!Type::Int.accepts(&Type::Char));
}

#[test]
fn test_argument_passing() {
    let int_ptr = Type::ptr_to(Type::Int);
    let ints = Type::Array(Box::new(Type::Int), Some(4));
    let open = Type::Array(Box::new(Type::Int), None);

    assert_eq!(Type::Int.argument_passing(&Type::Int, false), Some(Passing::ByValue));
    assert_eq!(int_ptr.argument_passing(&Type::Int, true), Some(Passing::ByReference));
    assert_eq!(int_ptr.argument_passing(&Type::Int, false), None);
    assert_eq!(int_ptr.argument_passing(&ints, true), Some(Passing::FirstElement));
    assert_eq!(open.argument_passing(&ints, true), Some(Passing::ByReference));
    assert_eq!(open.argument_passing(&ints, false), Some(Passing::ByValue));
    assert_eq!(Type::Bool.argument_passing(&Type::Int, true), None);
}

#[test]
fn test_element_type() {
    assert_eq!(Type::ptr_to(Type::Char).element(), Some(&Type::Char));
    assert_eq!(Type::null_ptr().element(), None);
    assert_eq!(Type::Int.element(), None);
}

#[test]
fn test_find_fn_returns_first_declaration() {
    let program = program("int g; fn f() -> int { return 1; } fn h() { } fn f() { }");
    let decl = program.find_fn("f").unwrap();

    assert_eq!(*decl.return_type(), Type::Int);
    assert!(program.find_fn("g").is_none());
    assert!(program.find_fn("missing").is_none());
}

#[test]
fn test_unparse_program() {
    let program = program("int[3] xs; fn f(intptr p) { if ^p > 0 { ^p--; } else { ^p = 'a' - 'a'; } }");

    assert_eq!(
        program.to_string(),
        "int[3] xs;\n\
         fn f(intptr p) -> void {\n    \
         if ^p > 0 {\n        \
         ^p--;\n    \
         } else {\n        \
         ^p = 'a' - 'a';\n    \
         }\n\
         }\n"
    );
}

#[test]
fn test_unparse_keeps_grouping() {
    let program = program("x = -(a - b) * (c + 1); TOCONSOLE \"tab\\there\";");
    let printed: Vec<String> = program.iter().map(|stmt| stmt.to_string()).collect();

    assert_eq!(printed[0], "x = -(a - b) * (c + 1);\n");
    assert_eq!(printed[1], "TOCONSOLE \"tab\\there\";\n");
}
