use super::{
    console::{BufferConsole, Console},
    session::{FragmentOutcome, Session, SessionConfig, SessionState},
};
use crate::{errors::errors::ErrorKind, symbols::value::Value};

fn session() -> Session<BufferConsole> {
    Session::new(BufferConsole::new())
}

fn recovering() -> Session<BufferConsole> {
    Session::with_config(
        BufferConsole::new(),
        SessionConfig {
            recover_name_errors: true,
            ..SessionConfig::default()
        },
    )
}

#[test]
fn test_buffer_console() {
    let mut console = BufferConsole::with_input("  12\n true  x ");

    assert_eq!(console.read_token().as_deref(), Some("12"));
    assert_eq!(console.read_token().as_deref(), Some("true"));
    assert_eq!(console.read_token().as_deref(), Some("x"));
    assert_eq!(console.read_token(), None);

    console.write("5");
    console.write("hello");
    assert_eq!(console.output(), ["5", "hello"]);
}

#[test]
fn test_default_config() {
    let config = SessionConfig::default();

    assert!(!config.recover_name_errors);
    assert_eq!(config.max_call_depth, 256);
}

#[test]
fn test_outcomes_per_fragment() {
    let mut session = session();
    let outcomes = session
        .submit("int x; fn f() -> int { return 1; } x = f(); TOCONSOLE x;")
        .unwrap();

    assert!(matches!(outcomes[0], FragmentOutcome::Declared));
    assert!(matches!(outcomes[1], FragmentOutcome::Declared));
    assert!(matches!(outcomes[2], FragmentOutcome::Executed));
    assert!(matches!(outcomes[3], FragmentOutcome::Executed));
    assert_eq!(session.console().output(), ["1"]);
    assert_eq!(session.program().len(), 4);
}

#[test]
fn test_state_persists_across_submissions() {
    let mut session = session();
    session.submit("int total = 0;").unwrap();
    session.submit("total = total + 4;").unwrap();
    session.submit("total = total + 4;").unwrap();

    assert_eq!(session.global_value("total"), Some(Value::Int(8)));
    assert_eq!(session.global_value("missing"), None);
}

#[test]
fn test_type_errors_do_not_end_session() {
    let mut session = session();
    let outcomes = session.submit("int x; bool b; x = true;").unwrap();

    let FragmentOutcome::TypeErrors(errors) = &outcomes[2] else {
        panic!("expected type errors");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), ErrorKind::Type);
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.global_value("x"), Some(Value::Unset));

    session.submit("x = 3;").unwrap();
    assert_eq!(session.global_value("x"), Some(Value::Int(3)));
}

#[test]
fn test_runtime_error_does_not_end_session() {
    let mut session = session();
    let outcomes = session.submit("int x = 0; x = 10 / x; x = 2;").unwrap();

    assert!(matches!(
        &outcomes[1],
        FragmentOutcome::RuntimeError(error) if error.kind() == ErrorKind::Runtime
    ));
    assert_eq!(session.global_value("x"), Some(Value::Int(2)));
    assert_eq!(session.diagnostics().len(), 1);
}

#[test]
fn test_name_error_is_fatal_by_default() {
    let mut session = session();
    let error = session.submit("int x; y = 1; int z;").unwrap_err();

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(session.state(), SessionState::Rejected);
    assert_eq!(session.program().len(), 2);

    let error = session.submit("x = 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "SessionClosed");
}

#[test]
fn test_name_error_recovery() {
    let mut session = recovering();
    let outcomes = session.submit("int x; fn f(int a) { int a; } x = 1;").unwrap();

    assert!(matches!(&outcomes[1], FragmentOutcome::NameError(error) if error.kind() == ErrorKind::Name));
    assert!(matches!(outcomes[2], FragmentOutcome::Executed));
    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.program().len(), 2);

    // The rejected function's name is free again
    session.submit("fn f(int a) -> int { return a; } x = f(7);").unwrap();
    assert_eq!(session.global_value("x"), Some(Value::Int(7)));
}

#[test]
fn test_name_error_leaves_global_depth() {
    let mut session = recovering();
    session.submit("fn f() { if true { while true { g(); } } }").unwrap();

    assert_eq!(session.table().depth(), 0);
}

#[test]
fn test_parse_error_rejects_session() {
    let mut session = session();
    let error = session.submit("int x = ;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.get_position().1.as_str(), "shell:1");
    assert_eq!(session.state(), SessionState::Rejected);
}

#[test]
fn test_fragment_names_count_submissions() {
    let mut session = session();
    session.submit("int x;").unwrap();
    let error = session.submit("x = ;").unwrap_err();

    assert_eq!(error.get_position().1.as_str(), "shell:2");
}

#[test]
fn test_ill_typed_function_cannot_be_called() {
    let mut session = session();
    let outcomes = session
        .submit("fn broken() -> int { return true; } int x; x = broken();")
        .unwrap();

    assert!(matches!(outcomes[0], FragmentOutcome::TypeErrors(_)));
    let FragmentOutcome::RuntimeError(error) = &outcomes[2] else {
        panic!("expected a runtime error");
    };
    assert_eq!(error.get_error_name(), "FunctionNotWellTyped");
}

#[test]
fn test_call_depth_limit() {
    let mut session = Session::with_config(
        BufferConsole::new(),
        SessionConfig {
            max_call_depth: 16,
            ..SessionConfig::default()
        },
    );
    let outcomes = session
        .submit("fn down(int n) -> int { return down(n + 1); } int x; x = down(0);")
        .unwrap();

    let FragmentOutcome::RuntimeError(error) = &outcomes[2] else {
        panic!("expected a runtime error");
    };
    assert_eq!(error.get_error_name(), "CallDepthExceeded");
}

#[test]
fn test_close_releases_globals() {
    let mut session = session();
    session.submit("int x = 1;").unwrap();
    session.close();

    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.global_value("x"), None);
    assert!(session.submit("int y;").is_err());
}

#[test]
fn test_console_mut_feeds_input() {
    let mut session = session();
    *session.console_mut() = BufferConsole::with_input("9");
    session.submit("int n; FROMCONSOLE n; TOCONSOLE n + 1;").unwrap();

    assert_eq!(session.console().output(), ["10"]);
}

#[test]
fn test_oversized_array_is_a_name_error() {
    let mut session = recovering();
    let outcomes = session.submit("int[100000000000000] a; int b = 1;").unwrap();

    assert!(matches!(
        &outcomes[0],
        FragmentOutcome::NameError(error) if error.get_error_name() == "ArrayTooLarge"
    ));
    assert_eq!(session.global_value("a"), None);
    assert_eq!(session.global_value("b"), Some(Value::Int(1)));
}

/// Serves whole input lines and drops what is left of a line when told the
/// submission is over.
#[derive(Default)]
struct LineConsole {
    lines: Vec<&'static str>,
    pending: Vec<String>,
    finished: usize,
}

impl Console for LineConsole {
    fn read_token(&mut self) -> Option<String> {
        while self.pending.is_empty() {
            if self.lines.is_empty() {
                return None;
            }
            let line = self.lines.remove(0);
            self.pending = line.split_whitespace().rev().map(String::from).collect();
        }
        self.pending.pop()
    }

    fn write(&mut self, _text: &str) {}

    fn end_fragment(&mut self) {
        self.pending.clear();
        self.finished += 1;
    }
}

#[test]
fn test_unread_input_does_not_leak_into_next_submission() {
    let mut session = Session::new(LineConsole {
        lines: vec!["5 6", "7"],
        ..LineConsole::default()
    });
    session.submit("int a; int b; FROMCONSOLE a;").unwrap();
    session.submit("FROMCONSOLE b;").unwrap();

    assert_eq!(session.global_value("a"), Some(Value::Int(5)));
    assert_eq!(session.global_value("b"), Some(Value::Int(7)));
    assert_eq!(session.console().finished, 2);
}

#[test]
fn test_fragment_end_is_signalled_after_fatal_error() {
    let mut session = Session::new(LineConsole::default());
    assert!(session.submit("x = 1;").is_err());

    assert_eq!(session.console().finished, 1);
}
