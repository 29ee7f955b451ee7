//! Unit tests for error handling.
//!
//! This module contains tests for error types, their classification and
//! error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at_zero(error_impl: ErrorImpl) -> Error {
    Error::new(error_impl, Position(0, Rc::new("test.hc".to_string())))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.hc".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.hc".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.hc");
}

#[test]
fn test_type_mismatch_error() {
    let error = at_zero(ErrorImpl::TypeMatchError {
        expected: "int".to_string(),
        received: "bool".to_string(),
    });

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.kind(), ErrorKind::Type);
}

#[test]
fn test_name_errors_are_classified_as_name() {
    let undeclared = at_zero(ErrorImpl::VariableNotDeclared {
        variable: "foo".to_string(),
    });
    let redeclared = at_zero(ErrorImpl::VariableAlreadyDeclared {
        variable: "x".to_string(),
    });

    assert_eq!(undeclared.get_error_name(), "VariableNotDeclared");
    assert_eq!(undeclared.kind(), ErrorKind::Name);
    assert_eq!(redeclared.get_error_name(), "VariableAlreadyDeclared");
    assert_eq!(redeclared.kind(), ErrorKind::Name);
}

#[test]
fn test_runtime_errors_are_classified_as_runtime() {
    for error_impl in [
        ErrorImpl::DivisionByZero,
        ErrorImpl::NullDereference {
            variable: "p".to_string(),
        },
        ErrorImpl::IndexOutOfBounds {
            index: 4,
            length: 2,
        },
        ErrorImpl::InputExhausted,
    ] {
        assert_eq!(error_impl.kind(), ErrorKind::Runtime);
    }
}

#[test]
fn test_error_tip_none() {
    let error = at_zero(ErrorImpl::UnrecognisedToken {
        token: "@".to_string(),
    });

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = at_zero(ErrorImpl::UnexpectedToken {
        token: "}".to_string(),
    });

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_arguments_errors() {
    let error = at_zero(ErrorImpl::UnexpectedArguments {
        expected: 2,
        received: 3,
    });
    assert_eq!(error.get_error_name(), "UnexpectedArguments");

    let error = at_zero(ErrorImpl::MissingArguments {
        expected: 3,
        received: 1,
    });
    assert_eq!(error.get_error_name(), "MissingArguments");
    assert_eq!(error.get_tip().to_string(), "Expected 3 arguments, received 1");
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::DivisionByZero,
        Position(7, Rc::new("shell:2".to_string())),
    );

    assert_eq!(error.to_string(), "division by zero at shell:2:7");
}
