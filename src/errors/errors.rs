use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::CharParseError { .. } => "CharParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::InvalidDeclarationType { .. } => "InvalidDeclarationType",
            ErrorImpl::ArrayTooLarge { .. } => "ArrayTooLarge",
            ErrorImpl::UnboundIdentifier { .. } => "UnboundIdentifier",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::NotAssignable { .. } => "NotAssignable",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::VoidInExpression { .. } => "VoidInExpression",
            ErrorImpl::InvalidDeref { .. } => "InvalidDeref",
            ErrorImpl::InvalidRef { .. } => "InvalidRef",
            ErrorImpl::InvalidIndex { .. } => "InvalidIndex",
            ErrorImpl::NonBoolCondition { .. } => "NonBoolCondition",
            ErrorImpl::InvalidConsoleRead { .. } => "InvalidConsoleRead",
            ErrorImpl::InvalidConsoleWrite { .. } => "InvalidConsoleWrite",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::UnexpectedReturnValue { .. } => "UnexpectedReturnValue",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::ArithmeticOverflow => "ArithmeticOverflow",
            ErrorImpl::NullDereference { .. } => "NullDereference",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::UninitializedRead { .. } => "UninitializedRead",
            ErrorImpl::NoReturnValue { .. } => "NoReturnValue",
            ErrorImpl::InputExhausted => "InputExhausted",
            ErrorImpl::InvalidInput { .. } => "InvalidInput",
            ErrorImpl::FunctionNotWellTyped { .. } => "FunctionNotWellTyped",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::CallDepthExceeded { .. } => "CallDepthExceeded",
            ErrorImpl::SessionClosed => "SessionClosed",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::CharParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid character literal `{}`, only ASCII characters are supported",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", variable))
            }
            ErrorImpl::InvalidDeclarationType { variable, type_ } => ErrorTip::Suggestion(
                format!("`{}` cannot be declared with type `{}`", variable, type_),
            ),
            ErrorImpl::ArrayTooLarge {
                variable,
                length,
                limit,
            } => ErrorTip::Suggestion(format!(
                "`{}` has {} elements, arrays hold at most {}",
                variable, length, limit
            )),
            ErrorImpl::UnboundIdentifier { variable } => ErrorTip::Suggestion(format!(
                "`{}` was never resolved to a declaration",
                variable
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidOperands {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::InvalidOperand { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::NotAssignable { target } => {
                ErrorTip::Suggestion(format!("`{}` cannot be assigned to", target))
            }
            ErrorImpl::NotCallable { callee } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", callee))
            }
            ErrorImpl::VoidInExpression { callee } => ErrorTip::Suggestion(format!(
                "`{}` returns void and cannot be used as a value",
                callee
            )),
            ErrorImpl::InvalidDeref { variable, type_ } => ErrorTip::Suggestion(format!(
                "Cannot dereference `{}` of non-pointer type `{}`",
                variable, type_
            )),
            ErrorImpl::InvalidRef { variable } => {
                ErrorTip::Suggestion(format!("Cannot take the address of `{}`", variable))
            }
            ErrorImpl::InvalidIndex { variable, type_ } => ErrorTip::Suggestion(format!(
                "Cannot index `{}` of type `{}`",
                variable, type_
            )),
            ErrorImpl::NonBoolCondition { received } => ErrorTip::Suggestion(format!(
                "Conditions must be `bool`, received `{}`",
                received
            )),
            ErrorImpl::InvalidConsoleRead { type_ } => ErrorTip::Suggestion(format!(
                "Cannot read a value of type `{}` from the console",
                type_
            )),
            ErrorImpl::InvalidConsoleWrite { type_ } => ErrorTip::Suggestion(format!(
                "Cannot write a value of type `{}` to the console",
                type_
            )),
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("Return statements must be inside a function"))
            }
            ErrorImpl::MissingReturnValue { expected } => ErrorTip::Suggestion(format!(
                "Expected a return value of type `{}`",
                expected
            )),
            ErrorImpl::UnexpectedReturnValue { received } => ErrorTip::Suggestion(format!(
                "Void functions cannot return a value, received `{}`",
                received
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::ArithmeticOverflow => ErrorTip::None,
            ErrorImpl::NullDereference { variable } => {
                ErrorTip::Suggestion(format!("`{}` is NULLPTR", variable))
            }
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is outside of 0..{}",
                index, length
            )),
            ErrorImpl::UninitializedRead { variable } => {
                ErrorTip::Suggestion(format!("`{}` was read before being assigned", variable))
            }
            ErrorImpl::NoReturnValue { function } => ErrorTip::Suggestion(format!(
                "`{}` finished without returning a value",
                function
            )),
            ErrorImpl::InputExhausted => ErrorTip::None,
            ErrorImpl::InvalidInput { input, type_ } => {
                ErrorTip::Suggestion(format!("`{}` is not a valid `{}`", input, type_))
            }
            ErrorImpl::FunctionNotWellTyped { function } => ErrorTip::Suggestion(format!(
                "`{}` failed type checking and cannot be called",
                function
            )),
            ErrorImpl::FunctionNotFound { function } => ErrorTip::Suggestion(format!(
                "No top-level declaration of `{}` was found",
                function
            )),
            ErrorImpl::CallDepthExceeded { limit } => {
                ErrorTip::Suggestion(format!("Calls nested deeper than {}", limit))
            }
            ErrorImpl::SessionClosed => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

/// Stage of the pipeline an error belongs to. Name and parse errors end the
/// fragment, type and runtime errors only fail the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Name,
    Type,
    Runtime,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Parse
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("error parsing character: {token:?}")]
    CharParseError { token: String },

    // Name
    #[error("{variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("{variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("{variable:?} declared with invalid type {type_}")]
    InvalidDeclarationType { variable: String, type_: String },
    #[error("{variable:?} declared with {length} elements, limit is {limit}")]
    ArrayTooLarge {
        variable: String,
        length: usize,
        limit: usize,
    },

    // Type
    #[error("{variable:?} reached type checking unresolved")]
    UnboundIdentifier { variable: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected:?}, received {received:?}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMatchError { expected: String, received: String },
    #[error("invalid operands to {operator}: {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("invalid operand to {operator}: {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("{target:?} is not assignable")]
    NotAssignable { target: String },
    #[error("{callee:?} is not callable")]
    NotCallable { callee: String },
    #[error("void call to {callee:?} used as a value")]
    VoidInExpression { callee: String },
    #[error("dereference of non-pointer {variable:?} ({type_})")]
    InvalidDeref { variable: String, type_: String },
    #[error("reference to {variable:?} not allowed")]
    InvalidRef { variable: String },
    #[error("index into non-indexable {variable:?} ({type_})")]
    InvalidIndex { variable: String, type_: String },
    #[error("non-bool condition: {received}")]
    NonBoolCondition { received: String },
    #[error("cannot read {type_} from console")]
    InvalidConsoleRead { type_: String },
    #[error("cannot write {type_} to console")]
    InvalidConsoleWrite { type_: String },
    #[error("return outside of a function")]
    ReturnOutsideFunction,
    #[error("missing return value of type {expected}")]
    MissingReturnValue { expected: String },
    #[error("unexpected return value of type {received}")]
    UnexpectedReturnValue { received: String },

    // Runtime
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("null dereference of {variable:?}")]
    NullDereference { variable: String },
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("read of unset {variable:?}")]
    UninitializedRead { variable: String },
    #[error("{function:?} did not return a value")]
    NoReturnValue { function: String },
    #[error("console input exhausted")]
    InputExhausted,
    #[error("invalid console input {input:?} for {type_}")]
    InvalidInput { input: String, type_: String },
    #[error("{function:?} is not well typed")]
    FunctionNotWellTyped { function: String },
    #[error("no declaration found for {function:?}")]
    FunctionNotFound { function: String },
    #[error("call depth exceeded {limit}")]
    CallDepthExceeded { limit: usize },
    #[error("session is closed")]
    SessionClosed,
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::CharParseError { .. } => ErrorKind::Parse,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::InvalidDeclarationType { .. }
            | ErrorImpl::ArrayTooLarge { .. } => ErrorKind::Name,
            ErrorImpl::UnboundIdentifier { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::NotAssignable { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::VoidInExpression { .. }
            | ErrorImpl::InvalidDeref { .. }
            | ErrorImpl::InvalidRef { .. }
            | ErrorImpl::InvalidIndex { .. }
            | ErrorImpl::NonBoolCondition { .. }
            | ErrorImpl::InvalidConsoleRead { .. }
            | ErrorImpl::InvalidConsoleWrite { .. }
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::UnexpectedReturnValue { .. } => ErrorKind::Type,
            ErrorImpl::DivisionByZero
            | ErrorImpl::ArithmeticOverflow
            | ErrorImpl::NullDereference { .. }
            | ErrorImpl::IndexOutOfBounds { .. }
            | ErrorImpl::UninitializedRead { .. }
            | ErrorImpl::NoReturnValue { .. }
            | ErrorImpl::InputExhausted
            | ErrorImpl::InvalidInput { .. }
            | ErrorImpl::FunctionNotWellTyped { .. }
            | ErrorImpl::FunctionNotFound { .. }
            | ErrorImpl::CallDepthExceeded { .. }
            | ErrorImpl::SessionClosed => ErrorKind::Runtime,
        }
    }
}
