use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("bool", TokenKind::Bool);
        map.insert("char", TokenKind::CharKeyword);
        map.insert("void", TokenKind::Void);
        map.insert("intptr", TokenKind::IntPtr);
        map.insert("boolptr", TokenKind::BoolPtr);
        map.insert("charptr", TokenKind::CharPtr);
        map.insert("fn", TokenKind::Fn);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("NULLPTR", TokenKind::NullPtr);
        map.insert("TOCONSOLE", TokenKind::ToConsole);
        map.insert("FROMCONSOLE", TokenKind::FromConsole);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Char,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Ampersand, // &
    Caret,     // ^

    Semicolon,
    Comma,
    Arrow,

    PlusPlus,
    MinusMinus,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Int,
    Bool,
    CharKeyword,
    Void,
    IntPtr,
    BoolPtr,
    CharPtr,
    Fn,
    If,
    Else,
    While,
    Return,
    True,
    False,
    NullPtr,
    ToConsole,
    FromConsole,
}

impl TokenKind {
    /// Whether the token starts a type annotation.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Bool
                | TokenKind::CharKeyword
                | TokenKind::Void
                | TokenKind::IntPtr
                | TokenKind::BoolPtr
                | TokenKind::CharPtr
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Identifier,
            TokenKind::Number,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
