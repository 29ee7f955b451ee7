//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "int bool char void intptr boolptr charptr fn if else while return".to_string();
    let tokens = tokenize(source, Some("test.hc".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].kind, TokenKind::Bool);
    assert_eq!(tokens[2].kind, TokenKind::CharKeyword);
    assert_eq!(tokens[3].kind, TokenKind::Void);
    assert_eq!(tokens[4].kind, TokenKind::IntPtr);
    assert_eq!(tokens[5].kind, TokenKind::BoolPtr);
    assert_eq!(tokens[6].kind, TokenKind::CharPtr);
    assert_eq!(tokens[7].kind, TokenKind::Fn);
    assert_eq!(tokens[8].kind, TokenKind::If);
    assert_eq!(tokens[9].kind, TokenKind::Else);
    assert_eq!(tokens[10].kind, TokenKind::While);
    assert_eq!(tokens[11].kind, TokenKind::Return);
    assert_eq!(tokens[12].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_console_and_literal_keywords() {
    let source = "TOCONSOLE FROMCONSOLE NULLPTR true false toconsole".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::ToConsole);
    assert_eq!(tokens[1].kind, TokenKind::FromConsole);
    assert_eq!(tokens[2].kind, TokenKind::NullPtr);
    assert_eq!(tokens[3].kind, TokenKind::True);
    assert_eq!(tokens[4].kind, TokenKind::False);
    // Keywords are case sensitive
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo baz_123 _underscore intx".to_string();
    let tokens = tokenize(source, Some("test.hc".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "intx");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 100".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_with_escapes() {
    let source = r#""hello" "a\nb" "quote\"d" """#.to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "a\nb");
    assert_eq!(tokens[2].value, "quote\"d");
    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_chars() {
    let source = r"'a' '\n' '\'' '\\'".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
    assert_eq!(tokens[3].value, "\\");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / == != < > <= >= = && || ! & ^ ++ -- ->".to_string();
    let tokens = tokenize(source, None).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::Ampersand,
            TokenKind::Caret,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Arrow,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_without_spaces() {
    let source = "x++;y=-1;".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::PlusPlus);
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::Assignment);
    assert_eq!(tokens[5].kind, TokenKind::Dash);
    assert_eq!(tokens[6].kind, TokenKind::Number);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] , ;".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Comma);
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "int x; // trailing comment\nx = 5;".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::Assignment);
    assert_eq!(tokens[5].value, "5");
}

#[test]
fn test_tokenize_spans() {
    let source = "int  count;".to_string();
    let tokens = tokenize(source, Some("shell:1".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 10);
    assert_eq!(tokens[1].span.start.1.as_str(), "shell:1");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert_eq!(tokens[3].span.start.0, 11);
}

#[test]
fn test_default_source_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_tokenize_unrecognized_token() {
    let result = tokenize("int x = @;".to_string(), None);

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_tokenize_unterminated_string() {
    assert!(tokenize("\"open".to_string(), None).is_err());
}
