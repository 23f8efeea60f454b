//! Token classification and pushback tests.

use bugs_recognizer::{Lexer, Token, TokenKind, tokenize};

// -----------------------------------------------------------
// Classification.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    assert_eq!(tokenize(""), vec![Token::end_of_input()]);
}

#[test]
fn lex_only_whitespace() {
    let tokens = tokenize("   \t  \n\n  ");
    assert_eq!(
        tokens,
        vec![
            Token::end_of_line(),
            Token::end_of_line(),
            Token::end_of_input()
        ]
    );
}

#[test]
fn lex_integer_is_canonicalized() {
    assert_eq!(tokenize("5")[0], Token::number("5.0"));
    assert_eq!(tokenize("250")[0], Token::number("250.0"));
}

#[test]
fn lex_decimal_keeps_its_digits() {
    assert_eq!(tokenize("123.123")[0], Token::number("123.123"));
}

#[test]
fn lex_trailing_dot_belongs_to_number() {
    let tokens = tokenize("12. x");
    assert_eq!(tokens[0], Token::number("12.0"));
    assert_eq!(tokens[1], Token::name("x"));
}

#[test]
fn lex_second_dot_starts_a_symbol() {
    let tokens = tokenize("1.2.3");
    assert_eq!(tokens[0], Token::number("1.2"));
    assert_eq!(tokens[1], Token::symbol("."));
    assert_eq!(tokens[2], Token::number("3.0"));
}

#[test]
fn lex_leading_dot_is_a_symbol() {
    let tokens = tokenize(".5");
    assert_eq!(tokens[0], Token::symbol("."));
    assert_eq!(tokens[1], Token::number("5.0"));
}

#[test]
fn lex_two_character_operators_split() {
    let tokens = tokenize("<= != >=");
    let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["<", "=", "!", "=", ">", "=", "EOF"]);
    assert!(
        tokens[..6].iter().all(|t| t.kind == TokenKind::Symbol),
        "operators must lex as single-character symbols"
    );
}

#[test]
fn lex_keyword_vs_name() {
    assert_eq!(tokenize("move")[0], Token::keyword("move"));
    assert_eq!(tokenize("movement")[0], Token::name("movement"));
}

#[test]
fn lex_keywords_are_case_sensitive() {
    assert_eq!(tokenize("Bug")[0], Token::keyword("Bug"));
    assert_eq!(tokenize("bug")[0], Token::name("bug"));
    assert_eq!(tokenize("MOVE")[0], Token::name("MOVE"));
}

#[test]
fn lex_word_with_digits() {
    assert_eq!(tokenize("x2y")[0], Token::name("x2y"));
}

#[test]
fn lex_underscore_and_apostrophe_are_symbols() {
    let tokens = tokenize("foo_bar don't");
    assert_eq!(tokens[0], Token::name("foo"));
    assert_eq!(tokens[1], Token::symbol("_"));
    assert_eq!(tokens[2], Token::name("bar"));
    assert_eq!(tokens[3], Token::name("don"));
    assert_eq!(tokens[4], Token::symbol("'"));
    assert_eq!(tokens[5], Token::name("t"));
}

#[test]
fn lex_every_punctuation_character_alone() {
    for ch in "!#$%&'()*+,-.:;<=>?@[\\]^_`{|}~".chars() {
        let tokens = tokenize(&ch.to_string());
        assert_eq!(tokens[0], Token::symbol(ch.to_string()), "for {ch:?}");
    }
}

#[test]
fn lex_division_is_not_a_comment() {
    let tokens = tokenize("6 / 3");
    assert_eq!(tokens[1], Token::symbol("/"));
}

// -----------------------------------------------------------
// Comments and strings.
// -----------------------------------------------------------

#[test]
fn lex_line_comment_keeps_line_terminator() {
    let tokens = tokenize("move // forward\nturn");
    assert_eq!(
        tokens,
        vec![
            Token::keyword("move"),
            Token::end_of_line(),
            Token::keyword("turn"),
            Token::end_of_input()
        ]
    );
}

#[test]
fn lex_block_comment_is_stripped() {
    let tokens = tokenize("a /* b\n c */ d");
    assert_eq!(
        tokens,
        vec![Token::name("a"), Token::name("d"), Token::end_of_input()]
    );
}

#[test]
fn lex_unterminated_block_comment_runs_to_end() {
    let tokens = tokenize("a /* never closed\n b");
    assert_eq!(tokens, vec![Token::name("a"), Token::end_of_input()]);
}

#[test]
fn lex_quoted_string_contents_do_not_leak() {
    let tokens = tokenize("x \"move 5 \\\" Bug\" y");
    assert_eq!(
        tokens,
        vec![
            Token::name("x"),
            Token::symbol("\""),
            Token::name("y"),
            Token::end_of_input()
        ]
    );
}

#[test]
fn lex_unterminated_string_stops_at_line_end() {
    let tokens = tokenize("\"open\nmove");
    assert_eq!(tokens[0], Token::symbol("\""));
    assert_eq!(tokens[1], Token::end_of_line());
    assert_eq!(tokens[2], Token::keyword("move"));
}

// -----------------------------------------------------------
// Line tracking and pushback.
// -----------------------------------------------------------

#[test]
fn line_counter_follows_terminators() {
    let mut lexer = Lexer::new("a\nb\n\nc");
    assert_eq!(lexer.current_line(), 1);
    lexer.next_token(); // a
    lexer.next_token(); // \n
    assert_eq!(lexer.current_line(), 2);
    lexer.next_token(); // b
    lexer.next_token(); // \n
    lexer.next_token(); // \n
    assert_eq!(lexer.current_line(), 4);
    assert_eq!(lexer.next_token(), Token::name("c"));
}

#[test]
fn pushback_of_non_terminator_keeps_line() {
    let mut lexer = Lexer::new("\n\nx y");
    lexer.next_token();
    lexer.next_token();
    assert_eq!(lexer.next_token(), Token::name("x"));
    lexer.push_back();
    assert_eq!(lexer.current_line(), 3);
}

#[test]
fn pushback_at_end_of_input() {
    let mut lexer = Lexer::new("");
    assert_eq!(lexer.next_token(), Token::end_of_input());
    lexer.push_back();
    assert_eq!(lexer.next_token(), Token::end_of_input());
}

#[test]
fn token_display() {
    assert_eq!(Token::name("foo").to_string(), "'foo'");
    assert_eq!(Token::end_of_line().to_string(), "end of line");
    assert_eq!(Token::end_of_input().to_string(), "end of input");
}
