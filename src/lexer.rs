use crate::token::{Token, TokenKind};

/// Tokenize a whole source string, ending with a single `EndOfInput`.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EndOfInput;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// Plain decimal rendering of a numeric literal's value, always with a
/// fractional part and never in exponent form. A literal too large for
/// `f64` keeps its source digits.
fn canonical_number(text: &str) -> String {
    let mut out = match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.to_string(),
        _ => text.trim_end_matches('.').to_string(),
    };
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

/// On-demand tokenizer with a single slot of pushback.
///
/// Whitespace and comments are skipped. Line terminators are
/// significant and advance the line counter when they are read;
/// pushing one back undoes that increment.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    last: Option<Token>,
    pushed_back: bool,
    // Line the last token started on, and the line to resume at when
    // a pushed-back token is delivered again.
    token_line: usize,
    resume_line: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let start = if input.starts_with('\u{FEFF}') {
            '\u{FEFF}'.len_utf8()
        } else {
            0
        };
        Self {
            input,
            pos: start,
            line: 1,
            last: None,
            pushed_back: false,
            token_line: 1,
            resume_line: 1,
        }
    }

    /// Returns the pushed-back token if there is one, otherwise
    /// lexes the next token from the input.
    pub fn next_token(&mut self) -> Token {
        if self.pushed_back {
            self.pushed_back = false;
            if let Some(token) = &self.last {
                self.line = self.resume_line;
                return token.clone();
            }
        }
        let token = self.lex_token();
        self.last = Some(token.clone());
        token
    }

    /// Re-buffers the most recently returned token.
    ///
    /// The line counter goes back to the line that token started on,
    /// so pushing back an end of line undoes its increment along with
    /// any lines `current_line` skipped past since.
    ///
    /// Only one token may be pushed back between two calls to
    /// `next_token`; violating that is a caller bug.
    pub fn push_back(&mut self) {
        debug_assert!(
            !self.pushed_back,
            "push_back called twice without an intervening next_token"
        );
        debug_assert!(
            self.last.is_some(),
            "push_back called before any token was read"
        );
        if self.pushed_back {
            return;
        }
        if self.last.is_none() {
            return;
        }
        self.resume_line = self.line;
        self.line = self.token_line;
        self.pushed_back = true;
    }

    /// The 1-based line of the token the next `next_token` call
    /// will return.
    pub fn current_line(&mut self) -> usize {
        if !self.pushed_back {
            self.skip_trivia();
        }
        self.line
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn lex_token(&mut self) -> Token {
        self.skip_trivia();
        self.token_line = self.line;

        let Some(ch) = self.peek() else {
            return Token::end_of_input();
        };

        match ch {
            '\n' | '\r' => {
                self.read_line_terminator();
                Token::end_of_line()
            }
            '"' => self.read_quoted_string(),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_alphabetic() => self.read_word(),
            c => {
                self.bump();
                Token::symbol(c.to_string())
            }
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some('\n' | '\r') | None => break,
                Some(c) if c.is_whitespace() || c.is_control() => self.bump(),
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_at(1) == Some('*') => self.skip_block_comment(),
                Some(_) => break,
            }
        }
    }

    // `\n`, `\r\n` and a lone `\r` each end one line.
    fn read_line_terminator(&mut self) {
        if self.peek() == Some('\r') {
            self.bump();
            if self.peek() == Some('\n') {
                self.bump();
            }
        } else {
            self.bump();
        }
        self.line += 1;
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) {
        self.bump(); // skip /
        self.bump(); // skip *
        loop {
            match self.peek() {
                None => break,
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    break;
                }
                Some('\n' | '\r') => self.read_line_terminator(),
                Some(_) => self.bump(),
            }
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        self.skip_digits();
        if self.peek() == Some('.') {
            self.bump();
            self.skip_digits();
        }

        Token::number(canonical_number(&self.input[start..self.pos]))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(char::is_alphanumeric) {
            self.bump();
        }
        Token::word(&self.input[start..self.pos])
    }

    // The contents are swallowed; the string surfaces as one `"` symbol.
    fn read_quoted_string(&mut self) -> Token {
        self.bump(); // skip opening quote
        loop {
            match self.peek() {
                None | Some('\n' | '\r') => break,
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if !matches!(self.peek(), None | Some('\n' | '\r')) {
                        self.bump();
                    }
                }
                Some(_) => self.bump(),
            }
        }
        Token::symbol("\"")
    }
}
