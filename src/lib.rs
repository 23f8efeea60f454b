//! Lexer and recursive-descent recognizer for the Bugs language.
//!
//! Bugs is a small scripting language for simulated actors: a
//! program is an optional `Allbugs` section followed by one or
//! more `Bug` definitions, each holding variables, an optional
//! initialization block, commands, and functions.
//!
//! The recognizer answers, nonterminal by nonterminal, whether the
//! upcoming input matches a grammar rule. It builds no tree.
//!
//! # Quick start
//!
//! ```
//! use bugs_recognizer::{Recognizer, check};
//!
//! let source = "Bug wooboo {\n\tmove 5 + 1 = 6\n}\n";
//! assert!(check(source).is_ok());
//!
//! let mut recognizer = Recognizer::new("12 * 5 - 3");
//! assert!(recognizer.is_arithmetic_expression().unwrap());
//! ```
//!
//! ## Syntax errors
//!
//! ```
//! use bugs_recognizer::Recognizer;
//!
//! let err = Recognizer::new("Bug b {\n\tmove\n}\n")
//!     .is_bug_definition()
//!     .unwrap_err();
//! assert_eq!(err.line, 2);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod recognizer;
pub mod token;

pub use lexer::{Lexer, tokenize};
pub use recognizer::{MAX_NESTING, Production, Recognized, Recognizer, SyntaxError};
pub use token::{COLORS, KEYWORDS, Token, TokenKind};

/// Outcome of checking a complete source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A committed production could not complete.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// The input does not start with `Allbugs` or `Bug`.
    #[error("line {line}: expected a program, found {found}")]
    NotAProgram { line: usize, found: String },
    /// A program was recognized but more input follows it.
    #[error("line {line}: unexpected {found} after program")]
    TrailingInput { line: usize, found: String },
}

/// Run the `program` rule over a fresh recognizer.
pub fn recognize(source: &str) -> Recognized {
    Recognizer::new(source).is_program()
}

/// Check that `source` is exactly one program with nothing after it.
pub fn check(source: &str) -> Result<(), Error> {
    let mut recognizer = Recognizer::new(source);
    let matched = recognizer.is_program()?;
    let line = recognizer.current_line();
    let next = recognizer.next_token();

    if !matched {
        return Err(Error::NotAProgram {
            line,
            found: next.to_string(),
        });
    }
    if next.kind != TokenKind::EndOfInput {
        return Err(Error::TrailingInput {
            line,
            found: next.to_string(),
        });
    }
    Ok(())
}
