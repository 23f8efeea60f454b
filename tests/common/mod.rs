#![allow(dead_code)]

use bugs_recognizer::{Production, Recognized, Recognizer, SyntaxError, tokenize};

/// Assert that the recognizer still yields the tokens of `expected`,
/// in order. Further tokens may follow.
pub fn followed_by(recognizer: &mut Recognizer<'_>, expected: &str) {
    let expected_tokens = tokenize(expected);
    // Drop the trailing end-of-input so more tokens may remain.
    for want in &expected_tokens[..expected_tokens.len() - 1] {
        let got = recognizer.next_token();
        assert_eq!(
            &got, want,
            "token mismatch while checking remaining input {expected:?}"
        );
    }
}

/// Assert that a recognition attempt aborted with a syntax error.
pub fn assert_fatal(result: Recognized) -> SyntaxError {
    match result {
        Ok(matched) => panic!("expected a syntax error, got Ok({matched})"),
        Err(err) => err,
    }
}

/// Assert a fatal error raised by `production` on `line`.
pub fn assert_fatal_at(result: Recognized, production: Production, line: usize) {
    let err = assert_fatal(result);
    assert_eq!(err.production, production, "wrong production: {err}");
    assert_eq!(err.line, line, "wrong line: {err}");
}

/// Run one rule over `input`, failing the test on a syntax error.
pub fn matches<'a>(input: &'a str, rule: impl FnOnce(&mut Recognizer<'a>) -> Recognized) -> bool {
    let mut recognizer = Recognizer::new(input);
    rule(&mut recognizer).unwrap_or_else(|e| panic!("unexpected syntax error: {e}"))
}
