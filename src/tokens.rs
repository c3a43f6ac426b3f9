use regex::Regex;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    Quote,
    PlainChars(&'a str),
}

pub const QUOTE_MARKER: &str = "'";

fn create_token(captured: &str) -> Token<'_> {
    match captured {
        "(" => Token::OpenRoundBracket,
        ")" => Token::CloseRoundBracket,
        QUOTE_MARKER => Token::Quote,
        _ => Token::PlainChars(captured),
    }
}

/// Splits source text into tokens. Parentheses always stand alone; everything
/// else is separated by whitespace only, so `'a` stays a single plain token.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)          # ignore whitespace in this pattern & allow comments
                [()]         # a bracket is always a token on its own
                |[^\s()]+    # otherwise a run of anything but whitespace and brackets
            "#
        )
        .unwrap();
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| create_token(m.as_str()))
        .collect()
}
