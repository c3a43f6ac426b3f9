use crate::tokens::{tokenize, Token, QUOTE_MARKER};
use crate::types::{LispFloat, LispInt, LispObject};
use std::fmt;
use std::iter::Peekable;
use std::num::IntErrorKind;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

pub type Result = std::result::Result<LispObject, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    EmptyInput,
    UnexpectedEof,
    UnexpectedCloseParen,
    TrailingTokens(usize),
    IntegerOutOfRange(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "syntax error: no form to read"),
            Error::UnexpectedEof => write!(f, "syntax error: unexpected EOF while reading"),
            Error::UnexpectedCloseParen => write!(f, "syntax error: unexpected )"),
            Error::TrailingTokens(n) => {
                write!(f, "syntax error: {} unexpected token(s) after form", n)
            }
            Error::IntegerOutOfRange(chars) => {
                write!(f, "syntax error: integer literal {} is out of range", chars)
            }
        }
    }
}

/// Reads exactly one form from `input`.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut reader = tokens.iter().peekable();
    let form = read_form(&mut reader)?;
    match reader.count() {
        0 => Ok(form),
        n => Err(Error::TrailingTokens(n)),
    }
}

fn read_form(reader: &mut Reader) -> Result {
    match reader.next() {
        Some(Token::OpenRoundBracket) => read_list(reader).map(LispObject::wrap_list),
        Some(Token::CloseRoundBracket) => Err(Error::UnexpectedCloseParen),
        Some(Token::Quote) => Ok(LispObject::new_symbol(QUOTE_MARKER)),
        Some(Token::PlainChars(chars)) => read_atom(chars),
        None => Err(Error::UnexpectedEof),
    }
}

fn read_list(reader: &mut Reader) -> std::result::Result<Vec<LispObject>, Error> {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseRoundBracket) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnexpectedEof),
        }
    }
    Ok(elements)
}

// An integer literal too wide for LispInt is rejected rather than read as a float.
fn read_atom(chars: &str) -> Result {
    match chars.parse::<LispInt>() {
        Ok(x) => return Ok(LispObject::Integer(x)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(Error::IntegerOutOfRange(chars.to_string()))
        }
        Err(_) => (),
    }
    match chars.parse::<LispFloat>() {
        Ok(x) => Ok(LispObject::Float(x)),
        Err(_) => Ok(LispObject::new_symbol(chars)),
    }
}
