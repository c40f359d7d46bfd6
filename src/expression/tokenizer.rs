use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{all_consuming, map, value},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::token::Token;

pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
    fn new() -> Self;
}

/// Splits an expression into words and the four operator characters.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ExpressionTokenizer;

impl Tokenizer for ExpressionTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }

    fn new() -> Self {
        ExpressionTokenizer
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '(' | ')')
}

/// Unicode whitespace plus the ASCII file, group, record and unit
/// separators (U+001C..=U+001F), which word-splitting also treats as blanks.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

// Anything that is neither a separator nor an operator belongs to a word.
fn is_word_char(c: char) -> bool {
    !is_separator(c) && !is_operator_char(c)
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(is_separator)(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Plus, char('+')),
        value(Token::Minus, char('-')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
    ))(input)
}

fn word(input: &str) -> IResult<&str, Token> {
    map(take_while1(is_word_char), |w: &str| Token::Word(w.to_string()))(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    preceded(whitespace, alt((operator, word)))(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<Token>> {
    terminated(many0(token), whitespace)(input)
}

/// Lexes `text` into tokens in left-to-right order.
///
/// Words are kept verbatim (case included); case folding happens when the
/// resolver turns a word into a term.
pub fn tokenize(text: &str) -> Vec<Token> {
    match all_consuming(tokens)(text) {
        Ok((_, tokens)) => tokens,
        // every non-separator character starts either an operator or a word
        Err(e) => {
            warn!(input = text, error = %e, "expression lexer rejected input");
            Vec::new()
        }
    }
}
