use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::token::Token;
use super::tokenizer::{tokenize, Tokenizer};
use crate::error::ParseError;

/// Sign accumulator for one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    /// Sign of a term reached under `self` from a group entered under `outer`.
    pub fn compose(self, outer: Sign) -> Sign {
        if self == outer {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// Terms to add and to subtract, in the order they appear in the expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedTerms {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl ResolvedTerms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, term: String, sign: Sign) {
        match sign {
            Sign::Plus => self.positive.push(term),
            Sign::Minus => self.negative.push(term),
        }
    }

    /// Appends a resolved group; a negated group swaps its two lists.
    pub fn merge(&mut self, group: ResolvedTerms, sign: Sign) {
        for term in group.positive {
            self.push(term, Sign::Plus.compose(sign));
        }
        for term in group.negative {
            self.push(term, Sign::Minus.compose(sign));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Positive terms followed by negative terms.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.positive.iter().chain(self.negative.iter())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.positive, self.negative)
    }
}

impl fmt::Display for ResolvedTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (sign, terms) in [(Sign::Plus, &self.positive), (Sign::Minus, &self.negative)] {
            if terms.is_empty() {
                continue;
            }
            let prefixed: Vec<String> = terms
                .iter()
                .map(|term| format!("{}{}", sign.as_char(), term))
                .collect();
            parts.push(format!("[{}]", prefixed.join(", ")));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Index of the `)` closing the group opened at `open`.
fn find_closing(tokens: &[Token], open: usize) -> Result<usize, ParseError> {
    let mut depth = 0usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + offset);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::MismatchedParentheses)
}

/// Resolves a token slice into positive and negative terms.
///
/// Each level keeps its own sign accumulator starting at `+`. Only explicit
/// `+`/`-` tokens change it; words and groups read it without resetting it,
/// so `a - b c` subtracts both `b` and `c`. A group is resolved on its own
/// and then merged under the sign active when it was opened, so
/// `-(a - b)` adds `b` and subtracts `a`.
pub fn resolve(tokens: &[Token]) -> Result<ResolvedTerms, ParseError> {
    let mut resolved = ResolvedTerms::new();
    let mut sign = Sign::Plus;
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Token::Plus => sign = Sign::Plus,
            Token::Minus => sign = Sign::Minus,
            Token::Word(word) => resolved.push(word.to_lowercase(), sign),
            Token::LParen => {
                let close = find_closing(tokens, i)?;
                let group = resolve(&tokens[i + 1..close])?;
                resolved.merge(group, sign);
                i = close;
            }
            Token::RParen => return Err(ParseError::UnexpectedClosingParenthesis),
        }
        i += 1;
    }

    Ok(resolved)
}

/// Tokenizes and resolves `expression`.
pub fn parse(expression: &str) -> Result<ResolvedTerms, ParseError> {
    let tokens = tokenize(expression);
    resolve_tokens(&tokens)
}

/// Same as [`parse`] with a caller-chosen tokenizer.
pub fn parse_with<T: Tokenizer>(tokenizer: &T, expression: &str) -> Result<ResolvedTerms, ParseError> {
    let tokens = tokenizer.tokenize(expression);
    resolve_tokens(&tokens)
}

fn resolve_tokens(tokens: &[Token]) -> Result<ResolvedTerms, ParseError> {
    if tokens.is_empty() {
        return Ok(ResolvedTerms::new());
    }
    let resolved = resolve(tokens)?;
    debug!(
        tokens = tokens.len(),
        positive = ?resolved.positive,
        negative = ?resolved.negative,
        "resolved expression"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(positive: &[&str], negative: &[&str]) -> ResolvedTerms {
        ResolvedTerms {
            positive: positive.iter().map(|s| s.to_string()).collect(),
            negative: negative.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_sign_compose() {
        assert_eq!(Sign::Plus.compose(Sign::Plus), Sign::Plus);
        assert_eq!(Sign::Minus.compose(Sign::Plus), Sign::Minus);
        assert_eq!(Sign::Plus.compose(Sign::Minus), Sign::Minus);
        assert_eq!(Sign::Minus.compose(Sign::Minus), Sign::Plus);
    }

    #[test]
    fn test_merge_flips_negated_group() {
        let mut outer = terms(&["a"], &[]);
        outer.merge(terms(&["b"], &["c"]), Sign::Minus);
        assert_eq!(outer, terms(&["a", "c"], &["b"]));

        outer.merge(terms(&["d"], &["e"]), Sign::Plus);
        assert_eq!(outer, terms(&["a", "c", "d"], &["b", "e"]));
    }

    #[test]
    fn test_find_closing() {
        let tokens = tokenize("(a (b) c) d");
        assert_eq!(find_closing(&tokens, 0), Ok(6));
        assert_eq!(find_closing(&tokens, 2), Ok(4));
        assert_eq!(
            find_closing(&tokenize("(a (b c"), 0),
            Err(ParseError::MismatchedParentheses)
        );
    }

    #[test]
    fn test_resolve_basic() {
        assert_eq!(parse("").unwrap(), terms(&[], &[]));
        assert_eq!(parse("king").unwrap(), terms(&["king"], &[]));
        assert_eq!(
            parse("king - man + woman").unwrap(),
            terms(&["king", "woman"], &["man"])
        );
    }

    #[test]
    fn test_resolve_nested_groups() {
        assert_eq!(parse("-(king - man)").unwrap(), terms(&["man"], &["king"]));
        assert_eq!(
            parse("a - (b - (c - d))").unwrap(),
            terms(&["a", "c"], &["b", "d"])
        );
        assert_eq!(parse("((a))").unwrap(), terms(&["a"], &[]));
        assert_eq!(parse("-((a - b))").unwrap(), terms(&["b"], &["a"]));
    }

    #[test]
    fn test_sign_persists_across_words_and_groups() {
        assert_eq!(parse("a - b c").unwrap(), terms(&["a"], &["b", "c"]));
        assert_eq!(parse("- (a) b").unwrap(), terms(&[], &["a", "b"]));
        assert_eq!(parse("- (a - b) c + d").unwrap(), terms(&["b", "d"], &["a", "c"]));
    }

    #[test]
    fn test_sign_only_and_dangling_signs() {
        assert_eq!(parse("+ -").unwrap(), terms(&[], &[]));
        assert_eq!(parse("a + - b").unwrap(), terms(&["a"], &["b"]));
        assert_eq!(parse("(a -) b").unwrap(), terms(&["a", "b"], &[]));
        assert_eq!(parse("a -").unwrap(), terms(&["a"], &[]));
        assert_eq!(parse("()").unwrap(), terms(&[], &[]));
    }

    #[test]
    fn test_resolve_errors() {
        assert_eq!(parse("(king - man"), Err(ParseError::MismatchedParentheses));
        assert_eq!(parse("king)"), Err(ParseError::UnexpectedClosingParenthesis));
        assert_eq!(parse("(a))"), Err(ParseError::UnexpectedClosingParenthesis));
        assert_eq!(parse("a - (b - (c)"), Err(ParseError::MismatchedParentheses));
        assert_eq!(parse(") a ("), Err(ParseError::UnexpectedClosingParenthesis));
    }

    #[test]
    fn test_lowercases_and_keeps_duplicates() {
        assert_eq!(parse("King").unwrap(), parse("king").unwrap());
        assert_eq!(
            parse("Paris + PARIS - paris").unwrap(),
            terms(&["paris", "paris"], &["paris"])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            parse("king - man + woman").unwrap().to_string(),
            "[+king, +woman] [-man]"
        );
        assert_eq!(parse("- man").unwrap().to_string(), "[-man]");
        assert_eq!(ResolvedTerms::new().to_string(), "");
    }
}
