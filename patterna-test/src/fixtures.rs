//! Test fixtures and data generators
//!
//! Rows are built either from explicit `(type, text)` pairs or by running
//! [`tokenize`] over a plain string.

use patterna_core::{Sequence, Token, TokenType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a row from `(type, text)` pairs
pub fn row(index: usize, tokens: &[(TokenType, &str)]) -> Sequence {
    Sequence::new(
        index,
        tokens
            .iter()
            .map(|&(token_type, text)| Token::new(token_type, text, index))
            .collect(),
    )
}

/// Build a row from type tags only, with a placeholder text per type
pub fn row_of(index: usize, types: &[TokenType]) -> Sequence {
    Sequence::new(
        index,
        types
            .iter()
            .map(|&t| Token::new(t, sample_text(t), index))
            .collect(),
    )
}

fn sample_text(token_type: TokenType) -> &'static str {
    match token_type {
        TokenType::Alpha => "ABC",
        TokenType::Digit => "123",
        TokenType::Alphanum => "A1",
        TokenType::Punctuation => ".",
        TokenType::Space => " ",
        TokenType::Gap => "",
        _ => "X",
    }
}

#[derive(PartialEq)]
enum CharClass {
    Word,
    Space,
    Punct,
}

fn class_of(c: char) -> CharClass {
    if c.is_alphanumeric() {
        CharClass::Word
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Punct
    }
}

/// Split `text` into word, space and punctuation tokens.
///
/// Word runs are `Alpha`, `Digit` or `Alphanum` depending on their
/// characters; whitespace runs become one `Space` token and every other
/// character is its own `Punctuation` token.
pub fn tokenize(index: usize, text: &str) -> Sequence {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let class = class_of(c);
        let mut run = String::from(c);
        if class != CharClass::Punct {
            while let Some(&next) = chars.peek() {
                if class_of(next) != class {
                    break;
                }
                run.push(next);
                chars.next();
            }
        }

        let token_type = match class {
            CharClass::Space => TokenType::Space,
            CharClass::Punct => TokenType::Punctuation,
            CharClass::Word if run.chars().all(|c| c.is_ascii_digit()) => TokenType::Digit,
            CharClass::Word if run.chars().all(char::is_alphabetic) => TokenType::Alpha,
            CharClass::Word => TokenType::Alphanum,
        };
        tokens.push(Token::new(token_type, run, index));
    }

    Sequence::new(index, tokens)
}

/// Tokenize every value, using its position as the row index
pub fn tokenize_all(values: &[&str]) -> Vec<Sequence> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| tokenize(i, v))
        .collect()
}

/// Three street addresses of different shapes
pub fn street_rows() -> Vec<Sequence> {
    tokenize_all(&["123 ST", "21W.AVENUE", "WEST ALLEN 12"])
}

/// Seeded random rows of 1 to 8 tokens drawn from the basic types
pub fn generate_rows(count: usize, seed: u64) -> Vec<Sequence> {
    const TYPES: [TokenType; 5] = [
        TokenType::Alpha,
        TokenType::Digit,
        TokenType::Alphanum,
        TokenType::Punctuation,
        TokenType::Space,
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let len = rng.gen_range(1..=8);
            let types: Vec<TokenType> = (0..len)
                .map(|_| TYPES[rng.gen_range(0..TYPES.len())])
                .collect();
            row_of(i, &types)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenType::*;

    #[test]
    fn test_tokenize_street() {
        let seq = tokenize(0, "W. 125 ST");
        assert_eq!(seq.token_types(), vec![Alpha, Punctuation, Space, Digit, Space, Alpha]);
        assert_eq!(seq[3].text, "125");

        let seq = tokenize(1, "W125  ST");
        assert_eq!(seq.token_types(), vec![Alphanum, Space, Alpha]);
        assert_eq!(seq[1].text, "  ");
    }

    #[test]
    fn test_generate_rows_is_seeded() {
        let a = generate_rows(20, 42);
        let b = generate_rows(20, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|r| (1..=8).contains(&r.len())));
        assert_eq!(a[7].row_index(), 7);
    }
}
