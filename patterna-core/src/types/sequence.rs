//! Tokenized row representation

use super::token::{Token, TokenType};
use crate::error::{PatternaError, PatternaResult};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Ordered, immutable list of tokens for one input row
///
/// Every operation that changes the layout returns a new sequence; the
/// tokens handed over by the tokenizer are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    row_index: usize,
    tokens: Vec<Token>,
}

impl Sequence {
    pub fn new(row_index: usize, tokens: Vec<Token>) -> Self {
        Self { row_index, tokens }
    }

    /// Row this sequence was tokenized from. Inserted gaps carry this index.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn token_types(&self) -> Vec<TokenType> {
        self.tokens.iter().map(|t| t.token_type).collect()
    }

    /// Space separated type tags, e.g. `DIGIT SPACE ALPHA`
    pub fn shape(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.token_type.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn gap_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_gap()).count()
    }

    /// Return a copy with a gap inserted at `position` (`position == len` appends)
    pub fn insert_gap(&self, position: usize) -> PatternaResult<Sequence> {
        if position > self.tokens.len() {
            return Err(PatternaError::invalid_input(format!(
                "gap position {} out of range for row {} of length {}",
                position,
                self.row_index,
                self.tokens.len()
            )));
        }

        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend_from_slice(&self.tokens[..position]);
        tokens.push(Token::gap(self.row_index));
        tokens.extend_from_slice(&self.tokens[position..]);

        Ok(Sequence::new(self.row_index, tokens))
    }

    /// Insert several gaps in one pass.
    ///
    /// `positions` are indices in the resulting sequence and must be strictly
    /// increasing; the result equals applying `insert_gap` for each position in
    /// order.
    pub fn insert_gaps(&self, positions: &[usize]) -> PatternaResult<Sequence> {
        let width = self.tokens.len() + positions.len();
        if let Some(window) = positions.windows(2).find(|w| w[0] >= w[1]) {
            return Err(PatternaError::invalid_input(format!(
                "gap positions must be strictly increasing, found {} before {}",
                window[0], window[1]
            )));
        }
        if let Some(&last) = positions.last() {
            if last >= width {
                return Err(PatternaError::invalid_input(format!(
                    "gap position {} out of range for row {} of aligned width {}",
                    last, self.row_index, width
                )));
            }
        }

        let mut tokens = Vec::with_capacity(width);
        let mut source = self.tokens.iter();
        let mut gaps = positions.iter().peekable();
        for position in 0..width {
            if gaps.peek() == Some(&&position) {
                gaps.next();
                tokens.push(Token::gap(self.row_index));
            } else if let Some(token) = source.next() {
                tokens.push(token.clone());
            }
        }

        Ok(Sequence::new(self.row_index, tokens))
    }

    /// The sequence with every gap token removed
    pub fn strip_gaps(&self) -> Sequence {
        Sequence::new(
            self.row_index,
            self.tokens.iter().filter(|t| !t.is_gap()).cloned().collect(),
        )
    }
}

impl Index<usize> for Sequence {
    type Output = Token;

    fn index(&self, position: usize) -> &Token {
        &self.tokens[position]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
