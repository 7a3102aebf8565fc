//! Alignment and merge operand types

use patterna_core::{PatternaError, PatternaResult, Sequence, Token};
use serde::{Deserialize, Serialize};

/// Equal-length group of sequences
///
/// Every member has the same length (the alignment *width*) and there is at
/// least one member. Members are only ever changed by inserting gap tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    members: Vec<Sequence>,
}

impl Alignment {
    /// Wrap raw sequences, which must already share one length
    pub fn from_sequences(members: Vec<Sequence>) -> PatternaResult<Self> {
        let Some(first) = members.first() else {
            return Err(PatternaError::invalid_input(
                "an alignment needs at least one sequence",
            ));
        };

        let width = first.len();
        if let Some(bad) = members.iter().find(|s| s.len() != width) {
            return Err(PatternaError::invalid_input(format!(
                "row {} has length {} but the alignment width is {}",
                bad.row_index(),
                bad.len(),
                width
            )));
        }

        Ok(Self { members })
    }

    /// Flatten nested sequences and alignments into one alignment
    pub fn from_profiles(profiles: Vec<Profile>) -> PatternaResult<Self> {
        let members = profiles
            .into_iter()
            .flat_map(|p| match p {
                Profile::Sequence(seq) => vec![seq],
                Profile::Alignment(aln) => aln.members,
            })
            .collect();
        Self::from_sequences(members)
    }

    /// Caller guarantees equal, non-zero member count and equal lengths
    pub(crate) fn from_aligned(members: Vec<Sequence>) -> Self {
        debug_assert!(!members.is_empty());
        debug_assert!(members.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { members }
    }

    pub fn members(&self) -> &[Sequence] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Sequence> {
        self.members
    }

    /// Number of member sequences
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Common length of all members
    pub fn width(&self) -> usize {
        self.members.first().map_or(0, Sequence::len)
    }

    pub fn row_indices(&self) -> Vec<usize> {
        self.members.iter().map(Sequence::row_index).collect()
    }

    /// Member built from the given input row
    pub fn member_for_row(&self, row_index: usize) -> Option<&Sequence> {
        self.members.iter().find(|s| s.row_index() == row_index)
    }

    /// Tokens at one position across all members
    pub fn column(&self, position: usize) -> Vec<&Token> {
        self.members.iter().filter_map(|s| s.get(position)).collect()
    }

    /// Insert a gap at `position` into every member
    pub fn insert_gap(&self, position: usize) -> PatternaResult<Alignment> {
        let members = self
            .members
            .iter()
            .map(|s| s.insert_gap(position))
            .collect::<PatternaResult<Vec<_>>>()?;
        Ok(Self { members })
    }

    /// Insert gaps at strictly increasing result positions into every member
    pub fn insert_gaps(&self, positions: &[usize]) -> PatternaResult<Alignment> {
        if positions.is_empty() {
            return Ok(self.clone());
        }
        let members = self
            .members
            .iter()
            .map(|s| s.insert_gaps(positions))
            .collect::<PatternaResult<Vec<_>>>()?;
        Ok(Self { members })
    }

    /// Append the members of `other`; both sides must have the same width
    pub fn concat(mut self, other: Alignment) -> PatternaResult<Alignment> {
        if self.width() != other.width() {
            return Err(PatternaError::invalid_input(format!(
                "cannot concatenate alignments of width {} and {}",
                self.width(),
                other.width()
            )));
        }
        self.members.extend(other.members);
        Ok(self)
    }

    /// Reorder members to follow `order` (row indices). Members whose row is
    /// not listed keep their relative order at the end.
    pub fn sorted_by_rows(mut self, order: &[usize]) -> Alignment {
        let rank = |row: usize| order.iter().position(|&r| r == row).unwrap_or(usize::MAX);
        self.members.sort_by_key(|s| rank(s.row_index()));
        self
    }
}

/// Operand of a merge step: a raw row or an alignment built earlier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Sequence(Sequence),
    Alignment(Alignment),
}

impl Profile {
    pub fn members(&self) -> &[Sequence] {
        match self {
            Profile::Sequence(seq) => std::slice::from_ref(seq),
            Profile::Alignment(aln) => aln.members(),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Profile::Sequence(seq) => seq.len(),
            Profile::Alignment(aln) => aln.width(),
        }
    }

    /// Number of member sequences
    pub fn depth(&self) -> usize {
        self.members().len()
    }

    pub fn into_alignment(self) -> Alignment {
        match self {
            Profile::Sequence(seq) => Alignment::from_aligned(vec![seq]),
            Profile::Alignment(aln) => aln,
        }
    }
}

impl From<Sequence> for Profile {
    fn from(seq: Sequence) -> Self {
        Profile::Sequence(seq)
    }
}

impl From<Alignment> for Profile {
    fn from(aln: Alignment) -> Self {
        Profile::Alignment(aln)
    }
}
