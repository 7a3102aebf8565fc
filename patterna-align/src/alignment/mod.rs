//! Column alignment of token sequences
//!
//! An [`Aligner`] turns each group of a [`GroupMap`] into an [`Alignment`]
//! whose members all have the same width. Only gap tokens are ever inserted.

pub(crate) mod dp;
pub mod nw_aligner;
pub mod padder;
pub mod profile;
pub mod progressive;
pub mod scoring;
pub mod types;

pub use nw_aligner::{NeedlemanWunsch, PairwiseAligner, PairwiseAlignment};
pub use padder::{pad_rows, Padder};
pub use profile::{merge_profiles, token_pair_cost, ProfileCosts};
pub use progressive::ProgressiveAligner;
pub use scoring::{GroupedGapScoring, ScoringScheme, TypeMatchScoring};
pub use types::{Alignment, Profile};

use crate::clustering::{GroupId, GroupMap};
use patterna_core::{Config, PatternaError, PatternaResult, Sequence};
use std::fmt;
use std::str::FromStr;

pub const ALIGNER_PROGRESSIVE: &str = "pro";
pub const ALIGNER_PAD: &str = "pad";

/// Aligned rows of one group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAlignment {
    pub group: GroupId,
    /// Positions of the group's rows in the input, in group order
    pub rows: Vec<usize>,
    pub alignment: Alignment,
}

impl GroupAlignment {
    pub fn width(&self) -> usize {
        self.alignment.width()
    }
}

pub trait Aligner: Send + Sync {
    /// Registry key of this aligner
    fn name(&self) -> &'static str;

    /// One alignment per group, in group order
    fn align(&self, rows: &[Sequence], groups: &GroupMap) -> PatternaResult<Vec<GroupAlignment>>;
}

/// Clone the rows at `indices`, rejecting out-of-range positions
pub(crate) fn group_rows(rows: &[Sequence], group: GroupId, indices: &[usize]) -> PatternaResult<Vec<Sequence>> {
    indices
        .iter()
        .map(|&i| {
            rows.get(i).cloned().ok_or_else(|| {
                PatternaError::invalid_input(format!(
                    "group {} references row {} but there are only {} rows",
                    group,
                    i,
                    rows.len()
                ))
            })
        })
        .collect()
}

/// Row ids of the sequences at `indices`, used to restore group order
pub(crate) fn row_ids(rows: &[Sequence], indices: &[usize]) -> Vec<usize> {
    indices.iter().filter_map(|&i| rows.get(i)).map(Sequence::row_index).collect()
}

/// Registered aligner variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignerKind {
    #[default]
    Progressive,
    Pad,
}

impl AlignerKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Progressive => ALIGNER_PROGRESSIVE,
            Self::Pad => ALIGNER_PAD,
        }
    }

    pub fn create(&self, config: &Config) -> Box<dyn Aligner> {
        match self {
            Self::Progressive => Box::new(ProgressiveAligner::from_config(config)),
            Self::Pad => Box::new(Padder),
        }
    }
}

impl FromStr for AlignerKind {
    type Err = PatternaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ALIGNER_PROGRESSIVE => Ok(Self::Progressive),
            ALIGNER_PAD => Ok(Self::Pad),
            _ => Err(PatternaError::configuration(format!("unknown aligner: {}", s))),
        }
    }
}

impl fmt::Display for AlignerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Build the aligner named by `config.alignment.aligner`
pub fn create_aligner(config: &Config) -> PatternaResult<Box<dyn Aligner>> {
    Ok(config.alignment.aligner.parse::<AlignerKind>()?.create(config))
}
