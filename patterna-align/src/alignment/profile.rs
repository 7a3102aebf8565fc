//! Merge of two profiles (sequences or alignments) into one alignment
//!
//! Each side is viewed column by column. Every column is compared against
//! every column of the other side, plus an all-gap slot standing for "this
//! side takes a gap here". Costs are summed over all token pairs of the two
//! columns and the cheapest global path wins.

use super::dp::{global_path, DpModel, Objective};
use super::types::{Alignment, Profile};
use crate::distance::types_compatible;
use patterna_core::{PatternaError, PatternaResult, Token};
use tracing::trace;

/// Cost of two compatible tokens in one column
pub const COMPATIBLE_COST: i64 = 0;
/// Cost of a token set against a gap
pub const GAP_PAIR_COST: i64 = 2;
/// Cost of two incompatible tokens in one column
pub const MISMATCH_COST: i64 = 3;

/// Token-pair costs of the profile merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileCosts {
    pub compatible: i64,
    pub gap: i64,
    pub mismatch: i64,
}

impl Default for ProfileCosts {
    fn default() -> Self {
        Self {
            compatible: COMPATIBLE_COST,
            gap: GAP_PAIR_COST,
            mismatch: MISMATCH_COST,
        }
    }
}

impl ProfileCosts {
    /// Cost of one token pair
    pub fn token_pair(&self, a: &Token, b: &Token) -> i64 {
        if types_compatible(a.token_type, b.token_type, false) {
            self.compatible
        } else if a.is_gap() || b.is_gap() {
            self.gap
        } else {
            self.mismatch
        }
    }

    fn column(&self, p: &[&Token], q: &[&Token]) -> i64 {
        p.iter()
            .flat_map(|a| q.iter().map(move |b| self.token_pair(a, b)))
            .sum()
    }
}

/// Cost of one token pair under the default costs
pub fn token_pair_cost(a: &Token, b: &Token) -> i64 {
    ProfileCosts::default().token_pair(a, b)
}

/// Column-wise view of a profile
struct Columns<'a> {
    columns: Vec<Vec<&'a Token>>,
    depth: usize,
}

impl<'a> Columns<'a> {
    fn new(profile: &'a Profile) -> Self {
        let members = profile.members();
        let columns = (0..profile.width())
            .map(|position| members.iter().map(|s| &s[position]).collect())
            .collect();
        Self {
            columns,
            depth: members.len(),
        }
    }

    fn len(&self) -> usize {
        self.columns.len()
    }

    /// Cost of column `position` against the other side's all-gap slot
    fn against_gaps(&self, position: usize, other_depth: usize, costs: &ProfileCosts) -> i64 {
        let per_gap: i64 = self.columns[position]
            .iter()
            .map(|t| if t.is_gap() { costs.compatible } else { costs.gap })
            .sum();
        per_gap * other_depth as i64
    }

    /// Running cost of columns `0..=k` against gaps, for every `k`
    fn cumulative_against_gaps(&self, other_depth: usize, costs: &ProfileCosts) -> Vec<i64> {
        let mut total = 0;
        (0..self.len())
            .map(|position| {
                total += self.against_gaps(position, other_depth, costs);
                total
            })
            .collect()
    }
}

/// Table rows run over the second operand, columns over the first
struct ProfileModel<'a> {
    first: &'a Columns<'a>,
    second: &'a Columns<'a>,
    first_boundary: Vec<i64>,
    second_boundary: Vec<i64>,
    costs: ProfileCosts,
    gap_penalty: i64,
}

impl DpModel for ProfileModel<'_> {
    fn origin(&self) -> i64 {
        0
    }

    fn row_boundary(&self, i: usize) -> i64 {
        self.second_boundary[i]
    }

    fn col_boundary(&self, j: usize) -> i64 {
        self.first_boundary[j]
    }

    fn diagonal(&self, i: usize, j: usize) -> i64 {
        self.costs.column(&self.first.columns[j], &self.second.columns[i])
    }

    fn gap(&self) -> i64 {
        self.gap_penalty
    }
}

/// Merge two profiles. Ties prefer the diagonal, then consuming a column of
/// `second` alone, then a column of `first` alone. Members of `first` come
/// before members of `second` in the result.
pub fn merge_profiles(
    first: &Profile,
    second: &Profile,
    costs: &ProfileCosts,
    gap_penalty: u32,
) -> PatternaResult<Alignment> {
    if first.depth() == 0 || second.depth() == 0 {
        return Err(PatternaError::invalid_input("cannot merge an empty alignment"));
    }

    let first_columns = Columns::new(first);
    let second_columns = Columns::new(second);

    let model = ProfileModel {
        first_boundary: first_columns.cumulative_against_gaps(second_columns.depth, costs),
        second_boundary: second_columns.cumulative_against_gaps(first_columns.depth, costs),
        first: &first_columns,
        second: &second_columns,
        costs: *costs,
        gap_penalty: i64::from(gap_penalty),
    };
    let path = global_path(&model, second_columns.len(), first_columns.len(), Objective::Minimize);

    // table rows belong to `second`, so row-only steps are gaps in `first`
    let first_gaps = path.col_gaps();
    let second_gaps = path.row_gaps();

    trace!(
        "Merged profiles of depth {} and {}: width {}, cost {}",
        first_columns.depth,
        second_columns.depth,
        path.steps.len(),
        path.score
    );

    let mut members = Vec::with_capacity(first.depth() + second.depth());
    for member in first.members() {
        members.push(member.insert_gaps(&first_gaps)?);
    }
    for member in second.members() {
        members.push(member.insert_gaps(&second_gaps)?);
    }

    Alignment::from_sequences(members)
}
