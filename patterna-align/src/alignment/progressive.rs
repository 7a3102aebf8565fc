//! Progressive multiple alignment
//!
//! Groups are aligned by repeatedly merging profiles. With three or more rows
//! a neighbor-joining guide tree decides the merge order; otherwise rows are
//! folded in from left to right.

use super::padder::pad_rows;
use super::profile::{merge_profiles, ProfileCosts};
use super::{
    group_rows, row_ids, Aligner, Alignment, GroupAlignment, PairwiseAligner, Profile,
    ALIGNER_PROGRESSIVE,
};
use crate::clustering::{GroupId, GroupMap, GuideTree, NeighborJoin};
use patterna_core::config::PerformanceConfig;
use patterna_core::{Config, PatternaError, PatternaResult, Sequence};
use rayon::prelude::*;
use tracing::{debug, info};

/// Smallest group that is worth a guide tree
const GUIDE_TREE_MIN_ROWS: usize = 3;

#[derive(Debug, Clone)]
pub struct ProgressiveAligner {
    pairwise: PairwiseAligner,
    costs: ProfileCosts,
    gap_penalty: u32,
    use_guide_tree: bool,
    performance: PerformanceConfig,
}

impl Default for ProgressiveAligner {
    fn default() -> Self {
        Self {
            pairwise: PairwiseAligner::new(false),
            costs: ProfileCosts::default(),
            gap_penalty: 1,
            use_guide_tree: true,
            performance: PerformanceConfig::sequential(),
        }
    }
}

impl ProgressiveAligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            pairwise: PairwiseAligner::new(config.alignment.keep_gaps_together),
            costs: ProfileCosts::default(),
            gap_penalty: config.alignment.gap_penalty,
            use_guide_tree: config.alignment.use_guide_tree,
            performance: config.performance,
        }
    }

    pub fn with_keep_gaps_together(mut self, keep: bool) -> Self {
        self.pairwise = PairwiseAligner::new(keep);
        self
    }

    pub fn with_gap_penalty(mut self, gap_penalty: u32) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    pub fn with_profile_costs(mut self, costs: ProfileCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_guide_tree(mut self, use_guide_tree: bool) -> Self {
        self.use_guide_tree = use_guide_tree;
        self
    }

    /// Spread groups over the rayon pool once the input reaches `threshold` rows
    pub fn with_parallel(mut self, threshold: usize) -> Self {
        self.performance = PerformanceConfig::with_threshold(threshold);
        self
    }

    /// Merge two profiles. Two raw sequences go through the pairwise aligner,
    /// anything involving an alignment through the profile merge.
    pub fn merge(&self, first: &Profile, second: &Profile) -> PatternaResult<Alignment> {
        match (first, second) {
            (Profile::Sequence(x), Profile::Sequence(y)) => Ok(self.pairwise.align_pair(x, y)),
            _ => merge_profiles(first, second, &self.costs, self.gap_penalty),
        }
    }

    /// Left fold of [`merge`](Self::merge) over `values`
    pub fn align_column(&self, values: Vec<Profile>) -> PatternaResult<Alignment> {
        let mut values = values.into_iter();
        let mut acc = values
            .next()
            .ok_or_else(|| PatternaError::invalid_input("nothing to align"))?;

        for value in values {
            acc = Profile::Alignment(self.merge(&acc, &value)?);
        }
        Ok(acc.into_alignment())
    }

    /// Merge `rows` bottom-up along `tree`, whose leaves index into `rows`
    pub fn align_guide_tree(&self, tree: &GuideTree, rows: &[Sequence]) -> PatternaResult<Alignment> {
        Ok(self.subtree_profile(tree, rows)?.into_alignment())
    }

    fn subtree_profile(&self, tree: &GuideTree, rows: &[Sequence]) -> PatternaResult<Profile> {
        match tree {
            GuideTree::Leaf(i) => rows.get(*i).cloned().map(Profile::Sequence).ok_or_else(|| {
                PatternaError::invalid_input(format!(
                    "guide tree leaf {} is out of range for {} rows",
                    i,
                    rows.len()
                ))
            }),
            GuideTree::Pair(left, right) => {
                let left = self.subtree_profile(left, rows)?;
                let right = self.subtree_profile(right, rows)?;
                Ok(Profile::Alignment(self.merge(&left, &right)?))
            }
        }
    }

    /// Align one group's rows. A group that is already padded to one width
    /// (equal lengths, at least one gap) is returned as it is.
    pub fn align_group(&self, members: Vec<Sequence>) -> PatternaResult<Alignment> {
        match members.len() {
            0 => Err(PatternaError::invalid_input("cannot align an empty group")),
            1 => Alignment::from_sequences(members),
            n if is_padded(&members) => {
                debug!("Group of {} rows is already aligned", n);
                Alignment::from_sequences(members)
            }
            n if n < GUIDE_TREE_MIN_ROWS || !self.use_guide_tree => {
                self.align_column(members.into_iter().map(Profile::from).collect())
            }
            n => {
                let tree = NeighborJoin::with_performance(self.performance).guide_tree(&members)?;
                debug!("Guide tree over {} rows: {}", n, tree);
                self.align_guide_tree(&tree, &members)
            }
        }
    }

    fn align_one(&self, rows: &[Sequence], group: GroupId, indices: &[usize]) -> PatternaResult<GroupAlignment> {
        let members = group_rows(rows, group, indices)?;
        // noise rows share no shape, merging them would only smear gaps
        let alignment = if group.is_noise() {
            pad_rows(members)?
        } else {
            self.align_group(members)?
        };

        debug!(
            "Aligned group {} ({} rows) to width {}",
            group,
            indices.len(),
            alignment.width()
        );
        Ok(GroupAlignment {
            group,
            rows: indices.to_vec(),
            alignment: alignment.sorted_by_rows(&row_ids(rows, indices)),
        })
    }
}

fn is_padded(members: &[Sequence]) -> bool {
    let width = members.first().map_or(0, Sequence::len);
    members.iter().all(|s| s.len() == width) && members.iter().any(|s| s.gap_count() > 0)
}

impl Aligner for ProgressiveAligner {
    fn name(&self) -> &'static str {
        ALIGNER_PROGRESSIVE
    }

    fn align(&self, rows: &[Sequence], groups: &GroupMap) -> PatternaResult<Vec<GroupAlignment>> {
        let jobs: Vec<(GroupId, &[usize])> = groups.iter().map(|(id, r)| (*id, r)).collect();
        let parallel = jobs.len() > 1 && self.performance.use_parallel(groups.row_count());

        let result: PatternaResult<Vec<GroupAlignment>> = if parallel {
            jobs.par_iter()
                .map(|(group, indices)| self.align_one(rows, *group, indices))
                .collect()
        } else {
            jobs.iter()
                .map(|(group, indices)| self.align_one(rows, *group, indices))
                .collect()
        };

        let alignments = result?;
        info!(
            "Aligned {} rows in {} groups{}",
            groups.row_count(),
            alignments.len(),
            if parallel { " (parallel)" } else { "" }
        );
        Ok(alignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patterna_core::{Token, TokenType};
    use pretty_assertions::assert_eq;
    use TokenType::*;

    fn row(index: usize, tokens: &[(TokenType, &str)]) -> Sequence {
        Sequence::new(
            index,
            tokens
                .iter()
                .map(|&(t, text)| Token::new(t, text, index))
                .collect(),
        )
    }

    fn street_rows() -> Vec<Sequence> {
        vec![
            row(0, &[(Digit, "123"), (Space, " "), (Alpha, "ST")]),
            row(1, &[(Alphanum, "21W"), (Punctuation, "."), (Alpha, "AVENUE")]),
            row(
                2,
                &[
                    (Alpha, "WEST"),
                    (Space, " "),
                    (Alpha, "ALLEN"),
                    (Space, " "),
                    (Digit, "12"),
                ],
            ),
        ]
    }

    fn texts(aln: &Alignment, position: usize) -> Vec<String> {
        aln.column(position).iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn test_align_column_folds_left() {
        let aligner = ProgressiveAligner::new();
        let aln = aligner
            .align_column(street_rows().into_iter().map(Profile::from).collect())
            .unwrap();

        assert_eq!(aln.width(), 5);
        assert_eq!(aln.row_indices(), vec![0, 1, 2]);
        assert_eq!(texts(&aln, 0), vec!["123", "21W", "WEST"]);
        assert_eq!(texts(&aln, 2), vec!["ST", "AVENUE", "ALLEN"]);
        assert_eq!(aln.members()[0].token_types(), vec![Digit, Space, Alpha, Gap, Gap]);
    }

    #[test]
    fn test_align_column_rejects_empty() {
        assert!(matches!(
            ProgressiveAligner::new().align_column(vec![]),
            Err(PatternaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_merge_two_sequences_is_pairwise() {
        let rows = street_rows();
        let aligner = ProgressiveAligner::new();

        let merged = aligner
            .merge(&rows[0].clone().into(), &rows[1].clone().into())
            .unwrap();
        assert_eq!(merged, PairwiseAligner::new(false).align_pair(&rows[0], &rows[1]));
    }

    #[test]
    fn test_guide_tree_leaf_out_of_range() {
        let rows = street_rows();
        let tree = GuideTree::pair(GuideTree::Leaf(0), GuideTree::Leaf(9));
        assert!(ProgressiveAligner::new().align_guide_tree(&tree, &rows).is_err());
    }

    #[test]
    fn test_group_order_is_restored() {
        let rows = street_rows();
        let groups: GroupMap = [(GroupId::Id(0), 2), (GroupId::Id(0), 0), (GroupId::Id(0), 1)]
            .into_iter()
            .collect();

        let result = ProgressiveAligner::new().align(&rows, &groups).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].rows, vec![2, 0, 1]);
        assert_eq!(result[0].alignment.row_indices(), vec![2, 0, 1]);
        for (member, original) in result[0].alignment.members().iter().zip([2, 0, 1]) {
            assert_eq!(member.strip_gaps(), rows[original]);
        }
    }

    #[test]
    fn test_noise_group_is_padded() {
        let rows = street_rows();
        let groups: GroupMap = [(GroupId::Noise, 0), (GroupId::Noise, 1), (GroupId::Noise, 2)]
            .into_iter()
            .collect();

        let result = ProgressiveAligner::new().align(&rows, &groups).unwrap();
        let aln = &result[0].alignment;

        assert_eq!(aln.width(), 5);
        assert_eq!(aln.members()[0].token_types(), vec![Digit, Space, Alpha, Gap, Gap]);
        assert_eq!(aln.members()[2], rows[2]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows: Vec<Sequence> = (0..24)
            .map(|i| match i % 3 {
                0 => row(i, &[(Digit, "1"), (Space, " "), (Alpha, "A")]),
                1 => row(i, &[(Alpha, "B"), (Space, " "), (Alpha, "C"), (Space, " "), (Digit, "2")]),
                _ => row(i, &[(Alphanum, "3D")]),
            })
            .collect();
        let groups: GroupMap = (0..rows.len()).map(|i| (GroupId::Id(i % 3), i)).collect();

        let sequential = ProgressiveAligner::new().align(&rows, &groups).unwrap();
        let parallel = ProgressiveAligner::new()
            .with_parallel(1)
            .align(&rows, &groups)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_realigning_output_is_stable() {
        let rows = street_rows();
        let groups: GroupMap = (0..rows.len()).map(|i| (GroupId::Id(0), i)).collect();

        for guide in [false, true] {
            let aligner = ProgressiveAligner::new().with_guide_tree(guide);
            let first = aligner.align(&rows, &groups).unwrap();
            let aligned = first[0].alignment.members().to_vec();
            assert!(aligned.iter().any(|s| s.gap_count() > 0));

            let second = aligner.align(&aligned, &groups).unwrap();
            assert_eq!(second[0].alignment, first[0].alignment);
        }
    }

    #[test]
    fn test_padded_needs_equal_width_and_a_gap() {
        // same length but no gaps: not treated as a finished alignment
        let rows = vec![
            row(0, &[(Digit, "1"), (Alpha, "A")]),
            row(1, &[(Alpha, "B"), (Digit, "2")]),
            row(2, &[(Digit, "3"), (Alpha, "C")]),
        ];
        assert!(!is_padded(&rows));
        assert!(is_padded(&[rows[0].insert_gap(2).unwrap(), rows[1].insert_gap(0).unwrap()]));
        assert!(!is_padded(&[rows[0].insert_gap(2).unwrap(), rows[1].clone()]));
    }

    #[test]
    fn test_gap_penalty_controls_merge_width() {
        let first: Profile = Alignment::from_sequences(vec![row(0, &[(Alpha, "A")])])
            .unwrap()
            .into();
        let second: Profile = row(1, &[(Digit, "1")]).into();

        // free gaps beat the mismatch
        let free = ProgressiveAligner::new().with_gap_penalty(0);
        let merged = free.merge(&first, &second).unwrap();
        assert_eq!(merged.width(), 2);
        assert_eq!(merged.members()[0].token_types(), vec![Alpha, Gap]);
        assert_eq!(merged.members()[1].token_types(), vec![Gap, Digit]);

        let costly = ProgressiveAligner::new().with_gap_penalty(5);
        assert_eq!(costly.merge(&first, &second).unwrap().width(), 1);
    }

    #[test]
    fn test_gap_penalty_narrows_random_groups() {
        let rows = patterna_test::generate_rows(5, 3);
        let width = |gap_penalty| {
            ProgressiveAligner::new()
                .with_guide_tree(false)
                .with_gap_penalty(gap_penalty)
                .align_column(rows.iter().cloned().map(Profile::from).collect())
                .unwrap()
                .width()
        };

        let longest = rows.iter().map(Sequence::len).max().unwrap();
        assert!(width(20) < width(0));
        assert!(width(20) >= longest);
    }

    #[test]
    fn test_profile_costs_change_the_path() {
        let first: Profile = Alignment::from_sequences(vec![row(0, &[(Alpha, "A")])])
            .unwrap()
            .into();
        let second: Profile = row(1, &[(Digit, "1")]).into();

        let default = ProgressiveAligner::new().merge(&first, &second).unwrap();
        assert_eq!(default.width(), 1);

        let expensive_mismatch = ProfileCosts {
            mismatch: 10,
            ..ProfileCosts::default()
        };
        let merged = ProgressiveAligner::new()
            .with_profile_costs(expensive_mismatch)
            .merge(&first, &second)
            .unwrap();
        assert_eq!(merged.width(), 2);
        assert_eq!(merged.members()[1].token_types(), vec![Gap, Digit]);
    }

    #[test]
    fn test_from_config_wires_alignment_options() {
        let mut config = Config::default();
        config.alignment.keep_gaps_together = true;
        config.alignment.gap_penalty = 7;
        config.alignment.use_guide_tree = false;

        let aligner = ProgressiveAligner::from_config(&config);
        assert!(aligner.pairwise.keeps_gaps_together());
        assert_eq!(aligner.gap_penalty, 7);
        assert!(!aligner.use_guide_tree);
        assert!(!ProgressiveAligner::new().pairwise.keeps_gaps_together());
    }
}
