//! Neighbor-joining collector and alignment-based row distances
use super::phylogenetic::{neighbor_join, GuideTree, NjTree};
use super::{ensure_rows, Collector, GroupId, GroupMap, COLLECTOR_NEIGHBOR};
use crate::alignment::PairwiseAligner;
use crate::distance::{Distance, DistanceMatrix, TreeEditDistance};
use patterna_core::config::PerformanceConfig;
use patterna_core::{Config, PatternaResult, Sequence};
use tracing::debug;

/// Distance between two rows after aligning them: the non-strict tree edit
/// distance of the gapped pair.
pub fn pairwise_alignment_distance(u: &Sequence, v: &Sequence) -> f64 {
    let aligned = PairwiseAligner::new(false).align_pair(u, v);
    let members = aligned.members();
    TreeEditDistance::new(false).compute(&members[0], &members[1])
}

/// Builds a neighbor-joining tree over the rows. As a collector it returns a
/// single group holding every row in the tree's leaf order.
#[derive(Debug, Clone, Copy)]
pub struct NeighborJoin {
    performance: PerformanceConfig,
}

impl Default for NeighborJoin {
    fn default() -> Self {
        Self {
            performance: PerformanceConfig::sequential(),
        }
    }
}

impl NeighborJoin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_performance(config.performance)
    }

    pub fn with_performance(performance: PerformanceConfig) -> Self {
        Self { performance }
    }

    /// Compute distances on the rayon pool once `rows` reaches `threshold`
    pub fn with_parallel(mut self, threshold: usize) -> Self {
        self.performance = PerformanceConfig::with_threshold(threshold);
        self
    }

    /// Alignment-based distance between every pair of rows
    pub fn compute_pairwise_distance(&self, rows: &[Sequence]) -> PatternaResult<DistanceMatrix> {
        ensure_rows(rows, COLLECTOR_NEIGHBOR)?;
        let parallel = self.performance.use_parallel(rows.len());
        Ok(DistanceMatrix::from_fn(rows.len(), parallel, |i, j| {
            pairwise_alignment_distance(&rows[i], &rows[j])
        }))
    }

    /// Tree whose leaves are positions in `rows`
    pub fn build_tree(&self, rows: &[Sequence]) -> PatternaResult<NjTree> {
        let matrix = self.compute_pairwise_distance(rows)?;
        neighbor_join(&matrix)
    }

    pub fn guide_tree(&self, rows: &[Sequence]) -> PatternaResult<GuideTree> {
        Ok(self.build_tree(rows)?.to_guide_tree())
    }
}

impl Collector for NeighborJoin {
    fn name(&self) -> &'static str {
        COLLECTOR_NEIGHBOR
    }

    fn collect(&self, rows: &[Sequence]) -> PatternaResult<GroupMap> {
        let tree = self.build_tree(rows)?;
        debug!("Neighbor joining order: {}", tree.to_newick(false));

        Ok(tree
            .leaf_order()
            .into_iter()
            .map(|row| (GroupId::Id(0), row))
            .collect())
    }
}
