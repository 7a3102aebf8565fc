//! Density clustering (DBSCAN) over a row distance
use super::{ensure_rows, Collector, GroupId, GroupMap, COLLECTOR_CLUSTER};
use crate::distance::{create_distance, Distance, DistanceMatrix};
use patterna_core::config::PerformanceConfig;
use patterna_core::{Config, PatternaError, PatternaResult, Sequence};
use std::collections::VecDeque;
use tracing::{debug, info};

/// DBSCAN over pairwise row distances.
///
/// A row is a core point when at least `min_samples` rows (itself included)
/// lie within `eps`. Clusters grow from core points in ascending row order;
/// a border row joins the first cluster that reaches it. Everything else is
/// noise.
pub struct ClusterCollector {
    distance: Box<dyn Distance>,
    eps: f64,
    min_samples: usize,
    performance: PerformanceConfig,
}

impl ClusterCollector {
    pub fn new(distance: Box<dyn Distance>, eps: f64, min_samples: usize) -> PatternaResult<Self> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(PatternaError::configuration(format!(
                "eps must be a non-negative number, got {}",
                eps
            )));
        }
        if min_samples == 0 {
            return Err(PatternaError::configuration("min_samples must be at least 1"));
        }

        Ok(Self {
            distance,
            eps,
            min_samples,
            performance: PerformanceConfig::sequential(),
        })
    }

    pub fn from_config(config: &Config) -> PatternaResult<Self> {
        let distance = create_distance(&config.distance.kind, config.distance.strict)?;
        let mut collector = Self::new(distance, config.collector.eps, config.collector.min_samples)?;
        collector.performance = config.performance;
        Ok(collector)
    }

    /// Compute the distance matrix on the rayon pool once `rows` reaches `threshold`
    pub fn with_parallel(mut self, threshold: usize) -> Self {
        self.performance = PerformanceConfig::with_threshold(threshold);
        self
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    pub fn distance_matrix(&self, rows: &[Sequence]) -> DistanceMatrix {
        let parallel = self.performance.use_parallel(rows.len());
        DistanceMatrix::from_fn(rows.len(), parallel, |i, j| {
            self.distance.compute(&rows[i], &rows[j])
        })
    }

    /// Cluster from an already computed distance matrix
    pub fn collect_precomputed(&self, matrix: &DistanceMatrix) -> PatternaResult<GroupMap> {
        if matrix.is_empty() {
            return Err(PatternaError::degenerate("cluster collector received no rows"));
        }

        let size = matrix.size();
        let neighborhoods: Vec<Vec<usize>> = (0..size)
            .map(|i| matrix.neighbors_within(i, self.eps))
            .collect();
        let core: Vec<bool> = neighborhoods
            .iter()
            .map(|n| n.len() >= self.min_samples)
            .collect();

        let mut labels: Vec<Option<GroupId>> = vec![None; size];
        let mut clusters = 0usize;

        for start in 0..size {
            if labels[start].is_some() || !core[start] {
                continue;
            }

            let id = GroupId::Id(clusters);
            clusters += 1;
            labels[start] = Some(id);

            let mut queue = VecDeque::from([start]);
            while let Some(point) = queue.pop_front() {
                if !core[point] {
                    continue;
                }
                for &neighbor in &neighborhoods[point] {
                    if labels[neighbor].is_none() {
                        labels[neighbor] = Some(id);
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        let groups: GroupMap = labels
            .into_iter()
            .enumerate()
            .map(|(row, label)| (label.unwrap_or(GroupId::Noise), row))
            .collect();

        let noise = groups.noise().map_or(0, <[usize]>::len);
        info!(
            "Density clustering found {} clusters and {} noise rows (eps {}, min_samples {})",
            clusters, noise, self.eps, self.min_samples
        );
        Ok(groups)
    }
}

impl Collector for ClusterCollector {
    fn name(&self) -> &'static str {
        COLLECTOR_CLUSTER
    }

    fn collect(&self, rows: &[Sequence]) -> PatternaResult<GroupMap> {
        ensure_rows(rows, COLLECTOR_CLUSTER)?;
        debug!(
            "Computing {} distances for {} rows",
            self.distance.name(),
            rows.len()
        );
        let matrix = self.distance_matrix(rows);
        self.collect_precomputed(&matrix)
    }
}
