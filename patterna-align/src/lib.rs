//! Alignment and clustering of token sequences for Patterna

pub mod alignment;
pub mod clustering;
pub mod distance;
pub mod pipeline;

// Re-export commonly used types
pub use alignment::{
    create_aligner, Aligner, AlignerKind, Alignment, GroupAlignment, Padder, PairwiseAligner,
    Profile, ProgressiveAligner,
};
pub use clustering::{
    create_collector, ClusterCollector, Collector, CollectorKind, GroupCollector, GroupId,
    GroupMap, GuideTree, NeighborJoin, NjTree,
};
pub use distance::{create_distance, Distance, DistanceKind, DistanceMatrix};
pub use pipeline::{AlignedColumn, AlignmentWarning, PatternAligner};
