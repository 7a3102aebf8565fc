//! Patterna: token sequence alignment and clustering
//!
//! Rows of a column are tokenized elsewhere into [`Sequence`]s. Patterna
//! groups them with a [`Collector`] and aligns each group with an
//! [`Aligner`], so that every aligned position maps back to its input row.
//!
//! ```no_run
//! use patterna::{align_rows, Config, Sequence};
//!
//! # fn rows() -> Vec<Sequence> { Vec::new() }
//! let column = align_rows(&rows(), &Config::default())?;
//! for group in &column.alignments {
//!     println!("group {} has width {}", group.group, group.width());
//! }
//! # Ok::<(), patterna::PatternaError>(())
//! ```

pub use patterna_core::{
    config, default_config, init_logging, load_config, save_config, Config, PatternaError,
    PatternaResult, Sequence, Token, TokenType, VERSION,
};

pub use patterna_align::{
    alignment, clustering, distance, pipeline, AlignedColumn, Aligner, AlignerKind, Alignment,
    AlignmentWarning, ClusterCollector, Collector, CollectorKind, Distance, DistanceKind,
    DistanceMatrix, GroupAlignment, GroupCollector, GroupId, GroupMap, GuideTree, NeighborJoin,
    NjTree, Padder, PairwiseAligner, PatternAligner, Profile, ProgressiveAligner,
};

use std::path::Path;

/// Collect and align `rows` with the collector and aligner named in `config`
pub fn align_rows(rows: &[Sequence], config: &Config) -> PatternaResult<AlignedColumn> {
    PatternAligner::from_config(config)?.run(rows)
}

/// Same as [`align_rows`] with the configuration read from a TOML file
pub fn align_rows_with_config_file<P: AsRef<Path>>(
    rows: &[Sequence],
    path: P,
) -> PatternaResult<AlignedColumn> {
    let config = load_config(path)?;
    align_rows(rows, &config)
}
