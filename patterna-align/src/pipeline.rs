//! Collect-then-align pipeline over one column of tokenized rows
use crate::alignment::{create_aligner, Aligner, GroupAlignment};
use crate::clustering::{create_collector, Collector, GroupId, GroupMap};
use patterna_core::{Config, PatternaResult, Sequence};
use std::fmt;
use tracing::{info, warn};

/// Non-fatal findings of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentWarning {
    /// Rows the collector could not place in any cluster
    NoiseRows { rows: Vec<usize> },
    /// Rows of a group that the aligner left out of the group's alignment
    MissingRows { group: GroupId, rows: Vec<usize> },
}

impl fmt::Display for AlignmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentWarning::NoiseRows { rows } => {
                write!(f, "{} rows did not fit any cluster: {:?}", rows.len(), rows)
            }
            AlignmentWarning::MissingRows { group, rows } => {
                write!(f, "group {} is missing rows {:?} from its alignment", group, rows)
            }
        }
    }
}

/// Result of aligning one column
#[derive(Debug, Clone)]
pub struct AlignedColumn {
    pub groups: GroupMap,
    pub alignments: Vec<GroupAlignment>,
    pub warnings: Vec<AlignmentWarning>,
}

impl AlignedColumn {
    pub fn alignment_for(&self, group: &GroupId) -> Option<&GroupAlignment> {
        self.alignments.iter().find(|a| &a.group == group)
    }

    /// Widest group alignment
    pub fn max_width(&self) -> usize {
        self.alignments.iter().map(GroupAlignment::width).max().unwrap_or(0)
    }
}

/// Runs a collector and then an aligner over the same rows
pub struct PatternAligner {
    collector: Box<dyn Collector>,
    aligner: Box<dyn Aligner>,
}

impl PatternAligner {
    pub fn new(collector: Box<dyn Collector>, aligner: Box<dyn Aligner>) -> Self {
        Self { collector, aligner }
    }

    pub fn from_config(config: &Config) -> PatternaResult<Self> {
        config.validate()?;
        Ok(Self::new(create_collector(config)?, create_aligner(config)?))
    }

    pub fn collector(&self) -> &dyn Collector {
        self.collector.as_ref()
    }

    pub fn aligner(&self) -> &dyn Aligner {
        self.aligner.as_ref()
    }

    pub fn run(&self, rows: &[Sequence]) -> PatternaResult<AlignedColumn> {
        info!(
            "Aligning {} rows with {} collector and {} aligner",
            rows.len(),
            self.collector.name(),
            self.aligner.name()
        );

        let groups = self.collector.collect(rows)?;
        groups.validate_partition(rows.len())?;
        let alignments = self.aligner.align(rows, &groups)?;

        let mut warnings = Vec::new();
        if let Some(noise) = groups.noise() {
            warnings.push(AlignmentWarning::NoiseRows { rows: noise.to_vec() });
        }
        for aligned in &alignments {
            let missing: Vec<usize> = aligned
                .rows
                .iter()
                .copied()
                .filter(|&i| {
                    rows.get(i).map_or(true, |r| {
                        aligned.alignment.member_for_row(r.row_index()).is_none()
                    })
                })
                .collect();
            if !missing.is_empty() {
                warnings.push(AlignmentWarning::MissingRows {
                    group: aligned.group,
                    rows: missing,
                });
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Ok(AlignedColumn {
            groups,
            alignments,
            warnings,
        })
    }
}
