//! Grouping rows before alignment
//!
//! A [`Collector`] partitions the input rows into groups that are aligned
//! independently. Every row lands in exactly one group; density clustering
//! may put rows in the [`GroupId::Noise`] group.

pub mod density;
pub mod group;
pub mod neighbor;
pub mod phylogenetic;

pub use density::ClusterCollector;
pub use group::GroupCollector;
pub use neighbor::NeighborJoin;
pub use phylogenetic::{neighbor_join, GuideTree, NjTree};

use indexmap::IndexMap;
use patterna_core::{Config, PatternaError, PatternaResult, Sequence};
use std::fmt;
use std::str::FromStr;

pub const COLLECTOR_GROUP: &str = "group";
pub const COLLECTOR_CLUSTER: &str = "cluster";
pub const COLLECTOR_NEIGHBOR: &str = "neighbor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupId {
    Noise,
    Id(usize),
}

impl GroupId {
    pub fn is_noise(&self) -> bool {
        matches!(self, GroupId::Noise)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Noise => f.write_str("noise"),
            GroupId::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Group id to row indices, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    groups: IndexMap<GroupId, Vec<usize>>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `row` to `group`, creating the group on first use
    pub fn insert(&mut self, group: GroupId, row: usize) {
        self.groups.entry(group).or_default().push(row);
    }

    pub fn get(&self, group: &GroupId) -> Option<&[usize]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &[usize])> {
        self.groups.iter().map(|(id, rows)| (id, rows.as_slice()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &GroupId> {
        self.groups.keys()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of rows across all groups
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn noise(&self) -> Option<&[usize]> {
        self.get(&GroupId::Noise)
    }

    pub fn group_of(&self, row: usize) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|(_, rows)| rows.contains(&row))
            .map(|(id, _)| *id)
    }

    /// Check that the groups partition rows `0..row_count` exactly
    pub fn validate_partition(&self, row_count: usize) -> PatternaResult<()> {
        let mut seen = vec![false; row_count];
        for (id, rows) in &self.groups {
            for &row in rows {
                match seen.get_mut(row) {
                    None => {
                        return Err(PatternaError::invalid_input(format!(
                            "group {} references row {} but there are only {} rows",
                            id, row, row_count
                        )))
                    }
                    Some(true) => {
                        return Err(PatternaError::invalid_input(format!(
                            "row {} appears in more than one group",
                            row
                        )))
                    }
                    Some(slot) => *slot = true,
                }
            }
        }

        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(PatternaError::invalid_input(format!(
                "row {} is not assigned to any group",
                missing
            )));
        }
        Ok(())
    }
}

impl FromIterator<(GroupId, usize)> for GroupMap {
    fn from_iter<I: IntoIterator<Item = (GroupId, usize)>>(iter: I) -> Self {
        let mut map = GroupMap::new();
        for (group, row) in iter {
            map.insert(group, row);
        }
        map
    }
}

pub trait Collector: Send + Sync {
    /// Registry key of this collector
    fn name(&self) -> &'static str;

    /// Partition `rows`. Empty input is a [`PatternaError::DegenerateInput`].
    fn collect(&self, rows: &[Sequence]) -> PatternaResult<GroupMap>;
}

pub(crate) fn ensure_rows(rows: &[Sequence], collector: &str) -> PatternaResult<()> {
    if rows.is_empty() {
        return Err(PatternaError::degenerate(format!(
            "{} collector received no rows",
            collector
        )));
    }
    Ok(())
}

/// Registered collector variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectorKind {
    #[default]
    Group,
    Cluster,
    Neighbor,
}

impl CollectorKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Group => COLLECTOR_GROUP,
            Self::Cluster => COLLECTOR_CLUSTER,
            Self::Neighbor => COLLECTOR_NEIGHBOR,
        }
    }

    pub fn create(&self, config: &Config) -> PatternaResult<Box<dyn Collector>> {
        Ok(match self {
            Self::Group => Box::new(GroupCollector),
            Self::Cluster => Box::new(ClusterCollector::from_config(config)?),
            Self::Neighbor => Box::new(NeighborJoin::from_config(config)),
        })
    }
}

impl FromStr for CollectorKind {
    type Err = PatternaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            COLLECTOR_GROUP => Ok(Self::Group),
            COLLECTOR_CLUSTER => Ok(Self::Cluster),
            COLLECTOR_NEIGHBOR => Ok(Self::Neighbor),
            _ => Err(PatternaError::configuration(format!("unknown collector: {}", s))),
        }
    }
}

impl fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Build the collector named by `config.collector.kind`
pub fn create_collector(config: &Config) -> PatternaResult<Box<dyn Collector>> {
    config.collector.kind.parse::<CollectorKind>()?.create(config)
}
