//! Exact grouping by token count
use super::{ensure_rows, Collector, GroupId, GroupMap, COLLECTOR_GROUP};
use patterna_core::{PatternaResult, Sequence};
use std::collections::HashMap;
use tracing::debug;

/// Rows with the same length share a group. Ids are handed out in order of
/// first appearance, so the first row is always in group 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupCollector;

impl Collector for GroupCollector {
    fn name(&self) -> &'static str {
        COLLECTOR_GROUP
    }

    fn collect(&self, rows: &[Sequence]) -> PatternaResult<GroupMap> {
        ensure_rows(rows, COLLECTOR_GROUP)?;

        let mut ids: HashMap<usize, GroupId> = HashMap::new();
        let mut groups = GroupMap::new();
        for (index, row) in rows.iter().enumerate() {
            let next = GroupId::Id(ids.len());
            let id = *ids.entry(row.len()).or_insert(next);
            groups.insert(id, index);
        }

        debug!("Grouped {} rows into {} length groups", rows.len(), groups.len());
        Ok(groups)
    }
}
