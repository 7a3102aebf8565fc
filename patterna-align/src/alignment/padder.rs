//! Right-padding aligner
use super::{group_rows, row_ids, Aligner, Alignment, GroupAlignment, ALIGNER_PAD};
use crate::clustering::GroupMap;
use patterna_core::{PatternaError, PatternaResult, Sequence};
use std::collections::HashSet;
use tracing::debug;

/// Append gaps to every row until it matches the longest row
pub fn pad_rows(members: Vec<Sequence>) -> PatternaResult<Alignment> {
    let width = members.iter().map(Sequence::len).max().unwrap_or(0);
    let padded = members
        .into_iter()
        .map(|row| {
            let positions: Vec<usize> = (row.len()..width).collect();
            row.insert_gaps(&positions)
        })
        .collect::<PatternaResult<Vec<_>>>()?;
    Alignment::from_sequences(padded)
}

/// Aligns by padding each group's rows on the right. Token positions are
/// never shifted, so rows only line up when they share a prefix shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Padder;

impl Aligner for Padder {
    fn name(&self) -> &'static str {
        ALIGNER_PAD
    }

    fn align(&self, rows: &[Sequence], groups: &GroupMap) -> PatternaResult<Vec<GroupAlignment>> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(groups.len());

        for (group, indices) in groups.iter() {
            if let Some(&dup) = indices.iter().find(|&&i| !seen.insert(i)) {
                return Err(PatternaError::invalid_input(format!(
                    "row {} appears in more than one group",
                    dup
                )));
            }

            let alignment = pad_rows(group_rows(rows, *group, indices)?)?;
            debug!("Padded group {} to width {}", group, alignment.width());
            out.push(GroupAlignment {
                group: *group,
                rows: indices.to_vec(),
                alignment: alignment.sorted_by_rows(&row_ids(rows, indices)),
            });
        }

        Ok(out)
    }
}
