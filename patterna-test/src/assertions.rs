//! Custom assertions for testing
//!
//! Checks for the invariants every aligner must keep.

use patterna_core::Sequence;
use std::collections::HashSet;

/// Assert that all aligned members have the same length
pub fn assert_equal_width(members: &[Sequence]) {
    let Some(first) = members.first() else {
        panic!("Alignment has no members");
    };
    for member in members {
        assert_eq!(
            member.len(),
            first.len(),
            "Row {} has width {}, row {} has width {}",
            member.row_index(),
            member.len(),
            first.row_index(),
            first.len()
        );
    }
}

/// Assert that removing gaps from each aligned member gives back its input row
pub fn assert_content_preserved(original: &[Sequence], members: &[Sequence]) {
    for member in members {
        let source = original
            .iter()
            .find(|r| r.row_index() == member.row_index())
            .unwrap_or_else(|| panic!("Aligned row {} has no input row", member.row_index()));

        assert_eq!(
            &member.strip_gaps(),
            source,
            "Row {} changed beyond gap insertion",
            member.row_index()
        );
        assert!(
            member.iter().all(|t| t.row_index == member.row_index()),
            "Row {} contains tokens from another row",
            member.row_index()
        );
    }
}

/// Assert that `groups` cover rows `0..row_count` exactly once
pub fn assert_partition<'a, I>(groups: I, row_count: usize)
where
    I: IntoIterator<Item = &'a [usize]>,
{
    let mut seen = HashSet::new();
    for group in groups {
        assert!(!group.is_empty(), "Empty group found");
        for &row in group {
            assert!(row < row_count, "Row {} out of range", row);
            assert!(seen.insert(row), "Row {} assigned twice", row);
        }
    }
    assert_eq!(seen.len(), row_count, "Not every row was assigned");
}
