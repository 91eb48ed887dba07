use crate::types::{ChildRecord, OrderIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// OrderReport
/// Read-only snapshot of a collection's index health.
///
/// Inspection never repairs anything; the next structural operation on the
/// collection does.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderReport {
    pub len: u64,

    /// Stored index values carried by more than one child, with their count.
    pub duplicates: Vec<(OrderIndex, u64)>,

    /// Positions in `0..len` that no child carries.
    pub gaps: Vec<u64>,

    /// Children whose stored index lies outside `0..len`.
    pub out_of_range: u64,
}

impl OrderReport {
    #[must_use]
    pub fn from_records(records: &[ChildRecord]) -> Self {
        let len = records.len();
        let mut counts = BTreeMap::<OrderIndex, u64>::new();
        for record in records {
            *counts.entry(record.index).or_default() += 1;
        }

        let duplicates = counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(index, count)| (*index, *count))
            .collect();
        let out_of_range = records
            .iter()
            .filter(|record| record.index.as_position(len).is_none())
            .count() as u64;
        let gaps = (0..len)
            .filter(|position| {
                !OrderIndex::from_position(*position)
                    .is_ok_and(|index| counts.contains_key(&index))
            })
            .map(|position| position as u64)
            .collect();

        Self {
            len: len as u64,
            duplicates,
            gaps,
            out_of_range,
        }
    }

    /// True when the collection satisfies the steady-state invariant.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.duplicates.is_empty() && self.gaps.is_empty() && self.out_of_range == 0
    }

    /// Number of children a healing pass would have to rewrite at most.
    #[must_use]
    pub fn corrupt_children(&self) -> u64 {
        let duplicated: u64 = self.duplicates.iter().map(|(_, count)| count - 1).sum();

        duplicated + self.out_of_range
    }
}

///
/// TESTS
///
