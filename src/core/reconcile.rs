use crate::domain::model::{CreditorComparison, Group, LedgerEntry, Status};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct GroupTotals {
    group7: f64,
    group8: f64,
}

/// Sums entries per (mask, creditor) and compares the group 7 total with the
/// group 8 total. A creditor present on one side only is compared against zero.
/// Output is ordered by mask, then creditor.
pub fn reconcile(entries: &[LedgerEntry], tolerance: f64) -> Vec<CreditorComparison> {
    let mut totals: BTreeMap<(&str, &str), GroupTotals> = BTreeMap::new();

    for entry in entries {
        let slot = totals
            .entry((entry.mask.as_str(), entry.creditor.as_str()))
            .or_default();
        match entry.group {
            Group::Seven => slot.group7 += entry.value,
            Group::Eight => slot.group8 += entry.value,
        }
    }

    totals
        .into_iter()
        .map(|((mask, creditor), totals)| {
            let difference = totals.group7 - totals.group8;
            let status = if difference.abs() < tolerance {
                Status::Correct
            } else {
                Status::Divergent
            };

            CreditorComparison {
                mask: mask.to_string(),
                creditor: creditor.to_string(),
                group7: totals.group7,
                group8: totals.group8,
                difference,
                status,
            }
        })
        .collect()
}
