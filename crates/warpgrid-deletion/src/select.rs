//! Ranked selection of machines to delete.

use std::cmp::Ordering;

use warpgrid_fleet::Machine;

use crate::priority::DeletePriority;

/// Pick `diff` machines to delete, highest priority first.
///
/// - `diff >= machines.len()`: every machine, in input order.
/// - `diff <= 0`: nothing.
/// - otherwise: the top `diff` by priority, ties broken by name ascending.
///
/// Each machine is scored once. The result borrows from `machines` and is
/// independent of the input order whenever names are unique.
pub fn machines_to_delete<'a, F>(
    machines: &'a [Machine],
    diff: i64,
    priority: F,
) -> Vec<&'a Machine>
where
    F: Fn(&Machine) -> DeletePriority,
{
    if diff >= machines.len() as i64 {
        return machines.iter().collect();
    }
    if diff <= 0 {
        return Vec::new();
    }

    let mut scored: Vec<(DeletePriority, &Machine)> =
        machines.iter().map(|m| (priority(m), m)).collect();
    scored.sort_by(|(pa, a), (pb, b)| compare_for_deletion(*pa, a, *pb, b));

    scored
        .into_iter()
        .take(diff as usize)
        .map(|(_, m)| m)
        .collect()
}

/// Descending by priority, then ascending by name.
fn compare_for_deletion(
    pa: DeletePriority,
    a: &Machine,
    pb: DeletePriority,
    b: &Machine,
) -> Ordering {
    pb.value()
        .total_cmp(&pa.value())
        .then_with(|| a.name.cmp(&b.name))
}
