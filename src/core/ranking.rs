use std::cmp::Ordering;

use crate::models::RankedPilotRecord;

/// Composite ranking key: experience descending, then distance ascending
#[inline]
pub fn rank_order(a: &RankedPilotRecord, b: &RankedPilotRecord) -> Ordering {
    b.pilot
        .experience
        .cmp(&a.pilot.experience)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// Sort in place by `rank_order` and keep the first `limit` entries
///
/// The sort is stable, so fully tied records keep their input order.
pub fn rank_and_truncate(records: &mut Vec<RankedPilotRecord>, limit: usize) {
    records.sort_by(rank_order);
    records.truncate(limit);
}
