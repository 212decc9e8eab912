//! New-item detection: the set difference between the fetched feed and the
//! persisted seen-set, plus the pruning step that keeps that set bounded.

use crate::data::{Alert, AlertId};
use std::collections::HashSet;

/// Return the alerts of `current` whose id is not in `seen`, preserving
/// fetch order.
///
/// Ids are assumed unique within one fetch (upstream contract); if the feed
/// ever repeated an id, each copy would be reported independently.
pub fn find_new(current: &[Alert], seen: &HashSet<AlertId>) -> Vec<Alert> {
    current
        .iter()
        .filter(|alert| !seen.contains(&alert.id))
        .cloned()
        .collect()
}

/// Drop seen ids whose alert has fallen out of the feed's current window.
///
/// This bounds the persisted set by the window size: an id leaves tracking
/// once its pass has occurred or expired upstream.
pub fn prune(seen: &HashSet<AlertId>, current: &[Alert]) -> HashSet<AlertId> {
    let current_ids: HashSet<&AlertId> = current.iter().map(|a| &a.id).collect();

    seen.iter()
        .filter(|id| current_ids.contains(id))
        .cloned()
        .collect()
}
