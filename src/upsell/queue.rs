use super::model::{UpsellDefinition, UpsellSettings};
use itertools::Itertools;
use std::cmp::Reverse;
use uuid::Uuid;

/// Picks the upsells to show after a purchase of `purchased`.
///
/// Keeps active upsells whose trigger matches, highest `priority` first
/// (stable among equals), capped at `max_upsells_per_order`. Upsells with a
/// missing product are kept; the flow skips them when it reaches them.
pub fn resolve_queue(
    upsells: &[UpsellDefinition],
    settings: &UpsellSettings,
    purchased: &[Uuid],
) -> Vec<UpsellDefinition> {
    if !settings.is_active {
        tracing::debug!("upsells disabled for store");
        return Vec::new();
    }

    let queue: Vec<UpsellDefinition> = upsells
        .iter()
        .filter(|u| u.is_active && u.is_triggered_by(purchased))
        .sorted_by_key(|u| Reverse(u.priority))
        .take(settings.max_upsells_per_order)
        .cloned()
        .collect();

    tracing::debug!(
        candidates = upsells.len(),
        queued = queue.len(),
        "resolved upsell queue"
    );
    queue
}
