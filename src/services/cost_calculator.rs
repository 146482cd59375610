//! Aggregate cost of subscriptions over a window of calendar months.
//!
//! Billing is per whole month: a subscription active in any part of a month
//! pays its full monthly price for that month. Ranges are inclusive on both
//! ends and a missing end period means the subscription never ends.

use crate::models::{Period, Subscription, SubscriptionFilter};

/// Number of months in the window `[start, end]` during which `subscription` is
/// active. Zero when the ranges do not intersect, including reversed windows.
pub fn overlap_months(subscription: &Subscription, start: Period, end: Period) -> i64 {
    if subscription.start_period > end {
        return 0;
    }

    let effective_start = subscription.start_period.max(start);
    let effective_end = match subscription.end_period {
        Some(sub_end) => sub_end.min(end),
        None => end,
    };

    (effective_end.ordinal() - effective_start.ordinal() + 1).max(0)
}

/// Sum of `price * overlap_months` for every record that matches `filter`.
/// Saturates at `i64::MAX` instead of overflowing.
pub fn calculate_total_cost(
    records: &[Subscription],
    start: Period,
    end: Period,
    filter: &SubscriptionFilter,
) -> i64 {
    records
        .iter()
        .filter(|s| filter.matches(s))
        .map(|s| s.price.saturating_mul(overlap_months(s, start, end)))
        .fold(0i64, i64::saturating_add)
}
