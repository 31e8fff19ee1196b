use chrono::{DateTime, Utc};
use livadai_catalog::Experience;
use livadai_core::{Actor, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::models::Booking;
use crate::seats::{rollup_status, SeatCounting, SeatSummary};
use crate::status::BookingStatus;
use crate::windows::WindowPolicy;

/// Bookings split into the "upcoming" and "history" tabs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub upcoming: Vec<Booking>,
    pub history: Vec<Booking>,
}

impl Timeline {
    /// Explorers only see their own bookings; hosts see everything handed in.
    pub fn partition(
        bookings: impl IntoIterator<Item = Booking>,
        actor: &Actor,
        policy: &WindowPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        let mut timeline = Timeline::default();

        for booking in bookings {
            if actor.role == Role::Explorer
                && !actor.is_explorer_of(booking.explorer_id.as_deref())
            {
                continue;
            }

            if is_history(&booking, policy, now) {
                timeline.history.push(booking);
            } else {
                timeline.upcoming.push(booking);
            }
        }

        timeline
    }
}

/// Completed bookings stay "upcoming" until their review window is about to
/// open, so they only move to history strictly after `end + delay`. Without a
/// computable end there is nothing to wait for.
pub fn is_history(booking: &Booking, policy: &WindowPolicy, now: DateTime<Utc>) -> bool {
    if !booking.status.is_historical() {
        return false;
    }
    if !booking.status.is_completed() {
        return true;
    }
    policy
        .history_visible_after(&booking.schedule())
        .map_or(true, |visible_after| now > visible_after)
}

/// All bookings of one experience, as the host dashboard shows them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceGroup {
    pub experience_id: String,
    pub experience: Option<Experience>,
    pub starts_at: Option<DateTime<Utc>>,
    pub seats: SeatSummary,
    pub status: BookingStatus,
    pub bookings: Vec<Booking>,
}

pub const UNKNOWN_EXPERIENCE: &str = "unknown";

/// Groups bookings per experience, newest experience first.
///
/// Only an embedded experience snapshot names a group; bookings carrying a
/// bare experience id (or none) land in the `"unknown"` group. Groups without
/// any date sort last; ties keep first-seen order.
pub fn group_by_experience(
    bookings: Vec<Booking>,
    counting: SeatCounting,
) -> Vec<ExperienceGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<Booking>)> = Vec::new();

    for booking in bookings {
        let key = booking
            .experience
            .as_ref()
            .and_then(|exp| exp.id.clone())
            .unwrap_or_else(|| UNKNOWN_EXPERIENCE.to_string());

        match index.get(&key) {
            Some(&slot) => buckets[slot].1.push(booking),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![booking]));
            }
        }
    }

    let mut groups: Vec<ExperienceGroup> = buckets
        .into_iter()
        .map(|(experience_id, bookings)| {
            let experience = bookings.iter().find_map(|b| b.experience.clone());
            let starts_at = experience.as_ref().and_then(|exp| {
                exp.schedule.effective_start().or(exp.schedule.ends_at)
            });
            ExperienceGroup {
                seats: SeatSummary::compute(experience.as_ref(), &bookings, counting),
                status: rollup_status(&bookings),
                experience_id,
                experience,
                starts_at,
                bookings,
            }
        })
        .collect();

    groups.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
    groups
}
