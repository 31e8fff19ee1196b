use livadai_shared::ExperienceRecord;
use serde::{Deserialize, Serialize};
use crate::schedule::Schedule;

/// How many people an experience takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// Exactly one seat, ever.
    Individual,
    /// Bounded by `maxParticipants`.
    Group,
}

impl ActivityType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INDIVIDUAL" => Some(ActivityType::Individual),
            "GROUP" => Some(ActivityType::Group),
            _ => None,
        }
    }
}

/// Listing status set by the host or by moderation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceStatus {
    Active,
    Cancelled,
    /// Paused by the host.
    Disabled,
    Unknown(String),
}

impl ExperienceStatus {
    /// Missing status means active; the API only sends one when it changes.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return ExperienceStatus::Active;
        };
        match raw.to_ascii_uppercase().as_str() {
            "ACTIVE" => ExperienceStatus::Active,
            "CANCELLED" | "CANCELED" => ExperienceStatus::Cancelled,
            "DISABLED" => ExperienceStatus::Disabled,
            _ => {
                tracing::debug!(status = raw, "unrecognized experience status");
                ExperienceStatus::Unknown(raw.to_string())
            }
        }
    }
}

/// Domain view of an experience snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: Option<String>,
    pub title: Option<String>,
    pub host_id: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub status: ExperienceStatus,
    pub is_active: Option<bool>,
    pub sold_out: bool,
    pub max_participants: Option<i64>,
    pub remaining_spots: Option<i64>,
    pub available_spots: Option<i64>,
    pub booked_spots: Option<i64>,
    pub schedule: Schedule,
}

impl Experience {
    pub fn from_record(record: &ExperienceRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            host_id: record.host_id().map(str::to_string),
            activity_type: record.activity_type.as_deref().and_then(ActivityType::parse),
            status: ExperienceStatus::parse(record.status.as_deref()),
            is_active: record.is_active,
            sold_out: record.sold_out.unwrap_or(false),
            max_participants: record.max_participants,
            remaining_spots: record.remaining_spots,
            available_spots: record.available_spots,
            booked_spots: record.booked_spots,
            schedule: Schedule::from_record(record),
        }
    }

    /// Effective seat capacity: one for individual experiences, otherwise
    /// `maxParticipants` when the snapshot carries a usable number.
    pub fn capacity(&self) -> Option<u32> {
        if self.activity_type == Some(ActivityType::Individual) {
            return Some(1);
        }
        self.max_participants.and_then(|max| u32::try_from(max).ok())
    }

    pub fn is_group(&self) -> bool {
        self.activity_type == Some(ActivityType::Group)
    }
}

impl From<&ExperienceRecord> for Experience {
    fn from(record: &ExperienceRecord) -> Self {
        Self::from_record(record)
    }
}
