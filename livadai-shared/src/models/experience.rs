use serde::{Deserialize, Serialize};
use super::lenient::{lenient, lenient_f64, lenient_i64};
use super::{first_present, PartyRef};

/// Experience snapshot as embedded in booking payloads or listed on its own.
///
/// Aliased date fields (`startsAt`/`startDate`, `endsAt`/`endDate`) are kept
/// side by side because the API sometimes sends both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub host: Option<PartyRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub owner: Option<PartyRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub sold_out: Option<bool>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub max_participants: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub remaining_spots: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub available_spots: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub booked_spots: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub starts_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ends_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration_minutes: Option<f64>,
}

impl ExperienceRecord {
    pub fn start_raw(&self) -> Option<&str> {
        first_present(&[&self.starts_at, &self.start_date])
    }

    pub fn end_raw(&self) -> Option<&str> {
        first_present(&[&self.ends_at, &self.end_date])
    }

    pub fn host_id(&self) -> Option<&str> {
        self.host.as_ref().or(self.owner.as_ref()).map(PartyRef::id)
    }
}

/// A booking's `experience` field: populated snapshot or bare id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceRef {
    Id(String),
    Embedded(Box<ExperienceRecord>),
}

impl ExperienceRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            ExperienceRef::Id(id) => Some(id),
            ExperienceRef::Embedded(record) => record.id.as_deref(),
        }
    }

    pub fn record(&self) -> Option<&ExperienceRecord> {
        match self {
            ExperienceRef::Id(_) => None,
            ExperienceRef::Embedded(record) => Some(record),
        }
    }
}
