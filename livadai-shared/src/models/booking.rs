use serde::{Deserialize, Serialize};
use super::lenient::{lenient, lenient_i64};
use super::{ExperienceRecord, ExperienceRef, PartyRef};

/// Booking snapshot as returned by `/bookings/me`, `/bookings/host` and friends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// `None` when missing, null or not a string.
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub explorer: Option<PartyRef>,
    /// Older payloads name the explorer `user`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user: Option<PartyRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub host: Option<PartyRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub experience: Option<ExperienceRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
}

impl BookingRecord {
    pub fn explorer_id(&self) -> Option<&str> {
        self.explorer.as_ref().or(self.user.as_ref()).map(PartyRef::id)
    }

    /// The booking's own host reference, else the experience owner.
    pub fn host_id(&self) -> Option<&str> {
        self.host
            .as_ref()
            .map(PartyRef::id)
            .or_else(|| self.experience_record().and_then(ExperienceRecord::host_id))
    }

    pub fn experience_record(&self) -> Option<&ExperienceRecord> {
        self.experience.as_ref().and_then(ExperienceRef::record)
    }

    pub fn experience_id(&self) -> Option<&str> {
        self.experience.as_ref().and_then(ExperienceRef::id)
    }
}
