pub mod booking;
pub mod experience;
pub mod lenient;
pub mod party;

pub use booking::BookingRecord;
pub use experience::{ExperienceRecord, ExperienceRef};
pub use party::PartyRef;

/// Picks the first present, non-blank value among aliased fields
/// (`startsAt` before `startDate`, and so on).
pub(crate) fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
}
