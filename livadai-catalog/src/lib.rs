pub mod experience;
pub mod schedule;
pub mod availability;

pub use experience::{ActivityType, Experience, ExperienceStatus};
pub use schedule::{EndSource, ResolvedEnd, Schedule};
pub use availability::{participants_count, Availability, AvailabilityError, ListingStatus};
