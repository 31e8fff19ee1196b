//! Wire records for the JSON snapshots returned by the marketplace REST API.
//!
//! These types are deliberately loose: every field the upstream API may omit is
//! optional, and values that carry domain meaning (statuses, instants) are kept
//! as raw strings so that interpretation happens in the domain crates.

pub mod models;

pub use models::{BookingRecord, ExperienceRecord, ExperienceRef, PartyRef};
