use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking lifecycle states.
///
/// Statuses arrive as free-form strings; anything unrecognized lands in
/// `Unknown` and is treated as neither actionable, historical nor disputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    /// Created, payment in progress.
    Pending,
    Paid,
    /// Free experiences settle a refundable deposit instead of a price.
    DepositPaid,
    /// Experience started, waiting for the host to confirm.
    PendingAttendance,
    Completed,
    /// Completed by the system after the host's grace period.
    AutoCompleted,
    NoShow,
    Cancelled,
    Disputed,
    DisputeWon,
    DisputeLost,
    Refunded,
    Unknown(String),
}

impl BookingStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => BookingStatus::Pending,
            "PAID" => BookingStatus::Paid,
            "DEPOSIT_PAID" => BookingStatus::DepositPaid,
            "PENDING_ATTENDANCE" => BookingStatus::PendingAttendance,
            "COMPLETED" => BookingStatus::Completed,
            "AUTO_COMPLETED" => BookingStatus::AutoCompleted,
            "NO_SHOW" => BookingStatus::NoShow,
            "CANCELLED" => BookingStatus::Cancelled,
            "DISPUTED" => BookingStatus::Disputed,
            "DISPUTE_WON" => BookingStatus::DisputeWon,
            "DISPUTE_LOST" => BookingStatus::DisputeLost,
            "REFUNDED" => BookingStatus::Refunded,
            _ => {
                tracing::debug!(status = raw, "unrecognized booking status");
                BookingStatus::Unknown(raw.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Paid => "PAID",
            BookingStatus::DepositPaid => "DEPOSIT_PAID",
            BookingStatus::PendingAttendance => "PENDING_ATTENDANCE",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::AutoCompleted => "AUTO_COMPLETED",
            BookingStatus::NoShow => "NO_SHOW",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Disputed => "DISPUTED",
            BookingStatus::DisputeWon => "DISPUTE_WON",
            BookingStatus::DisputeLost => "DISPUTE_LOST",
            BookingStatus::Refunded => "REFUNDED",
            BookingStatus::Unknown(raw) => raw,
        }
    }

    /// Host may confirm, cancel or mark no-show.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            BookingStatus::Paid | BookingStatus::DepositPaid | BookingStatus::PendingAttendance
        )
    }

    /// Shown in "past"/"history" views.
    pub fn is_historical(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed
                | BookingStatus::AutoCompleted
                | BookingStatus::Cancelled
                | BookingStatus::Refunded
        )
    }

    pub fn is_disputed(&self) -> bool {
        matches!(
            self,
            BookingStatus::Disputed | BookingStatus::DisputeWon | BookingStatus::DisputeLost
        )
    }

    /// `AUTO_COMPLETED` counts as `COMPLETED` everywhere downstream.
    pub fn is_completed(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::AutoCompleted)
    }

    /// Seats given back to the experience.
    pub fn is_released(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Refunded)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Refunded | BookingStatus::DisputeWon)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BookingStatus::Unknown(_))
    }

    /// Chat opens once payment settles and stays open through completion.
    pub fn allows_chat(&self) -> bool {
        matches!(self, BookingStatus::Paid | BookingStatus::DepositPaid) || self.is_completed()
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        BookingStatus::parse(&raw)
    }
}

impl From<&str> for BookingStatus {
    fn from(raw: &str) -> Self {
        BookingStatus::parse(raw)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [&str; 12] = [
        "PENDING",
        "PAID",
        "DEPOSIT_PAID",
        "PENDING_ATTENDANCE",
        "COMPLETED",
        "AUTO_COMPLETED",
        "NO_SHOW",
        "CANCELLED",
        "DISPUTED",
        "DISPUTE_WON",
        "DISPUTE_LOST",
        "REFUNDED",
    ];

    #[test]
    fn test_known_statuses_parse() {
        for raw in KNOWN {
            let status = BookingStatus::parse(raw);
            assert!(!status.is_unknown(), "{raw} should be known");
            assert_eq!(status.as_str(), raw);
        }
        assert_eq!(BookingStatus::parse(" paid "), BookingStatus::Paid);
    }

    #[test]
    fn test_classification_sets() {
        let matching = |pred: fn(&BookingStatus) -> bool| -> Vec<&&'static str> {
            KNOWN.iter().filter(|s| pred(&BookingStatus::parse(s))).collect()
        };

        let actionable = matching(BookingStatus::is_actionable);
        assert_eq!(actionable, [&"PAID", &"DEPOSIT_PAID", &"PENDING_ATTENDANCE"]);

        let historical = matching(BookingStatus::is_historical);
        assert_eq!(historical, [&"COMPLETED", &"AUTO_COMPLETED", &"CANCELLED", &"REFUNDED"]);

        let disputed = matching(BookingStatus::is_disputed);
        assert_eq!(disputed, [&"DISPUTED", &"DISPUTE_WON", &"DISPUTE_LOST"]);
    }

    #[test]
    fn test_unknown_status_is_inert() {
        let status = BookingStatus::parse("ON_HOLD");
        assert_eq!(status, BookingStatus::Unknown("ON_HOLD".to_string()));
        assert!(!status.is_actionable());
        assert!(!status.is_historical());
        assert!(!status.is_disputed());
        assert!(!status.is_completed());
        assert!(!status.allows_chat());
        assert_eq!(status.to_string(), "ON_HOLD");

        assert!(BookingStatus::parse("").is_unknown());
    }

    #[test]
    fn test_chat_statuses() {
        for raw in ["PAID", "DEPOSIT_PAID", "COMPLETED", "AUTO_COMPLETED"] {
            assert!(BookingStatus::parse(raw).allows_chat(), "{raw}");
        }
        let no_chat =
            ["PENDING", "PENDING_ATTENDANCE", "NO_SHOW", "CANCELLED", "REFUNDED", "DISPUTED"];
        for raw in no_chat {
            assert!(!BookingStatus::parse(raw).allows_chat(), "{raw}");
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let encoded = serde_json::to_string(&BookingStatus::DepositPaid).unwrap();
        assert_eq!(encoded, r#""DEPOSIT_PAID""#);
        let status: BookingStatus = serde_json::from_str(r#""no_show""#).unwrap();
        assert_eq!(status, BookingStatus::NoShow);
        let unknown: BookingStatus = serde_json::from_str(r#""WAITLIST""#).unwrap();
        assert_eq!(unknown, BookingStatus::Unknown("WAITLIST".to_string()));
    }
}
