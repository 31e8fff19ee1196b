use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::CoreError;

/// Marketplace roles that can act on a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Explorer,
    Host,
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXPLORER" => Ok(Role::Explorer),
            "HOST" => Ok(Role::Host),
            _ => Err(CoreError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Explorer => write!(f, "EXPLORER"),
            Role::Host => write!(f, "HOST"),
        }
    }
}

/// The authenticated user asking about a booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), role }
    }

    pub fn host(id: impl Into<String>) -> Self {
        Self::new(id, Role::Host)
    }

    pub fn explorer(id: impl Into<String>) -> Self {
        Self::new(id, Role::Explorer)
    }

    /// True when this actor is the host identified by `host_id`.
    /// An unknown host never matches.
    pub fn is_host_of(&self, host_id: Option<&str>) -> bool {
        self.role == Role::Host && host_id.is_some_and(|id| id == self.id)
    }

    /// True when this actor made the booking, whatever role they currently hold.
    pub fn is_explorer_of(&self, explorer_id: Option<&str>) -> bool {
        explorer_id.is_some_and(|id| !id.is_empty() && id == self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("HOST".parse::<Role>().unwrap(), Role::Host);
        assert_eq!(" explorer ".parse::<Role>().unwrap(), Role::Explorer);
        assert!(matches!("ADMIN".parse::<Role>(), Err(CoreError::UnknownRole(_))));
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Host).unwrap(), r#""HOST""#);
        let role: Role = serde_json::from_str(r#""EXPLORER""#).unwrap();
        assert_eq!(role, Role::Explorer);
    }

    #[test]
    fn test_host_match_requires_role_and_id() {
        let host = Actor::host("h-1");
        assert!(host.is_host_of(Some("h-1")));
        assert!(!host.is_host_of(Some("h-2")));
        assert!(!host.is_host_of(None));

        let explorer = Actor::explorer("h-1");
        assert!(!explorer.is_host_of(Some("h-1")));
    }

    #[test]
    fn test_explorer_match_is_by_id() {
        let actor = Actor::host("x-1");
        assert!(actor.is_explorer_of(Some("x-1")));
        assert!(!actor.is_explorer_of(Some("x-2")));
        assert!(!actor.is_explorer_of(None));
        assert!(!Actor::explorer("").is_explorer_of(Some("")));
    }
}
