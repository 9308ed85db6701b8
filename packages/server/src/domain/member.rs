//! Room members.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Identifies one WebSocket connection.
///
/// Display names are not unique, so every connection gets its own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display name must not be blank")]
pub struct InvalidDisplayName;

/// Name shown next to a member's messages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a display name. Blank (empty or whitespace-only) names are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidDisplayName> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(InvalidDisplayName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = InvalidDisplayName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A connected member of the room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: ConnectionId,
    pub name: DisplayName,
}

impl Member {
    pub fn new(id: ConnectionId, name: DisplayName) -> Self {
        Self { id, name }
    }
}
