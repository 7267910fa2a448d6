//! Project identifiers
//!
//! ID Format: `p-{7-char-hash}` (e.g., `p-7f2b4c1`)
//!
//! Hash is derived from title + creation timestamp + a per-store sequence
//! number. The store re-derives with a bumped sequence on collision, so IDs
//! are unique within one store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid project ID format: expected 'p-{{7-char-hash}}', got '{0}'")]
    InvalidProjectId(String),
}

/// Generates a 7-character hash from title, timestamp and sequence
fn generate_hash(title: &str, timestamp: DateTime<Utc>, sequence: u64) -> String {
    let input = format!(
        "{}{}{}",
        title,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        sequence
    );
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Project ID in the format `p-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId {
    hash: String,
}

impl ProjectId {
    /// Creates a new project ID from title, timestamp and sequence number
    pub fn new(title: &str, timestamp: DateTime<Utc>, sequence: u64) -> Self {
        Self {
            hash: generate_hash(title, timestamp, sequence),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p-{}", self.hash)
    }
}

impl FromStr for ProjectId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(hash) = s.strip_prefix("p-") else {
            return Err(IdError::InvalidProjectId(s.to_string()));
        };

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidProjectId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for ProjectId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn project_id_format() {
        let id = ProjectId::new("Website relaunch", fixed_time(), 0);
        let s = id.to_string();
        assert!(s.starts_with("p-"));
        assert_eq!(s.len(), 9);
        assert_eq!(id.hash().len(), 7);
    }

    #[test]
    fn project_id_is_deterministic() {
        let a = ProjectId::new("Same", fixed_time(), 3);
        let b = ProjectId::new("Same", fixed_time(), 3);
        assert_eq!(a, b);
    }

    #[test]
    fn sequence_changes_hash() {
        let a = ProjectId::new("Same", fixed_time(), 0);
        let b = ProjectId::new("Same", fixed_time(), 1);
        assert_ne!(a, b);
    }

    #[test]
    fn parse_valid_id() {
        let id: ProjectId = "p-7f2b4c1".parse().unwrap();
        assert_eq!(id.hash(), "7f2b4c1");
        assert_eq!(id.to_string(), "p-7f2b4c1");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: ProjectId = "  p-abcdef0 \n".parse().unwrap();
        assert_eq!(id.to_string(), "p-abcdef0");
    }

    #[test]
    fn parse_rejects_bad_prefix() {
        assert_eq!(
            "t-7f2b4c1".parse::<ProjectId>(),
            Err(IdError::InvalidProjectId("t-7f2b4c1".to_string()))
        );
    }

    #[test]
    fn parse_rejects_bad_hash() {
        assert!("p-123".parse::<ProjectId>().is_err());
        assert!("p-zzzzzzz".parse::<ProjectId>().is_err());
        assert!("p-12345678".parse::<ProjectId>().is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let id: ProjectId = "p-0123abc".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-0123abc\"");

        let back: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn serde_rejects_invalid_string() {
        assert!(serde_json::from_str::<ProjectId>("\"nope\"").is_err());
    }
}
