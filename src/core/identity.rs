//! Artifact identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Artifact type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArtifactPrefix {
    /// Form schema document
    Form,
    /// Submitted response record
    Resp,
}

impl ArtifactPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactPrefix::Form => "FORM",
            ArtifactPrefix::Resp => "RESP",
        }
    }
}

impl fmt::Display for ArtifactPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArtifactPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FORM" => Ok(ArtifactPrefix::Form),
            "RESP" => Ok(ArtifactPrefix::Resp),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique artifact identifier combining a type prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId {
    prefix: ArtifactPrefix,
    ulid: Ulid,
}

impl ArtifactId {
    /// Create a new ArtifactId with the given prefix
    pub fn new(prefix: ArtifactPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Get the artifact prefix
    pub fn prefix(&self) -> ArtifactPrefix {
        self.prefix
    }

    /// Parse an ArtifactId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for ArtifactId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for ArtifactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ArtifactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing artifact IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid artifact prefix: '{0}' (valid: FORM, RESP)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in artifact ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_id_generation() {
        let id = ArtifactId::new(ArtifactPrefix::Form);
        assert!(id.to_string().starts_with("FORM-"));
        assert_eq!(id.to_string().len(), 31); // FORM- (5) + ULID (26) = 31
    }

    #[test]
    fn test_artifact_id_parsing() {
        let original = ArtifactId::new(ArtifactPrefix::Form);
        let id_str = original.to_string();
        let parsed = ArtifactId::parse(&id_str).unwrap();
        assert_eq!(parsed.prefix(), ArtifactPrefix::Form);
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_artifact_id_roundtrip() {
        let original = ArtifactId::new(ArtifactPrefix::Resp);
        let serialized = original.to_string();
        let parsed = ArtifactId::parse(&serialized).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_artifact_id_invalid_prefix() {
        let err = ArtifactId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_artifact_id_missing_delimiter() {
        let err = ArtifactId::parse("FORM01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_artifact_id_invalid_ulid() {
        let err = ArtifactId::parse("FORM-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_serde_as_string() {
        let id = ArtifactId::new(ArtifactPrefix::Form);
        let yaml = serde_yml::to_string(&id).unwrap();
        assert!(yaml.trim().contains(&id.to_string()));
        let back: ArtifactId = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(id, back);
    }
}
