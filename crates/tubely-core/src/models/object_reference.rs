use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Location of a stored object, persisted on a video record as the token `bucket,key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectReference {
    pub bucket: String,
    pub key: String,
}

impl ObjectReference {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        ObjectReference {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse a `bucket,key` token. Exactly two non-empty components are required.
    pub fn parse(token: &str) -> Result<Self, AppError> {
        let parts: Vec<&str> = token.split(',').collect();
        match parts.as_slice() {
            [bucket, key] if !bucket.is_empty() && !key.is_empty() => {
                Ok(ObjectReference::new(*bucket, *key))
            }
            _ => Err(AppError::MalformedReference(format!(
                "expected 'bucket,key', got {} component(s)",
                parts.len()
            ))),
        }
    }

    pub fn to_token(&self) -> String {
        format!("{},{}", self.bucket, self.key)
    }
}

impl FromStr for ObjectReference {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectReference::parse(s)
    }
}

impl Display for ObjectReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{},{}", self.bucket, self.key)
    }
}
