use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interaction::InteractionState;
use crate::types::Article;
use crate::{Error, Result};

/// Newest record layout this build understands.
pub const RECORD_VERSION: u32 = 1;

fn legacy_version() -> u32 {
    1
}

/// The value persisted per article: its interaction state plus the article itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Records written before versioning carry no version and read as 1.
    #[serde(default = "legacy_version")]
    pub schema_version: u32,
    #[serde(flatten)]
    pub state: InteractionState,
    #[serde(default)]
    pub article_data: Option<Article>,
}

impl StoredRecord {
    pub fn new(state: InteractionState, article_data: Option<Article>) -> Self {
        Self {
            schema_version: RECORD_VERSION,
            state,
            article_data,
        }
    }

    /// Parses a stored value. Callers decide whether a failure means "default".
    pub fn parse(raw: &str) -> Result<Self> {
        let record: StoredRecord = serde_json::from_str(raw)?;
        if record.schema_version > RECORD_VERSION {
            warn!(
                found = record.schema_version,
                supported = RECORD_VERSION,
                "Record written by a newer version"
            );
            return Err(Error::UnsupportedRecordVersion {
                found: record.schema_version,
                supported: RECORD_VERSION,
            });
        }
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
