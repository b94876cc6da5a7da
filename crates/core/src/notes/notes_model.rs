//! Analyst note models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::frameworks::FrameworkKey;
use crate::{errors::ValidationError, Error, Result};

/// Free-text note an analyst attached to one framework of a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub deal_id: String,
    pub framework: FrameworkKey,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input model for recording a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub deal_id: String,
    pub framework: FrameworkKey,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl NewNote {
    pub fn validate(&self) -> Result<()> {
        if self.deal_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "dealId".to_string(),
            )));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Note content cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Stamps the note with a fresh id and the current time. Content is
    /// trimmed; a blank author is dropped.
    pub fn into_note(self) -> Note {
        Note {
            id: Uuid::new_v4().to_string(),
            deal_id: self.deal_id,
            framework: self.framework,
            content: self.content.trim().to_string(),
            author: self.author.filter(|a| !a.trim().is_empty()),
            created_at: Utc::now(),
        }
    }
}
