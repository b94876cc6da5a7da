//! Note sink and service traits.

use async_trait::async_trait;

use super::{NewNote, Note};
use crate::errors::Result;
use crate::frameworks::FrameworkKey;

/// Destination for analyst notes. Notes are append-only.
#[async_trait]
pub trait NoteSinkTrait: Send + Sync {
    /// Records `note` and returns it as stored. Blank content is a
    /// validation error.
    async fn append(&self, note: NewNote) -> Result<Note>;
}

/// Trait defining the contract for the notes service.
#[async_trait]
pub trait NoteServiceTrait: Send + Sync {
    async fn add_note(&self, note: NewNote) -> Result<Note>;

    /// Notes of a deal in the order they were recorded, optionally limited
    /// to one framework.
    fn list_notes(&self, deal_id: &str, framework: Option<FrameworkKey>) -> Vec<Note>;
}
