//! In-process note sink.

use async_trait::async_trait;
use log::debug;
use std::sync::{PoisonError, RwLock};

use super::{NewNote, Note, NoteSinkTrait};
use crate::errors::Result;
use crate::frameworks::FrameworkKey;

/// Keeps notes in memory, in append order.
#[derive(Default)]
pub struct InMemoryNoteSink {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a note that was already stamped elsewhere.
    pub fn record(&self, note: Note) {
        self.notes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(note);
    }

    pub fn notes_for(&self, deal_id: &str, framework: Option<FrameworkKey>) -> Vec<Note> {
        self.notes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.deal_id == deal_id)
            .filter(|n| framework.map_or(true, |f| n.framework == f))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NoteSinkTrait for InMemoryNoteSink {
    async fn append(&self, note: NewNote) -> Result<Note> {
        note.validate()?;
        let note = note.into_note();
        debug!("Recorded note {} for deal '{}'", note.id, note.deal_id);
        self.record(note.clone());
        Ok(note)
    }
}
