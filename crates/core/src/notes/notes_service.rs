use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::{InMemoryNoteSink, NewNote, Note, NoteServiceTrait, NoteSinkTrait};
use crate::errors::Result;
use crate::frameworks::FrameworkKey;

/// Notes service.
///
/// Every note lands in the local sink so it can be read back. With a remote
/// sink configured, the remote write happens first and a failure there fails
/// the whole operation.
pub struct NoteService {
    local: InMemoryNoteSink,
    remote: Option<Arc<dyn NoteSinkTrait>>,
}

impl NoteService {
    pub fn new(remote: Option<Arc<dyn NoteSinkTrait>>) -> Self {
        Self {
            local: InMemoryNoteSink::new(),
            remote,
        }
    }
}

#[async_trait]
impl NoteServiceTrait for NoteService {
    async fn add_note(&self, note: NewNote) -> Result<Note> {
        note.validate()?;
        match &self.remote {
            Some(remote) => {
                let stored = remote.append(note).await.map_err(|e| {
                    warn!("Remote note sink rejected note: {}", e);
                    e
                })?;
                debug!("Note {} forwarded to remote sink", stored.id);
                self.local.record(stored.clone());
                Ok(stored)
            }
            None => self.local.append(note).await,
        }
    }

    fn list_notes(&self, deal_id: &str, framework: Option<FrameworkKey>) -> Vec<Note> {
        self.local.notes_for(deal_id, framework)
    }
}
