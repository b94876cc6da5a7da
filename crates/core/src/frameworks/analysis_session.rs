//! Walk-through of the analysis frameworks for a single deal.

use super::{FrameworkConfig, FrameworkKey, FrameworkProgress, FrameworkStatus};
use crate::{errors::ValidationError, Error, Result};

/// Ordered pass over the configured frameworks. The session points at one
/// framework at a time; selecting a framework starts it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSession {
    deal_id: String,
    sequence: Vec<FrameworkKey>,
    position: usize,
    progress: FrameworkProgress,
}

impl AnalysisSession {
    pub fn new(deal_id: &str, config: &FrameworkConfig) -> Self {
        let sequence = config.ordered_keys();
        let mut progress = FrameworkProgress::new(deal_id);
        if let Some(first) = sequence.first() {
            progress.start(*first);
        }
        Self {
            deal_id: deal_id.to_string(),
            sequence,
            position: 0,
            progress,
        }
    }

    pub fn deal_id(&self) -> &str {
        &self.deal_id
    }

    pub fn sequence(&self) -> &[FrameworkKey] {
        &self.sequence
    }

    pub fn progress(&self) -> &FrameworkProgress {
        &self.progress
    }

    pub fn current(&self) -> Option<FrameworkKey> {
        self.sequence.get(self.position).copied()
    }

    /// Jumps to `key`, starting it if still pending.
    pub fn select(&mut self, key: FrameworkKey) -> Result<()> {
        let position = self
            .sequence
            .iter()
            .position(|k| *k == key)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Framework '{}' is not configured",
                    key
                )))
            })?;
        self.position = position;
        self.progress.start(key);
        Ok(())
    }

    /// Moves to the next framework that is not completed, wrapping around.
    /// Returns `None` once every framework is completed.
    pub fn advance(&mut self) -> Option<FrameworkKey> {
        let len = self.sequence.len();
        let next = (1..=len)
            .map(|offset| (self.position + offset) % len)
            .find(|&i| self.progress.status_of(self.sequence[i]) != FrameworkStatus::Completed)?;
        self.position = next;
        let key = self.sequence[next];
        self.progress.start(key);
        Some(key)
    }

    /// Completes the current framework and moves on.
    pub fn complete_current(&mut self, score: Option<u8>) -> Result<Option<FrameworkKey>> {
        let key = self.current().ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(
                "No framework is configured".to_string(),
            ))
        })?;
        self.progress.complete(key, score)?;
        Ok(self.advance())
    }

    /// Completes `key` wherever the session currently points.
    pub fn complete(&mut self, key: FrameworkKey, score: Option<u8>) -> Result<Option<FrameworkKey>> {
        self.select(key)?;
        self.complete_current(score)
    }

    pub fn is_finished(&self) -> bool {
        self.sequence
            .iter()
            .all(|k| self.progress.status_of(*k) == FrameworkStatus::Completed)
    }
}
