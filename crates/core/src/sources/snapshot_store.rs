//! Last-write-wins record store shared by the deal and portfolio services.

use chrono::Utc;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::{DataOrigin, RefreshOutcome, SnapshotInfo};

struct Snapshot<T> {
    records: Arc<Vec<T>>,
    info: SnapshotInfo,
}

/// Holds the current record list and discards results of superseded fetches.
///
/// Every refresh takes a ticket with [`SnapshotStore::begin`] before it
/// starts fetching. A result is committed only if no ticket issued later has
/// been committed in the meantime, so a slow response can never overwrite a
/// newer one. Each committed list fully replaces the previous one.
pub struct SnapshotStore<T> {
    current: RwLock<Snapshot<T>>,
    next_ticket: AtomicU64,
}

impl<T: Clone> SnapshotStore<T> {
    /// Creates a store seeded with `records`. The seed carries ticket 0.
    pub fn new(records: Vec<T>, origin: DataOrigin) -> Self {
        let count = records.len();
        Self {
            current: RwLock::new(Snapshot {
                records: Arc::new(records),
                info: SnapshotInfo {
                    origin,
                    count,
                    ticket: 0,
                    refreshed_at: None,
                },
            }),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Issues the ticket for a new refresh.
    pub fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commits the result of the refresh holding `ticket`.
    pub fn commit(&self, ticket: u64, records: Vec<T>, origin: DataOrigin) -> RefreshOutcome {
        self.commit_with(ticket, records, origin, |_| {})
    }

    /// Like [`SnapshotStore::commit`], but runs `prepare` on the new list
    /// under the write lock, right before it replaces the current one.
    /// `prepare` is skipped for stale results.
    pub fn commit_with<F>(
        &self,
        ticket: u64,
        mut records: Vec<T>,
        origin: DataOrigin,
        prepare: F,
    ) -> RefreshOutcome
    where
        F: FnOnce(&mut [T]),
    {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if ticket <= current.info.ticket {
            debug!(
                "Discarding stale refresh result (ticket {}, committed {})",
                ticket, current.info.ticket
            );
            return RefreshOutcome::Stale { ticket };
        }
        prepare(&mut records);
        let count = records.len();
        current.records = Arc::new(records);
        current.info = SnapshotInfo {
            origin,
            count,
            ticket,
            refreshed_at: Some(Utc::now()),
        };
        RefreshOutcome::Applied { origin, count }
    }

    /// The current list. Cheap: the list is shared, not copied.
    pub fn records(&self) -> Arc<Vec<T>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    pub fn info(&self) -> SnapshotInfo {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .info
            .clone()
    }

    /// Applies a local edit to the first record matching `predicate` and
    /// returns the edited record. The ticket and origin are left untouched.
    pub fn update_where<P, F>(&self, predicate: P, edit: F) -> Option<T>
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let records = Arc::make_mut(&mut current.records);
        let record = records.iter_mut().find(|r| predicate(r))?;
        edit(record);
        Some(record.clone())
    }
}
