//! Filter/sort chain behind the deal pipeline table.

use std::cmp::Reverse;

use super::{DealQuery, SortKey};
use crate::deals::DealRecord;
use crate::scoring::ScoredDeal;
use crate::utils::contains_ignore_case;

/// Anything the pipeline can filter and sort.
pub trait PipelineRecord: Clone {
    fn deal(&self) -> &DealRecord;

    /// Score used by [`SortKey::Score`]; unscored records sort as zero.
    fn score(&self) -> Option<u8> {
        None
    }
}

impl PipelineRecord for DealRecord {
    fn deal(&self) -> &DealRecord {
        self
    }
}

impl PipelineRecord for ScoredDeal {
    fn deal(&self) -> &DealRecord {
        &self.deal
    }

    fn score(&self) -> Option<u8> {
        Some(self.deal_score)
    }
}

fn matches_search(deal: &DealRecord, needle: &str) -> bool {
    needle.is_empty()
        || contains_ignore_case(&deal.company_name, needle)
        || contains_ignore_case(&deal.sector, needle)
        || deal
            .founder_name
            .as_deref()
            .is_some_and(|founder| contains_ignore_case(founder, needle))
}

/// Applies text search, status filter and sort, in that order, returning a
/// new list. All sorts are stable, so ties keep their listing order and the
/// chain is idempotent.
pub fn apply_query<T: PipelineRecord>(records: &[T], query: &DealQuery) -> Vec<T> {
    let needle = query.search_text.trim().to_lowercase();
    let mut selected: Vec<T> = records
        .iter()
        .filter(|r| matches_search(r.deal(), &needle))
        .filter(|r| query.status_filter.matches(&r.deal().status))
        .cloned()
        .collect();

    match query.sort_key {
        SortKey::Company => {
            selected.sort_by(|a, b| a.deal().company_name.cmp(&b.deal().company_name))
        }
        SortKey::UploadDate => selected.sort_by_key(|r| Reverse(r.deal().upload_date)),
        SortKey::Amount => selected.sort_by_cached_key(|r| Reverse(r.deal().ask_value())),
        SortKey::Score => selected.sort_by_key(|r| Reverse(r.score().unwrap_or(0))),
        SortKey::Unsorted => {}
    }
    selected
}

/// Pipeline over raw deal records.
pub fn filter_and_sort(records: &[DealRecord], query: &DealQuery) -> Vec<DealRecord> {
    apply_query(records, query)
}

/// Pipeline over scored deals, enabling the score sort.
pub fn filter_and_sort_scored(records: &[ScoredDeal], query: &DealQuery) -> Vec<ScoredDeal> {
    apply_query(records, query)
}
