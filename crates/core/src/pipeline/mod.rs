//! Pipeline module - search, status filter and sort over deal listings.

mod filter_sort;
mod pipeline_model;

pub use filter_sort::{apply_query, filter_and_sort, filter_and_sort_scored, PipelineRecord};
pub use pipeline_model::{DealQuery, SortKey, StatusFilter};
