//! Small parsing helpers shared by the pipeline and the aggregator.

pub mod money;
pub mod text;

pub use money::parse_amount;
pub use text::{contains_ignore_case, normalize_status};
