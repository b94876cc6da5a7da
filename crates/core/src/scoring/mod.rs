//! Scoring module - the weighted deal score and its configurable policy.

mod scoring_engine;
mod scoring_model;

pub use scoring_engine::{compute_deal_score, count_matches, score_breakdown, score_deal, score_deals};
pub use scoring_model::{
    KeywordRule, RiskRule, ScoreBreakdown, ScoredDeal, ScoringPolicy, ScoringWeights,
    TractionRule,
};
