//! Deal score computation.
//!
//! Everything here is pure: scores depend only on the deal and the policy,
//! so they can be recomputed at any time from any thread.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::{KeywordRule, RiskRule, ScoreBreakdown, ScoredDeal, ScoringPolicy, TractionRule};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_SCORE};
use crate::deals::{DealRecord, Financials};

/// Number of highlights containing at least one of `keywords`
/// (case-insensitive substring match).
pub fn count_matches(highlights: &[String], keywords: &[String]) -> usize {
    let keywords: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .collect();
    highlights
        .iter()
        .filter(|highlight| {
            let highlight = highlight.to_lowercase();
            keywords.iter().any(|k| highlight.contains(k.as_str()))
        })
        .count()
}

fn clamp_score(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(Decimal::from(MAX_SCORE))
}

fn keyword_sub_score(highlights: &[String], rule: &KeywordRule) -> Decimal {
    let matches = Decimal::from(count_matches(highlights, &rule.keywords));
    clamp_score(rule.base + rule.per_match * matches)
}

fn traction_sub_score(financials: Option<&Financials>, rule: &TractionRule) -> Decimal {
    let (growth, revenue) = financials
        .map(|f| (f.growth_percent, f.revenue))
        .unwrap_or((0.0, 0.0));
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let ratio = |value: f64, divisor: Decimal| {
        divisor
            .to_f64()
            .filter(|d| *d > 0.0)
            .map(|d| value / d)
            .unwrap_or(0.0)
    };

    // Bounded in f64 first so huge revenues cannot overflow the conversion
    let raw = ratio(finite(growth), rule.growth_divisor) + ratio(finite(revenue), rule.revenue_divisor);
    let bounded = if raw.is_finite() {
        raw.clamp(0.0, f64::from(MAX_SCORE))
    } else {
        0.0
    };
    Decimal::from_f64(bounded).unwrap_or(Decimal::ZERO)
}

fn risk_sub_score(risk_factors: &[String], rule: &RiskRule) -> Decimal {
    let factors = Decimal::from(risk_factors.len());
    clamp_score(rule.base - rule.penalty_per_factor * factors)
}

/// Computes the four sub-scores and the weighted total.
pub fn score_breakdown(deal: &DealRecord, policy: &ScoringPolicy) -> ScoreBreakdown {
    let team = keyword_sub_score(&deal.highlights, &policy.team);
    let market = keyword_sub_score(&deal.highlights, &policy.market);
    let traction = traction_sub_score(deal.financials.as_ref(), &policy.traction);
    let risk = risk_sub_score(&deal.risk_factors, &policy.risk);

    let w = &policy.weights;
    let weighted = w.team * team + w.market * market + w.traction * traction + w.risk * risk;
    let total = clamp_score(weighted)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0);

    ScoreBreakdown {
        team: team.round_dp(DISPLAY_DECIMAL_PRECISION),
        market: market.round_dp(DISPLAY_DECIMAL_PRECISION),
        traction: traction.round_dp(DISPLAY_DECIMAL_PRECISION),
        risk: risk.round_dp(DISPLAY_DECIMAL_PRECISION),
        total,
    }
}

/// Composite 0-100 deal score.
pub fn compute_deal_score(deal: &DealRecord, policy: &ScoringPolicy) -> u8 {
    score_breakdown(deal, policy).total
}

pub fn score_deal(deal: &DealRecord, policy: &ScoringPolicy) -> ScoredDeal {
    let breakdown = score_breakdown(deal, policy);
    ScoredDeal {
        deal: deal.clone(),
        deal_score: breakdown.total,
        score_breakdown: breakdown,
    }
}

/// Scores every deal, preserving order.
pub fn score_deals(deals: &[DealRecord], policy: &ScoringPolicy) -> Vec<ScoredDeal> {
    deals.iter().map(|deal| score_deal(deal, policy)).collect()
}
