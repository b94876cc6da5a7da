//! Dispatch table from framework identity to its handler.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use super::FrameworkKey;
use crate::constants::{HEALTHY_RUNWAY_MONTHS, MAX_SCORE};
use crate::deals::DealRecord;
use crate::scoring::{score_breakdown, ScoreBreakdown, ScoringPolicy};

/// Behavior attached to one analysis framework.
pub trait FrameworkHandler: Send + Sync {
    fn key(&self) -> FrameworkKey;

    /// Score the analyst starts from, if the framework can be pre-filled
    /// from deal data.
    fn suggested_score(&self, deal: &DealRecord, policy: &ScoringPolicy) -> Option<u8>;
}

fn to_score(value: Decimal) -> u8 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
        .min(MAX_SCORE)
}

/// Suggests one of the deal score's sub-scores.
pub struct SubScoreHandler {
    key: FrameworkKey,
    pick: fn(&ScoreBreakdown) -> Decimal,
}

impl SubScoreHandler {
    pub fn new(key: FrameworkKey, pick: fn(&ScoreBreakdown) -> Decimal) -> Self {
        Self { key, pick }
    }
}

impl FrameworkHandler for SubScoreHandler {
    fn key(&self) -> FrameworkKey {
        self.key
    }

    fn suggested_score(&self, deal: &DealRecord, policy: &ScoringPolicy) -> Option<u8> {
        Some(to_score((self.pick)(&score_breakdown(deal, policy))))
    }
}

/// Suggests a score from runway: linear up to the healthy runway, capped
/// at 100. No suggestion without financials.
pub struct RunwayHandler;

impl FrameworkHandler for RunwayHandler {
    fn key(&self) -> FrameworkKey {
        FrameworkKey::FinancialHealth
    }

    fn suggested_score(&self, deal: &DealRecord, _policy: &ScoringPolicy) -> Option<u8> {
        let runway = deal.financials?.runway_months;
        if !runway.is_finite() {
            return None;
        }
        let ratio = (runway / HEALTHY_RUNWAY_MONTHS).clamp(0.0, 1.0);
        Some((ratio * f64::from(MAX_SCORE)).round() as u8)
    }
}

/// Framework scored by the analyst only.
pub struct ManualHandler(pub FrameworkKey);

impl FrameworkHandler for ManualHandler {
    fn key(&self) -> FrameworkKey {
        self.0
    }

    fn suggested_score(&self, _deal: &DealRecord, _policy: &ScoringPolicy) -> Option<u8> {
        None
    }
}

/// Registry of framework handlers, one per key.
pub struct FrameworkRegistry {
    handlers: BTreeMap<FrameworkKey, Box<dyn FrameworkHandler>>,
}

impl Default for FrameworkRegistry {
    fn default() -> Self {
        Self::new()
            .with(SubScoreHandler::new(FrameworkKey::FounderSignal, |b| b.team))
            .with(SubScoreHandler::new(FrameworkKey::MarketOpportunity, |b| b.market))
            .with(SubScoreHandler::new(FrameworkKey::ProductTraction, |b| b.traction))
            .with(ManualHandler(FrameworkKey::CompetitiveMoat))
            .with(RunwayHandler)
            .with(ManualHandler(FrameworkKey::DueDiligence))
    }
}

impl FrameworkRegistry {
    /// An empty registry. Unregistered frameworks behave as manual ones.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registers `handler`, replacing any handler for the same key.
    pub fn with<H: FrameworkHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.insert(handler.key(), Box::new(handler));
        self
    }

    pub fn handler(&self, key: FrameworkKey) -> Option<&dyn FrameworkHandler> {
        self.handlers.get(&key).map(|h| h.as_ref())
    }

    pub fn suggest(
        &self,
        key: FrameworkKey,
        deal: &DealRecord,
        policy: &ScoringPolicy,
    ) -> Option<u8> {
        self.handler(key)
            .and_then(|h| h.suggested_score(deal, policy))
    }

    /// Suggestions for every framework that has one.
    pub fn suggest_all(
        &self,
        deal: &DealRecord,
        policy: &ScoringPolicy,
    ) -> BTreeMap<FrameworkKey, u8> {
        FrameworkKey::ALL
            .into_iter()
            .filter_map(|key| self.suggest(key, deal, policy).map(|s| (key, s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::Financials;

    fn reference_deal(runway: f64) -> DealRecord {
        DealRecord {
            id: "d1".to_string(),
            company_name: "Acme".to_string(),
            highlights: vec!["experienced team".to_string(), "large market".to_string()],
            risk_factors: vec!["Market timing".to_string()],
            financials: Some(Financials {
                revenue: 2_400_000.0,
                growth_percent: 180.0,
                runway_months: runway,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_registry_covers_every_framework() {
        let registry = FrameworkRegistry::default();
        for key in FrameworkKey::ALL {
            assert_eq!(registry.handler(key).map(|h| h.key()), Some(key));
        }
    }

    #[test]
    fn test_sub_score_suggestions() {
        let registry = FrameworkRegistry::default();
        let policy = ScoringPolicy::default();
        let deal = reference_deal(12.0);

        assert_eq!(registry.suggest(FrameworkKey::FounderSignal, &deal, &policy), Some(75));
        assert_eq!(registry.suggest(FrameworkKey::MarketOpportunity, &deal, &policy), Some(70));
        assert_eq!(registry.suggest(FrameworkKey::ProductTraction, &deal, &policy), Some(100));
        assert_eq!(registry.suggest(FrameworkKey::FinancialHealth, &deal, &policy), Some(50));
        assert_eq!(registry.suggest(FrameworkKey::CompetitiveMoat, &deal, &policy), None);
        assert_eq!(registry.suggest(FrameworkKey::DueDiligence, &deal, &policy), None);
    }

    #[test]
    fn test_runway_suggestion_saturates_and_needs_financials() {
        let policy = ScoringPolicy::default();
        assert_eq!(RunwayHandler.suggested_score(&reference_deal(36.0), &policy), Some(100));
        let no_financials = DealRecord::default();
        assert_eq!(RunwayHandler.suggested_score(&no_financials, &policy), None);
    }

    #[test]
    fn test_suggest_all_skips_manual_frameworks() {
        let registry = FrameworkRegistry::default();
        let suggestions = registry.suggest_all(&reference_deal(24.0), &ScoringPolicy::default());
        assert_eq!(suggestions.len(), 4);
        assert!(!suggestions.contains_key(&FrameworkKey::DueDiligence));
    }

    #[test]
    fn test_registering_replaces_handler() {
        let registry = FrameworkRegistry::default().with(ManualHandler(FrameworkKey::FounderSignal));
        let deal = reference_deal(12.0);
        assert_eq!(
            registry.suggest(FrameworkKey::FounderSignal, &deal, &ScoringPolicy::default()),
            None
        );
        assert!(FrameworkRegistry::new().handler(FrameworkKey::FounderSignal).is_none());
    }
}
