//! Tests for framework models and the analysis service.

#[cfg(test)]
mod tests {
    use crate::deals::{DealRecord, Financials};
    use crate::errors::{Error, ValidationError};
    use crate::frameworks::{
        AnalysisService, AnalysisServiceTrait, FrameworkConfig, FrameworkKey, FrameworkProgress,
        FrameworkRegistry, FrameworkStatus,
    };
    use crate::scoring::ScoringPolicy;
    use std::str::FromStr;

    // ==================== FrameworkKey ====================

    #[test]
    fn test_key_parsing_and_serde() {
        assert_eq!(
            FrameworkKey::from_str("financial_health").unwrap(),
            FrameworkKey::FinancialHealth
        );
        assert!(matches!(
            FrameworkKey::from_str("vibes"),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert_eq!(
            serde_json::to_string(&FrameworkKey::CompetitiveMoat).unwrap(),
            "\"competitive_moat\""
        );
        for key in FrameworkKey::ALL {
            assert_eq!(key.to_string().parse::<FrameworkKey>().unwrap(), key);
        }
    }

    // ==================== FrameworkConfig ====================

    #[test]
    fn test_default_config_order() {
        assert_eq!(FrameworkConfig::default().ordered_keys(), FrameworkKey::ALL.to_vec());
    }

    #[test]
    fn test_config_overrides_merge_onto_defaults() {
        let json = r#"{
            "financial_health": {"order": 1, "name": "Money", "icon": "coins", "description": "Cash"},
            "founder_signal": {"order": 1, "name": "Founders", "icon": "users", "description": "People"}
        }"#;
        let config = FrameworkConfig::from_json(json).unwrap();
        let keys = config.ordered_keys();
        // Equal order falls back to key order.
        assert_eq!(keys[0], FrameworkKey::FounderSignal);
        assert_eq!(keys[1], FrameworkKey::FinancialHealth);
        assert_eq!(config.descriptor(FrameworkKey::FinancialHealth).unwrap().name, "Money");
        assert_eq!(
            config.descriptor(FrameworkKey::DueDiligence).unwrap().name,
            "Due Diligence"
        );
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let json = r#"{"astrology": {"order": 1, "name": "A", "icon": "star", "description": ""}}"#;
        assert!(FrameworkConfig::from_json(json).is_err());
    }

    // ==================== FrameworkProgress ====================

    #[test]
    fn test_progress_counts() {
        let mut progress = FrameworkProgress::new("d1");
        assert_eq!(progress.overall_progress(), 0.0);
        assert_eq!(progress.average_score(), None);

        progress.start(FrameworkKey::FounderSignal);
        assert_eq!(progress.status_of(FrameworkKey::FounderSignal), FrameworkStatus::InProgress);
        progress.complete(FrameworkKey::FounderSignal, Some(80)).unwrap();
        progress.complete(FrameworkKey::DueDiligence, None).unwrap();
        progress.complete(FrameworkKey::MarketOpportunity, Some(60)).unwrap();

        assert_eq!(progress.completed_count(), 3);
        assert_eq!(progress.overall_progress(), 0.5);
        assert_eq!(progress.average_score(), Some(70.0));

        progress.reset(FrameworkKey::MarketOpportunity);
        assert_eq!(progress.status_of(FrameworkKey::MarketOpportunity), FrameworkStatus::Pending);
        assert_eq!(progress.average_score(), Some(80.0));
    }

    #[test]
    fn test_start_does_not_reopen_completed() {
        let mut progress = FrameworkProgress::new("d1");
        progress.complete(FrameworkKey::ProductTraction, Some(50)).unwrap();
        progress.start(FrameworkKey::ProductTraction);
        assert_eq!(progress.status_of(FrameworkKey::ProductTraction), FrameworkStatus::Completed);
    }

    #[test]
    fn test_completed_never_exceeds_six() {
        let mut progress = FrameworkProgress::new("d1");
        for _ in 0..3 {
            for key in FrameworkKey::ALL {
                progress.complete(key, Some(100)).unwrap();
            }
        }
        assert_eq!(progress.completed_count(), 6);
        assert_eq!(progress.overall_progress(), 1.0);
    }

    #[test]
    fn test_progress_serializes_camel_case() {
        let mut progress = FrameworkProgress::new("d1");
        progress.complete(FrameworkKey::FounderSignal, Some(90)).unwrap();
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["dealId"], "d1");
        assert_eq!(json["frameworks"]["founder_signal"]["status"], "completed");
        assert_eq!(json["frameworks"]["founder_signal"]["score"], 90);
    }

    // ==================== AnalysisService ====================

    fn service() -> AnalysisService {
        AnalysisService::new(
            FrameworkConfig::default(),
            FrameworkRegistry::default(),
            ScoringPolicy::default(),
        )
    }

    fn deal(id: &str) -> DealRecord {
        DealRecord {
            id: id.to_string(),
            company_name: "Acme".to_string(),
            financials: Some(Financials {
                runway_months: 18.0,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_view_of_unanalyzed_deal_is_not_stored() {
        let svc = service();
        let view = svc.view(&deal("d1"));
        assert_eq!(view.current, Some(FrameworkKey::FounderSignal));
        assert_eq!(view.frameworks.len(), 6);
        assert_eq!(view.completed_count, 0);
        assert!(!svc.reset("d1"));
    }

    #[test]
    fn test_view_carries_suggestions() {
        let view = service().view(&deal("d1"));
        let health = view
            .frameworks
            .iter()
            .find(|f| f.key == FrameworkKey::FinancialHealth)
            .unwrap();
        assert_eq!(health.suggested_score, Some(75));
        assert_eq!(health.name, "Financial Health");
        let moat = view
            .frameworks
            .iter()
            .find(|f| f.key == FrameworkKey::CompetitiveMoat)
            .unwrap();
        assert_eq!(moat.suggested_score, None);
    }

    #[test]
    fn test_complete_persists_per_deal() {
        let svc = service();
        let view = svc.complete(&deal("d1"), FrameworkKey::FounderSignal, Some(90)).unwrap();
        assert_eq!(view.completed_count, 1);
        assert_eq!(view.current, Some(FrameworkKey::MarketOpportunity));
        assert_eq!(view.average_score, Some(90.0));

        assert_eq!(svc.view(&deal("d1")).completed_count, 1);
        assert_eq!(svc.view(&deal("d2")).completed_count, 0);

        assert!(svc.reset("d1"));
        assert_eq!(svc.view(&deal("d1")).completed_count, 0);
    }

    #[test]
    fn test_invalid_score_is_rejected_without_saving() {
        let svc = service();
        assert!(svc.complete(&deal("d1"), FrameworkKey::FounderSignal, Some(120)).is_err());
        assert!(!svc.reset("d1"));
    }

    #[test]
    fn test_select_moves_current() {
        let svc = service();
        let view = svc.select(&deal("d1"), FrameworkKey::DueDiligence).unwrap();
        assert_eq!(view.current, Some(FrameworkKey::DueDiligence));
        let dd = view
            .frameworks
            .iter()
            .find(|f| f.key == FrameworkKey::DueDiligence)
            .unwrap();
        assert_eq!(dd.status, FrameworkStatus::InProgress);
    }
}
