use std::collections::BTreeMap;

use super::DealSummary;
use crate::deals::{DealRecord, PipelineStatus};
use crate::scoring::ScoredDeal;

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Summary statistics over a deal listing.
///
/// Statuses other than "Completed" and "In Progress" only count toward
/// `count` and `by_status`. The average growth covers deals that report
/// financials and is zero when none do.
pub fn aggregate(records: &[DealRecord]) -> DealSummary {
    let mut summary = DealSummary {
        count: records.len(),
        ..Default::default()
    };
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut growth_total = 0.0;
    let mut growth_count = 0usize;

    for record in records {
        summary.total_value = summary.total_value.saturating_add(record.ask_value());
        match record.pipeline_status() {
            Some(PipelineStatus::Completed) => summary.completed_count += 1,
            Some(PipelineStatus::InProgress) => summary.in_progress_count += 1,
            None => {}
        }
        *by_status.entry(record.normalized_status()).or_insert(0) += 1;
        if let Some(growth) = record.growth_percent() {
            growth_total += growth;
            growth_count += 1;
        }
    }

    summary.average_growth = mean(growth_total, growth_count);
    summary.by_status = by_status;
    summary
}

/// Same as [`aggregate`], plus the mean deal score.
pub fn aggregate_scored(records: &[ScoredDeal]) -> DealSummary {
    let deals: Vec<DealRecord> = records.iter().map(|r| r.deal.clone()).collect();
    let mut summary = aggregate(&deals);
    let score_total: f64 = records.iter().map(|r| f64::from(r.deal_score)).sum();
    summary.average_score = Some(mean(score_total, records.len()));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::Financials;
    use crate::scoring::{score_deals, ScoringPolicy};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(company: &str, status: &str, amount: Option<&str>, growth: Option<f64>) -> DealRecord {
        DealRecord {
            id: company.to_lowercase(),
            company_name: company.to_string(),
            status: status.to_string(),
            ask_amount: amount.map(str::to_string),
            financials: growth.map(|g| Financials {
                growth_percent: g,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_is_all_zeros() {
        let summary = aggregate(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(summary.completed_count, 0);
        assert_eq!(summary.in_progress_count, 0);
        assert_eq!(summary.average_growth, 0.0);
        assert!(!summary.average_growth.is_nan());

        let scored = aggregate_scored(&[]);
        assert_eq!(scored.average_score, Some(0.0));
    }

    #[test]
    fn test_two_deal_scenario() {
        let records = vec![
            record("Acme", "Completed", Some("$5M"), None),
            record("Beta", "In Progress", Some("$3M"), None),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_value, dec!(8));
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.in_progress_count, 1);
        assert_eq!(summary.average_growth, 0.0);
    }

    #[test]
    fn test_total_value_saturates_instead_of_overflowing() {
        let huge = "50000000000000000000000000000";
        let records = vec![
            record("A", "Completed", Some(huge), None),
            record("B", "Completed", Some(huge), None),
        ];
        assert_eq!(aggregate(&records).total_value, Decimal::MAX);
    }

    #[test]
    fn test_unrecognized_status_only_counts_toward_total() {
        let records = vec![
            record("A", "Completed", None, None),
            record("B", "completed", None, None),
            record("C", "On Hold", None, None),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.in_progress_count, 0);
        assert_eq!(summary.by_status.get("completed"), Some(&2));
        assert_eq!(summary.by_status.get("on_hold"), Some(&1));
    }

    #[test]
    fn test_average_growth_ignores_deals_without_financials() {
        let records = vec![
            record("A", "", None, Some(100.0)),
            record("B", "", None, None),
            record("C", "", None, Some(50.0)),
        ];
        assert_eq!(aggregate(&records).average_growth, 75.0);
    }

    #[test]
    fn test_total_value_falls_back_to_valuation_and_ignores_garbage() {
        let mut valued = record("A", "", None, None);
        valued.valuation = Some("$20M".to_string());
        let records = vec![valued, record("B", "", Some("soon"), None)];
        assert_eq!(aggregate(&records).total_value, dec!(20));
    }

    #[test]
    fn test_scored_summary_reports_mean_score() {
        let records = vec![
            record("A", "", None, None),
            DealRecord {
                highlights: vec!["experienced team".to_string()],
                ..record("B", "", None, None)
            },
        ];
        let scored = score_deals(&records, &ScoringPolicy::default());
        let summary = aggregate_scored(&scored);
        // 45 and 53
        assert_eq!(summary.average_score, Some(49.0));
        assert_eq!(summary.count, 2);
    }
}
