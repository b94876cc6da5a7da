//! Built-in datasets served when the backend cannot be reached.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::deals::{DealRecord, DealStage, Financials};
use crate::portfolio::{CompanyKpis, CompanyStatus, PortfolioCompany};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Fallback deal pipeline.
pub fn fallback_deals() -> Vec<DealRecord> {
    vec![
        DealRecord {
            id: "deal-001".to_string(),
            company_name: "NeuralFlow AI".to_string(),
            founder_name: Some("Sarah Chen".to_string()),
            sector: "AI/ML".to_string(),
            stage: DealStage::SeriesA,
            status: "In Progress".to_string(),
            location: Some("San Francisco, CA".to_string()),
            upload_date: NaiveDate::from_ymd_opt(2024, 3, 14),
            ask_amount: Some("$15M".to_string()),
            valuation: Some("$60M".to_string()),
            financials: Some(Financials {
                revenue: 2_400_000.0,
                growth_percent: 180.0,
                burn_rate: 350_000.0,
                runway_months: 18.0,
            }),
            highlights: strings(&[
                "Experienced team from Google Brain",
                "Large market opportunity",
                "Proven enterprise traction",
            ]),
            risk_factors: strings(&["Market timing", "Competitive landscape"]),
        },
        DealRecord {
            id: "deal-002".to_string(),
            company_name: "GreenGrid Energy".to_string(),
            founder_name: Some("Marcus Johnson".to_string()),
            sector: "CleanTech".to_string(),
            stage: DealStage::Seed,
            status: "Completed".to_string(),
            location: Some("Austin, TX".to_string()),
            upload_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            ask_amount: Some("$4M".to_string()),
            valuation: Some("$20M".to_string()),
            financials: Some(Financials {
                revenue: 600_000.0,
                growth_percent: 95.0,
                burn_rate: 120_000.0,
                runway_months: 22.0,
            }),
            highlights: strings(&["Growing market for grid storage", "Strong IP portfolio"]),
            risk_factors: strings(&["Regulatory exposure", "Hardware capex", "Long sales cycles"]),
        },
        DealRecord {
            id: "deal-003".to_string(),
            company_name: "MediSync Health".to_string(),
            founder_name: Some("Priya Patel".to_string()),
            sector: "HealthTech".to_string(),
            stage: DealStage::DueDiligence,
            status: "Pending".to_string(),
            location: Some("Boston, MA".to_string()),
            upload_date: NaiveDate::from_ymd_opt(2024, 3, 18),
            ask_amount: Some("$8M".to_string()),
            valuation: Some("$35M".to_string()),
            financials: Some(Financials {
                revenue: 1_100_000.0,
                growth_percent: 140.0,
                burn_rate: 210_000.0,
                runway_months: 14.0,
            }),
            highlights: strings(&["Proven founders with prior exit", "Large addressable market"]),
            risk_factors: strings(&["HIPAA compliance"]),
        },
        DealRecord {
            id: "deal-004".to_string(),
            company_name: "FinLedger".to_string(),
            founder_name: Some("Tom Alvarez".to_string()),
            sector: "FinTech".to_string(),
            stage: DealStage::TermSheet,
            status: "Failed".to_string(),
            location: Some("New York, NY".to_string()),
            upload_date: None,
            ask_amount: Some("$2.5M".to_string()),
            valuation: None,
            financials: None,
            highlights: Vec::new(),
            risk_factors: strings(&["Unproven model", "Single founder"]),
        },
    ]
}

/// Fallback portfolio.
pub fn fallback_portfolio() -> Vec<PortfolioCompany> {
    vec![
        PortfolioCompany {
            id: "pc-001".to_string(),
            company_name: "DataVault".to_string(),
            sector: "Infrastructure".to_string(),
            investment_date: NaiveDate::from_ymd_opt(2022, 6, 1),
            investment_amount: dec!(3),
            ownership_percent: dec!(12),
            current_valuation: dec!(85),
            kpis: CompanyKpis {
                revenue: 8_500_000.0,
                growth: 120.0,
                burn_rate: 450_000.0,
                runway_months: 26.0,
                headcount: 64,
            },
            status: CompanyStatus::Scaling,
            archived: false,
        },
        PortfolioCompany {
            id: "pc-002".to_string(),
            company_name: "Loopwise".to_string(),
            sector: "Consumer".to_string(),
            investment_date: NaiveDate::from_ymd_opt(2023, 2, 15),
            investment_amount: dec!(1.5),
            ownership_percent: dec!(8),
            current_valuation: dec!(22),
            kpis: CompanyKpis {
                revenue: 1_200_000.0,
                growth: 60.0,
                burn_rate: 180_000.0,
                runway_months: 11.0,
                headcount: 21,
            },
            status: CompanyStatus::Growing,
            archived: false,
        },
        PortfolioCompany {
            id: "pc-003".to_string(),
            company_name: "Orbital Freight".to_string(),
            sector: "Logistics".to_string(),
            investment_date: NaiveDate::from_ymd_opt(2021, 9, 30),
            investment_amount: dec!(2),
            ownership_percent: dec!(10),
            current_valuation: dec!(9),
            kpis: CompanyKpis {
                revenue: 900_000.0,
                growth: 5.0,
                burn_rate: 260_000.0,
                runway_months: 6.0,
                headcount: 30,
            },
            status: CompanyStatus::Challenged,
            archived: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixtures_are_valid_and_uniquely_keyed() {
        let deals = fallback_deals();
        assert!(deals.iter().all(|d| d.validate().is_ok()));
        let ids: HashSet<_> = deals.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), deals.len());

        let companies = fallback_portfolio();
        assert!(companies.iter().all(|c| c.validate().is_ok()));
        let ids: HashSet<_> = companies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), companies.len());
    }
}
