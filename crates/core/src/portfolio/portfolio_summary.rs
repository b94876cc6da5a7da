use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{PortfolioCompany, PortfolioSummary};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Rolls the portfolio up into the figures shown on the portfolio screen.
///
/// Archived companies only show up in `archived_count`; monetary totals,
/// status counts and the runway average cover active companies. The blended
/// multiple is total stake value over total invested, zero when nothing is
/// invested. Totals saturate at `Decimal::MAX`.
pub fn summarize_portfolio(companies: &[PortfolioCompany]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        company_count: companies.len(),
        ..Default::default()
    };
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut runway_total = 0.0;
    let mut runway_count = 0usize;

    for company in companies {
        if company.archived {
            summary.archived_count += 1;
            continue;
        }
        summary.active_count += 1;
        summary.total_invested = summary.total_invested.saturating_add(company.investment_amount);
        summary.total_stake_value = summary.total_stake_value.saturating_add(company.stake_value());
        *by_status
            .entry(company.status.as_str().to_string())
            .or_insert(0) += 1;

        if company.kpis.runway_months.is_finite() {
            runway_total += company.kpis.runway_months;
            runway_count += 1;
        }
    }

    summary.blended_multiple = summary
        .total_stake_value
        .checked_div(summary.total_invested)
        .unwrap_or(Decimal::ZERO)
        .round_dp(DISPLAY_DECIMAL_PRECISION);
    summary.total_stake_value = summary.total_stake_value.round_dp(DISPLAY_DECIMAL_PRECISION);
    summary.average_runway = if runway_count > 0 {
        runway_total / runway_count as f64
    } else {
        0.0
    };
    summary.by_status = by_status;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{CompanyKpis, CompanyStatus};
    use rust_decimal_macros::dec;

    fn company(
        id: &str,
        invested: Decimal,
        ownership: Decimal,
        valuation: Decimal,
        status: CompanyStatus,
        runway: f64,
    ) -> PortfolioCompany {
        PortfolioCompany {
            id: id.to_string(),
            company_name: format!("Company {}", id),
            investment_amount: invested,
            ownership_percent: ownership,
            current_valuation: valuation,
            status,
            kpis: CompanyKpis {
                runway_months: runway,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_portfolio_has_zero_totals() {
        let summary = summarize_portfolio(&[]);
        assert_eq!(summary.company_count, 0);
        assert_eq!(summary.total_invested, Decimal::ZERO);
        assert_eq!(summary.blended_multiple, Decimal::ZERO);
        assert_eq!(summary.average_runway, 0.0);
        assert!(summary.by_status.is_empty());
    }

    #[test]
    fn test_summary_totals_and_multiple() {
        let companies = vec![
            // 10% of 50 = 5 on 2 invested
            company("a", dec!(2), dec!(10), dec!(50), CompanyStatus::Growing, 18.0),
            // 20% of 10 = 2 on 2 invested
            company("b", dec!(2), dec!(20), dec!(10), CompanyStatus::Challenged, 6.0),
        ];
        let summary = summarize_portfolio(&companies);

        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.total_invested, dec!(4));
        assert_eq!(summary.total_stake_value, dec!(7));
        assert_eq!(summary.blended_multiple, dec!(1.75));
        assert_eq!(summary.average_runway, 12.0);
        assert_eq!(summary.by_status.get("Growing"), Some(&1));
        assert_eq!(summary.by_status.get("Challenged"), Some(&1));
    }

    #[test]
    fn test_archived_companies_are_excluded_from_totals() {
        let mut retired = company("c", dec!(5), dec!(50), dec!(0), CompanyStatus::Exited, 0.0);
        retired.archive();
        let companies = vec![
            company("a", dec!(2), dec!(10), dec!(50), CompanyStatus::Growing, 18.0),
            retired,
        ];
        let summary = summarize_portfolio(&companies);

        assert_eq!(summary.company_count, 2);
        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.archived_count, 1);
        assert_eq!(summary.total_invested, dec!(2));
        assert!(!summary.by_status.contains_key("Exited"));
    }

    #[test]
    fn test_huge_totals_saturate() {
        let companies = vec![
            company("a", Decimal::MAX, dec!(100), Decimal::MAX, CompanyStatus::Scaling, 24.0),
            company("b", Decimal::MAX, dec!(100), Decimal::MAX, CompanyStatus::Scaling, 24.0),
        ];
        let summary = summarize_portfolio(&companies);
        assert_eq!(summary.total_invested, Decimal::MAX);
        assert_eq!(summary.total_stake_value, Decimal::MAX);
        assert_eq!(summary.blended_multiple, dec!(1));
    }

    #[test]
    fn test_zero_investment_multiple_is_zero() {
        let companies = vec![company("a", dec!(0), dec!(10), dec!(50), CompanyStatus::Stable, 12.0)];
        let summary = summarize_portfolio(&companies);
        assert_eq!(summary.blended_multiple, Decimal::ZERO);
        assert_eq!(companies[0].multiple(), Decimal::ZERO);
    }
}
