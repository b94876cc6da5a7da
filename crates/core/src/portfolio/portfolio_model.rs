//! Portfolio company domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{errors::ValidationError, Error, Result};

/// Health label a partner assigns to a portfolio company.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyStatus {
    #[default]
    Growing,
    Scaling,
    Stable,
    Challenged,
    Exited,
    Other(String),
}

impl CompanyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CompanyStatus::Growing => "Growing",
            CompanyStatus::Scaling => "Scaling",
            CompanyStatus::Stable => "Stable",
            CompanyStatus::Challenged => "Challenged",
            CompanyStatus::Exited => "Exited",
            CompanyStatus::Other(label) => label.as_str(),
        }
    }
}

impl From<String> for CompanyStatus {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "growing" => CompanyStatus::Growing,
            "scaling" => CompanyStatus::Scaling,
            "stable" => CompanyStatus::Stable,
            "challenged" => CompanyStatus::Challenged,
            "exited" => CompanyStatus::Exited,
            _ => CompanyStatus::Other(label),
        }
    }
}

impl From<CompanyStatus> for String {
    fn from(status: CompanyStatus) -> Self {
        match status {
            CompanyStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Operating KPIs reported at board meetings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyKpis {
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub growth: f64,
    #[serde(default)]
    pub burn_rate: f64,
    #[serde(default)]
    pub runway_months: f64,
    #[serde(default)]
    pub headcount: u32,
}

/// Domain model representing a funded company under monitoring.
///
/// Companies are never deleted; [`PortfolioCompany::archive`] retires them
/// from the active views.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCompany {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub investment_date: Option<NaiveDate>,
    pub investment_amount: Decimal,
    /// Percentage held, 0-100
    pub ownership_percent: Decimal,
    pub current_valuation: Decimal,
    #[serde(default)]
    pub kpis: CompanyKpis,
    #[serde(default)]
    pub status: CompanyStatus,
    #[serde(default)]
    pub archived: bool,
}

impl PortfolioCompany {
    /// Value of the fund's stake at the current valuation.
    pub fn stake_value(&self) -> Decimal {
        (self.ownership_percent / dec!(100)).saturating_mul(self.current_valuation)
    }

    /// Stake value over invested amount; zero when nothing was invested.
    pub fn multiple(&self) -> Decimal {
        self.stake_value()
            .checked_div(self.investment_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Retires the company from active views. Idempotent.
    pub fn archive(&mut self) {
        self.archived = true;
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.company_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Company name cannot be empty".to_string(),
            )));
        }
        if self.investment_amount < Decimal::ZERO || self.current_valuation < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Monetary values cannot be negative".to_string(),
            )));
        }
        if self.ownership_percent < Decimal::ZERO || self.ownership_percent > dec!(100) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Ownership must be between 0 and 100 percent, got {}",
                self.ownership_percent
            ))));
        }
        Ok(())
    }
}

/// Roll-up over the portfolio screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub company_count: usize,
    pub active_count: usize,
    pub archived_count: usize,
    pub total_invested: Decimal,
    pub total_stake_value: Decimal,
    pub blended_multiple: Decimal,
    pub by_status: BTreeMap<String, usize>,
    pub average_runway: f64,
}
