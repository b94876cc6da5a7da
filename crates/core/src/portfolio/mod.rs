//! Portfolio module - funded companies under monitoring and their roll-up.

mod portfolio_model;
mod portfolio_service;
mod portfolio_summary;
mod portfolio_traits;


pub use portfolio_model::{CompanyKpis, CompanyStatus, PortfolioCompany, PortfolioSummary};
pub use portfolio_service::PortfolioService;
pub use portfolio_summary::summarize_portfolio;
pub use portfolio_traits::PortfolioServiceTrait;
