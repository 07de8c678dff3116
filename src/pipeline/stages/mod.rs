pub mod competitor;
pub mod finance;
pub mod market;
pub mod report;

pub use competitor::CompetitorAnalyst;
pub use finance::FinancialModeler;
pub use market::MarketResearcher;
pub use report::ReportGenerator;
