// Loan Monitor - Core Library
// Fixture dataset, aggregation and formatting shared by the TUI and the API server

pub mod error;
pub mod entities;
pub mod fixtures;
pub mod aggregation;
pub mod currency;
pub mod export;
pub mod config;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use entities::{
    BehavioralScore, ComplianceLevel, Direction, PaymentMethod, RiskLevel,
    Transaction, TransactionLists,
    Customer, Patterns, UtilizationPercent,
    LoanPeriod, PortfolioSnapshot,
};
pub use fixtures::{Dataset, RawDataset, EMBEDDED_FIXTURE};
pub use aggregation::{
    AggregationBucket, MethodTotals, TransactionAggregations,
    LoanSummary, UtilizationRate,
    aggregate_all, aggregate_one, summarize_loan_periods,
};
pub use currency::{format_crore, format_inr, format_inr_signed, group_indian};
pub use export::{write_aggregations_csv, write_transactions_csv};
pub use config::{init_tracing, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
