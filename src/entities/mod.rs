// Entity Models
// Immutable records that make up the dashboard dataset
//
// - levels: closed enums (payment method, direction, compliance/risk/behaviour)
// - transaction: debit/credit movements
// - customer: borrower profile with its transactions
// - loan: monthly disbursement periods and portfolio headline

pub mod levels;
pub mod transaction;
pub mod customer;
pub mod loan;

pub use levels::{BehavioralScore, ComplianceLevel, Direction, PaymentMethod, RiskLevel};
pub use transaction::{month_of, Transaction, TransactionLists};
pub use customer::{Customer, Patterns, UtilizationPercent};
pub use loan::{LoanPeriod, PortfolioSnapshot};
