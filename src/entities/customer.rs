// 🏢 Customer Entity - borrower profile, behaviour patterns and transactions

use super::levels::{BehavioralScore, ComplianceLevel, Direction, RiskLevel};
use super::transaction::{Transaction, TransactionLists};
use crate::error::DashboardError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// UTILIZATION PERCENT
// ============================================================================

/// Whole-number percentage written as `"92%"` in the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtilizationPercent(u8);

impl UtilizationPercent {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(UtilizationPercent(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl FromStr for UtilizationPercent {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DashboardError::InvalidUtilization { value: s.to_string() };

        let digits = s.trim().strip_suffix('%').ok_or_else(invalid)?;
        let value: u8 = digits.trim().parse().map_err(|_| invalid())?;
        UtilizationPercent::new(value).ok_or_else(invalid)
    }
}

impl fmt::Display for UtilizationPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for UtilizationPercent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// BEHAVIOUR PATTERNS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patterns {
    pub loan_misuse: String,
    pub fraud_risk: RiskLevel,
    pub fund_diversion: String,
    #[serde(rename = "alerts")]
    pub alert_count: u32,
}

// ============================================================================
// CUSTOMER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique across the dataset
    pub id: u32,
    pub name: String,
    #[serde(rename = "compliance")]
    pub compliance_level: ComplianceLevel,
    #[serde(rename = "risk")]
    pub risk_level: RiskLevel,
    pub utilization_rate: UtilizationPercent,
    pub behavioral_score: BehavioralScore,
    pub patterns: Patterns,
    pub transactions: TransactionLists,
}

impl Customer {
    /// Transactions marked suspicious, debits first
    pub fn flagged_transactions(&self) -> impl Iterator<Item = (Direction, &Transaction)> {
        self.transactions.iter().filter(|(_, tx)| tx.flagged)
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_transactions().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PaymentMethod;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_utilization_percent() {
        assert_eq!("92%".parse::<UtilizationPercent>().unwrap().value(), 92);
        assert_eq!(" 0% ".parse::<UtilizationPercent>().unwrap().value(), 0);
        assert_eq!("100%".parse::<UtilizationPercent>().unwrap().to_string(), "100%");
    }

    #[test]
    fn test_reject_malformed_utilization() {
        for bad in ["92", "101%", "-5%", "abc%", "", "%"] {
            let err = bad.parse::<UtilizationPercent>().unwrap_err();
            assert!(
                matches!(err, DashboardError::InvalidUtilization { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_flagged_transactions_keep_direction() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let customer = Customer {
            id: 2,
            name: "IndiaGrowth Enterprises".to_string(),
            compliance_level: ComplianceLevel::Medium,
            risk_level: RiskLevel::Medium,
            utilization_rate: UtilizationPercent::new(78).unwrap(),
            behavioral_score: BehavioralScore::NeedsMonitoring,
            patterns: Patterns {
                loan_misuse: "Occasional personal use detected".to_string(),
                fraud_risk: RiskLevel::Medium,
                fund_diversion: "Some instances".to_string(),
                alert_count: 3,
            },
            transactions: TransactionLists {
                debit: vec![
                    Transaction::new(day, 4_000_000, "Inventory", PaymentMethod::Cash).with_flag(true),
                    Transaction::new(day, 3_500_000, "Equipment", PaymentMethod::Rtgs),
                ],
                credit: vec![
                    Transaction::new(day, 2_500_000, "Unknown", PaymentMethod::Cheque).with_flag(true),
                ],
            },
        };

        let flagged: Vec<(Direction, u64)> = customer
            .flagged_transactions()
            .map(|(d, tx)| (d, tx.amount))
            .collect();

        assert_eq!(
            flagged,
            vec![(Direction::Debit, 4_000_000), (Direction::Credit, 2_500_000)]
        );
        assert_eq!(customer.flagged_count(), 2);

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["utilizationRate"], "78%");
        assert_eq!(json["behavioralScore"], "Needs Monitoring");
        assert_eq!(json["patterns"]["alerts"], 3);
    }
}
