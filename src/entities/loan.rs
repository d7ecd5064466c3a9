// 🏦 Loan book - monthly disbursement periods and portfolio headline figures

use super::levels::RiskLevel;
use serde::Serialize;

/// Funds released and funds confirmed spent during one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPeriod {
    /// Display label, e.g. "Jan 2024"
    pub month: String,
    #[serde(rename = "disbursed")]
    pub disbursed_amount: u64,
    #[serde(rename = "utilized")]
    pub utilized_amount: u64,
}

impl LoanPeriod {
    pub fn new(month: &str, disbursed_amount: u64, utilized_amount: u64) -> Self {
        LoanPeriod {
            month: month.to_string(),
            disbursed_amount,
            utilized_amount,
        }
    }

    /// Disbursed funds not yet accounted for
    pub fn unutilized_amount(&self) -> u64 {
        self.disbursed_amount.saturating_sub(self.utilized_amount)
    }
}

/// Headline figures shown above the transaction analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub active_loan_accounts: u32,
    pub new_accounts_this_month: u32,
    pub overall_risk: RiskLevel,
    /// Month-over-month change in disbursement, whole percent
    pub disbursement_growth_pct: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unutilized_amount() {
        assert_eq!(LoanPeriod::new("Apr 2024", 18_000_000, 17_000_000).unutilized_amount(), 1_000_000);
        assert_eq!(LoanPeriod::new("Odd", 5, 9).unutilized_amount(), 0);
    }

    #[test]
    fn test_serializes_original_field_names() {
        let json = serde_json::to_value(LoanPeriod::new("Jan 2024", 10_000_000, 8_000_000)).unwrap();
        assert_eq!(json["month"], "Jan 2024");
        assert_eq!(json["disbursed"], 10_000_000);
        assert_eq!(json["utilized"], 8_000_000);
    }
}
