// 📦 Fixture Store - the embedded sample dataset, parsed and validated once
//
// Raw records mirror the JSON document field for field (free strings, signed
// amounts). `Dataset::from_json` converts them into the typed entity model and
// fails fast on the first defect, naming where in the document it sits.

use crate::aggregation::{aggregate_all, summarize_loan_periods, LoanSummary, TransactionAggregations};
use crate::entities::{
    month_of, BehavioralScore, ComplianceLevel, Customer, LoanPeriod, Patterns, PaymentMethod,
    PortfolioSnapshot, RiskLevel, Transaction, TransactionLists, UtilizationPercent,
};
use crate::error::{DashboardError, Result};
use chrono::{Datelike, Month, NaiveDate};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

/// Sample data for Janakalyan Bank, compiled into the binary
pub const EMBEDDED_FIXTURE: &str = include_str!("../fixtures/janakalyan.json");

// ============================================================================
// RAW RECORDS (document shape)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    pub bank: String,
    pub portfolio: RawPortfolio,
    pub loan_periods: Vec<RawLoanPeriod>,
    pub customers: Vec<RawCustomer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPortfolio {
    pub active_loan_accounts: u32,
    pub new_accounts_this_month: u32,
    pub overall_risk: String,
    pub disbursement_growth_pct: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLoanPeriod {
    pub month: String,
    pub disbursed: i64,
    pub utilized: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCustomer {
    pub id: u32,
    pub name: String,
    pub compliance: String,
    pub risk: String,
    pub utilization_rate: String,
    pub behavioral_score: String,
    pub patterns: RawPatterns,
    pub transactions: RawTransactionLists,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPatterns {
    pub loan_misuse: String,
    pub fraud_risk: String,
    pub fund_diversion: String,
    pub alerts: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransactionLists {
    #[serde(default)]
    pub debit: Vec<RawTransaction>,
    #[serde(default)]
    pub credit: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub date: String,
    pub amount: i64,
    pub category: String,
    pub payment_method: String,
    #[serde(default)]
    pub flag: bool,
    pub year: i32,
    pub month: String,
}

// ============================================================================
// CONVERSION + VALIDATION
// ============================================================================

fn non_negative(amount: i64) -> Result<u64> {
    u64::try_from(amount).map_err(|_| DashboardError::NegativeAmount { amount })
}

impl RawTransaction {
    pub fn validate(&self) -> Result<Transaction> {
        let amount = non_negative(self.amount)?;
        let payment_method: PaymentMethod = self.payment_method.parse()?;

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            DashboardError::InvalidDate {
                value: self.date.clone(),
            }
        })?;
        let month: Month = self.month.parse().map_err(|_| DashboardError::InvalidMonth {
            value: self.month.clone(),
        })?;

        if date.year() != self.year || month_of(date) != month {
            return Err(DashboardError::DateMismatch {
                date: self.date.clone(),
                year: self.year,
                month: month.name().to_string(),
            });
        }

        Ok(Transaction {
            date,
            amount,
            category: self.category.clone(),
            payment_method,
            flagged: self.flag,
            year: self.year,
            month,
        })
    }
}

fn add_checked(total: u64, amount: u64, kind: &'static str) -> Result<u64> {
    total
        .checked_add(amount)
        .ok_or(DashboardError::AmountOverflow { kind })
}

fn at(field: &'static str) -> impl Fn(DashboardError) -> DashboardError {
    move |e| e.at(field)
}

fn validate_list(raw: &[RawTransaction], path: &str) -> Result<Vec<Transaction>> {
    raw.iter()
        .enumerate()
        .map(|(i, tx)| tx.validate().map_err(|e| e.at(format!("{}[{}]", path, i))))
        .collect()
}

impl RawCustomer {
    /// Convert into a typed customer. Errors carry paths relative to the customer.
    pub fn validate(&self) -> Result<Customer> {
        Ok(Customer {
            id: self.id,
            name: self.name.clone(),
            compliance_level: self.compliance.parse::<ComplianceLevel>().map_err(at("compliance"))?,
            risk_level: self.risk.parse::<RiskLevel>().map_err(at("risk"))?,
            utilization_rate: self
                .utilization_rate
                .parse::<UtilizationPercent>()
                .map_err(at("utilizationRate"))?,
            behavioral_score: self
                .behavioral_score
                .parse::<BehavioralScore>()
                .map_err(at("behavioralScore"))?,
            patterns: Patterns {
                loan_misuse: self.patterns.loan_misuse.clone(),
                fraud_risk: self
                    .patterns
                    .fraud_risk
                    .parse::<RiskLevel>()
                    .map_err(at("patterns.fraudRisk"))?,
                fund_diversion: self.patterns.fund_diversion.clone(),
                alert_count: self.patterns.alerts,
            },
            transactions: TransactionLists {
                debit: validate_list(&self.transactions.debit, "transactions.debit")?,
                credit: validate_list(&self.transactions.credit, "transactions.credit")?,
            },
        })
    }
}

impl RawLoanPeriod {
    pub fn validate(&self) -> Result<LoanPeriod> {
        let disbursed = non_negative(self.disbursed)?;
        let utilized = non_negative(self.utilized)?;

        if utilized > disbursed {
            return Err(DashboardError::OverUtilized {
                month: self.month.clone(),
                disbursed,
                utilized,
            });
        }

        Ok(LoanPeriod::new(&self.month, disbursed, utilized))
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// Validated, immutable dashboard data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    bank_name: String,
    portfolio: PortfolioSnapshot,
    loan_periods: Vec<LoanPeriod>,
    customers: Vec<Customer>,
}

impl Dataset {
    /// Parse and validate the compiled-in sample data
    pub fn load_embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_FIXTURE)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawDataset) -> Result<Self> {
        let portfolio = PortfolioSnapshot {
            active_loan_accounts: raw.portfolio.active_loan_accounts,
            new_accounts_this_month: raw.portfolio.new_accounts_this_month,
            overall_risk: raw
                .portfolio
                .overall_risk
                .parse::<RiskLevel>()
                .map_err(at("portfolio.overallRisk"))?,
            disbursement_growth_pct: raw.portfolio.disbursement_growth_pct,
        };

        // Running totals must fit in u64 so aggregation never overflows
        let mut disbursed_total = 0u64;
        let mut utilized_total = 0u64;
        let mut loan_periods = Vec::with_capacity(raw.loan_periods.len());
        for (i, rp) in raw.loan_periods.iter().enumerate() {
            let path = format!("loanPeriods[{}]", i);
            let period = rp.validate().map_err(|e| e.at(path.as_str()))?;
            disbursed_total = add_checked(disbursed_total, period.disbursed_amount, "disbursed")
                .map_err(|e| e.at(path.as_str()))?;
            utilized_total = add_checked(utilized_total, period.utilized_amount, "utilized")
                .map_err(|e| e.at(path.as_str()))?;
            loan_periods.push(period);
        }

        let mut seen = HashSet::new();
        let mut transaction_total = 0u64;
        let mut customers = Vec::with_capacity(raw.customers.len());
        for (i, rc) in raw.customers.iter().enumerate() {
            let path = format!("customers[{}]", i);
            if !seen.insert(rc.id) {
                return Err(DashboardError::DuplicateCustomerId { id: rc.id }.at(path));
            }
            let customer = rc.validate().map_err(|e| e.at(path.as_str()))?;
            transaction_total = customer
                .transactions
                .iter()
                .try_fold(transaction_total, |acc, (_, tx)| add_checked(acc, tx.amount, "transaction"))
                .map_err(|e| e.at(path.as_str()))?;
            customers.push(customer);
        }

        debug!(
            bank = %raw.bank,
            customers = customers.len(),
            loan_periods = loan_periods.len(),
            "fixture dataset validated"
        );

        Ok(Dataset {
            bank_name: raw.bank,
            portfolio,
            loan_periods,
            customers,
        })
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn portfolio(&self) -> &PortfolioSnapshot {
        &self.portfolio
    }

    pub fn loan_periods(&self) -> &[LoanPeriod] {
        &self.loan_periods
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn aggregations(&self) -> TransactionAggregations {
        aggregate_all(&self.customers)
    }

    pub fn loan_summary(&self) -> LoanSummary {
        summarize_loan_periods(&self.loan_periods)
    }

    pub fn total_alerts(&self) -> u64 {
        self.customers
            .iter()
            .map(|c| u64::from(c.patterns.alert_count))
            .sum()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Direction;
    use serde_json::json;

    fn base_document() -> serde_json::Value {
        json!({
            "bank": "Test Bank",
            "portfolio": {
                "activeLoanAccounts": 10,
                "newAccountsThisMonth": 1,
                "overallRisk": "Low",
                "disbursementGrowthPct": 5
            },
            "loanPeriods": [
                { "month": "Jan 2024", "disbursed": 100, "utilized": 80 }
            ],
            "customers": [
                {
                    "id": 1,
                    "name": "Acme",
                    "compliance": "High",
                    "risk": "Low",
                    "utilizationRate": "80%",
                    "behavioralScore": "Good",
                    "patterns": {
                        "loanMisuse": "None",
                        "fraudRisk": "Low",
                        "fundDiversion": "None",
                        "alerts": 2
                    },
                    "transactions": {
                        "debit": [
                            { "date": "2024-03-01", "amount": 500, "category": "Equipment",
                              "paymentMethod": "RTGS", "flag": false, "year": 2024, "month": "March" }
                        ],
                        "credit": []
                    }
                }
            ]
        })
    }

    fn load(doc: &serde_json::Value) -> Result<Dataset> {
        Dataset::from_json(&doc.to_string())
    }

    #[test]
    fn test_valid_document_loads() {
        let ds = load(&base_document()).unwrap();

        assert_eq!(ds.bank_name(), "Test Bank");
        assert_eq!(ds.customers().len(), 1);
        assert_eq!(ds.customer(1).unwrap().name, "Acme");
        assert!(ds.customer(99).is_none());
        assert_eq!(ds.total_alerts(), 2);
        assert_eq!(ds.loan_summary().rate_label(), "80.0%");
    }

    #[test]
    fn test_unknown_payment_method_is_rejected_with_path() {
        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["paymentMethod"] = json!("UPI");

        let err = load(&doc).unwrap_err();
        assert!(matches!(
            err.root(),
            DashboardError::UnrecognizedPaymentMethod { value } if value == "UPI"
        ));
        assert!(err.to_string().starts_with("customers[0]: transactions.debit[0]: "));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["amount"] = json!(-1);

        let err = load(&doc).unwrap_err();
        assert!(matches!(err.root(), DashboardError::NegativeAmount { amount: -1 }));
    }

    #[test]
    fn test_duplicate_customer_id_is_rejected() {
        let mut doc = base_document();
        let copy = doc["customers"][0].clone();
        doc["customers"].as_array_mut().unwrap().push(copy);

        let err = load(&doc).unwrap_err();
        assert!(matches!(err.root(), DashboardError::DuplicateCustomerId { id: 1 }));
        assert!(err.to_string().starts_with("customers[1]"));
    }

    #[test]
    fn test_month_must_match_date() {
        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["month"] = json!("April");

        let err = load(&doc).unwrap_err();
        assert!(matches!(err.root(), DashboardError::DateMismatch { .. }));

        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["year"] = json!(2023);
        assert!(matches!(load(&doc).unwrap_err().root(), DashboardError::DateMismatch { .. }));
    }

    #[test]
    fn test_bad_date_and_month_names() {
        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["date"] = json!("03/01/2024");
        assert!(matches!(load(&doc).unwrap_err().root(), DashboardError::InvalidDate { .. }));

        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["month"] = json!("Marchember");
        assert!(matches!(load(&doc).unwrap_err().root(), DashboardError::InvalidMonth { .. }));
    }

    #[test]
    fn test_over_utilized_period_is_rejected() {
        let mut doc = base_document();
        doc["loanPeriods"][0]["utilized"] = json!(101);

        let err = load(&doc).unwrap_err();
        assert!(matches!(
            err.root(),
            DashboardError::OverUtilized { disbursed: 100, utilized: 101, .. }
        ));
        assert!(err.to_string().starts_with("loanPeriods[0]"));
    }

    #[test]
    fn test_unknown_levels_are_rejected() {
        let mut doc = base_document();
        doc["customers"][0]["behavioralScore"] = json!("Fine");
        let err = load(&doc).unwrap_err();
        assert!(err.to_string().contains("behavioralScore"));

        let mut doc = base_document();
        doc["portfolio"]["overallRisk"] = json!("Extreme");
        let err = load(&doc).unwrap_err();
        assert!(err.to_string().starts_with("portfolio.overallRisk"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = Dataset::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DashboardError::Parse(_)));
    }

    #[test]
    fn test_transaction_total_overflow_is_rejected() {
        let mut doc = base_document();
        let tx = doc["customers"][0]["transactions"]["debit"][0].clone();
        let debits: Vec<_> = (0..3)
            .map(|_| {
                let mut t = tx.clone();
                t["amount"] = json!(i64::MAX);
                t
            })
            .collect();
        doc["customers"][0]["transactions"]["debit"] = json!(debits);

        let err = load(&doc).unwrap_err();
        assert!(matches!(
            err.root(),
            DashboardError::AmountOverflow { kind: "transaction" }
        ));
        assert!(err.to_string().starts_with("customers[0]: "));
    }

    #[test]
    fn test_overflow_spanning_customers_names_the_later_one() {
        let mut doc = base_document();
        doc["customers"][0]["transactions"]["debit"][0]["amount"] = json!(i64::MAX);
        let mut second = doc["customers"][0].clone();
        second["id"] = json!(2);
        second["transactions"]["credit"] = second["transactions"]["debit"].clone();
        doc["customers"].as_array_mut().unwrap().push(second);

        let err = load(&doc).unwrap_err();
        assert!(matches!(err.root(), DashboardError::AmountOverflow { .. }));
        assert!(err.to_string().starts_with("customers[1]: "));
    }

    #[test]
    fn test_disbursed_total_overflow_is_rejected() {
        let mut doc = base_document();
        let period = json!({ "month": "Big", "disbursed": i64::MAX, "utilized": i64::MAX });
        doc["loanPeriods"] = json!([period.clone(), period.clone(), period]);

        let err = load(&doc).unwrap_err();
        assert!(matches!(
            err.root(),
            DashboardError::AmountOverflow { kind: "disbursed" }
        ));
        assert!(err.to_string().starts_with("loanPeriods[2]: "));
    }

    #[test]
    fn test_largest_representable_totals_still_aggregate() {
        let mut doc = base_document();
        let tx = doc["customers"][0]["transactions"]["debit"][0].clone();
        let mut big = tx.clone();
        big["amount"] = json!(i64::MAX);
        doc["customers"][0]["transactions"]["debit"] = json!([big.clone(), big]);
        let period = json!({ "month": "Big", "disbursed": i64::MAX, "utilized": i64::MAX });
        doc["loanPeriods"] = json!([period.clone(), period]);

        let ds = load(&doc).unwrap();
        let expected = u64::MAX - 1;
        assert_eq!(
            ds.aggregations().bucket(Direction::Debit, PaymentMethod::Rtgs).total_amount,
            expected
        );
        assert_eq!(ds.aggregations().total_amount(), expected);

        let summary = ds.loan_summary();
        assert_eq!(summary.total_disbursed, expected);
        assert_eq!(summary.rate_label(), "100.0%");
    }
}
