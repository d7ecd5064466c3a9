// 🏷️ Closed enumerations - payment channels, directions and risk levels
//
// The fixture spells these as free strings. Parsing them into enums here means
// an unknown value is rejected once, at load time, instead of surfacing as a
// missed lookup during aggregation.

use crate::error::DashboardError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PAYMENT METHOD
// ============================================================================

/// Settlement channel of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PaymentMethod {
    #[serde(rename = "RTGS")]
    Rtgs,
    Cash,
    Cheque,
    #[serde(rename = "NEFT")]
    Neft,
}

impl PaymentMethod {
    /// Canonical ordering used by every table and export
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Rtgs,
        PaymentMethod::Cash,
        PaymentMethod::Cheque,
        PaymentMethod::Neft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Rtgs => "RTGS",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Neft => "NEFT",
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            PaymentMethod::Rtgs => 0,
            PaymentMethod::Cash => 1,
            PaymentMethod::Cheque => 2,
            PaymentMethod::Neft => 3,
        }
    }

    /// Electronic interbank transfer (RTGS or NEFT)
    pub fn is_electronic(&self) -> bool {
        matches!(self, PaymentMethod::Rtgs | PaymentMethod::Neft)
    }
}

impl FromStr for PaymentMethod {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RTGS" => Ok(PaymentMethod::Rtgs),
            "Cash" => Ok(PaymentMethod::Cash),
            "Cheque" => Ok(PaymentMethod::Cheque),
            "NEFT" => Ok(PaymentMethod::Neft),
            other => Err(DashboardError::UnrecognizedPaymentMethod {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Debit, Direction::Credit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Direction::Debit => "Debit",
            Direction::Credit => "Credit",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// COMPLIANCE / RISK / BEHAVIOUR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComplianceLevel {
    High,
    Medium,
    Low,
}

impl ComplianceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceLevel::High => "High",
            ComplianceLevel::Medium => "Medium",
            ComplianceLevel::Low => "Low",
        }
    }
}

impl FromStr for ComplianceLevel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(ComplianceLevel::High),
            "Medium" => Ok(ComplianceLevel::Medium),
            "Low" => Ok(ComplianceLevel::Low),
            other => Err(DashboardError::UnrecognizedLevel {
                kind: "compliance",
                value: other.to_string(),
            }),
        }
    }
}

/// Used for a customer's lending risk, fraud risk and the portfolio headline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(DashboardError::UnrecognizedLevel {
                kind: "risk",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BehavioralScore {
    Good,
    #[serde(rename = "Needs Monitoring")]
    NeedsMonitoring,
    Critical,
}

impl BehavioralScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehavioralScore::Good => "Good",
            BehavioralScore::NeedsMonitoring => "Needs Monitoring",
            BehavioralScore::Critical => "Critical",
        }
    }
}

impl FromStr for BehavioralScore {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Good" => Ok(BehavioralScore::Good),
            "Needs Monitoring" => Ok(BehavioralScore::NeedsMonitoring),
            "Critical" => Ok(BehavioralScore::Critical),
            other => Err(DashboardError::UnrecognizedLevel {
                kind: "behavioral",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(ComplianceLevel, RiskLevel, BehavioralScore);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trips_through_str() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
            assert_eq!(PaymentMethod::ALL[method.index()], method);
        }
    }

    #[test]
    fn test_payment_method_is_case_sensitive() {
        let err = "rtgs".parse::<PaymentMethod>().unwrap_err();
        assert!(matches!(err, DashboardError::UnrecognizedPaymentMethod { ref value } if value == "rtgs"));
        assert!("UPI".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_wire_names_match_fixture_spelling() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Neft).unwrap(), "\"NEFT\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Cheque).unwrap(), "\"Cheque\"");
        assert_eq!(serde_json::to_string(&Direction::Credit).unwrap(), "\"credit\"");
        assert_eq!(
            serde_json::to_string(&BehavioralScore::NeedsMonitoring).unwrap(),
            "\"Needs Monitoring\""
        );
    }

    #[test]
    fn test_unknown_level_names_its_kind() {
        let err = "Severe".parse::<RiskLevel>().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized risk level: \"Severe\"");

        let err = "Okay".parse::<BehavioralScore>().unwrap_err();
        assert!(err.to_string().contains("behavioral"));
    }

    #[test]
    fn test_electronic_channels() {
        assert!(PaymentMethod::Rtgs.is_electronic());
        assert!(PaymentMethod::Neft.is_electronic());
        assert!(!PaymentMethod::Cash.is_electronic());
        assert!(!PaymentMethod::Cheque.is_electronic());
    }
}
