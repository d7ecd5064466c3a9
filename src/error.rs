// ⚠️ Error taxonomy for fixture loading and export
// Every defect in the fixture is a local validation error surfaced to the caller

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Fixture parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unrecognized payment method: {value:?}")]
    UnrecognizedPaymentMethod { value: String },

    #[error("Unrecognized {kind} level: {value:?}")]
    UnrecognizedLevel { kind: &'static str, value: String },

    #[error("Invalid utilization rate {value:?} (expected N% with N in 0..=100)")]
    InvalidUtilization { value: String },

    #[error("Negative amount: {amount}")]
    NegativeAmount { amount: i64 },

    #[error("Invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Invalid month name: {value:?}")]
    InvalidMonth { value: String },

    #[error("Date {date} does not fall in {month} {year}")]
    DateMismatch { date: String, year: i32, month: String },

    #[error("Duplicate customer id: {id}")]
    DuplicateCustomerId { id: u32 },

    #[error("Period {month}: utilized {utilized} exceeds disbursed {disbursed}")]
    OverUtilized { month: String, disbursed: u64, utilized: u64 },

    #[error("Running {kind} total overflows the amount range")]
    AmountOverflow { kind: &'static str },

    #[error("{path}: {source}")]
    Validation {
        path: String,
        #[source]
        source: Box<DashboardError>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Attach the fixture location of the offending record
    pub fn at(self, path: impl Into<String>) -> Self {
        DashboardError::Validation {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, with any location wrappers removed
    pub fn root(&self) -> &DashboardError {
        match self {
            DashboardError::Validation { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_prefixed() {
        let err = DashboardError::NegativeAmount { amount: -5 }.at("customers[0].transactions.debit[1]");
        assert_eq!(
            err.to_string(),
            "customers[0].transactions.debit[1]: Negative amount: -5"
        );
    }

    #[test]
    fn test_root_unwraps_nested_paths() {
        let err = DashboardError::DuplicateCustomerId { id: 7 }
            .at("customers[2]")
            .at("fixture");
        assert!(matches!(err.root(), DashboardError::DuplicateCustomerId { id: 7 }));
    }
}
