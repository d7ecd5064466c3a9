// 💸 Transaction Entity - one debit or credit movement on a loan account

use super::levels::{Direction, PaymentMethod};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Serialize, Serializer};

// ============================================================================
// TRANSACTION
// ============================================================================

/// A single movement of funds. Amounts are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: u64,
    pub category: String,
    pub payment_method: PaymentMethod,

    /// Marked suspicious in the source data (never derived)
    #[serde(rename = "flag")]
    pub flagged: bool,

    pub year: i32,
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
}

impl Transaction {
    /// Build a transaction whose year and month are taken from `date`
    pub fn new(date: NaiveDate, amount: u64, category: &str, payment_method: PaymentMethod) -> Self {
        Transaction {
            date,
            amount,
            category: category.to_string(),
            payment_method,
            flagged: false,
            year: date.year(),
            month: month_of(date),
        }
    }

    pub fn with_flag(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }

    pub fn status(&self) -> &'static str {
        if self.flagged {
            "Flagged"
        } else {
            "Normal"
        }
    }
}

/// Calendar month containing `date`
pub fn month_of(date: NaiveDate) -> Month {
    // NaiveDate::month is always in 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

fn serialize_month<S: Serializer>(month: &Month, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(month.name())
}

// ============================================================================
// DEBIT / CREDIT LISTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionLists {
    pub debit: Vec<Transaction>,
    pub credit: Vec<Transaction>,
}

impl TransactionLists {
    pub fn get(&self, direction: Direction) -> &[Transaction] {
        match direction {
            Direction::Debit => &self.debit,
            Direction::Credit => &self.credit,
        }
    }

    /// Every transaction tagged with its direction, debits first
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Transaction)> {
        self.debit
            .iter()
            .map(|tx| (Direction::Debit, tx))
            .chain(self.credit.iter().map(|tx| (Direction::Credit, tx)))
    }

    pub fn len(&self) -> usize {
        self.debit.len() + self.credit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debit.is_empty() && self.credit.is_empty()
    }
}
