// 📊 Aggregator - folds the dataset into dashboard summary tables
//
// Every function here is a pure fold over borrowed input. The accumulator is
// a local value threaded through the fold, so repeated calls never share state.

use crate::entities::{Customer, Direction, LoanPeriod, PaymentMethod};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ============================================================================
// BUCKETS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationBucket {
    pub count: u64,
    pub total_amount: u64,
}

impl AggregationBucket {
    // Dataset loading guarantees the running totals fit in u64
    fn record(&mut self, amount: u64) {
        self.count += 1;
        self.total_amount += amount;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Add for AggregationBucket {
    type Output = AggregationBucket;

    fn add(self, other: AggregationBucket) -> AggregationBucket {
        AggregationBucket {
            count: self.count + other.count,
            total_amount: self.total_amount + other.total_amount,
        }
    }
}

/// One bucket per payment method, always all four
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MethodTotals([AggregationBucket; 4]);

impl MethodTotals {
    pub fn get(&self, method: PaymentMethod) -> AggregationBucket {
        self.0[method.index()]
    }

    fn get_mut(&mut self, method: PaymentMethod) -> &mut AggregationBucket {
        &mut self.0[method.index()]
    }

    /// Buckets in canonical method order (RTGS, Cash, Cheque, NEFT)
    pub fn iter(&self) -> impl Iterator<Item = (PaymentMethod, AggregationBucket)> + '_ {
        PaymentMethod::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    pub fn total(&self) -> AggregationBucket {
        self.0.iter().copied().fold(AggregationBucket::default(), Add::add)
    }
}

impl Add for MethodTotals {
    type Output = MethodTotals;

    fn add(mut self, other: MethodTotals) -> MethodTotals {
        for method in PaymentMethod::ALL {
            *self.get_mut(method) = self.get(method) + other.get(method);
        }
        self
    }
}

/// Serialized as `{"RTGS": {...}, "Cash": {...}, "Cheque": {...}, "NEFT": {...}}`
impl Serialize for MethodTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PaymentMethod::ALL.len()))?;
        for (method, bucket) in self.iter() {
            map.serialize_entry(method.as_str(), &bucket)?;
        }
        map.end()
    }
}

// ============================================================================
// TRANSACTION AGGREGATIONS
// ============================================================================

/// Direction x payment method -> bucket. All eight buckets are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionAggregations {
    pub debit: MethodTotals,
    pub credit: MethodTotals,
}

impl TransactionAggregations {
    pub fn direction(&self, direction: Direction) -> &MethodTotals {
        match direction {
            Direction::Debit => &self.debit,
            Direction::Credit => &self.credit,
        }
    }

    fn direction_mut(&mut self, direction: Direction) -> &mut MethodTotals {
        match direction {
            Direction::Debit => &mut self.debit,
            Direction::Credit => &mut self.credit,
        }
    }

    pub fn bucket(&self, direction: Direction, method: PaymentMethod) -> AggregationBucket {
        self.direction(direction).get(method)
    }

    /// All eight buckets, debit first, methods in canonical order
    pub fn buckets(&self) -> impl Iterator<Item = (Direction, PaymentMethod, AggregationBucket)> + '_ {
        Direction::ALL.into_iter().flat_map(move |d| {
            self.direction(d).iter().map(move |(m, b)| (d, m, b))
        })
    }

    pub fn total_count(&self) -> u64 {
        self.debit.total().count + self.credit.total().count
    }

    pub fn total_amount(&self) -> u64 {
        self.debit.total().total_amount + self.credit.total().total_amount
    }

    /// Fold one customer's transactions into this accumulator
    fn absorb(mut self, customer: &Customer) -> Self {
        for (direction, tx) in customer.transactions.iter() {
            self.direction_mut(direction)
                .get_mut(tx.payment_method)
                .record(tx.amount);
        }
        self
    }
}

impl Add for TransactionAggregations {
    type Output = TransactionAggregations;

    fn add(self, other: TransactionAggregations) -> TransactionAggregations {
        TransactionAggregations {
            debit: self.debit + other.debit,
            credit: self.credit + other.credit,
        }
    }
}

impl AddAssign for TransactionAggregations {
    fn add_assign(&mut self, other: TransactionAggregations) {
        *self = *self + other;
    }
}

impl Sum for TransactionAggregations {
    fn sum<I: Iterator<Item = TransactionAggregations>>(iter: I) -> Self {
        iter.fold(TransactionAggregations::default(), Add::add)
    }
}

/// Aggregate every customer's transactions by direction and payment method.
///
/// Input order does not affect the result. An empty slice yields eight
/// zeroed buckets.
pub fn aggregate_all(customers: &[Customer]) -> TransactionAggregations {
    customers
        .iter()
        .fold(TransactionAggregations::default(), TransactionAggregations::absorb)
}

/// Aggregate a single customer, as shown in the per-customer detail view.
///
/// Summing this over a collection equals `aggregate_all` on that collection.
pub fn aggregate_one(customer: &Customer) -> TransactionAggregations {
    TransactionAggregations::default().absorb(customer)
}

// ============================================================================
// LOAN PERIOD SUMMARY
// ============================================================================

/// Utilization as a percentage, held in tenths so it is exact to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtilizationRate {
    tenths: u64,
}

impl UtilizationRate {
    /// `utilized / disbursed x 100`, rounded half-up to one decimal place.
    /// Returns `None` when nothing was disbursed.
    pub fn from_amounts(utilized: u64, disbursed: u64) -> Option<Self> {
        if disbursed == 0 {
            return None;
        }
        let numerator = utilized as u128 * 1000;
        let denominator = disbursed as u128;
        let tenths = (numerator + denominator / 2) / denominator;
        Some(UtilizationRate {
            tenths: u64::try_from(tenths).unwrap_or(u64::MAX),
        })
    }

    pub fn tenths(&self) -> u64 {
        self.tenths
    }
}

/// Fixed one-decimal form, e.g. `87.1`
impl fmt::Display for UtilizationRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl Serialize for UtilizationRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub total_disbursed: u64,
    pub total_utilized: u64,
    /// `None` when total disbursement is zero
    pub average_utilization_rate: Option<UtilizationRate>,
}

impl LoanSummary {
    pub fn rate_label(&self) -> String {
        match self.average_utilization_rate {
            Some(rate) => format!("{}%", rate),
            None => "n/a".to_string(),
        }
    }
}

/// Sum disbursed and utilized amounts and derive the average utilization rate
pub fn summarize_loan_periods(periods: &[LoanPeriod]) -> LoanSummary {
    let (total_disbursed, total_utilized) = periods.iter().fold((0u64, 0u64), |(d, u), p| {
        (d + p.disbursed_amount, u + p.utilized_amount)
    });

    LoanSummary {
        total_disbursed,
        total_utilized,
        average_utilization_rate: UtilizationRate::from_amounts(total_utilized, total_disbursed),
    }
}

// ============================================================================
// TESTS
// ============================================================================
