// 📤 CSV export - aggregation buckets and the flat transaction ledger

use crate::aggregation::TransactionAggregations;
use crate::entities::Customer;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct BucketRow {
    direction: &'static str,
    payment_method: &'static str,
    count: u64,
    total_amount: u64,
}

#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    customer_id: u32,
    customer: &'a str,
    direction: &'static str,
    date: String,
    year: i32,
    month: &'static str,
    amount: u64,
    category: &'a str,
    payment_method: &'static str,
    flagged: bool,
}

/// One row per bucket, debit first, methods in canonical order
pub fn write_aggregations_csv<W: Write>(aggregations: &TransactionAggregations, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    for (direction, method, bucket) in aggregations.buckets() {
        wtr.serialize(BucketRow {
            direction: direction.as_str(),
            payment_method: method.as_str(),
            count: bucket.count,
            total_amount: bucket.total_amount,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Every transaction of every customer, customers in dataset order
pub fn write_transactions_csv<W: Write>(customers: &[Customer], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    for customer in customers {
        for (direction, tx) in customer.transactions.iter() {
            wtr.serialize(TransactionRow {
                customer_id: customer.id,
                customer: &customer.name,
                direction: direction.as_str(),
                date: tx.date.format("%Y-%m-%d").to_string(),
                year: tx.year,
                month: tx.month.name(),
                amount: tx.amount,
                category: &tx.category,
                payment_method: tx.payment_method.as_str(),
                flagged: tx.flagged,
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}
