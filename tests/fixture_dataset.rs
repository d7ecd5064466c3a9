//! The embedded Janakalyan Bank dataset and its derived figures

use loan_monitor::{
    format_inr, write_aggregations_csv, write_transactions_csv, AggregationBucket, Dataset,
    Direction, PaymentMethod, RiskLevel,
};

fn dataset() -> Dataset {
    Dataset::load_embedded().expect("embedded fixture must validate")
}

#[test]
fn embedded_fixture_loads() {
    let ds = dataset();

    assert_eq!(ds.bank_name(), "Janakalyan Bank");
    assert_eq!(ds.customers().len(), 3);
    assert_eq!(ds.loan_periods().len(), 5);
    assert_eq!(ds.total_alerts(), 10);
    assert_eq!(ds.portfolio().active_loan_accounts, 127);
    assert_eq!(ds.portfolio().overall_risk, RiskLevel::Medium);
}

#[test]
fn sample_loan_summary() {
    let summary = dataset().loan_summary();

    assert_eq!(summary.total_disbursed, 85_000_000);
    assert_eq!(summary.total_utilized, 74_000_000);
    assert_eq!(summary.average_utilization_rate.unwrap().to_string(), "87.1");
    assert_eq!(format_inr(summary.total_disbursed), "₹8,50,00,000");
}

#[test]
fn sample_aggregations() {
    let agg = dataset().aggregations();
    let bucket = |d, m| agg.bucket(d, m);

    assert_eq!(bucket(Direction::Debit, PaymentMethod::Rtgs), AggregationBucket { count: 2, total_amount: 8_500_000 });
    assert_eq!(bucket(Direction::Debit, PaymentMethod::Cash), AggregationBucket { count: 2, total_amount: 10_000_000 });
    assert_eq!(bucket(Direction::Debit, PaymentMethod::Neft), AggregationBucket { count: 2, total_amount: 3_500_000 });
    assert_eq!(bucket(Direction::Debit, PaymentMethod::Cheque), AggregationBucket::default());

    assert_eq!(bucket(Direction::Credit, PaymentMethod::Cheque), AggregationBucket { count: 2, total_amount: 5_500_000 });
    assert_eq!(bucket(Direction::Credit, PaymentMethod::Rtgs), AggregationBucket { count: 1, total_amount: 4_500_000 });
    assert_eq!(bucket(Direction::Credit, PaymentMethod::Cash), AggregationBucket::default());
    assert_eq!(bucket(Direction::Credit, PaymentMethod::Neft), AggregationBucket::default());

    assert_eq!(agg.total_count(), 9);
}

#[test]
fn flagged_transactions_per_customer() {
    let ds = dataset();
    let flagged: Vec<usize> = ds.customers().iter().map(|c| c.flagged_count()).collect();
    assert_eq!(flagged, vec![0, 2, 2]);
}

#[test]
fn aggregation_csv_export() {
    let mut buf = Vec::new();
    write_aggregations_csv(&dataset().aggregations(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let expected = "\
direction,payment_method,count,total_amount
debit,RTGS,2,8500000
debit,Cash,2,10000000
debit,Cheque,0,0
debit,NEFT,2,3500000
credit,RTGS,1,4500000
credit,Cash,0,0
credit,Cheque,2,5500000
credit,NEFT,0,0
";
    assert_eq!(text, expected);
}

#[test]
fn transaction_csv_export() {
    let ds = dataset();
    let mut buf = Vec::new();
    write_transactions_csv(ds.customers(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "customer_id,customer,direction,date,year,month,amount,category,payment_method,flagged"
    );
    assert_eq!(lines.len(), 10);
    assert_eq!(
        lines[1],
        "1,Bharat Technologies Solutions,debit,2024-03-01,2024,March,5000000,Equipment,RTGS,false"
    );
    assert_eq!(
        lines[9],
        "3,Desi Digital Services,credit,2024-01-08,2024,January,4500000,Real Estate,RTGS,true"
    );
}
