// Loan Monitor - Web Server
// Read-only JSON API over the embedded dataset

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use loan_monitor::{
    aggregate_one, format_inr, init_tracing, AggregationBucket, Config, Customer, Dataset,
    Direction, LoanPeriod, LoanSummary, PaymentMethod, PortfolioSnapshot, Transaction,
    TransactionAggregations,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state (immutable after startup, so no lock)
#[derive(Clone)]
struct AppState {
    dataset: Arc<Dataset>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

fn not_found(message: String) -> Response {
    warn!("{}", message);
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse {
            success: false,
            data: None::<()>,
            error: Some(message),
        }),
    )
        .into_response()
}

/// Bucket with its amount pre-formatted for display
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketResponse {
    count: u64,
    total_amount: u64,
    total_amount_formatted: String,
}

impl From<AggregationBucket> for BucketResponse {
    fn from(bucket: AggregationBucket) -> Self {
        Self {
            count: bucket.count,
            total_amount: bucket.total_amount,
            total_amount_formatted: format_inr(bucket.total_amount),
        }
    }
}

/// `{"debit": {"RTGS": {...}, ...}, "credit": {...}}`
type AggregationResponse = BTreeMap<&'static str, BTreeMap<&'static str, BucketResponse>>;

fn aggregation_response(aggregations: &TransactionAggregations) -> AggregationResponse {
    let mut out: AggregationResponse = BTreeMap::new();
    for (direction, method, bucket) in aggregations.buckets() {
        out.entry(direction.as_str())
            .or_default()
            .insert(method.as_str(), bucket.into());
    }
    out
}

/// Customer row without transactions
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerSummaryResponse {
    id: u32,
    name: String,
    compliance: String,
    risk: String,
    utilization_rate: String,
    behavioral_score: String,
    alerts: u32,
    flagged_transactions: usize,
}

impl From<&Customer> for CustomerSummaryResponse {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            compliance: c.compliance_level.to_string(),
            risk: c.risk_level.to_string(),
            utilization_rate: c.utilization_rate.to_string(),
            behavioral_score: c.behavioral_score.to_string(),
            alerts: c.patterns.alert_count,
            flagged_transactions: c.flagged_count(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlaggedTransactionResponse {
    direction: Direction,
    #[serde(flatten)]
    transaction: Transaction,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverviewResponse {
    bank: String,
    portfolio: PortfolioSnapshot,
    loans: LoanSummary,
    total_disbursed_formatted: String,
    total_alerts: u64,
    customer_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MethodsResponse {
    payment_methods: Vec<PaymentMethod>,
    directions: Vec<Direction>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/overview - Headline figures
async fn get_overview(State(state): State<AppState>) -> impl IntoResponse {
    let ds = &state.dataset;
    let loans = ds.loan_summary();

    Json(ApiResponse::ok(OverviewResponse {
        bank: ds.bank_name().to_string(),
        portfolio: ds.portfolio().clone(),
        total_disbursed_formatted: format_inr(loans.total_disbursed),
        loans,
        total_alerts: ds.total_alerts(),
        customer_count: ds.customers().len(),
    }))
}

/// GET /api/methods - The closed enumerations used as aggregation keys
async fn get_methods() -> impl IntoResponse {
    Json(ApiResponse::ok(MethodsResponse {
        payment_methods: PaymentMethod::ALL.to_vec(),
        directions: Direction::ALL.to_vec(),
    }))
}

/// GET /api/aggregations - Totals across all customers
async fn get_aggregations(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(aggregation_response(&state.dataset.aggregations())))
}

/// GET /api/customers - Customer list without transactions
async fn get_customers(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<CustomerSummaryResponse> = state
        .dataset
        .customers()
        .iter()
        .map(CustomerSummaryResponse::from)
        .collect();

    Json(ApiResponse::ok(response))
}

/// GET /api/customers/:id - Full customer record
async fn get_customer(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    match state.dataset.customer(id) {
        Some(customer) => Json(ApiResponse::ok(customer)).into_response(),
        None => not_found(format!("Customer {} not found", id)),
    }
}

/// GET /api/customers/:id/aggregations - Totals for one customer
async fn get_customer_aggregations(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    match state.dataset.customer(id) {
        Some(customer) => {
            Json(ApiResponse::ok(aggregation_response(&aggregate_one(customer)))).into_response()
        }
        None => not_found(format!("Customer {} not found", id)),
    }
}

/// GET /api/customers/:id/flagged - Suspicious transactions for one customer
async fn get_customer_flagged(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    match state.dataset.customer(id) {
        Some(customer) => {
            let flagged: Vec<FlaggedTransactionResponse> = customer
                .flagged_transactions()
                .map(|(direction, tx)| FlaggedTransactionResponse {
                    direction,
                    transaction: tx.clone(),
                })
                .collect();
            Json(ApiResponse::ok(flagged)).into_response()
        }
        None => not_found(format!("Customer {} not found", id)),
    }
}

/// GET /api/loans - Monthly loan periods
async fn get_loans(State(state): State<AppState>) -> impl IntoResponse {
    let periods: Vec<LoanPeriod> = state.dataset.loan_periods().to_vec();
    Json(ApiResponse::ok(periods))
}

/// GET /api/loans/summary - Totals and average utilization
async fn get_loan_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dataset.loan_summary()))
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/overview", get(get_overview))
        .route("/methods", get(get_methods))
        .route("/aggregations", get(get_aggregations))
        .route("/customers", get(get_customers))
        .route("/customers/:id", get(get_customer))
        .route("/customers/:id/aggregations", get(get_customer_aggregations))
        .route("/customers/:id/flagged", get(get_customer_flagged))
        .route("/loans", get(get_loans))
        .route("/loans/summary", get(get_loan_summary))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,tower_http=debug");

    let config = Config::from_env()?;
    let dataset = Dataset::load_embedded().context("Embedded fixture failed validation")?;
    info!(
        bank = dataset.bank_name(),
        customers = dataset.customers().len(),
        "dataset loaded"
    );

    let state = AppState {
        dataset: Arc::new(dataset),
    };

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind to address");

    info!("🚀 Server running on http://{}", config.addr);
    info!("   API: http://{}/api/aggregations", config.addr);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
