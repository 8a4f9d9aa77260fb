//! Invoice endpoints. Totals are computed server-side once, at
//! creation; whatever the caller sends for totals is ignored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lancer_core::invoice::{compute_totals, InvoiceItem};
use lancer_core::types::{DbId, Timestamp};
use lancer_db::models::invoice::{CreateInvoice, Invoice, PaymentMethod};
use lancer_db::models::session::ActorKind;
use lancer_db::repositories::{ClientRepo, InvoiceRepo};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(alias = "invoiceNumber")]
    pub invoice_number: Option<String>,
    #[serde(alias = "invoiceDate")]
    pub invoice_date: Option<Timestamp>,
    pub items: Vec<InvoiceItem>,
    #[serde(default, alias = "taxRate")]
    pub tax_rate: f64,
    #[serde(alias = "paymentMethod")]
    pub payment_method: Option<PaymentMethod>,
    pub terms: Option<String>,
}

/// POST /freelancers/{freelancer_id}/clients/{client_id}/invoices
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((freelancer_id, client_id)): Path<(DbId, DbId)>,
    Json(req): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;

    ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or_else(|| AppError::not_found("client", client_id))?;

    let totals = compute_totals(&req.items, req.tax_rate)?;

    let invoice = InvoiceRepo::create(
        &state.pool,
        &CreateInvoice {
            freelancer_id,
            client_id,
            invoice_number: req.invoice_number,
            invoice_date: req.invoice_date,
            items: totals.items,
            sub_total: totals.sub_total,
            tax_rate: req.tax_rate,
            tax_amount: totals.tax_amount,
            grand_total: totals.grand_total,
            payment_method: req.payment_method,
            terms: req.terms,
        },
    )
    .await?;

    tracing::info!(freelancer_id, client_id, invoice_id = invoice.id, "invoice created");
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /freelancers/{freelancer_id}/invoices
pub async fn list_for_freelancer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(freelancer_id): Path<DbId>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    auth.require(ActorKind::Freelancer, freelancer_id)?;
    let invoices = InvoiceRepo::list_by_freelancer(&state.pool, freelancer_id).await?;
    Ok(Json(invoices))
}

/// GET /clients/{client_id}/invoices
pub async fn list_for_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(client_id): Path<DbId>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    auth.require(ActorKind::Client, client_id)?;
    let invoices = InvoiceRepo::list_by_client(&state.pool, client_id).await?;
    Ok(Json(invoices))
}
