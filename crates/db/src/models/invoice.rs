//! Invoice entity model and DTOs.
//!
//! Invoices are immutable snapshots: totals are computed once at
//! creation (see `lancer_core::invoice`) and no update endpoint exists.

use lancer_core::invoice::InvoiceItem;
use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Bank details for settling an invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
}

/// An invoice row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub freelancer_id: DbId,
    pub client_id: DbId,
    pub invoice_number: Option<String>,
    pub invoice_date: Timestamp,
    pub items: Json<Vec<InvoiceItem>>,
    pub sub_total: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub payment_method: Option<Json<PaymentMethod>>,
    pub terms: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting an invoice whose totals have already been computed.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub freelancer_id: DbId,
    pub client_id: DbId,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<Timestamp>,
    pub items: Vec<InvoiceItem>,
    pub sub_total: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub payment_method: Option<PaymentMethod>,
    pub terms: Option<String>,
}
