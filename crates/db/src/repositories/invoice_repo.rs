//! Repository for the `invoices` table.
//!
//! Invoices are insert-only; there is deliberately no update operation.

use lancer_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::invoice::{CreateInvoice, Invoice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, freelancer_id, client_id, invoice_number, invoice_date, items, \
    sub_total, tax_rate, tax_amount, grand_total, payment_method, terms, created_at";

/// Provides insert and listing operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice with pre-computed totals, returning the row.
    pub async fn create(pool: &PgPool, input: &CreateInvoice) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices
                (freelancer_id, client_id, invoice_number, invoice_date, items,
                 sub_total, tax_rate, tax_amount, grand_total, payment_method, terms)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(input.freelancer_id)
            .bind(input.client_id)
            .bind(&input.invoice_number)
            .bind(input.invoice_date)
            .bind(Json(&input.items))
            .bind(input.sub_total)
            .bind(input.tax_rate)
            .bind(input.tax_amount)
            .bind(input.grand_total)
            .bind(input.payment_method.as_ref().map(Json))
            .bind(&input.terms)
            .fetch_one(pool)
            .await
    }

    /// List a freelancer's invoices, newest first.
    pub async fn list_by_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE freelancer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(freelancer_id)
            .fetch_all(pool)
            .await
    }

    /// List a client's invoices, newest first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM invoices WHERE client_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }
}
