//! Invoice line-item arithmetic.
//!
//! Totals are computed exactly once, at creation time, from the caller's
//! item list. Invoices have no update endpoint, so the stored totals are
//! never recomputed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single invoice line as supplied by the caller. `total` is ignored on
/// input and stamped by [`compute_totals`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub total: f64,
}

/// Computed invoice amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    /// Line items with each `total` stamped as `quantity * price`.
    pub items: Vec<InvoiceItem>,
    pub sub_total: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

/// Compute invoice totals from a line-item list and a percentage tax rate.
///
/// `sub_total = sum(quantity * price)`, `tax_amount = sub_total * tax_rate / 100`,
/// `grand_total = sub_total + tax_amount`.
///
/// Rejects an empty item list, a negative tax rate, and negative quantities
/// or prices.
pub fn compute_totals(items: &[InvoiceItem], tax_rate: f64) -> Result<InvoiceTotals, CoreError> {
    if items.is_empty() {
        return Err(CoreError::Validation(
            "Invoice must contain at least one line item".into(),
        ));
    }
    if tax_rate < 0.0 || !tax_rate.is_finite() {
        return Err(CoreError::Validation(
            "Tax rate must be a non-negative number".into(),
        ));
    }

    let mut stamped = Vec::with_capacity(items.len());
    let mut sub_total = 0.0;
    for item in items {
        if item.quantity < 0.0 || item.price < 0.0 {
            return Err(CoreError::Validation(format!(
                "Line item '{}' has a negative quantity or price",
                item.description
            )));
        }
        let line_total = item.quantity * item.price;
        sub_total += line_total;
        stamped.push(InvoiceItem {
            total: line_total,
            ..item.clone()
        });
    }

    let tax_amount = sub_total * tax_rate / 100.0;
    Ok(InvoiceTotals {
        items: stamped,
        sub_total,
        tax_amount,
        grand_total: sub_total + tax_amount,
    })
}
