//! Proposal entity model and DTOs.

use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// The 3-state proposal machine. `Pending` is initial; there is no
/// terminal state — any transition target is accepted by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proposal_status")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Denormalized client contact details embedded in a proposal. This is
/// the source of the freelancer-side snapshot written on acceptance; it
/// is a display copy, never synced back to the client row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalClient {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<Timestamp>,
}

/// A proposal row from the `proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proposal {
    pub id: DbId,
    pub freelancer_id: DbId,
    pub client_id: DbId,
    pub title: Option<String>,
    pub status: ProposalStatus,
    pub client: Option<Json<ProposalClient>>,
    pub overview: Option<String>,
    pub scope_of_work: Json<Vec<String>>,
    pub timeline_start: Option<Timestamp>,
    pub timeline_end: Option<Timestamp>,
    pub total: Option<f64>,
    pub terms: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a proposal. Status always starts at `Pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposal {
    pub client_id: DbId,
    pub title: Option<String>,
    pub client: Option<ProposalClient>,
    pub overview: Option<String>,
    pub scope_of_work: Option<Vec<String>>,
    pub timeline_start: Option<Timestamp>,
    pub timeline_end: Option<Timestamp>,
    pub total: Option<f64>,
    pub terms: Option<Vec<String>>,
}

/// DTO for updating a proposal's content. Identity (freelancer/client)
/// and status are deliberately not here: identity is immutable, and
/// status only moves through the client transition endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProposal {
    pub title: Option<String>,
    pub client: Option<ProposalClient>,
    pub overview: Option<String>,
    pub scope_of_work: Option<Vec<String>>,
    pub timeline_start: Option<Timestamp>,
    pub timeline_end: Option<Timestamp>,
    pub total: Option<f64>,
    pub terms: Option<Vec<String>>,
}
