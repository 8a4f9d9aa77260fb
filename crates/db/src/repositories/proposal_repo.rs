//! Repository for the `proposals` table and the status machine driving
//! the freelancer-side client snapshots.

use lancer_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::freelancer::ClientSource;
use crate::models::proposal::{
    CreateProposal, Proposal, ProposalClient, ProposalStatus, UpdateProposal,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, freelancer_id, client_id, title, status, client, overview, \
    scope_of_work, timeline_start, timeline_end, total, terms, created_at, updated_at";

/// Provides CRUD and status-transition operations for proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a new proposal. Status always starts at `Pending`.
    pub async fn create(
        pool: &PgPool,
        freelancer_id: DbId,
        input: &CreateProposal,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposals
                (freelancer_id, client_id, title, client, overview, scope_of_work,
                 timeline_start, timeline_end, total, terms)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '[]'::jsonb), $7, $8, $9,
                     COALESCE($10, '[]'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(freelancer_id)
            .bind(input.client_id)
            .bind(&input.title)
            .bind(input.client.as_ref().map(Json))
            .bind(&input.overview)
            .bind(input.scope_of_work.as_ref().map(Json))
            .bind(input.timeline_start)
            .bind(input.timeline_end)
            .bind(input.total)
            .bind(input.terms.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// List a freelancer's proposals, newest first, optionally filtered
    /// by status.
    pub async fn list_by_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposals
             WHERE freelancer_id = $1 AND ($2::proposal_status IS NULL OR status = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(freelancer_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List a client's proposals, newest first, optionally filtered by
    /// status.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposals
             WHERE client_id = $1 AND ($2::proposal_status IS NULL OR status = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(client_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Find a proposal owned by the given freelancer.
    pub async fn find_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
        proposal_id: DbId,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM proposals WHERE id = $1 AND freelancer_id = $2");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(freelancer_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a proposal addressed to the given client, optionally
    /// requiring a status (the client "project" views only see Accepted).
    pub async fn find_for_client(
        pool: &PgPool,
        client_id: DbId,
        proposal_id: DbId,
        status: Option<ProposalStatus>,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposals
             WHERE id = $1 AND client_id = $2 AND ($3::proposal_status IS NULL OR status = $3)"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(client_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Update a proposal's content fields, scoped to the owning
    /// freelancer. Identity and status are not touchable here.
    pub async fn update(
        pool: &PgPool,
        freelancer_id: DbId,
        proposal_id: DbId,
        input: &UpdateProposal,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "UPDATE proposals SET
                title = COALESCE($3, title),
                client = COALESCE($4, client),
                overview = COALESCE($5, overview),
                scope_of_work = COALESCE($6, scope_of_work),
                timeline_start = COALESCE($7, timeline_start),
                timeline_end = COALESCE($8, timeline_end),
                total = COALESCE($9, total),
                terms = COALESCE($10, terms)
             WHERE id = $1 AND freelancer_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(freelancer_id)
            .bind(&input.title)
            .bind(input.client.as_ref().map(Json))
            .bind(&input.overview)
            .bind(input.scope_of_work.as_ref().map(Json))
            .bind(input.timeline_start)
            .bind(input.timeline_end)
            .bind(input.total)
            .bind(input.terms.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a proposal owned by the given freelancer. Returns `true`
    /// if a row was removed.
    pub async fn delete_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
        proposal_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1 AND freelancer_id = $2")
            .bind(proposal_id)
            .bind(freelancer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an Accepted proposal from the client's project view.
    /// Returns `true` if a row was removed.
    pub async fn delete_accepted_for_client(
        pool: &PgPool,
        client_id: DbId,
        proposal_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM proposals WHERE id = $1 AND client_id = $2 AND status = 'Accepted'",
        )
        .bind(proposal_id)
        .bind(client_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Drive the 3-state status machine, scoped to the addressed client.
    ///
    /// In one transaction:
    /// - `Accepted`: insert the freelancer-side client snapshot sourced
    ///   from the proposal's embedded client sub-document. The unique
    ///   (freelancer, client) pair makes repeated accepts idempotent.
    /// - `Rejected`: delete the matching acceptance-sourced snapshot.
    ///   A no-op when the client was never accepted; book entries the
    ///   freelancer created by hand are left alone.
    /// - `Pending`: no snapshot side effect.
    ///
    /// then persist the proposal's own status. Returns `None` when the
    /// proposal does not exist or is not addressed to the client.
    pub async fn set_status(
        pool: &PgPool,
        client_id: DbId,
        proposal_id: DbId,
        status: ProposalStatus,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("SELECT {COLUMNS} FROM proposals WHERE id = $1 AND client_id = $2 FOR UPDATE");
        let Some(proposal) = sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(client_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        match status {
            ProposalStatus::Accepted => {
                let snapshot = proposal
                    .client
                    .as_ref()
                    .map(|Json(c)| c.clone())
                    .unwrap_or_else(ProposalClient::default);
                sqlx::query(
                    "INSERT INTO freelancer_clients
                        (freelancer_id, client_id, source, name, company, email, phone)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     ON CONFLICT ON CONSTRAINT uq_freelancer_clients_pair DO NOTHING",
                )
                .bind(proposal.freelancer_id)
                .bind(proposal.client_id)
                .bind(ClientSource::Accepted)
                .bind(&snapshot.name)
                .bind(&snapshot.company)
                .bind(&snapshot.email)
                .bind(&snapshot.phone)
                .execute(&mut *tx)
                .await?;
            }
            ProposalStatus::Rejected => {
                sqlx::query(
                    "DELETE FROM freelancer_clients
                     WHERE freelancer_id = $1 AND client_id = $2 AND source = $3",
                )
                .bind(proposal.freelancer_id)
                .bind(proposal.client_id)
                .bind(ClientSource::Accepted)
                .execute(&mut *tx)
                .await?;
            }
            ProposalStatus::Pending => {}
        }

        let query = format!("UPDATE proposals SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}
