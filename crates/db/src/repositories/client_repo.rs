//! Repository for the `clients` table.

use lancer_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::client::{Client, CreateClient, UpdateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, mobile, password_hash, company_name, profile_image, \
    address, bio, website, terms_agreed, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    ///
    /// Duplicate email or mobile violates a `uq_clients_*` constraint.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients
                (name, email, mobile, password_hash, company_name, profile_image,
                 address, bio, website, terms_agreed)
             VALUES ($1, LOWER($2), $3, $4, $5, $6, $7, $8, $9, COALESCE($10, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.password_hash)
            .bind(&input.company_name)
            .bind(&input.profile_image)
            .bind(input.address.as_ref().map(Json))
            .bind(&input.bio)
            .bind(&input.website)
            .bind(input.terms_agreed)
            .fetch_one(executor)
            .await
    }

    /// Find a client by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client by email (used by login).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE email = LOWER($1)");
        sqlx::query_as::<_, Client>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all clients, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at DESC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE(LOWER($3), email),
                mobile = COALESCE($4, mobile),
                company_name = COALESCE($5, company_name),
                profile_image = COALESCE($6, profile_image),
                address = COALESCE($7, address),
                bio = COALESCE($8, bio),
                website = COALESCE($9, website),
                terms_agreed = COALESCE($10, terms_agreed)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.company_name)
            .bind(&input.profile_image)
            .bind(input.address.as_ref().map(Json))
            .bind(&input.bio)
            .bind(&input.website)
            .bind(input.terms_agreed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client by ID. Returns `true` if a row was removed.
    ///
    /// Foreign keys are RESTRICT, so this fails with a 23503 database
    /// error while projects, proposals, or invoices still reference the
    /// client; the API maps that to 409 Conflict.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
