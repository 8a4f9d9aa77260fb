//! Repository for the `freelancers` and `freelancer_clients` tables.

use lancer_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};
use crate::models::freelancer::{
    ClientSnapshot, ClientSource, CreateFreelancer, Freelancer, UpdateFreelancer,
};
use crate::repositories::ClientRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, mobile, password_hash, position, experience, location, \
    linkedin, github, twitter, profile_image, skills, services, testimonials, about, faq, \
    latest_work, created_at, updated_at";

/// Provides CRUD and snapshot operations for freelancers.
pub struct FreelancerRepo;

impl FreelancerRepo {
    /// Insert a new freelancer, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFreelancer,
    ) -> Result<Freelancer, sqlx::Error> {
        let query = format!(
            "INSERT INTO freelancers (name, email, mobile, password_hash)
             VALUES ($1, LOWER($2), $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a freelancer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Freelancer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freelancers WHERE id = $1");
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a freelancer by email (used by login).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Freelancer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freelancers WHERE email = LOWER($1)");
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update a freelancer's profile. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFreelancer,
    ) -> Result<Option<Freelancer>, sqlx::Error> {
        let query = format!(
            "UPDATE freelancers SET
                name = COALESCE($2, name),
                position = COALESCE($3, position),
                experience = COALESCE($4, experience),
                location = COALESCE($5, location),
                linkedin = COALESCE($6, linkedin),
                github = COALESCE($7, github),
                twitter = COALESCE($8, twitter),
                skills = COALESCE($9, skills),
                services = COALESCE($10, services),
                testimonials = COALESCE($11, testimonials),
                about = COALESCE($12, about),
                faq = COALESCE($13, faq),
                latest_work = COALESCE($14, latest_work)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.experience)
            .bind(&input.location)
            .bind(&input.linkedin)
            .bind(&input.github)
            .bind(&input.twitter)
            .bind(input.skills.as_ref().map(Json))
            .bind(input.services.as_ref().map(Json))
            .bind(input.testimonials.as_ref().map(Json))
            .bind(input.about.as_ref().map(Json))
            .bind(input.faq.as_ref().map(Json))
            .bind(input.latest_work.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Point the freelancer's profile image at a newly stored file.
    /// Returns `false` if no row with the given `id` exists.
    pub async fn set_profile_image(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE freelancers SET profile_image = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the freelancer's client snapshots (the "my clients" book),
    /// oldest acceptance first.
    pub async fn list_client_snapshots(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<ClientSnapshot>, sqlx::Error> {
        sqlx::query_as::<_, ClientSnapshot>(
            "SELECT id, freelancer_id, client_id, source, name, company, email, phone, created_at
             FROM freelancer_clients
             WHERE freelancer_id = $1
             ORDER BY created_at",
        )
        .bind(freelancer_id)
        .fetch_all(pool)
        .await
    }

    /// Create a client record inside the freelancer's client book.
    ///
    /// Inserts the client row and the linking snapshot in one
    /// transaction, so the book and the directory cannot diverge.
    pub async fn add_client(
        pool: &PgPool,
        freelancer_id: DbId,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let client = ClientRepo::create(&mut *tx, input).await?;
        sqlx::query(
            "INSERT INTO freelancer_clients
                (freelancer_id, client_id, source, name, company, email, phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_freelancer_clients_pair DO NOTHING",
        )
        .bind(freelancer_id)
        .bind(client.id)
        .bind(ClientSource::Book)
        .bind(&client.name)
        .bind(&client.company_name)
        .bind(&client.email)
        .bind(&client.mobile)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(client)
    }

    /// List the live client rows behind the freelancer's snapshots.
    pub async fn list_clients(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<Client>, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            "SELECT c.id, c.name, c.email, c.mobile, c.password_hash, c.company_name,
                    c.profile_image, c.address, c.bio, c.website, c.terms_agreed,
                    c.created_at, c.updated_at
             FROM clients c
             JOIN freelancer_clients fc ON fc.client_id = c.id
             WHERE fc.freelancer_id = $1
             ORDER BY fc.created_at",
        )
        .bind(freelancer_id)
        .fetch_all(pool)
        .await
    }
}
