//! Repository for the `team_members` table.

use lancer_core::types::DbId;
use sqlx::PgPool;

use crate::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, role, status, bio, profile_image, mobile, created_at, updated_at";

/// Provides CRUD operations for team members.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// Insert a new team member, returning the created row.
    ///
    /// Duplicate email violates `uq_team_members_email`. Omitted
    /// status defaults to `Active`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (name, email, role, status, bio, profile_image, mobile)
             VALUES ($1, LOWER($2), $3, COALESCE($4, 'Active'), $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.status)
            .bind(&input.bio)
            .bind(&input.profile_image)
            .bind(&input.mobile)
            .fetch_one(pool)
            .await
    }

    /// Find a team member by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all team members, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members ORDER BY created_at DESC");
        sqlx::query_as::<_, TeamMember>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the ids of projects the member is currently assigned to —
    /// the inverse side of the project assignment set.
    pub async fn assigned_project_ids(
        pool: &PgPool,
        member_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT project_id FROM project_assignments
             WHERE team_member_id = $1 ORDER BY id",
        )
        .bind(member_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a team member. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET
                name = COALESCE($2, name),
                email = COALESCE(LOWER($3), email),
                role = COALESCE($4, role),
                status = COALESCE($5, status),
                bio = COALESCE($6, bio),
                profile_image = COALESCE($7, profile_image),
                mobile = COALESCE($8, mobile)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.status)
            .bind(&input.bio)
            .bind(&input.profile_image)
            .bind(&input.mobile)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team member and its assignment rows in one transaction.
    /// Returns `true` if the member existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_assignments WHERE team_member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
