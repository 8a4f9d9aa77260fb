//! Repository for the `projects`, `project_assignments`, and
//! `project_activity` tables.
//!
//! Everything that touches more than one table runs inside a single
//! transaction, so the assignment set, the activity log, and the project
//! row cannot drift apart on partial failure.

use lancer_core::reconcile::diff_assignments;
use lancer_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::models::project::{ActivityEntry, CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, freelancer_id, title, description, category, budget, \
    deadline, attachments, status, progress, created_at, updated_at";

/// Provides CRUD, assignment reconciliation, and activity logging for
/// projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project together with its initial assignment rows and a
    /// `Project created` activity entry, atomically.
    pub async fn create(
        pool: &PgPool,
        freelancer_id: DbId,
        input: &CreateProject,
    ) -> Result<(Project, Vec<DbId>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                (client_id, freelancer_id, title, description, category, budget,
                 deadline, attachments, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '[]'::jsonb),
                     COALESCE($9, 'Pending'))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(freelancer_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.budget)
            .bind(input.deadline)
            .bind(input.attachments.as_ref().map(Json))
            .bind(input.status)
            .fetch_one(&mut *tx)
            .await?;

        Self::add_assignments(&mut tx, project.id, &input.assigned_to).await?;
        Self::append_activity(&mut tx, project.id, "Project created", freelancer_id).await?;

        let assigned = Self::assigned_member_ids(&mut *tx, project.id).await?;
        tx.commit().await?;
        Ok((project, assigned))
    }

    /// Find a project owned by the given freelancer.
    pub async fn find_by_id_for_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
        project_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND freelancer_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .bind(freelancer_id)
            .fetch_optional(pool)
            .await
    }

    /// List the freelancer's projects, newest first.
    pub async fn list_by_freelancer(
        pool: &PgPool,
        freelancer_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE freelancer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(freelancer_id)
            .fetch_all(pool)
            .await
    }

    /// List the client's projects, newest first (the client-side
    /// `myProjects` view).
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE client_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of team members currently assigned to the project.
    pub async fn assigned_member_ids<'e, E>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT team_member_id FROM project_assignments
             WHERE project_id = $1 ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a project owned by the given freelancer. Only non-`None`
    /// fields are applied. A present `assigned_to` replaces the whole
    /// assignment set: the old and new sets are diffed, removed members
    /// lose their assignment row, added members gain one, all inside the
    /// same transaction as the project update and the `Project updated`
    /// activity entry.
    ///
    /// Returns `None` if the project does not exist or is not owned by
    /// the freelancer.
    pub async fn update(
        pool: &PgPool,
        freelancer_id: DbId,
        project_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<(Project, Vec<DbId>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the row so concurrent reconciliations serialize.
        let existing = sqlx::query_as::<_, (DbId,)>(
            "SELECT id FROM projects WHERE id = $1 AND freelancer_id = $2 FOR UPDATE",
        )
        .bind(project_id)
        .bind(freelancer_id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_none() {
            return Ok(None);
        }

        if let Some(new_set) = &input.assigned_to {
            let old_set = Self::assigned_member_ids(&mut *tx, project_id).await?;
            let diff = diff_assignments(&old_set, new_set);

            if !diff.removed.is_empty() {
                sqlx::query(
                    "DELETE FROM project_assignments
                     WHERE project_id = $1 AND team_member_id = ANY($2)",
                )
                .bind(project_id)
                .bind(&diff.removed)
                .execute(&mut *tx)
                .await?;
            }
            Self::add_assignments(&mut tx, project_id, &diff.added).await?;
        }

        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                budget = COALESCE($5, budget),
                deadline = COALESCE($6, deadline),
                attachments = COALESCE($7, attachments),
                status = COALESCE($8, status),
                progress = COALESCE($9, progress)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.budget)
            .bind(input.deadline)
            .bind(input.attachments.as_ref().map(Json))
            .bind(input.status)
            .bind(input.progress)
            .fetch_one(&mut *tx)
            .await?;

        Self::append_activity(&mut tx, project_id, "Project updated", freelancer_id).await?;

        let assigned = Self::assigned_member_ids(&mut *tx, project_id).await?;
        tx.commit().await?;
        Ok(Some((project, assigned)))
    }

    /// Delete a project owned by the given freelancer, cascading over its
    /// assignment rows and activity log in one transaction. Returns
    /// `true` if the project existed.
    pub async fn delete(
        pool: &PgPool,
        freelancer_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_assignments WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM project_activity WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND freelancer_id = $2")
            .bind(project_id)
            .bind(freelancer_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Not owned (or gone): roll everything back, including the
            // child deletes above.
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// The project's activity log, oldest first.
    pub async fn activity(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        sqlx::query_as::<_, ActivityEntry>(
            "SELECT id, project_id, action, actor, created_at
             FROM project_activity WHERE project_id = $1 ORDER BY created_at, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Insert assignment rows with set-add semantics: members already
    /// assigned are skipped rather than duplicated.
    async fn add_assignments(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        member_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for member_id in member_ids {
            sqlx::query(
                "INSERT INTO project_assignments (project_id, team_member_id)
                 VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT uq_project_assignments_pair DO NOTHING",
            )
            .bind(project_id)
            .bind(member_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Append an activity entry attributed to the acting freelancer.
    async fn append_activity(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        action: &str,
        freelancer_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_activity (project_id, action, actor) VALUES ($1, $2, $3)",
        )
        .bind(project_id)
        .bind(action)
        .bind(format!("Freelancer {freelancer_id}"))
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
