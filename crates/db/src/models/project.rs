//! Project entity model, activity log entries, and DTOs.

use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Lifecycle state of a project.
///
/// Wire spelling keeps the space in `"In Progress"` and `"On Hold"`-style
/// labels for display compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status")]
pub enum ProjectStatus {
    Pending,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

/// A project row from the `projects` table.
///
/// The assigned team member set lives in `project_assignments`; the
/// activity log in `project_activity`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub freelancer_id: DbId,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub budget: String,
    pub deadline: Option<Timestamp>,
    pub attachments: Json<Vec<String>>,
    pub status: ProjectStatus,
    pub progress: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An append-only activity log entry for a project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub action: String,
    pub actor: String,
    pub created_at: Timestamp,
}

/// DTO for creating a project. `assigned_to` is the initial team member
/// set; the matching assignment rows are written in the same transaction
/// as the project itself.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: DbId,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub budget: String,
    pub deadline: Option<Timestamp>,
    pub attachments: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub assigned_to: Vec<DbId>,
}

/// DTO for updating a project. Absent fields are left untouched. A
/// present `assigned_to` replaces the whole assignment set (the
/// repository reconciles the difference).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget: Option<String>,
    pub deadline: Option<Timestamp>,
    pub attachments: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub progress: Option<i32>,
    pub assigned_to: Option<Vec<DbId>>,
}
