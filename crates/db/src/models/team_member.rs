//! Team member entity model and DTOs.

use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Availability status of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_member_status")]
pub enum TeamMemberStatus {
    Active,
    Inactive,
    #[sqlx(rename = "On Hold")]
    #[serde(rename = "On Hold")]
    OnHold,
}

/// A team member row from the `team_members` table.
///
/// The member's assigned projects are the inverse side of
/// `project_assignments` and are queried, not stored here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: TeamMemberStatus,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub mobile: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a team member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: Option<TeamMemberStatus>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub mobile: Option<String>,
}

/// DTO for updating a team member. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<TeamMemberStatus>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub mobile: Option<String>,
}
