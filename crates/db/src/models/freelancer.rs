//! Freelancer entity model, profile sub-documents, and client snapshots.

use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A testimonial shown on a freelancer's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: Option<String>,
    pub position: Option<String>,
    pub opinion: Option<String>,
}

/// The "about" section of a freelancer's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AboutSection {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub experience_years: Option<String>,
    pub completed_projects: Option<String>,
    pub happy_clients: Option<String>,
    pub team_members: Option<String>,
}

/// A question/answer pair on a freelancer's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// A portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSample {
    pub image: Option<String>,
    pub link: Option<String>,
}

/// A freelancer row from the `freelancers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Freelancer {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub profile_image: Option<String>,
    pub skills: Json<Vec<String>>,
    pub services: Json<Vec<String>>,
    pub testimonials: Json<Vec<Testimonial>>,
    pub about: Option<Json<AboutSection>>,
    pub faq: Json<Vec<FaqEntry>>,
    pub latest_work: Json<Vec<WorkSample>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new freelancer (registration).
#[derive(Debug, Clone)]
pub struct CreateFreelancer {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
}

/// DTO for profile updates. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFreelancer {
    pub name: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub skills: Option<Vec<String>>,
    pub services: Option<Vec<String>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub about: Option<AboutSection>,
    pub faq: Option<Vec<FaqEntry>>,
    pub latest_work: Option<Vec<WorkSample>>,
}

/// Where a client-book row came from: created by the freelancer
/// through the book, or written by an Accepted proposal transition.
/// Rejection prunes only `Accepted` rows; book entries stay until the
/// freelancer removes the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "client_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClientSource {
    Book,
    Accepted,
}

/// A denormalized client snapshot from the `freelancer_clients` table —
/// the freelancer's "my clients" book. Contact fields are a display
/// copy, never synced back to the client row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientSnapshot {
    pub id: DbId,
    pub freelancer_id: DbId,
    pub client_id: DbId,
    pub source: ClientSource,
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
}
