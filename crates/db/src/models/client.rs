//! Client entity model and DTOs.

use lancer_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Postal address embedded in a client profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub country: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

/// A client row from the `clients` table.
///
/// `password_hash` is never serialized, so rows can be returned from
/// handlers directly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub company_name: Option<String>,
    pub profile_image: Option<String>,
    pub address: Option<Json<Address>>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub terms_agreed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new client. The password arrives here already
/// hashed; plaintext never crosses the repository boundary.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
    pub company_name: Option<String>,
    pub profile_image: Option<String>,
    pub address: Option<Address>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub terms_agreed: Option<bool>,
}

/// DTO for updating a client. Absent fields are left untouched; present
/// fields are applied even when empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub company_name: Option<String>,
    pub profile_image: Option<String>,
    pub address: Option<Address>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub terms_agreed: Option<bool>,
}
