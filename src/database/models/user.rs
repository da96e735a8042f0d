use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Current time at microsecond precision, the resolution a `TIMESTAMPTZ`
/// column keeps. Responses then match what a later read returns.
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A stored user row. Serialized in camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Absent until the first successful update.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A user that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the id assigned by the store.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            department: self.department,
            created_at: self.created_at,
            updated_at: None,
        }
    }
}

/// Request body accepted by create and update.
///
/// Every field is optional at the serde layer so that a missing field reaches
/// validation as blank instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}
