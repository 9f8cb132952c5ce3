//! User record and the typed inputs that create or modify it

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub last_login: Option<NaiveDateTime>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
    #[serde(default)]
    pub projects: Vec<String>,
}

impl User {
    pub(crate) fn new(id: String, fields: NewUser, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: fields.name.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            role: fields.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at,
            updated_at: None,
            last_login: None,
            preferences: Map::new(),
            projects: Vec::new(),
        }
    }

    /// Case-insensitive substring match on name, email or role
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.name, &self.email, &self.role]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    pub(crate) fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }
}

/// Fields accepted when creating a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Partial update. Only these three fields are mutable through an update;
/// any other key in the request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
