//! In-memory user registry
//!
//! A single table keyed by user id behind one async lock. State lives only as
//! long as the process. Identifiers are unique: creating a user with an id
//! that is already present fails with [`RegistryError::Conflict`].

pub mod user;

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

pub use user::{NewUser, User, UserUpdate, DEFAULT_ROLE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("User not found")]
    NotFound(String),

    #[error("User with id {0} already exists")]
    Conflict(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Default)]
struct RegistryState {
    users: HashMap<String, User>,
    /// Last generated numeric id
    last_id: u64,
    /// Last timestamp handed out; stamps are strictly increasing at microsecond precision
    last_stamp: Option<NaiveDateTime>,
}

impl RegistryState {
    fn next_id(&mut self) -> String {
        loop {
            self.last_id += 1;
            let candidate = self.last_id.to_string();
            if !self.users.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn stamp(&mut self) -> NaiveDateTime {
        let now = Local::now().naive_local().trunc_subsecs(6);
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn user_mut(&mut self, id: &str) -> RegistryResult<&mut User> {
        self.users
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Run `mutate` on a user and refresh `updated_at` when it reports a change
    fn modify<F>(&mut self, id: &str, mutate: F) -> RegistryResult<User>
    where
        F: FnOnce(&mut User) -> bool,
    {
        if !self.users.contains_key(id) {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        let stamp = self.stamp();
        let user = self.user_mut(id)?;
        if mutate(user) {
            user.updated_at = Some(stamp);
        }
        Ok(user.clone())
    }
}

#[derive(Debug, Default)]
pub struct UserRegistry {
    state: RwLock<RegistryState>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All users in creation order
    pub async fn list(&self) -> Vec<User> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        users
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn exists(&self, id: &str) -> bool {
        self.state.read().await.users.contains_key(id)
    }

    pub async fn create(&self, mut fields: NewUser) -> RegistryResult<User> {
        let mut state = self.state.write().await;

        let id = match fields.id.take().filter(|id| !id.is_empty()) {
            Some(id) if state.users.contains_key(&id) => {
                tracing::debug!(%id, "rejecting duplicate user id");
                return Err(RegistryError::Conflict(id));
            }
            Some(id) => id,
            None => state.next_id(),
        };

        let created_at = state.stamp();
        let user = User::new(id.clone(), fields, created_at);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    pub async fn get(&self, id: &str) -> RegistryResult<User> {
        self.state
            .read()
            .await
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Overwrite name, email and/or role. `updated_at` is always refreshed.
    pub async fn update(&self, id: &str, update: UserUpdate) -> RegistryResult<User> {
        self.state.write().await.modify(id, |user| {
            user.apply(update);
            true
        })
    }

    pub async fn delete(&self, id: &str) -> RegistryResult<()> {
        self.state
            .write()
            .await
            .users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub async fn record_login(&self, id: &str) -> RegistryResult<User> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(id) {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        let stamp = state.stamp();
        let user = state.user_mut(id)?;
        user.last_login = Some(stamp);
        Ok(user.clone())
    }

    pub async fn search(&self, query: &str) -> Vec<User> {
        let mut users = self.list().await;
        users.retain(|user| user.matches(query));
        users
    }

    pub async fn list_by_role(&self, role: &str) -> Vec<User> {
        let mut users = self.list().await;
        users.retain(|user| user.role == role);
        users
    }

    pub async fn set_preference(&self, id: &str, key: &str, value: Value) -> RegistryResult<User> {
        self.state.write().await.modify(id, |user| {
            user.preferences.insert(key.to_string(), value);
            true
        })
    }

    pub async fn get_preference(&self, id: &str, key: &str) -> RegistryResult<Option<Value>> {
        let user = self.get(id).await?;
        Ok(user.preferences.get(key).cloned())
    }

    /// Associate a project id. Adding one that is already present is a no-op.
    pub async fn add_project(&self, id: &str, project_id: &str) -> RegistryResult<User> {
        self.state.write().await.modify(id, |user| {
            if user.projects.iter().any(|p| p == project_id) {
                return false;
            }
            user.projects.push(project_id.to_string());
            true
        })
    }

    pub async fn remove_project(&self, id: &str, project_id: &str) -> RegistryResult<User> {
        self.state.write().await.modify(id, |user| {
            let before = user.projects.len();
            user.projects.retain(|p| p != project_id);
            user.projects.len() != before
        })
    }
}
