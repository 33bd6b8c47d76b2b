//! User repository

use crate::domain::entities::User;
use rosterboard_common::Result;
use rosterboard_docstore::{layout, to_fields, SharedStore, StoreError, WriteOp};
use serde_json::json;

#[derive(Clone)]
pub struct UserRepository {
    store: SharedStore,
}

impl UserRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let path = layout::user(user_id)?;
        self.store
            .get(&path)
            .await?
            .map(|doc| User::from_document(&doc))
            .transpose()
    }

    /// Write the user document for a newly registered identity.
    ///
    /// Overwrites any existing document with `{ name, teamCodes: [] }`.
    pub async fn create_from_provider(&self, user_id: &str, first_name: &str) -> Result<()> {
        let path = layout::user(user_id)?;
        let data = to_fields(&json!({
            "name": first_name,
            "teamCodes": [],
        }))?;
        self.store.set(&path, data, false).await?;
        tracing::info!(user_id = %user_id, "Created user document from identity provider");
        Ok(())
    }

    /// Return the user, creating an empty document on first visit
    pub async fn ensure(&self, user_id: &str, name: &str) -> Result<User> {
        if let Some(user) = self.get_by_id(user_id).await? {
            return Ok(user);
        }

        let user = User::new(user_id, name);
        let result = self
            .store
            .commit(vec![WriteOp::Create {
                path: layout::user(user_id)?,
                data: user.to_fields()?,
            }])
            .await;

        match result {
            Ok(()) => {
                tracing::info!(user_id = %user_id, "Created user document on first visit");
                Ok(user)
            }
            // lost a race with a concurrent first visit or the provider hook
            Err(StoreError::AlreadyExists(_)) => self
                .get_by_id(user_id)
                .await?
                .ok_or_else(|| rosterboard_common::Error::NotFound("User not found".to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
