//! Provider directory accessor.
//!
//! Every operation degrades to an empty or absent result when the store is
//! unconfigured or failing. Callers never see a store error; views use
//! `is_configured()` to show a configuration banner instead.

pub mod store;

use std::sync::Arc;

use tracing::{error, warn};

use crate::models::{Provider, UserProfile};

pub use store::{DirectoryStore, PgDirectoryStore};

#[derive(Clone)]
pub struct Directory {
    store: Option<Arc<dyn DirectoryStore>>,
}

impl Directory {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A directory with no backing store. Reads are empty, writes are no-ops.
    pub fn unconfigured() -> Self {
        warn!("Directory store is not configured. Directory functionality will be disabled.");
        Self { store: None }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub async fn list_providers(&self) -> Vec<Provider> {
        let Some(store) = &self.store else {
            return Vec::new();
        };
        match store.list_providers().await {
            Ok(providers) => providers,
            Err(e) => {
                error!("Error fetching providers: {e:#}");
                Vec::new()
            }
        }
    }

    pub async fn get_provider(&self, id: &str) -> Option<Provider> {
        let store = self.store.as_ref()?;
        match store.get_provider(id).await {
            Ok(provider) => provider,
            Err(e) => {
                error!("Error fetching provider {id}: {e:#}");
                None
            }
        }
    }

    /// Creates the profile record if none exists for `profile.uid`.
    /// Existing records are never overwritten. Returns `true` if a record was created.
    pub async fn ensure_user_profile(&self, profile: &UserProfile) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        match store.insert_user_if_absent(profile).await {
            Ok(created) => created,
            Err(e) => {
                error!("Error creating user document: {e:#}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{provider, user, FailingStore, MemoryStore};

    #[tokio::test]
    async fn test_unconfigured_directory_degrades_to_empty() {
        let directory = Directory::unconfigured();
        assert!(!directory.is_configured());
        assert!(directory.list_providers().await.is_empty());
        assert!(directory.get_provider("p1").await.is_none());
        assert!(!directory.ensure_user_profile(&user("u1")).await);
    }

    #[tokio::test]
    async fn test_failing_store_degrades_to_empty() {
        let directory = Directory::new(Arc::new(FailingStore));
        assert!(directory.is_configured());
        assert!(directory.list_providers().await.is_empty());
        assert!(directory.get_provider("p1").await.is_none());
        assert!(!directory.ensure_user_profile(&user("u1")).await);
    }

    #[tokio::test]
    async fn test_get_provider_by_id() {
        let store = MemoryStore::with_providers(vec![
            provider("p1", "Ace Plumbing", "Plumbing"),
            provider("p2", "Sparky", "Electrical"),
        ]);
        let directory = Directory::new(Arc::new(store));

        assert_eq!(directory.get_provider("p2").await.unwrap().name, "Sparky");
        assert!(directory.get_provider("missing").await.is_none());
        assert_eq!(directory.list_providers().await.len(), 2);
    }

    #[tokio::test]
    async fn test_ensure_user_profile_is_idempotent() {
        let store = Arc::new(MemoryStore::default());
        let directory = Directory::new(store.clone());

        let first = user("u1");
        let mut second = user("u1");
        second.display_name = Some("Renamed".to_string());

        assert!(directory.ensure_user_profile(&first).await);
        assert!(!directory.ensure_user_profile(&second).await);

        let users = store.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0], first);
    }
}
