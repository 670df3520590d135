//! Application name resolution against the platform inventory.

use std::collections::HashMap;

use cronvoy_client::{AppInventory, ClientError};

/// Snapshot of the application inventory, fetched once per engine
/// invocation and discarded afterwards. Jobs are keyed by application id
/// remotely but addressed by application name everywhere else.
pub(crate) struct AppDirectory {
    names_by_id: HashMap<String, String>,
    ids_by_name: HashMap<String, String>,
}

impl AppDirectory {
    /// Directory with no entries; every lookup misses.
    pub(crate) fn empty() -> Self {
        Self {
            names_by_id: HashMap::new(),
            ids_by_name: HashMap::new(),
        }
    }

    pub(crate) async fn fetch(inventory: &dyn AppInventory) -> Result<Self, ClientError> {
        let apps = inventory.list_applications().await?;
        let mut names_by_id = HashMap::with_capacity(apps.len());
        let mut ids_by_name = HashMap::with_capacity(apps.len());
        for app in apps {
            names_by_id.insert(app.id.clone(), app.name.clone());
            ids_by_name.insert(app.name, app.id);
        }
        Ok(Self {
            names_by_id,
            ids_by_name,
        })
    }

    /// Name of the application owning the given id, if still in inventory.
    pub(crate) fn name_of(&self, application_id: &str) -> Option<&str> {
        self.names_by_id.get(application_id).map(String::as_str)
    }

    /// Inverse lookup, needed when creating a job for a named task.
    pub(crate) fn id_of(&self, application_name: &str) -> Option<&str> {
        self.ids_by_name.get(application_name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cronvoy_types::ApplicationSummary;

    struct FixedInventory(Vec<ApplicationSummary>);

    #[async_trait]
    impl AppInventory for FixedInventory {
        async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, ClientError> {
            Ok(self.0.clone())
        }
    }

    fn app(id: &str, name: &str) -> ApplicationSummary {
        ApplicationSummary {
            id: id.into(),
            name: name.into(),
            instances: 1,
            memory_limit: 0,
            disk_quota: 0,
            requested_state: "RUNNING".into(),
            running_instances: 1,
        }
    }

    #[tokio::test]
    async fn test_resolves_both_directions() {
        let inventory = FixedInventory(vec![
            app("test-application-id-1", "test-application-1"),
            app("test-application-id-2", "test-application-2"),
        ]);
        let directory = AppDirectory::fetch(&inventory).await.unwrap();
        assert_eq!(
            directory.name_of("test-application-id-2"),
            Some("test-application-2")
        );
        assert_eq!(
            directory.id_of("test-application-1"),
            Some("test-application-id-1")
        );
        assert_eq!(directory.name_of("gone"), None);
    }
}
