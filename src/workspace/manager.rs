//! Registry of live session workspaces
//!
//! Uses DashMap for concurrent access with the entry API so a create for an
//! explicit id is atomic against a racing create for the same id.

use std::sync::Arc;

use dashmap::DashMap;

use crate::types::{Result, WorkspaceConfig, WorkspaceError};

use super::cleanup::CleanupReport;
use super::session::SessionWorkspace;

/// Process-wide registry mapping session ids to their workspaces
#[derive(Debug)]
pub struct WorkspaceManager {
    config: WorkspaceConfig,
    sessions: DashMap<String, Arc<SessionWorkspace>>,
}

impl WorkspaceManager {
    /// Create a manager that roots all sessions at the configured base
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    /// The configuration applied to every session
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Create a workspace and register it
    ///
    /// With an explicit id, an existing live session under that id is an
    /// error. With `None`, a fresh id is minted.
    pub fn create(&self, session_id: Option<String>) -> Result<Arc<SessionWorkspace>> {
        match session_id {
            Some(id) => match self.sessions.entry(id.clone()) {
                dashmap::Entry::Occupied(_) => Err(WorkspaceError::session_already_exists(id)),
                dashmap::Entry::Vacant(vacant) => {
                    let workspace = Arc::new(SessionWorkspace::create(Some(id), &self.config)?);
                    vacant.insert(Arc::clone(&workspace));
                    Ok(workspace)
                }
            },
            None => {
                let workspace = Arc::new(SessionWorkspace::create(None, &self.config)?);
                self.sessions
                    .insert(workspace.session_id().to_string(), Arc::clone(&workspace));
                Ok(workspace)
            }
        }
    }

    /// Get a live workspace
    pub fn get(&self, session_id: &str) -> Option<Arc<SessionWorkspace>> {
        self.sessions.get(session_id).map(|r| Arc::clone(&r))
    }

    /// Get a live workspace or fail with `SessionNotFound`
    pub fn get_or_error(&self, session_id: &str) -> Result<Arc<SessionWorkspace>> {
        self.get(session_id)
            .ok_or_else(|| WorkspaceError::session_not_found(session_id))
    }

    /// Reuse the workspace for an id, creating it if absent
    ///
    /// This is the path for callers that carry a session id across requests.
    pub fn open_or_create(&self, session_id: &str) -> Result<Arc<SessionWorkspace>> {
        if let Some(existing) = self.get(session_id) {
            return Ok(existing);
        }
        match self.create(Some(session_id.to_string())) {
            // A concurrent create won the race; reuse its workspace.
            Err(WorkspaceError::SessionAlreadyExists(_)) => self.get_or_error(session_id),
            other => other,
        }
    }

    /// Deregister a session and purge its files
    ///
    /// Returns the cleanup report, or `None` when the id is unknown.
    pub async fn remove(&self, session_id: &str) -> Option<CleanupReport> {
        let (_, workspace) = self.sessions.remove(session_id)?;
        Some(workspace.cleanup().await)
    }

    /// Check if a session is registered
    pub fn has_session(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Ids of all live sessions
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Remove and clean up every live session (shutdown path)
    pub async fn cleanup_all(&self) -> Vec<CleanupReport> {
        let mut reports = Vec::new();
        for id in self.session_ids() {
            if let Some(report) = self.remove(&id).await {
                reports.push(report);
            }
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_manager(root: &Path) -> WorkspaceManager {
        WorkspaceManager::new(WorkspaceConfig::new(root).with_auto_cleanup(false))
    }

    #[tokio::test]
    async fn test_manager_create_and_get() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        let ws = manager.create(Some("s1".into())).unwrap();
        assert_eq!(ws.session_id(), "s1");
        assert_eq!(manager.session_count(), 1);
        assert!(manager.has_session("s1"));
        assert!(manager.get("nope").is_none());
    }

    #[tokio::test]
    async fn test_manager_duplicate_id_rejected() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        manager.create(Some("s1".into())).unwrap();
        let duplicate = manager.create(Some("s1".into()));
        assert!(matches!(
            duplicate,
            Err(WorkspaceError::SessionAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_manager_minted_ids_are_unique() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        let a = manager.create(None).unwrap();
        let b = manager.create(None).unwrap();
        assert_ne!(a.session_id(), b.session_id());
        assert_eq!(manager.session_count(), 2);
    }

    #[tokio::test]
    async fn test_manager_open_or_create_reuses() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        let first = manager.open_or_create("s1").unwrap();
        let second = manager.open_or_create("s1").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.session_count(), 1);
    }

    #[tokio::test]
    async fn test_manager_get_or_error() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        let err = manager.get_or_error("nope").unwrap_err();
        assert!(matches!(err, WorkspaceError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_manager_remove_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        let ws = manager.create(Some("s1".into())).unwrap();
        let upload_dir = ws.upload_dir().to_path_buf();
        std::fs::write(upload_dir.join("a.pdf"), b"x").unwrap();

        let report = manager.remove("s1").await.unwrap();

        assert!(report.all_clear());
        assert!(!upload_dir.exists());
        assert!(!manager.has_session("s1"));
        assert!(manager.remove("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_manager_cleanup_all() {
        let root = tempfile::tempdir().unwrap();
        let manager = test_manager(root.path());

        manager.create(Some("s1".into())).unwrap();
        manager.create(Some("s2".into())).unwrap();

        let reports = manager.cleanup_all().await;
        assert_eq!(reports.len(), 2);
        assert_eq!(manager.session_count(), 0);
    }
}
