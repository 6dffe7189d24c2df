//! # Session Persistence
//!
//! A login survives a restart through the file credential store, and a
//! logout or a corrupt file leaves the next start on the login screen.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::integration::grant;
    use client_runtime::TetherClient;
    use tc_01_session::{FileCredentialStore, MockAuthGateway};
    use tc_02_report_submission::MockReportGateway;
    use tc_03_match_lifecycle::{MatchLifecycleConfig, MockMatchGateway};
    use tc_04_view_router::Screen;
    use tempfile::TempDir;

    fn client_on_disk(dir: &TempDir) -> TetherClient {
        TetherClient::new(
            Arc::new(MockAuthGateway::granting(grant())),
            Arc::new(MockReportGateway::no_match()),
            Arc::new(MockMatchGateway::new()),
            Arc::new(FileCredentialStore::new(dir.path())),
            MatchLifecycleConfig::for_testing(),
        )
    }

    #[tokio::test]
    async fn test_login_survives_restart() {
        let dir = TempDir::new().unwrap();

        let mut first = client_on_disk(&dir);
        assert_eq!(first.start().await, Screen::Login);
        first.login("ana", "x").await.unwrap();
        drop(first);

        let mut second = client_on_disk(&dir);
        assert_eq!(second.start().await, Screen::Home);
        assert_eq!(second.session().unwrap().user().username, "ana");
        assert_eq!(second.session().unwrap().token().as_str(), "token-ana");
    }

    #[tokio::test]
    async fn test_logout_survives_restart() {
        let dir = TempDir::new().unwrap();

        let mut first = client_on_disk(&dir);
        first.start().await;
        first.login("ana", "x").await.unwrap();
        first.logout();
        drop(first);

        let mut second = client_on_disk(&dir);
        assert_eq!(second.start().await, Screen::Login);
        assert!(second.session().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_store_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path());
        std::fs::write(store.path(), b"{\"token\":\"only-a-token\"}").unwrap();

        let mut client = client_on_disk(&dir);
        assert_eq!(client.start().await, Screen::Login);
        assert!(!store.path().exists());
    }
}
