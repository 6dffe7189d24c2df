//! # Integration Test Flows
//!
//! Tests that tc-01-session, tc-02-report-submission, tc-03-match-lifecycle
//! and tc-04-view-router work together through the wired client.
//!
//! ## Flows Tested:
//!
//! 1. **Startup**: restore (or not), status sync, first screen
//! 2. **Report → Match**: a matching submission opens the review screen
//! 3. **Decision → Return home**: confirm/reject and the delayed navigation
//! 4. **Session end**: logout and expired tokens reset every subsystem

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;
    use tokio::time::{sleep, timeout, Instant};

    use crate::integration::{filled_draft, match_detail, Harness};
    use client_runtime::ClientError;
    use shared_types::{
        AuthToken, ConfirmedMatchMarker, GatewayError, MatchDecision, MatchDetail, MatchPhase,
        NavigationSignal, ReportRole, SubmissionId,
    };
    use tc_02_report_submission::{MockReportGateway, Report, SubmissionError, SubmissionOutcome};
    use tc_03_match_lifecycle::{
        LifecycleState, MatchGateway, MatchLifecycleApi, MatchLifecycleConfig,
        MatchLifecycleController, MatchStatus, MatchStatusReport, MockMatchGateway, Transition,
    };
    use tc_04_view_router::{NavigationIntent, ReviewMode, RouterInput, Screen, ViewRouter};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Match gateway whose detail fetch waits for a permit.
    struct GatedMatchGateway {
        inner: MockMatchGateway,
        gate: Semaphore,
    }

    impl GatedMatchGateway {
        fn new(detail: MatchDetail) -> Self {
            Self {
                inner: MockMatchGateway::with_detail(detail),
                gate: Semaphore::new(0),
            }
        }

        fn release(&self) {
            self.gate.add_permits(1);
        }
    }

    #[async_trait]
    impl MatchGateway for GatedMatchGateway {
        async fn fetch_match_detail(
            &self,
            submission_id: &SubmissionId,
        ) -> Result<MatchDetail, GatewayError> {
            let _permit = self.gate.acquire().await.unwrap();
            self.inner.fetch_match_detail(submission_id).await
        }

        async fn fetch_match_status(
            &self,
            token: &AuthToken,
        ) -> Result<MatchStatusReport, GatewayError> {
            self.inner.fetch_match_status(token).await
        }

        async fn confirm_match(&self, submission_id: &SubmissionId) -> Result<(), GatewayError> {
            self.inner.confirm_match(submission_id).await
        }

        async fn reject_match(&self, submission_id: &SubmissionId) -> Result<(), GatewayError> {
            self.inner.reject_match(submission_id).await
        }
    }

    fn router_input(lifecycle: &MatchLifecycleController) -> RouterInput {
        RouterInput {
            session_present: true,
            phase: lifecycle.phase(),
            marker_present: lifecycle.marker().is_some(),
        }
    }

    /// Logged-in client whose next report matches submission 77.
    async fn logged_in_with_match() -> Harness {
        let mut h = Harness::build(
            tc_01_session::MockAuthGateway::granting(crate::integration::grant()),
            MockReportGateway::matching("77", 0.928),
            MockMatchGateway::with_detail(match_detail(0.928)),
            tc_01_session::InMemoryCredentialStore::new(),
            MatchLifecycleConfig::default(),
        );
        h.client.start().await;
        h.client.login("ana", "x").await.unwrap();
        h
    }

    // =============================================================================
    // STARTUP
    // =============================================================================

    #[tokio::test]
    async fn test_fresh_load_login_then_home() {
        let mut h = Harness::fresh();

        assert_eq!(h.client.start().await, Screen::Login);
        assert_eq!(h.matches.status_calls.load(Ordering::SeqCst), 0);

        let session = h.client.login("ana", "x").await.unwrap();
        assert_eq!(session.user().username, "ana");
        assert_eq!(h.client.refresh(), Screen::Home);
        assert_eq!(h.matches.status_calls.load(Ordering::SeqCst), 1);
        assert!(h.client.marker().is_none());
        assert!(!h.store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_login() {
        let mut h = Harness::build(
            tc_01_session::MockAuthGateway::default(),
            MockReportGateway::no_match(),
            MockMatchGateway::new(),
            tc_01_session::InMemoryCredentialStore::new(),
            MatchLifecycleConfig::default(),
        );
        h.client.start().await;

        let err = h.client.login("ana", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Session(_)));
        assert_eq!(h.client.refresh(), Screen::Login);
        assert!(h.store.is_empty());
        assert_eq!(h.matches.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restored_confirmed_match_is_shown_without_detail_fetch() {
        let matches = MockMatchGateway::with_detail(match_detail(0.81));
        matches.set_confirmed("42", 0.81);
        let mut h = Harness::returning(MockReportGateway::no_match(), matches);

        assert_eq!(h.client.start().await, Screen::Home);
        assert_eq!(
            h.client.marker(),
            Some(ConfirmedMatchMarker::new(SubmissionId::new("42")))
        );
        assert_eq!(h.auth.call_count(), 0);
        assert_eq!(h.matches.detail_calls.load(Ordering::SeqCst), 0);

        h.client.navigate(NavigationIntent::MatchReview);
        assert_eq!(h.client.screen(), Screen::MatchReview(ReviewMode::Confirmed));

        let phase = h.client.open_confirmed_match().await.unwrap();
        assert_eq!(phase, MatchPhase::Confirmed);
        match h.client.lifecycle_state() {
            LifecycleState::Active(tracked) => {
                assert_eq!(tracked.status, MatchStatus::Confirmed);
                assert!(tracked.detail.is_some());
            }
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(h.matches.decision_calls(), 0);
    }

    #[tokio::test]
    async fn test_restore_then_logout_equals_never_restored() {
        let matches = MockMatchGateway::new();
        matches.set_confirmed("42", 0.81);
        let mut restored = Harness::returning(MockReportGateway::no_match(), matches);
        restored.client.start().await;
        assert!(restored.client.session().is_some());
        restored.client.logout();

        let mut never = Harness::fresh();
        let never_screen = never.client.start().await;

        assert_eq!(restored.client.refresh(), never_screen);
        assert_eq!(restored.client.session(), never.client.session());
        assert_eq!(
            restored.client.lifecycle_state(),
            never.client.lifecycle_state()
        );
        assert_eq!(restored.client.marker(), never.client.marker());
        assert_eq!(restored.client.intent(), never.client.intent());
        assert!(restored.store.is_empty());
    }

    // =============================================================================
    // REPORT SUBMISSION
    // =============================================================================

    #[tokio::test]
    async fn test_parent_without_photo_fails_before_network() {
        let mut h = Harness::fresh();
        h.client.start().await;
        h.client.login("ana", "x").await.unwrap();

        *h.client.draft_mut() = filled_draft(ReportRole::Parent);
        h.client.draft_mut().child.photo = None;

        let err = h.client.submit_report().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Submission(SubmissionError::Validation(ref m)) if m == "photo required"
        ));
        assert_eq!(h.reports.call_count(), 0);
        assert_eq!(h.client.draft().child.name, "Mia");
    }

    #[tokio::test]
    async fn test_volunteer_needs_address_parent_does_not() {
        let mut h = Harness::fresh();
        h.client.start().await;
        h.client.login("ana", "x").await.unwrap();

        *h.client.draft_mut() = filled_draft(ReportRole::Volunteer);
        h.client.draft_mut().found_address = "   ".to_string();
        let err = h.client.submit_report().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Submission(SubmissionError::Validation(ref m)) if m == "found address required"
        ));
        assert_eq!(h.reports.call_count(), 0);

        *h.client.draft_mut() = filled_draft(ReportRole::Parent);
        assert!(h.client.draft().found_address.is_empty());
        let outcome = h.client.submit_report().await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::NoMatch);
        assert_eq!(h.reports.call_count(), 1);

        let sent = h.reports.last_report.lock().clone().unwrap();
        assert!(matches!(sent, Report::Parent { .. }));
        assert_eq!(sent.address(), "");
        assert_eq!(h.client.refresh(), Screen::Home);
    }

    #[tokio::test]
    async fn test_submit_without_session_is_rejected() {
        let mut h = Harness::fresh();
        h.client.start().await;
        *h.client.draft_mut() = filled_draft(ReportRole::Parent);

        let err = h.client.submit_report().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Submission(SubmissionError::NotAuthenticated)
        ));
        assert_eq!(h.reports.call_count(), 0);
    }

    #[tokio::test]
    async fn test_matching_report_opens_review() {
        let mut h = logged_in_with_match().await;
        *h.client.draft_mut() = filled_draft(ReportRole::Parent);

        let outcome = h.client.submit_report().await.unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::MatchFound(SubmissionId::new("77"))
        );
        assert_eq!(h.client.intent(), NavigationIntent::MatchReview);
        assert_eq!(h.client.refresh(), Screen::MatchReview(ReviewMode::Pending));

        match h.client.lifecycle_state() {
            LifecycleState::Active(tracked) => {
                assert_eq!(tracked.submission_id, SubmissionId::new("77"));
                assert_eq!(tracked.status, MatchStatus::Pending);
                assert_eq!(tracked.score.unwrap().to_string(), "92.8%");
            }
            other => panic!("unexpected state {:?}", other),
        }

        // Draft reset for the next report, role kept.
        assert_eq!(h.client.draft().role, ReportRole::Parent);
        assert!(h.client.draft().child.photo.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_logs_out() {
        let mut h = Harness::returning(
            MockReportGateway::failing(GatewayError::Unauthorized(
                "Could not validate credentials".to_string(),
            )),
            MockMatchGateway::new(),
        );
        assert_eq!(h.client.start().await, Screen::Home);

        *h.client.draft_mut() = filled_draft(ReportRole::Volunteer);
        let err = h.client.submit_report().await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Submission(SubmissionError::Expired(_))
        ));
        assert!(h.client.session().is_none());
        assert!(h.store.is_empty());
        assert_eq!(h.client.refresh(), Screen::Login);
    }

    // =============================================================================
    // MATCH LIFECYCLE + ROUTER
    // =============================================================================

    #[tokio::test]
    async fn test_load_walks_idle_loading_pending() {
        let gateway = Arc::new(GatedMatchGateway::new(match_detail(0.928)));
        let lifecycle = MatchLifecycleController::new(gateway.clone(), MatchLifecycleConfig::default());
        let mut router = ViewRouter::new();
        router.request(NavigationIntent::MatchReview);

        assert_eq!(lifecycle.phase(), MatchPhase::Idle);
        assert_eq!(router.resolve(router_input(&lifecycle)), Screen::Home);

        let task = {
            let ctl = lifecycle.clone();
            tokio::spawn(async move { ctl.load_match(&SubmissionId::new("77")).await })
        };

        timeout(Duration::from_secs(5), async {
            while lifecycle.phase() != MatchPhase::Loading {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(
            router.resolve(router_input(&lifecycle)),
            Screen::MatchReview(ReviewMode::Loading)
        );

        gateway.release();
        let phase = task.await.unwrap().unwrap();
        assert_eq!(phase, MatchPhase::Pending);
        assert_eq!(
            router.resolve(router_input(&lifecycle)),
            Screen::MatchReview(ReviewMode::Pending)
        );
        match lifecycle.state() {
            LifecycleState::Active(tracked) => {
                assert_eq!(tracked.score.unwrap().to_string(), "92.8%");
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_match_shows_failed_review() {
        let mut h = Harness::build(
            tc_01_session::MockAuthGateway::granting(crate::integration::grant()),
            MockReportGateway::no_match(),
            MockMatchGateway::new(),
            tc_01_session::InMemoryCredentialStore::new(),
            MatchLifecycleConfig::default(),
        );
        h.client.start().await;
        h.client.login("ana", "x").await.unwrap();

        assert!(h.client.open_match(&SubmissionId::new("404")).await.is_err());
        assert_eq!(h.client.refresh(), Screen::MatchReview(ReviewMode::Failed));

        let transition = h.client.confirm().await;
        assert_eq!(transition, Transition::Ignored(MatchPhase::Failed));
        assert_eq!(h.matches.decision_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_returns_home_exactly_once() {
        let mut h = logged_in_with_match().await;
        h.client.open_match(&SubmissionId::new("77")).await.unwrap();

        let started = Instant::now();
        let transition = h.client.confirm().await;

        assert_eq!(transition, Transition::Applied(MatchPhase::Confirmed));
        assert_eq!(h.client.screen(), Screen::MatchReview(ReviewMode::Confirmed));
        assert_eq!(
            h.client.marker(),
            Some(ConfirmedMatchMarker::new(SubmissionId::new("77")))
        );

        let signal = h.client.wait_for_navigation().await;
        assert!(started.elapsed() >= Duration::from_millis(2500));
        assert_eq!(
            signal,
            Some(NavigationSignal::ReturnHome {
                submission_id: SubmissionId::new("77"),
                decision: MatchDecision::Confirm,
            })
        );
        assert_eq!(h.client.refresh(), Screen::Home);

        sleep(Duration::from_secs(10)).await;
        assert!(!h.client.poll_navigation());
        assert_eq!(h.matches.confirm_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.client.lifecycle_state().phase(), MatchPhase::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_marks_match_even_when_backend_fails() {
        let mut h = logged_in_with_match().await;
        h.matches.set_fail_decisions(true);
        h.client.open_match(&SubmissionId::new("42")).await.unwrap();

        let transition = h.client.confirm().await;

        assert_eq!(transition, Transition::Applied(MatchPhase::Confirmed));
        assert_eq!(
            h.client.marker(),
            Some(ConfirmedMatchMarker::new(SubmissionId::new("42")))
        );
        assert_eq!(h.matches.confirm_calls.load(Ordering::SeqCst), 1);
        assert!(h.client.wait_for_navigation().await.is_some());
        assert_eq!(h.client.refresh(), Screen::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_reject_calls_backend_once() {
        let mut h = logged_in_with_match().await;
        h.client.open_match(&SubmissionId::new("77")).await.unwrap();

        let first = h.client.reject().await;
        let second = h.client.reject().await;

        assert_eq!(first, Transition::Applied(MatchPhase::Rejected));
        assert_eq!(second, Transition::Ignored(MatchPhase::Rejected));
        assert_eq!(h.matches.reject_calls.load(Ordering::SeqCst), 1);
        assert!(h.client.marker().is_none());

        assert!(h.client.wait_for_navigation().await.is_some());
        assert!(h.client.wait_for_navigation().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigating_away_cancels_return_home() {
        let mut h = logged_in_with_match().await;
        h.client.open_match(&SubmissionId::new("77")).await.unwrap();
        h.client.confirm().await;

        h.client.navigate(NavigationIntent::Profile);
        sleep(Duration::from_secs(5)).await;

        assert!(!h.client.poll_navigation());
        assert_eq!(h.client.refresh(), Screen::Profile);
        assert!(h.client.wait_for_navigation().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_during_pending_return() {
        let mut h = logged_in_with_match().await;
        h.client.open_match(&SubmissionId::new("77")).await.unwrap();
        h.client.confirm().await;

        h.client.logout();
        sleep(Duration::from_secs(5)).await;

        assert!(!h.client.poll_navigation());
        assert_eq!(h.client.lifecycle_state(), LifecycleState::Idle);
        assert!(h.client.marker().is_none());
        assert_eq!(h.client.refresh(), Screen::Login);
    }
}
