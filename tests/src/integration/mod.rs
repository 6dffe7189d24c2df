//! # Integration Tests
//!
//! Shared fixtures for the cross-subsystem flows. Every scenario wires a
//! [`TetherClient`] over mock gateways so backend calls can be counted and
//! failures injected.

pub mod flows;
pub mod persistence;

use std::sync::Arc;

use client_runtime::TetherClient;
use shared_types::{
    AuthToken, ChildEntered, FoundChild, MatchDetail, ParentContact, ParentReportSnapshot,
    ReportRole, SubmissionId, UserProfile, VolunteerContact, VolunteerReportSnapshot,
};
use tc_01_session::{
    AuthGrant, CredentialStore, InMemoryCredentialStore, MockAuthGateway, PersistedCredentials,
};
use tc_02_report_submission::{MockReportGateway, PhotoRef, ReportDraft};
use tc_03_match_lifecycle::{MatchLifecycleConfig, MockMatchGateway};

/// Client plus handles on every mock it was built from.
pub struct Harness {
    pub client: TetherClient,
    pub auth: Arc<MockAuthGateway>,
    pub reports: Arc<MockReportGateway>,
    pub matches: Arc<MockMatchGateway>,
    pub store: Arc<InMemoryCredentialStore>,
}

impl Harness {
    /// Wire a client over the given mocks and store.
    pub fn build(
        auth: MockAuthGateway,
        reports: MockReportGateway,
        matches: MockMatchGateway,
        store: InMemoryCredentialStore,
        lifecycle: MatchLifecycleConfig,
    ) -> Self {
        let auth = Arc::new(auth);
        let reports = Arc::new(reports);
        let matches = Arc::new(matches);
        let store = Arc::new(store);
        let client = TetherClient::new(
            auth.clone(),
            reports.clone(),
            matches.clone(),
            store.clone() as Arc<dyn CredentialStore>,
            lifecycle,
        );
        Self {
            client,
            auth,
            reports,
            matches,
            store,
        }
    }

    /// Nothing stored, login grants `ana`, no match on record.
    pub fn fresh() -> Self {
        Self::build(
            MockAuthGateway::granting(grant()),
            MockReportGateway::no_match(),
            MockMatchGateway::with_detail(match_detail(0.928)),
            InMemoryCredentialStore::new(),
            MatchLifecycleConfig::default(),
        )
    }

    /// `ana` already stored from a previous run.
    pub fn returning(reports: MockReportGateway, matches: MockMatchGateway) -> Self {
        Self::build(
            MockAuthGateway::granting(grant()),
            reports,
            matches,
            InMemoryCredentialStore::with_credentials(&stored_credentials()),
            MatchLifecycleConfig::default(),
        )
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: "u-1".to_string(),
        username: "ana".to_string(),
        email: "ana@example.org".to_string(),
        phone: "5550100".to_string(),
    }
}

pub fn grant() -> AuthGrant {
    AuthGrant::new(AuthToken::new("token-ana"), profile())
}

pub fn stored_credentials() -> PersistedCredentials {
    PersistedCredentials {
        token: AuthToken::new("token-ana"),
        user: profile(),
    }
}

pub fn photo() -> PhotoRef {
    PhotoRef::new("mia.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

/// Complete draft for the role, photo included.
pub fn filled_draft(role: ReportRole) -> ReportDraft {
    let mut draft = ReportDraft::for_role(role);
    draft.reporter.name = "Ana Costa".to_string();
    draft.reporter.email = "ana@example.org".to_string();
    draft.reporter.phone = "5550100".to_string();
    draft.child.name = "Mia".to_string();
    draft.child.approx_age = 6;
    draft.child.skin_complexion = "fair".to_string();
    draft.child.city = "Pune".to_string();
    draft.child.birthmarks = vec!["mole on left cheek".to_string()];
    draft.child.photo = Some(photo());
    if role == ReportRole::Volunteer {
        draft.found_address = "Station Road".to_string();
    }
    draft
}

pub fn match_detail(score: f64) -> MatchDetail {
    MatchDetail {
        submission_id: SubmissionId::new("77"),
        match_score: score,
        parent_report: ParentReportSnapshot {
            id: "p-1".to_string(),
            parent: ParentContact {
                name: "Ana Costa".to_string(),
                email: "ana@example.org".to_string(),
                alt_email: None,
                phone: "5550100".to_string(),
                alt_phone: None,
            },
            child_entered: ChildEntered {
                name: "Mia".to_string(),
                age: 6,
                skin: "fair".to_string(),
                birthmarks: vec!["mole on left cheek".to_string()],
                city: "Pune".to_string(),
            },
            image_path: None,
            created_at: None,
        },
        volunteer_report: VolunteerReportSnapshot {
            id: "v-1".to_string(),
            volunteer: VolunteerContact {
                name: "Raj".to_string(),
                email: "raj@example.org".to_string(),
                phone: "5550199".to_string(),
                alt_phone: None,
            },
            found_child: FoundChild {
                approx_age: 6,
                skin: "fair".to_string(),
                birthmarks: vec![],
                city_found: "Pune".to_string(),
                address_found: "Station Road".to_string(),
            },
            image_path: None,
            created_at: None,
        },
    }
}
