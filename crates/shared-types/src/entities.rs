//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `AuthToken`, `UserProfile`, `Session`
//! - **Reports**: `ReportRole`, `SubmissionId`
//! - **Matches**: `MatchDetail`, `ParentReportSnapshot`, `VolunteerReportSnapshot`,
//!   `ConfirmedMatchMarker`

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Opaque bearer token issued by the auth endpoints.
///
/// The `Debug` impl redacts the value so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token value, for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the token is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Profile of the authenticated user.
///
/// The backend returns `_id` from login and `id` from signup; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
}

/// The authenticated identity held by the running client.
///
/// Token and profile travel together; an absent session is `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: AuthToken,
    user: UserProfile,
}

impl Session {
    /// Build a session from a token and its profile.
    pub fn new(token: AuthToken, user: UserProfile) -> Self {
        Self { token, user }
    }

    /// Bearer token.
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Current profile.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Same token, replaced profile (result of a backend profile update).
    pub fn with_user(&self, user: UserProfile) -> Self {
        Self {
            token: self.token.clone(),
            user,
        }
    }
}

// =============================================================================
// CLUSTER B: REPORTS
// =============================================================================

/// Who is filing a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportRole {
    /// A parent reporting a missing child.
    #[default]
    Parent,
    /// A volunteer reporting a found child.
    Volunteer,
}

impl ReportRole {
    /// Wire name (`"parent"` / `"volunteer"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportRole::Parent => "parent",
            ReportRole::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for ReportRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend identifier of a stored report, used to address its match.
///
/// Serialized as a string. Accepts either a string or an integer on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(raw) => Self(raw),
            RawId::Number(raw) => Self::from(raw),
        })
    }
}

impl SubmissionId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if no usable identifier is present.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SubmissionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<u64> for SubmissionId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

// =============================================================================
// CLUSTER C: MATCHES
// =============================================================================

/// Parent contact block of a stored parent report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub alt_email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub alt_phone: Option<String>,
}

/// Child as described by the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildEntered {
    pub name: String,
    pub age: u32,
    pub skin: String,
    #[serde(default)]
    pub birthmarks: Vec<String>,
    pub city: String,
}

/// Read-only snapshot of the parent side of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentReportSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub parent: ParentContact,
    pub child_entered: ChildEntered,
    /// Server-relative path of the stored photo.
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Volunteer contact block of a stored volunteer report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub alt_phone: Option<String>,
}

/// Child as described by the volunteer who found them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundChild {
    pub approx_age: u32,
    pub skin: String,
    #[serde(default)]
    pub birthmarks: Vec<String>,
    pub city_found: String,
    pub address_found: String,
}

/// Read-only snapshot of the volunteer side of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerReportSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub volunteer: VolunteerContact,
    pub found_child: FoundChild,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Full match detail as returned by `GET /api/match/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub submission_id: SubmissionId,
    /// Similarity in `[0, 1]`.
    pub match_score: f64,
    pub parent_report: ParentReportSnapshot,
    pub volunteer_report: VolunteerReportSnapshot,
}

/// Minimal fact that the user has a confirmed (or at least active) match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmedMatchMarker {
    pub submission_id: SubmissionId,
}

impl ConfirmedMatchMarker {
    /// Marker for the given submission.
    pub fn new(submission_id: SubmissionId) -> Self {
        Self { submission_id }
    }
}
