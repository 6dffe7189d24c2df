//! # Domain Entities
//!
//! The editable draft, the validated report built from it, and the backend's
//! answer to a submission.

use serde::{Deserialize, Serialize};
use shared_types::{ReportRole, SubmissionId};
use std::fmt;

// =============================================================================
// DRAFT
// =============================================================================

/// Contact details of whoever files the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterContact {
    pub name: String,
    pub email: String,
    pub alt_email: String,
    pub phone: String,
    pub alt_phone: String,
}

/// Photo handed to the HTTP layer as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoRef {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoRef")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Child description as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildDraft {
    pub name: String,
    pub approx_age: u32,
    pub skin_complexion: String,
    pub city: String,
    /// Entered order is kept; blank entries are dropped on validation.
    pub birthmarks: Vec<String>,
    pub photo: Option<PhotoRef>,
}

/// Report under construction, owned by the submission flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub role: ReportRole,
    pub reporter: ReporterContact,
    pub child: ChildDraft,
    /// Where the child was found. Ignored for parent reports.
    pub found_address: String,
}

impl ReportDraft {
    /// Empty draft for the given role.
    pub fn for_role(role: ReportRole) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    /// True if nothing but the role has been filled in.
    pub fn is_empty(&self) -> bool {
        *self == Self::for_role(self.role)
    }
}

// =============================================================================
// VALIDATED REPORT
// =============================================================================

/// Child description that passed local checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDescribed {
    pub name: String,
    pub approx_age: u32,
    pub skin_complexion: String,
    pub city: String,
    pub birthmarks: Vec<String>,
    pub photo: PhotoRef,
}

/// A report ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// A parent reporting a missing child.
    Parent {
        reporter: ReporterContact,
        child: ChildDescribed,
    },
    /// A volunteer reporting a found child.
    Volunteer {
        reporter: ReporterContact,
        child: ChildDescribed,
        found_address: String,
    },
}

impl Report {
    pub fn role(&self) -> ReportRole {
        match self {
            Report::Parent { .. } => ReportRole::Parent,
            Report::Volunteer { .. } => ReportRole::Volunteer,
        }
    }

    pub fn reporter(&self) -> &ReporterContact {
        match self {
            Report::Parent { reporter, .. } | Report::Volunteer { reporter, .. } => reporter,
        }
    }

    pub fn child(&self) -> &ChildDescribed {
        match self {
            Report::Parent { child, .. } | Report::Volunteer { child, .. } => child,
        }
    }

    /// Address field as sent on the wire; parents always send an empty one.
    pub fn address(&self) -> &str {
        match self {
            Report::Parent { .. } => "",
            Report::Volunteer { found_address, .. } => found_address,
        }
    }

    /// Birthmarks encoded as the JSON array the backend expects in a form field.
    pub fn birthmarks_json(&self) -> String {
        serde_json::to_string(&self.child().birthmarks).unwrap_or_else(|_| "[]".to_string())
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Backend answer to `POST /api/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReportResponse {
    pub match_found: bool,
    #[serde(default)]
    pub submission_id: Option<SubmissionId>,
    #[serde(default)]
    pub match_score: Option<f64>,
}

/// What a successful submission led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Report stored, nothing matched yet.
    NoMatch,
    /// Report stored and paired; review the match under this id.
    MatchFound(SubmissionId),
}

impl SubmissionOutcome {
    pub fn submission_id(&self) -> Option<&SubmissionId> {
        match self {
            SubmissionOutcome::NoMatch => None,
            SubmissionOutcome::MatchFound(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child() -> ChildDescribed {
        ChildDescribed {
            name: "Mia".to_string(),
            approx_age: 6,
            skin_complexion: "fair".to_string(),
            city: "Pune".to_string(),
            birthmarks: vec!["left cheek".to_string(), "scar on knee".to_string()],
            photo: PhotoRef::new("mia.jpg", "image/jpeg", vec![1, 2, 3]),
        }
    }

    #[test]
    fn test_parent_sends_empty_address() {
        let report = Report::Parent {
            reporter: ReporterContact::default(),
            child: child(),
        };
        assert_eq!(report.address(), "");
        assert_eq!(report.role(), ReportRole::Parent);
    }

    #[test]
    fn test_birthmarks_json_keeps_order() {
        let report = Report::Volunteer {
            reporter: ReporterContact::default(),
            child: child(),
            found_address: "MG Road".to_string(),
        };
        assert_eq!(report.birthmarks_json(), r#"["left cheek","scar on knee"]"#);
    }

    #[test]
    fn test_response_without_optional_fields() {
        let resp: SubmitReportResponse = serde_json::from_str(r#"{"match_found":false}"#).unwrap();
        assert!(!resp.match_found);
        assert!(resp.submission_id.is_none());
    }

    #[test]
    fn test_response_with_match() {
        let resp: SubmitReportResponse = serde_json::from_str(
            r#"{"match_found":true,"submission_id":"77","match_score":0.928}"#,
        )
        .unwrap();
        assert_eq!(resp.submission_id, Some(SubmissionId::new("77")));
    }

    #[test]
    fn test_response_with_numeric_submission_id() {
        let resp: SubmitReportResponse =
            serde_json::from_str(r#"{"match_found":true,"submission_id":77}"#).unwrap();
        assert!(resp.match_found);
        assert_eq!(resp.submission_id, Some(SubmissionId::new("77")));
    }

    #[test]
    fn test_photo_debug_omits_bytes() {
        let photo = PhotoRef::new("a.png", "image/png", vec![0; 4096]);
        let rendered = format!("{:?}", photo);
        assert!(rendered.contains("4096"));
        assert!(rendered.len() < 200);
    }

    #[test]
    fn test_fresh_draft_is_empty() {
        let mut draft = ReportDraft::for_role(ReportRole::Volunteer);
        assert!(draft.is_empty());
        draft.found_address = "x".to_string();
        assert!(!draft.is_empty());
    }
}
