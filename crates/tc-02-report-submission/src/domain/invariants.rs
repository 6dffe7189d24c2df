//! # Local Checks
//!
//! Everything verified before a report leaves the client.

use super::entities::{ChildDescribed, Report, ReportDraft, ReporterContact};
use super::errors::SubmissionError;
use shared_types::{ReportRole, Session};

/// Drop blank birthmarks. Kept entries are sent as typed, in entered order.
pub fn normalize_birthmarks(raw: &[String]) -> Vec<String> {
    raw.iter()
        .filter(|mark| !mark.trim().is_empty())
        .cloned()
        .collect()
}

fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Build a sendable report from a draft.
///
/// # Errors
/// - `NotAuthenticated` if `session` is `None`
/// - `Validation("photo required")` if no photo is attached
/// - `Validation` if the reporter email or phone is blank
/// - `Validation` if a volunteer report has no found address
pub fn validate_draft(
    draft: &ReportDraft,
    session: Option<&Session>,
) -> Result<Report, SubmissionError> {
    if session.is_none() {
        return Err(SubmissionError::NotAuthenticated);
    }

    let photo = draft
        .child
        .photo
        .clone()
        .ok_or_else(|| SubmissionError::validation("photo required"))?;

    if !required(&draft.reporter.email) {
        return Err(SubmissionError::validation("reporter email required"));
    }
    if !required(&draft.reporter.phone) {
        return Err(SubmissionError::validation("reporter phone required"));
    }

    let reporter: ReporterContact = draft.reporter.clone();
    let child = ChildDescribed {
        name: draft.child.name.trim().to_string(),
        approx_age: draft.child.approx_age,
        skin_complexion: draft.child.skin_complexion.trim().to_string(),
        city: draft.child.city.trim().to_string(),
        birthmarks: normalize_birthmarks(&draft.child.birthmarks),
        photo,
    };

    match draft.role {
        ReportRole::Parent => Ok(Report::Parent { reporter, child }),
        ReportRole::Volunteer => {
            if !required(&draft.found_address) {
                return Err(SubmissionError::validation("found address required"));
            }
            Ok(Report::Volunteer {
                reporter,
                child,
                found_address: draft.found_address.trim().to_string(),
            })
        }
    }
}
